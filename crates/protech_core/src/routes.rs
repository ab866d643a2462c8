//! crates/protech_core/src/routes.rs
//!
//! The client-side route surface, the guard that keeps protected views behind
//! a session token, and the role-dependent navigation menu.

use tracing::{debug, info};

use crate::domain::{ProjectId, Role, Session};
use crate::ports::PortResult;
use crate::session::SessionContext;

//=========================================================================================
// Routes
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    AddProject,
    ViewProjects,
    EditProject(ProjectId),
    EmployeeViewProjects,
    Error,
}

impl Route {
    /// Maps a path onto a route. Anything unrecognised lands on the login page.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/user/login" => Route::Login,
            "/user/register" => Route::Register,
            "/home" => Route::Home,
            "/addproject" => Route::AddProject,
            "/viewproject" => Route::ViewProjects,
            "/employee/viewproject" => Route::EmployeeViewProjects,
            "/error" => Route::Error,
            other => match other.strip_prefix("/editproject/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Route::EditProject(ProjectId::from(id))
                }
                _ => Route::Login,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/user/login".to_string(),
            Route::Register => "/user/register".to_string(),
            Route::Home => "/home".to_string(),
            Route::AddProject => "/addproject".to_string(),
            Route::ViewProjects => "/viewproject".to_string(),
            Route::EditProject(id) => format!("/editproject/{}", id),
            Route::EmployeeViewProjects => "/employee/viewproject".to_string(),
            Route::Error => "/error".to_string(),
        }
    }

    /// Whether the route needs a signed-in user.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register | Route::Error)
    }
}

/// What a view asks the router to do after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(Route),
}

//=========================================================================================
// Route Guard
//=========================================================================================

#[derive(Clone)]
pub struct RouteGuard {
    session: SessionContext,
}

impl RouteGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Returns the route that should actually be shown for `requested`.
    pub async fn resolve(&self, requested: Route) -> PortResult<Route> {
        if !requested.is_protected() {
            return Ok(requested);
        }
        if self.session.is_authenticated().await? {
            Ok(requested)
        } else {
            info!("No session token, redirecting {} to login", requested.path());
            Ok(Route::Login)
        }
    }

    pub async fn resolve_path(&self, path: &str) -> PortResult<Route> {
        self.resolve(Route::parse(path)).await
    }
}

//=========================================================================================
// Navigation Menu
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Link { label: &'static str, route: Route },
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    /// Shown next to the links as `<name> / <role>`.
    pub user_label: String,
    pub items: Vec<MenuItem>,
}

impl NavMenu {
    pub fn for_session(session: &Session) -> Self {
        let mut items = vec![MenuItem::Link {
            label: "Home",
            route: Route::Home,
        }];
        match session.role {
            Role::Manager => {
                items.push(MenuItem::Link {
                    label: "Add Project",
                    route: Route::AddProject,
                });
                items.push(MenuItem::Link {
                    label: "View Project",
                    route: Route::ViewProjects,
                });
            }
            Role::Employee => items.push(MenuItem::Link {
                label: "View Project",
                route: Route::EmployeeViewProjects,
            }),
        }
        items.push(MenuItem::Logout);

        Self {
            user_label: format!("{} / {}", session.name, session.role),
            items,
        }
    }
}

/// The projects page appropriate for a role.
pub fn home_projects_route(role: Role) -> Route {
    match role {
        Role::Manager => Route::ViewProjects,
        Role::Employee => Route::EmployeeViewProjects,
    }
}

/// The "are you sure you want to logout?" prompt.
#[derive(Clone)]
pub struct LogoutPrompt {
    session: SessionContext,
    open: bool,
}

impl LogoutPrompt {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Clears the stored session and sends the user to the login page.
    pub async fn confirm(&mut self) -> PortResult<Navigation> {
        if !self.open {
            debug!("Logout confirmed without an open prompt, ignoring");
            return Ok(Navigation::Stay);
        }
        self.open = false;
        self.session.sign_out().await?;
        Ok(Navigation::To(Route::Login))
    }
}
