//! crates/protech_core/src/list_view.rs
//!
//! The view-model behind the projects table: fetches the collection, filters it
//! client-side, and owns the popup state for delete confirmation and the
//! read-only info card.
//!
//! All methods take `&self` so a view can be shared with event handlers. State
//! lives behind a mutex that is never held across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::domain::{Project, ProjectId, Role};
use crate::draft::DATE_FORMAT;
use crate::ports::ProjectApi;
use crate::routes::{Navigation, Route};

/// Shown as the only table row when nothing matches.
pub const NO_RECORDS_MESSAGE: &str = "Oops! No records found";

pub const TABLE_HEADERS: [&str; 9] = [
    "Title",
    "Description",
    "Start Date",
    "End Date",
    "Frontend Tech Stack",
    "Backend Tech Stack",
    "Database",
    "Status",
    "Action",
];

//=========================================================================================
// State
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Vec<Project>),
    LoadFailed,
}

/// At most one popup is ever open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    None,
    ConfirmingDelete(ProjectId),
    /// A snapshot of the project taken when the popup opened.
    ShowingInfo(Project),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("This action is only available to managers")]
    NotPermitted,
    #[error("Projects have not been loaded")]
    NotLoaded,
    #[error("No project with id {0} in the current list")]
    UnknownProject(ProjectId),
}

/// Actions offered by the table, decided by the viewer's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub search: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        let manager = role == Role::Manager;
        Self {
            search: manager,
            edit: manager,
            delete: manager,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub frontend_stack: String,
    pub backend_stack: String,
    pub database: String,
    pub status: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        let d = &project.details;
        Self {
            id: project.id.clone(),
            title: d.title.clone(),
            description: d.description.clone(),
            start_date: d.start_date.format(DATE_FORMAT).to_string(),
            end_date: d.end_date.format(DATE_FORMAT).to_string(),
            frontend_stack: d.frontend_stack.clone(),
            backend_stack: d.backend_stack.clone(),
            database: d.database.clone(),
            status: d.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    NoRecords,
    Project(ProjectRow),
}

//=========================================================================================
// Pure helpers
//=========================================================================================

/// Projects whose title or description contains `term`, ignoring case, in
/// their original order. An empty term keeps everything.
pub fn filter_projects<'a>(projects: &'a [Project], term: &str) -> Vec<&'a Project> {
    let needle = term.to_lowercase();
    projects
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.title().to_lowercase().contains(&needle)
                || p.description().to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn render_rows(projects: &[&Project]) -> Vec<TableRow> {
    if projects.is_empty() {
        return vec![TableRow::NoRecords];
    }
    projects
        .iter()
        .map(|p| TableRow::Project(ProjectRow::from(*p)))
        .collect()
}

//=========================================================================================
// View-Model
//=========================================================================================

struct ViewState {
    load: LoadState,
    search: String,
    popup: Popup,
    /// The project whose delete request is still awaiting the server.
    deleting: Option<ProjectId>,
}

pub struct ProjectListView {
    api: Arc<dyn ProjectApi>,
    capabilities: Capabilities,
    state: Mutex<ViewState>,
    mounted: AtomicBool,
}

impl ProjectListView {
    pub fn new(api: Arc<dyn ProjectApi>, role: Role) -> Self {
        Self {
            api,
            capabilities: Capabilities::for_role(role),
            state: Mutex::new(ViewState {
                load: LoadState::Idle,
                search: String::new(),
                popup: Popup::None,
                deleting: None,
            }),
            mounted: AtomicBool::new(true),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn load_state(&self) -> LoadState {
        self.state().load.clone()
    }

    pub fn popup(&self) -> Popup {
        self.state().popup.clone()
    }

    pub fn search_term(&self) -> String {
        self.state().search.clone()
    }

    /// Initial fetch when the view appears: `Idle -> Loading -> Loaded | LoadFailed`.
    pub async fn mount(&self) -> Navigation {
        self.state().load = LoadState::Loading;
        info!("Loading projects");
        self.refresh().await
    }

    /// Re-fetches the whole collection. A failure moves to `LoadFailed` and
    /// asks for the error page; there is no retry.
    pub async fn refresh(&self) -> Navigation {
        let result = self.api.list_projects().await;

        if !self.is_mounted() {
            debug!("Project list arrived after the view was closed, dropping it");
            return Navigation::Stay;
        }

        match result {
            Ok(projects) => {
                debug!("Loaded {} projects", projects.len());
                self.state().load = LoadState::Loaded(projects);
                Navigation::Stay
            }
            Err(e) => {
                error!("Failed to load projects: {}", e);
                self.state().load = LoadState::LoadFailed;
                Navigation::To(Route::Error)
            }
        }
    }

    /// Marks the view as gone. Responses still in flight are discarded.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn set_search(&self, term: impl Into<String>) -> Result<(), ViewError> {
        if !self.capabilities.search {
            return Err(ViewError::NotPermitted);
        }
        self.state().search = term.into();
        Ok(())
    }

    /// The loaded projects narrowed by the current search term, recomputed
    /// from scratch on every call.
    pub fn filtered_projects(&self) -> Vec<Project> {
        let state = self.state();
        match &state.load {
            LoadState::Loaded(projects) => filter_projects(projects, &state.search)
                .into_iter()
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn rows(&self) -> Vec<TableRow> {
        let projects = self.filtered_projects();
        render_rows(&projects.iter().collect::<Vec<_>>())
    }

    pub fn edit_route(&self, id: &ProjectId) -> Result<Route, ViewError> {
        if !self.capabilities.edit {
            return Err(ViewError::NotPermitted);
        }
        Ok(Route::EditProject(id.clone()))
    }

    // --- Info popup ---

    pub fn show_info(&self, id: &ProjectId) -> Result<(), ViewError> {
        let mut state = self.state();
        let LoadState::Loaded(projects) = &state.load else {
            return Err(ViewError::NotLoaded);
        };
        let snapshot = projects
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| ViewError::UnknownProject(id.clone()))?;
        state.popup = Popup::ShowingInfo(snapshot);
        Ok(())
    }

    pub fn close_info(&self) {
        let mut state = self.state();
        if matches!(state.popup, Popup::ShowingInfo(_)) {
            state.popup = Popup::None;
        }
    }

    // --- Delete flow ---

    /// Opens the confirmation popup. Nothing is deleted yet.
    pub fn request_delete(&self, id: &ProjectId) -> Result<(), ViewError> {
        if !self.capabilities.delete {
            return Err(ViewError::NotPermitted);
        }
        self.state().popup = Popup::ConfirmingDelete(id.clone());
        Ok(())
    }

    pub fn cancel_delete(&self) {
        let mut state = self.state();
        if matches!(state.popup, Popup::ConfirmingDelete(_)) {
            state.popup = Popup::None;
        }
    }

    /// Deletes the pending project, then reloads the full list. The popup is
    /// closed before the request goes out; on failure the list is left
    /// untouched. Only one delete runs at a time.
    pub async fn confirm_delete(&self) -> Navigation {
        let pending = {
            let mut state = self.state();
            if let Some(running) = &state.deleting {
                debug!("Delete of {} still running, ignoring confirm", running);
                return Navigation::Stay;
            }
            let Popup::ConfirmingDelete(id) = state.popup.clone() else {
                warn!("Delete confirmed with no pending project");
                return Navigation::Stay;
            };
            state.popup = Popup::None;
            state.deleting = Some(id.clone());
            id
        };

        let result = self.api.delete_project(&pending).await;
        self.state().deleting = None;

        match result {
            Ok(()) => {
                info!("Deleted project {}", pending);
                if self.is_mounted() {
                    self.refresh().await
                } else {
                    debug!("View closed during delete, skipping reload");
                    Navigation::Stay
                }
            }
            Err(e) => {
                error!("Failed to delete project {}: {}", pending, e);
                if self.is_mounted() {
                    Navigation::To(Route::Error)
                } else {
                    Navigation::Stay
                }
            }
        }
    }
}
