//! services/client/src/commands/session.rs
//!
//! Session commands: storing a token issued by the login service, logging out,
//! showing the role-specific menu and resolving paths through the guard.

use protech_core::domain::{Role, Session};
use protech_core::routes::{LogoutPrompt, NavMenu, Navigation, Route};
use tracing::info;

use super::{confirm, Args, Outcome};
use crate::error::ClientError;
use crate::render::render_menu;
use crate::state::AppState;

pub async fn login(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let name = args.require("--name")?;
    let role_str = args.require("--role")?;
    let token = args.require("--token")?;

    let role = Role::parse(role_str).ok_or_else(|| {
        ClientError::Usage(format!("--role must be Manager or Employee, got '{}'", role_str))
    })?;
    if token.trim().is_empty() {
        return Err(ClientError::Usage("--token must not be empty".to_string()));
    }

    let session = Session {
        role,
        name: name.to_string(),
        token: token.to_string(),
    };
    state.session.sign_in(&session).await?;
    println!("Signed in as {} / {}", session.name, session.role);
    Ok(Outcome::Navigate(Route::Home))
}

pub async fn logout(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let mut prompt = LogoutPrompt::new(state.session.clone());
    prompt.open();

    if args.has("--yes") || confirm("Are you sure you want to logout?").await? {
        if let Navigation::To(route) = prompt.confirm().await? {
            println!("Signed out. Sign in again at {}", route.path());
        }
        Ok(Outcome::Done)
    } else {
        prompt.cancel();
        info!("Logout cancelled");
        Ok(Outcome::Done)
    }
}

pub async fn whoami(state: &AppState) -> Result<Outcome, ClientError> {
    let Some(session) = super::enter(state, &Route::Home).await? else {
        return Ok(Outcome::Navigate(Route::Login));
    };
    println!("{}", render_menu(&NavMenu::for_session(&session)));
    Ok(Outcome::Done)
}

/// Shows where a path would actually land for the current session.
pub async fn open(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let path = args.require_positional(0, "path")?;
    let route = state.guard.resolve_path(path).await?;
    println!("{}", route.path());
    Ok(Outcome::Done)
}
