//! services/client/src/commands/projects.rs
//!
//! The project screens: the table, the info card, the create/edit form and the
//! delete confirmation.

use std::path::Path;

use protech_core::domain::{ProjectId, Session};
use protech_core::draft::{parse_calendar_date, ProjectField, DATE_FORMAT};
use protech_core::form::{FormError, ProjectForm};
use protech_core::list_view::{Capabilities, Popup, ProjectListView, ViewError};
use protech_core::routes::{home_projects_route, Navigation, Route};
use tracing::{error, info};

use super::{confirm, enter, Args, Outcome};
use crate::error::ClientError;
use crate::render::{render_errors, render_info, render_table};
use crate::state::AppState;

/// Command-line flag for each form field. The cover is handled separately
/// because it names a file.
const FIELD_FLAGS: [(&str, ProjectField); 8] = [
    ("--title", ProjectField::Title),
    ("--description", ProjectField::Description),
    ("--start", ProjectField::StartDate),
    ("--end", ProjectField::EndDate),
    ("--frontend", ProjectField::FrontendStack),
    ("--backend", ProjectField::BackendStack),
    ("--database", ProjectField::Database),
    ("--status", ProjectField::Status),
];

/// Opens the projects table for the signed-in user.
async fn open_table(state: &AppState) -> Result<Result<ProjectListView, Route>, ClientError> {
    let Some(session) = state.session.current().await? else {
        return Ok(Err(Route::Login));
    };
    let route = home_projects_route(session.role);
    if enter(state, &route).await?.is_none() {
        return Ok(Err(Route::Login));
    }

    let view = ProjectListView::new(state.api.clone(), session.role);
    match view.mount().await {
        Navigation::Stay => Ok(Ok(view)),
        Navigation::To(route) => Ok(Err(route)),
    }
}

pub async fn list(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let view = match open_table(state).await? {
        Ok(view) => view,
        Err(route) => return Ok(Outcome::Navigate(route)),
    };
    if let Some(term) = args.value("--search") {
        view.set_search(term)?;
    }
    print!("{}", render_table(&view.rows(), view.capabilities()));
    view.unmount();
    Ok(Outcome::Done)
}

pub async fn show(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let id = ProjectId::from(args.require_positional(0, "id")?);
    let view = match open_table(state).await? {
        Ok(view) => view,
        Err(route) => return Ok(Outcome::Navigate(route)),
    };

    view.show_info(&id)?;
    if let Popup::ShowingInfo(project) = view.popup() {
        println!("{}", render_info(&project));
    }
    view.close_info();
    view.unmount();
    Ok(Outcome::Done)
}

pub async fn delete(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let id = ProjectId::from(args.require_positional(0, "id")?);
    let view = match open_table(state).await? {
        Ok(view) => view,
        Err(route) => return Ok(Outcome::Navigate(route)),
    };

    view.request_delete(&id)?;
    if !args.has("--yes") && !confirm("Are you sure you want to delete?").await? {
        view.cancel_delete();
        println!("Delete cancelled");
        view.unmount();
        return Ok(Outcome::Done);
    }

    let navigation = view.confirm_delete().await;
    view.unmount();
    match navigation {
        Navigation::Stay => {
            print!("{}", render_table(&view.rows(), view.capabilities()));
            Ok(Outcome::Done)
        }
        Navigation::To(route) => Ok(Outcome::Navigate(route)),
    }
}

pub async fn create(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let Some(session) = enter(state, &Route::AddProject).await? else {
        return Ok(Outcome::Navigate(Route::Login));
    };
    require_manager(&session)?;

    let form = ProjectForm::create(state.api.clone(), state.covers.clone());
    submit(&form, args).await
}

pub async fn edit(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    let id = ProjectId::from(args.require_positional(0, "id")?);
    let Some(session) = enter(state, &Route::EditProject(id.clone())).await? else {
        return Ok(Outcome::Navigate(Route::Login));
    };
    require_manager(&session)?;

    let form = match ProjectForm::edit(state.api.clone(), state.covers.clone(), id).await {
        Ok(form) => form,
        Err(e) => {
            error!("Cannot open the edit form: {}", e);
            return Ok(Outcome::Navigate(Route::Error));
        }
    };
    submit(&form, args).await
}

fn require_manager(session: &Session) -> Result<(), ClientError> {
    if Capabilities::for_role(session.role).edit {
        Ok(())
    } else {
        Err(ViewError::NotPermitted.into())
    }
}

/// Copies the given options into the draft, attaches the cover and saves.
async fn submit(form: &ProjectForm, args: &Args) -> Result<Outcome, ClientError> {
    println!("{}", form.heading());
    for (flag, field) in FIELD_FLAGS {
        if let Some(value) = args.value(flag) {
            form.set_field(field, value);
        }
    }
    if let Some(cover) = args.value("--cover") {
        form.attach_cover(Path::new(cover)).await?;
    }

    let draft = form.draft();
    let earliest_end = draft.end_date_min().and_then(parse_calendar_date);
    if let (Some(min), Some(end)) = (earliest_end, parse_calendar_date(&draft.end_date)) {
        if end < min {
            println!("Note: End Date is before Start Date ({})", min.format(DATE_FORMAT));
        }
    }

    println!("{}...", form.submit_label());
    match form.save().await {
        Ok(project) => {
            info!("Project {} saved", project.id);
            println!("{}", form.success_message());
            match form.acknowledge_success() {
                Navigation::To(route) => Ok(Outcome::Navigate(route)),
                Navigation::Stay => Ok(Outcome::Done),
            }
        }
        Err(FormError::Invalid(errors)) => {
            println!("{}", render_errors(&errors));
            Ok(Outcome::Invalid(errors))
        }
        Err(e) => Err(e.into()),
    }
}
