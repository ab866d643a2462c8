//! services/client/src/render.rs
//!
//! Plain-text rendering of the view-models for the terminal.

use protech_core::domain::Project;
use protech_core::draft::DATE_FORMAT;
use protech_core::list_view::{Capabilities, TableRow, NO_RECORDS_MESSAGE, TABLE_HEADERS};
use protech_core::routes::{MenuItem, NavMenu};
use protech_core::validation::FieldErrors;

fn actions(capabilities: Capabilities) -> String {
    let mut actions = Vec::new();
    if capabilities.edit {
        actions.push("Edit");
    }
    if capabilities.delete {
        actions.push("Delete");
    }
    actions.push("View More Info");
    actions.join(", ")
}

/// Renders the projects table with left-aligned, padded columns.
pub fn render_table(rows: &[TableRow], capabilities: Capabilities) -> String {
    let mut lines: Vec<Vec<String>> = vec![TABLE_HEADERS.iter().map(|h| h.to_string()).collect()];
    let mut no_records = false;

    for row in rows {
        match row {
            TableRow::NoRecords => no_records = true,
            TableRow::Project(p) => lines.push(vec![
                p.title.clone(),
                p.description.clone(),
                p.start_date.clone(),
                p.end_date.clone(),
                p.frontend_stack.clone(),
                p.backend_stack.clone(),
                p.database.clone(),
                p.status.clone(),
                format!("[{}] {}", p.id, actions(capabilities)),
            ]),
        }
    }

    let widths: Vec<usize> = (0..TABLE_HEADERS.len())
        .map(|col| lines.iter().map(|l| l[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }
    if no_records {
        out.push_str(NO_RECORDS_MESSAGE);
        out.push('\n');
    }
    out
}

/// The read-only "Project Information" card.
pub fn render_info(project: &Project) -> String {
    let d = &project.details;
    [
        "Project Information".to_string(),
        format!("Cover: {}", abbreviate(&d.cover_image, 60)),
        format!("Title: {}", d.title),
        format!("Description: {}", d.description),
        format!("Start Date: {}", d.start_date.format(DATE_FORMAT)),
        format!("End Date: {}", d.end_date.format(DATE_FORMAT)),
        format!("Frontend Tech Stack: {}", d.frontend_stack),
        format!("Backend Tech Stack: {}", d.backend_stack),
        format!("Database: {}", d.database),
        format!("Status: {}", d.status),
    ]
    .join("\n")
}

pub fn render_menu(menu: &NavMenu) -> String {
    let items: Vec<String> = menu
        .items
        .iter()
        .map(|item| match item {
            MenuItem::Link { label, route } => format!("{} ({})", label, route.path()),
            MenuItem::Logout => "Logout".to_string(),
        })
        .collect();
    format!("ProTechSuite  {}\n  {}", menu.user_label, items.join("\n  "))
}

pub fn render_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field.label(), message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Data URIs can be megabytes long; show just the start.
fn abbreviate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max).collect();
        format!("{}...", head)
    }
}
