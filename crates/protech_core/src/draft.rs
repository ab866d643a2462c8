//! crates/protech_core/src/draft.rs
//!
//! The in-progress, form-local copy of a project.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::Project;

/// Date-only text format used by the form's date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The editable fields of the project form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectField {
    Title,
    Description,
    StartDate,
    EndDate,
    FrontendStack,
    BackendStack,
    Database,
    Status,
    CoverImage,
}

impl ProjectField {
    pub const ALL: [ProjectField; 9] = [
        ProjectField::Title,
        ProjectField::Description,
        ProjectField::StartDate,
        ProjectField::EndDate,
        ProjectField::FrontendStack,
        ProjectField::BackendStack,
        ProjectField::Database,
        ProjectField::Status,
        ProjectField::CoverImage,
    ];

    /// The label used in the form and in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectField::Title => "Project Title",
            ProjectField::Description => "Project Description",
            ProjectField::StartDate => "Start Date",
            ProjectField::EndDate => "End Date",
            ProjectField::FrontendStack => "Frontend Tech Stack",
            ProjectField::BackendStack => "Backend Tech Stack",
            ProjectField::Database => "Database",
            ProjectField::Status => "Status",
            ProjectField::CoverImage => "CoverImage",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, ProjectField::StartDate | ProjectField::EndDate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub frontend_stack: String,
    pub backend_stack: String,
    pub database: String,
    pub status: String,
    pub cover_image: String,
    /// Data URI of a freshly attached file, shown as a preview.
    pub file_preview: Option<String>,
}

impl ProjectDraft {
    /// Pre-populates a draft from a persisted project. Dates become
    /// date-only strings.
    pub fn from_project(project: &Project) -> Self {
        let d = &project.details;
        Self {
            title: d.title.clone(),
            description: d.description.clone(),
            start_date: d.start_date.format(DATE_FORMAT).to_string(),
            end_date: d.end_date.format(DATE_FORMAT).to_string(),
            frontend_stack: d.frontend_stack.clone(),
            backend_stack: d.backend_stack.clone(),
            database: d.database.clone(),
            status: d.status.clone(),
            cover_image: d.cover_image.clone(),
            file_preview: None,
        }
    }

    pub fn get(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Title => &self.title,
            ProjectField::Description => &self.description,
            ProjectField::StartDate => &self.start_date,
            ProjectField::EndDate => &self.end_date,
            ProjectField::FrontendStack => &self.frontend_stack,
            ProjectField::BackendStack => &self.backend_stack,
            ProjectField::Database => &self.database,
            ProjectField::Status => &self.status,
            ProjectField::CoverImage => &self.cover_image,
        }
    }

    pub fn set(&mut self, field: ProjectField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProjectField::Title => self.title = value,
            ProjectField::Description => self.description = value,
            ProjectField::StartDate => self.start_date = value,
            ProjectField::EndDate => self.end_date = value,
            ProjectField::FrontendStack => self.frontend_stack = value,
            ProjectField::BackendStack => self.backend_stack = value,
            ProjectField::Database => self.database = value,
            ProjectField::Status => self.status = value,
            ProjectField::CoverImage => self.cover_image = value,
        }
    }

    /// The earliest end date the date picker should offer. Only a hint.
    pub fn end_date_min(&self) -> Option<&str> {
        let start = self.start_date.trim();
        (!start.is_empty()).then_some(start)
    }
}

/// Parses a calendar date given either as `YYYY-MM-DD` or as a full
/// timestamp. Timestamps resolve to their UTC calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}
