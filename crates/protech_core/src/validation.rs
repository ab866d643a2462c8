//! crates/protech_core/src/validation.rs
//!
//! Submit-time validation of a project draft.
//!
//! Every field is required. Dates must also parse, but the order of start and
//! end date is deliberately not checked here.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::ProjectDetails;
use crate::draft::{parse_calendar_date, ProjectDraft, ProjectField};

/// Per-field validation messages, ordered like the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ProjectField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ProjectField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: ProjectField, message: String) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Checks the draft and returns one message per offending field.
pub fn validate(draft: &ProjectDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in ProjectField::ALL {
        let value = draft.get(field).trim();
        if value.is_empty() {
            errors.insert(field, format!("{} is required", field.label()));
        } else if field.is_date() && parse_calendar_date(value).is_none() {
            errors.insert(field, format!("{} must be a valid date", field.label()));
        }
    }
    errors
}

/// Validates the draft and builds the payload sent to the server.
///
/// Values are sent as typed; trimming only decides emptiness.
pub fn to_details(draft: &ProjectDraft) -> Result<ProjectDetails, FieldErrors> {
    let errors = validate(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(start_date), Some(end_date)) = (
        parse_calendar_date(&draft.start_date),
        parse_calendar_date(&draft.end_date),
    ) else {
        // validate() has already rejected unparseable dates
        return Err(errors);
    };

    Ok(ProjectDetails {
        title: draft.title.clone(),
        description: draft.description.clone(),
        start_date,
        end_date,
        frontend_stack: draft.frontend_stack.clone(),
        backend_stack: draft.backend_stack.clone(),
        database: draft.database.clone(),
        status: draft.status.clone(),
        cover_image: draft.cover_image.clone(),
    })
}
