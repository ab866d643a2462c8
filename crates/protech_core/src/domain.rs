//! crates/protech_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire or storage format.

use chrono::NaiveDate;
use std::fmt;

/// The server-assigned identifier of a persisted project.
///
/// Opaque to the client: the server may hand out Mongo-style object ids or
/// numbers, both are carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        ProjectId(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        ProjectId(s.to_string())
    }
}

/// Every field of a project except its identity. This is also the payload
/// sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frontend_stack: String,
    pub backend_stack: String,
    pub database: String,
    pub status: String,
    /// A `data:` URI produced from an uploaded file, or a plain URL.
    pub cover_image: String,
}

/// A project that originated from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub details: ProjectDetails,
}

impl Project {
    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }
}

// Represents the signed-in user's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Parses the stored role string. Only the exact spelling `Manager`
    /// grants manager rights.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Manager" => Some(Role::Manager),
            "Employee" => Some(Role::Employee),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user for the current client context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    pub name: String,
    pub token: String,
}

impl Session {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}
