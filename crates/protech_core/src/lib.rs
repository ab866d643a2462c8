pub mod domain;
pub mod draft;
pub mod form;
pub mod list_view;
pub mod ports;
pub mod routes;
pub mod session;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{Project, ProjectDetails, ProjectId, Role, Session};
pub use draft::{ProjectDraft, ProjectField};
pub use form::{FormError, FormMode, FormState, ProjectForm};
pub use list_view::{LoadState, Popup, ProjectListView, TableRow, ViewError};
pub use ports::{CoverImageReader, PortError, PortResult, ProjectApi, SessionStore};
pub use routes::{Navigation, Route, RouteGuard};
pub use session::SessionContext;
pub use validation::FieldErrors;
