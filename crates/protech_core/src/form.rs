//! crates/protech_core/src/form.rs
//!
//! The create/edit form for a single project.
//!
//! Whether the form creates or updates is decided once, at construction, and
//! never changes afterwards.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::domain::{Project, ProjectId};
use crate::draft::{ProjectDraft, ProjectField};
use crate::ports::{CoverImageReader, PortError, PortResult, ProjectApi};
use crate::routes::{Navigation, Route};
use crate::validation::{self, FieldErrors};

/// File extensions the cover picker accepts.
pub const COVER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProjectId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Saved(Project),
    /// The server rejected the write or could not be reached.
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fix the highlighted fields: {0}")]
    Invalid(FieldErrors),
    #[error("A save for this project is already in progress")]
    SubmitInFlight,
    #[error("Saving the project failed: {0}")]
    WriteFailed(PortError),
}

struct FormInner {
    draft: ProjectDraft,
    errors: FieldErrors,
    state: FormState,
}

/// Clears the in-flight flag when a submit finishes, however it finishes.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ProjectForm {
    api: Arc<dyn ProjectApi>,
    covers: Arc<dyn CoverImageReader>,
    mode: FormMode,
    inner: Mutex<FormInner>,
    in_flight: AtomicBool,
}

impl ProjectForm {
    fn with_draft(
        api: Arc<dyn ProjectApi>,
        covers: Arc<dyn CoverImageReader>,
        mode: FormMode,
        draft: ProjectDraft,
    ) -> Self {
        Self {
            api,
            covers,
            mode,
            inner: Mutex::new(FormInner {
                draft,
                errors: FieldErrors::default(),
                state: FormState::Editing,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// A blank form that will create a new project.
    pub fn create(api: Arc<dyn ProjectApi>, covers: Arc<dyn CoverImageReader>) -> Self {
        Self::with_draft(api, covers, FormMode::Create, ProjectDraft::default())
    }

    /// Loads project `id` and opens it for editing.
    pub async fn edit(
        api: Arc<dyn ProjectApi>,
        covers: Arc<dyn CoverImageReader>,
        id: ProjectId,
    ) -> PortResult<Self> {
        let project = api.get_project(&id).await.map_err(|e| {
            error!("Failed to load project {} for editing: {}", id, e);
            e
        })?;
        debug!("Loaded project {} for editing", id);
        let draft = ProjectDraft::from_project(&project);
        Ok(Self::with_draft(api, covers, FormMode::Edit(id), draft))
    }

    fn inner(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Project",
            FormMode::Edit(_) => "Edit Project",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Project",
            FormMode::Edit(_) => "Update Project",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Successfully Added!",
            FormMode::Edit(_) => "Updated Successfully!",
        }
    }

    pub fn draft(&self) -> ProjectDraft {
        self.inner().draft.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.inner().errors.clone()
    }

    pub fn state(&self) -> FormState {
        self.inner().state.clone()
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Updates one field. No validation happens until submit.
    pub fn set_field(&self, field: ProjectField, value: impl Into<String>) {
        self.inner().draft.set(field, value);
    }

    /// Runs the submit-time checks and keeps the messages for display.
    pub fn validate(&self) -> FieldErrors {
        let mut inner = self.inner();
        let errors = validation::validate(&inner.draft);
        inner.errors = errors.clone();
        errors
    }

    /// Reads the chosen file and stores it as the cover image. The draft only
    /// changes once the file has been fully encoded.
    pub async fn attach_cover(&self, path: &Path) -> PortResult<()> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !COVER_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PortError::Unsupported(format!(
                "cover image must be one of .{}",
                COVER_EXTENSIONS.join(", .")
            )));
        }

        let data_uri = self.covers.read_as_data_uri(path).await.map_err(|e| {
            warn!("Could not read cover image {}: {}", path.display(), e);
            e
        })?;

        let mut inner = self.inner();
        inner.draft.cover_image = data_uri.clone();
        inner.draft.file_preview = Some(data_uri);
        Ok(())
    }

    /// Validates and submits the draft.
    ///
    /// Create mode always calls `create_project`, edit mode always calls
    /// `update_project`. A second call while one is running is refused.
    pub async fn save(&self) -> Result<Project, FormError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Ignoring submit while another is in flight");
            return Err(FormError::SubmitInFlight);
        }
        let _guard = SubmitGuard(&self.in_flight);

        let details = {
            let mut inner = self.inner();
            match validation::to_details(&inner.draft) {
                Ok(details) => {
                    inner.errors = FieldErrors::default();
                    inner.state = FormState::Submitting;
                    details
                }
                Err(errors) => {
                    inner.errors = errors.clone();
                    return Err(FormError::Invalid(errors));
                }
            }
        };

        let result = match &self.mode {
            FormMode::Create => self.api.create_project(&details).await,
            FormMode::Edit(id) => self.api.update_project(id, &details).await,
        };

        let mut inner = self.inner();
        match result {
            Ok(project) => {
                info!("Saved project {}", project.id);
                inner.state = FormState::Saved(project.clone());
                Ok(project)
            }
            Err(e) => {
                error!("Failed to save project: {}", e);
                inner.state = FormState::WriteFailed(e.to_string());
                Err(FormError::WriteFailed(e))
            }
        }
    }

    /// Dismisses the success popup and heads back to the project list.
    pub fn acknowledge_success(&self) -> Navigation {
        let mut inner = self.inner();
        if matches!(inner.state, FormState::Saved(_)) {
            inner.state = FormState::Editing;
            Navigation::To(Route::ViewProjects)
        } else {
            Navigation::Stay
        }
    }
}
