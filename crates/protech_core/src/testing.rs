//! In-memory port fakes shared by the unit tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::domain::{Project, ProjectDetails, ProjectId, Session};
use crate::draft::ProjectDraft;
use crate::ports::{CoverImageReader, PortError, PortResult, ProjectApi, SessionStore};

pub fn sample_details(title: &str, description: &str) -> ProjectDetails {
    ProjectDetails {
        title: title.to_string(),
        description: description.to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        frontend_stack: "React".to_string(),
        backend_stack: "Express".to_string(),
        database: "MongoDB".to_string(),
        status: "Active".to_string(),
        cover_image: "data:image/png;base64,AAAA".to_string(),
    }
}

pub fn sample_project(id: &str, title: &str, description: &str) -> Project {
    Project {
        id: ProjectId::from(id),
        details: sample_details(title, description),
    }
}

pub fn filled_draft() -> ProjectDraft {
    ProjectDraft::from_project(&sample_project("unused", "Draft", "A draft project"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Get(ProjectId),
    Create(ProjectDetails),
    Update(ProjectId, ProjectDetails),
    Delete(ProjectId),
}

impl ApiCall {
    fn op(&self) -> &'static str {
        match self {
            ApiCall::List => "list",
            ApiCall::Get(_) => "get",
            ApiCall::Create(_) => "create",
            ApiCall::Update(..) => "update",
            ApiCall::Delete(_) => "delete",
        }
    }
}

/// Lets a test hold calls open until it decides to release them.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct FakeProjectApi {
    projects: Mutex<Vec<Project>>,
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<&'static str, PortError>>,
    gate: Option<Arc<Gate>>,
    next_id: AtomicUsize,
}

impl FakeProjectApi {
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            ..Default::default()
        }
    }

    pub fn gated(projects: Vec<Project>) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        let api = Self {
            projects: Mutex::new(projects),
            gate: Some(gate.clone()),
            ..Default::default()
        };
        (api, gate)
    }

    /// Makes every later call of `op` ("list", "get", ...) fail with `error`.
    pub fn fail(&self, op: &'static str, error: PortError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    pub fn recover(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }

    async fn record(&self, call: ApiCall) -> PortResult<()> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        match self.failures.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectApi for FakeProjectApi {
    async fn list_projects(&self) -> PortResult<Vec<Project>> {
        self.record(ApiCall::List).await?;
        Ok(self.projects())
    }

    async fn get_project(&self, id: &ProjectId) -> PortResult<Project> {
        self.record(ApiCall::Get(id.clone())).await?;
        self.projects()
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| PortError::NotFound(id.to_string()))
    }

    async fn create_project(&self, details: &ProjectDetails) -> PortResult<Project> {
        self.record(ApiCall::Create(details.clone())).await?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let project = Project {
            id: ProjectId(format!("new-{n}")),
            details: details.clone(),
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        details: &ProjectDetails,
    ) -> PortResult<Project> {
        self.record(ApiCall::Update(id.clone(), details.clone())).await?;
        let mut projects = self.projects.lock().unwrap();
        let slot = projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PortError::NotFound(id.to_string()))?;
        slot.details = details.clone();
        Ok(slot.clone())
    }

    async fn delete_project(&self, id: &ProjectId) -> PortResult<()> {
        self.record(ApiCall::Delete(id.clone())).await?;
        self.projects.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    pub fn replace(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> PortResult<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &Session) -> PortResult<()> {
        self.replace(Some(session.clone()));
        Ok(())
    }

    async fn clear(&self) -> PortResult<()> {
        self.replace(None);
        Ok(())
    }
}

/// Serves canned data URIs keyed by path; unknown paths fail with `Io`.
#[derive(Default)]
pub struct FakeCoverReader {
    files: HashMap<PathBuf, String>,
}

impl FakeCoverReader {
    pub fn with_file(path: &str, data_uri: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from(path), data_uri.to_string());
        Self { files }
    }
}

#[async_trait]
impl CoverImageReader for FakeCoverReader {
    async fn read_as_data_uri(&self, path: &Path) -> PortResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| PortError::Io(format!("cannot read {}", path.display())))
    }
}
