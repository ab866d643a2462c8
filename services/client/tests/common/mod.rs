//! Shared helpers for the client integration tests: an in-process mock of the
//! project REST API and a throwaway session file.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use client_lib::adapters::{FileSessionStore, HttpProjectApi};
use protech_core::domain::{Role, Session};
use protech_core::session::SessionContext;

pub const TOKEN: &str = "test-token-123";

/// One request as the mock server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockState {
    projects: Mutex<Vec<Value>>,
    requests: Mutex<Vec<Recorded>>,
    list_status: Mutex<Option<StatusCode>>,
    garbage_list: AtomicBool,
    next_id: AtomicUsize,
}

impl MockState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn projects(&self) -> Vec<Value> {
        self.projects.lock().unwrap().clone()
    }

    /// Makes `GET /api/projects` answer with `status`.
    pub fn fail_list(&self, status: StatusCode) {
        *self.list_status.lock().unwrap() = Some(status);
    }

    /// Makes `GET /api/projects` answer 200 with a body that is not JSON.
    pub fn garble_list(&self) {
        self.garbage_list.store(true, Ordering::SeqCst);
    }

    fn record(&self, method: Method, path: String, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            method,
            path,
            authorization,
            body,
        });
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: Arc<MockState>,
}

pub fn project_json(id: &str, title: &str, description: &str) -> Value {
    json!({
        "ProjectId": id,
        "ProjectTitle": title,
        "ProjectDescription": description,
        "StartDate": "2024-01-05T00:00:00.000Z",
        "EndDate": "2024-03-01T00:00:00.000Z",
        "FrontEndTechStack": "React",
        "BackendTechStack": "Express",
        "Database": "MongoDB",
        "Status": "Active",
        "CoverImage": "data:image/png;base64,AAAA"
    })
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty())
}

fn id_of(project: &Value) -> Option<&str> {
    project["ProjectId"].as_str()
}

async fn list_projects(State(s): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    s.record(Method::GET, "/api/projects".into(), &headers, None);
    if let Some(status) = *s.list_status.lock().unwrap() {
        return status.into_response();
    }
    if s.garbage_list.load(Ordering::SeqCst) {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }
    Json(Value::Array(s.projects())).into_response()
}

async fn create_project(
    State(s): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    s.record(Method::POST, "/api/projects".into(), &headers, Some(body.clone()));
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let n = s.next_id.fetch_add(1, Ordering::SeqCst);
    let mut created = body;
    created["ProjectId"] = json!(format!("srv-{n}"));
    s.projects.lock().unwrap().push(created.clone());
    Json(created).into_response()
}

async fn get_project(
    State(s): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    s.record(Method::GET, format!("/api/projects/{id}"), &headers, None);
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let found = s
        .projects()
        .into_iter()
        .find(|p| id_of(p) == Some(id.as_str()));
    match found {
        Some(p) => Json(p).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_project(
    State(s): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    s.record(Method::PUT, format!("/api/projects/{id}"), &headers, Some(body.clone()));
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut projects = s.projects.lock().unwrap();
    match projects.iter_mut().find(|p| id_of(p) == Some(id.as_str())) {
        Some(slot) => {
            let mut updated = body;
            updated["ProjectId"] = json!(id);
            *slot = updated.clone();
            Json(updated).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_project(
    State(s): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    s.record(Method::DELETE, format!("/api/projects/{id}"), &headers, None);
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut projects = s.projects.lock().unwrap();
    let before = projects.len();
    projects.retain(|p| id_of(p) != Some(id.as_str()));
    if projects.len() < before {
        StatusCode::OK.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Starts the mock API on an ephemeral port.
pub async fn spawn_mock(projects: Vec<Value>) -> MockServer {
    let state = Arc::new(MockState {
        projects: Mutex::new(projects),
        ..Default::default()
    });

    let app = Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// A session context backed by a file inside `dir`, optionally signed in.
pub async fn session_in(dir: &tempfile::TempDir, role: Option<Role>) -> SessionContext {
    let ctx = SessionContext::new(Arc::new(FileSessionStore::new(
        dir.path().join("session.json"),
    )));
    if let Some(role) = role {
        ctx.sign_in(&Session {
            role,
            name: "Test User".to_string(),
            token: TOKEN.to_string(),
        })
        .await
        .unwrap();
    }
    ctx
}

pub fn http_api(base_url: &str, session: SessionContext) -> HttpProjectApi {
    HttpProjectApi::new(reqwest::Client::new(), base_url, session).unwrap()
}
