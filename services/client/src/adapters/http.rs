//! services/client/src/adapters/http.rs
//!
//! This module contains the REST adapter for the project API.
//! It implements the `ProjectApi` port from `protech_core` using `reqwest`.

use async_trait::async_trait;
use protech_core::domain::{Project, ProjectDetails, ProjectId};
use protech_core::ports::{PortError, PortResult, ProjectApi};
use protech_core::session::SessionContext;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::adapters::wire::{decode_project, decode_projects, ProjectPayload};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ProjectApi` port against `{base}/api/projects`.
#[derive(Clone)]
pub struct HttpProjectApi {
    client: Client,
    base_url: Url,
    session: SessionContext,
}

impl HttpProjectApi {
    /// Creates a new `HttpProjectApi`. The token is read from `session` on
    /// every authorized call.
    pub fn new(
        client: Client,
        base_url: &str,
        session: SessionContext,
    ) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// `{base}/api/projects`, plus the percent-encoded id when given.
    fn endpoint(&self, id: Option<&ProjectId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "projects"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    /// Attaches the raw session token as the `Authorization` header.
    async fn authorized(&self, request: RequestBuilder) -> PortResult<RequestBuilder> {
        let token = self.session.token().await?.ok_or(PortError::Unauthorized)?;
        Ok(request.header(AUTHORIZATION, token))
    }

    async fn send(&self, request: RequestBuilder) -> PortResult<Response> {
        request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {}", e);
            PortError::Network(e.to_string())
        })
    }

    async fn body(response: Response) -> PortResult<Vec<u8>> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Maps a non-2xx status to the generic server error.
fn ensure_success(response: Response) -> PortResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(server_error(status))
    }
}

fn server_error(status: StatusCode) -> PortError {
    warn!("Project API answered {}", status);
    PortError::Server {
        status: status.as_u16(),
    }
}

//=========================================================================================
// `ProjectApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProjectApi for HttpProjectApi {
    async fn list_projects(&self) -> PortResult<Vec<Project>> {
        let url = self.endpoint(None);
        debug!("GET {}", url);
        let response = ensure_success(self.send(self.client.get(url)).await?)?;
        decode_projects(&Self::body(response).await?)
    }

    async fn get_project(&self, id: &ProjectId) -> PortResult<Project> {
        let url = self.endpoint(Some(id));
        debug!("GET {}", url);
        let request = self.authorized(self.client.get(url)).await?;
        let response = self.send(request).await?;
        if !response.status().is_success() {
            warn!("Project {} could not be fetched: {}", id, response.status());
            return Err(PortError::NotFound(id.to_string()));
        }
        decode_project(&Self::body(response).await?)
    }

    async fn create_project(&self, details: &ProjectDetails) -> PortResult<Project> {
        let url = self.endpoint(None);
        debug!("POST {}", url);
        let request = self
            .authorized(self.client.post(url).json(&ProjectPayload::from(details)))
            .await?;
        let response = ensure_success(self.send(request).await?)?;
        decode_project(&Self::body(response).await?)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        details: &ProjectDetails,
    ) -> PortResult<Project> {
        let url = self.endpoint(Some(id));
        debug!("PUT {}", url);
        let request = self
            .authorized(self.client.put(url).json(&ProjectPayload::from(details)))
            .await?;
        let response = ensure_success(self.send(request).await?)?;
        decode_project(&Self::body(response).await?)
    }

    async fn delete_project(&self, id: &ProjectId) -> PortResult<()> {
        let url = self.endpoint(Some(id));
        debug!("DELETE {}", url);
        let request = self.authorized(self.client.delete(url)).await?;
        ensure_success(self.send(request).await?)?;
        Ok(())
    }
}
