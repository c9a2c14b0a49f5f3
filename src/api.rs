use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::entry::{Entry, NewEntryPayload};
use crate::types::query::{QueryRequest, QueryResponse};

/// HTTP bridge to the diary backend. Owns the transport; every command
/// that talks to the backend goes through here.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Media assets are served as static files from the backend origin,
    /// not under the `/api` prefix.
    pub fn media_url(&self, media_path: &str) -> String {
        format!("{}/{}", self.base_url, media_path.trim_start_matches('/'))
    }

    /// `GET /api/entries` — entries in backend order. The backend accepts
    /// `skip`/`limit` paging; the client passes `None` for both and takes
    /// the full list.
    pub async fn list_entries(
        &self,
        skip: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<Entry>, ClientError> {
        let mut request = self.http.get(self.api_url("entries"));
        let params = paging_params(skip, limit);
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = request.send().await?;
        let response = check_status(response).await?;
        let entries: Vec<Entry> = response.json().await?;
        debug!(count = entries.len(), "Fetched entry list");
        Ok(entries)
    }

    /// `GET /api/entries/{id}`.
    pub async fn get_entry(&self, id: &str) -> Result<Entry, ClientError> {
        let response = self
            .http
            .get(self.api_url(&format!("entries/{}", id)))
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/entries` as multipart/form-data. The response body is
    /// discarded; callers re-list to pick up backend-assigned fields.
    pub async fn create_entry(&self, payload: NewEntryPayload) -> Result<(), ClientError> {
        let mut form = Form::new().text("title", payload.title);
        if let Some(text) = payload.text {
            form = form.text("text", text);
        }
        if let Some(tags) = payload.tags {
            form = form.text("tags", tags);
        }
        if let Some(audio) = payload.audio {
            let part = Part::bytes(audio.data)
                .file_name(audio.file_name)
                .mime_str(&audio.mime_type)?;
            form = form.part("audio", part);
        }
        if let Some(image) = payload.image {
            let part = Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            form = form.part("image", part);
        }

        let response = self
            .http
            .post(self.api_url("entries"))
            .multipart(form)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// `DELETE /api/entries/{id}`. Body discarded; callers re-list.
    pub async fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.api_url(&format!("entries/{}", id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// `POST /api/query` — semantic search with a ranked result set and an
    /// optional synthesized summary.
    pub async fn query(&self, text: &str, limit: u32) -> Result<QueryResponse, ClientError> {
        let body = QueryRequest {
            text: text.to_string(),
            limit,
        };
        let response = self
            .http
            .post(self.api_url("query"))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// `GET /` health probe. Best-effort: failures are logged, not fatal.
    pub async fn probe_health(&self) {
        match self.http.get(format!("{}/", self.base_url)).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Backend reachable at {}", self.base_url)
            }
            Ok(resp) => warn!(status = %resp.status(), "Backend health probe failed"),
            Err(e) => warn!("Backend unreachable: {}", e),
        }
    }
}

fn paging_params(skip: Option<u32>, limit: Option<u32>) -> Vec<(&'static str, u32)> {
    let mut params = Vec::new();
    if let Some(skip) = skip {
        params.push(("skip", skip));
    }
    if let Some(limit) = limit {
        params.push(("limit", limit));
    }
    params
}

/// Map a non-2xx response to `ClientError::Backend`, preserving the body
/// as the detail the user sees.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .text()
        .await
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Backend {
        status: status.as_u16(),
        detail,
    })
}
