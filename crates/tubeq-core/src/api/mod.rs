//! HTTP client for the remote download/transcode service.
//!
//! Reproduces the backend's JSON contract: `POST /download` returns an
//! acknowledgement with a job id, `GET /downloads` returns the authoritative
//! job array, and `GET /download-file?filePath=<path>` streams the finished
//! file.
//! Non-2xx bodies are surfaced verbatim as error messages.

mod error;

pub use error::ApiError;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::job::JobRecord;
use crate::request::DownloadRequest;
use crate::savefile;

/// Acknowledgement of a successful `POST /download`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    pub id: i64,
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Applied per request to the JSON endpoints only; file streaming is bounded
/// by the connect timeout alone, since media transfers can take arbitrarily
/// long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one backend origin. Cheap to clone (shares the connection pool).
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client for the given backend origin, e.g. `https://host/api`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `POST /download`: submit a validated request, returning the server's
    /// acknowledgement with the assigned job id.
    pub async fn submit(&self, request: &DownloadRequest) -> Result<SubmitResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("download"))
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await?;
        let response = into_api_result(response, "download request rejected").await?;
        Ok(response.json().await?)
    }

    /// `GET /downloads`: fetch the authoritative job listing.
    pub async fn list(&self) -> Result<Vec<JobRecord>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("downloads"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        let response = into_api_result(response, "failed to load downloads").await?;
        Ok(response.json().await?)
    }

    /// `GET /download-file?filePath=<path>`, streamed into `dest_dir`.
    ///
    /// The local name comes from the response's Content-Disposition when
    /// present, otherwise from the last segment of `file_path`. Returns the
    /// path written.
    pub async fn fetch_file(&self, file_path: &str, dest_dir: &Path) -> Result<PathBuf, ApiError> {
        let response = self
            .http
            .get(self.endpoint("download-file"))
            .query(&[("filePath", file_path)])
            .send()
            .await?;
        let response = into_api_result(response, "file not available").await?;

        let content_disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let name = savefile::derive_save_name(file_path, content_disposition.as_deref());
        let dest = dest_dir.join(name);

        let mut file = tokio::fs::File::create(&dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        tracing::debug!(path = %dest.display(), "fetched file");
        Ok(dest)
    }
}

/// Pass 2xx responses through; map anything else to `ApiError::Server` with
/// the body verbatim, or `fallback` when the body is empty.
async fn into_api_result(
    response: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        fallback.to_string()
    } else {
        extract_error_message(body.trim())
    };
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Error bodies are plain text or a JSON object with a message/error field;
/// either way the server's own wording is preserved.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.to_string()
}
