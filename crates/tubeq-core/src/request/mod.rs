//! Download request building and validation.
//!
//! Validation runs entirely locally; an invalid request is rejected before
//! any network call is made.

mod format;
mod url;

pub use format::Format;
pub use self::url::is_watch_url;

use serde::Serialize;

use crate::api::ApiError;

/// Quality sent when the caller picks none, and forced for audio formats.
pub const DEFAULT_QUALITY: &str = "best";

/// Body of `POST /download`, exactly as the backend expects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub url: String,
    pub format: Format,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
}

impl DownloadRequest {
    /// Validate and build a request.
    ///
    /// The URL must be a YouTube watch URL. Audio formats ignore the given
    /// quality and send "best"; the save path defaults to `output.<format>`
    /// (the backend manages the real location).
    pub fn new(url: &str, format: Format, quality: Option<&str>) -> Result<Self, ApiError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ApiError::Validation("a YouTube URL is required".to_string()));
        }
        if !is_watch_url(url) {
            return Err(ApiError::Validation(format!(
                "'{url}' is not a YouTube watch URL (expected youtube.com/watch?v=<id> or youtu.be/<id>)"
            )));
        }

        let quality = if format.has_quality_axis() {
            quality
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .unwrap_or(DEFAULT_QUALITY)
        } else {
            DEFAULT_QUALITY
        };

        Ok(Self {
            url: url.to_string(),
            format,
            quality: Some(quality.to_string()),
            save_path: Some(format!("output.{}", format.as_str())),
        })
    }
}
