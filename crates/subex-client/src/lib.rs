//! Client for the subtitle extraction server.
//!
//! The server keeps the last extraction in its session, so one
//! [`SubexClient`] (and its cookie store) must be used for an extract →
//! preview → download sequence.

mod fetch;
mod track;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use fetch::{RequestOptions, fetch_json};
pub use track::track;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("no extracted subtitle in the current session")]
    NoSession,
}

impl ClientError {
    /// Text suitable for showing in a status container.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// One dialogue line of a parsed subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleLine {
    pub index: usize,
    /// Milliseconds from the start of the media.
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub character: String,
    /// Text with formatting tags stripped.
    pub text: String,
    #[serde(default)]
    pub style: String,
}

impl SubtitleLine {
    /// `H:MM:SS.cc --> H:MM:SS.cc`
    pub fn time_range(&self) -> String {
        format!("{} --> {}", format_ass_time(self.start), format_ass_time(self.end))
    }
}

/// Format milliseconds as an ASS timestamp, `H:MM:SS.cc`.
pub fn format_ass_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let centis = (ms % 1000) / 10;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}.{centis:02}")
}

#[derive(Debug, Clone, Serialize)]
struct ExtractRequest<'a> {
    video_path: &'a str,
    track_index: u32,
}

/// Response of `POST /api/extract_subtitle`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    /// First 1000 characters of the raw subtitle file.
    pub content: String,
    pub lines_count: usize,
    /// First lines of the parsed subtitle.
    pub preview: Vec<SubtitleLine>,
}

/// Response of `GET /api/get_subtitle_preview`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub lines: Vec<SubtitleLine>,
    pub total_lines: usize,
}

pub struct SubexClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubexClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extract subtitle track `track_index` of `video_path` (relative to the
    /// server's media root).
    pub async fn extract_subtitle(
        &self,
        video_path: &str,
        track_index: u32,
    ) -> Result<ExtractResponse, ClientError> {
        let body = serde_json::to_value(ExtractRequest {
            video_path,
            track_index,
        })
        .map_err(|e| ClientError::Parse(format!("encode extract request: {e}")))?;
        fetch_json(
            &self.http,
            &self.url("/api/extract_subtitle"),
            RequestOptions::post(body),
        )
        .await
    }

    /// Preview of the subtitle extracted earlier in this session.
    pub async fn subtitle_preview(&self) -> Result<PreviewResponse, ClientError> {
        fetch_json(
            &self.http,
            &self.url("/api/get_subtitle_preview"),
            RequestOptions::get(),
        )
        .await
    }

    /// Full text of the subtitle extracted earlier in this session.
    ///
    /// The server answers a download without session data by redirecting to
    /// its index page; that is reported as [`ClientError::NoSession`].
    pub async fn download_subtitle(&self) -> Result<String, ClientError> {
        let url = self.url("/api/download_subtitle");
        let resp = fetch::send(&self.http, &url, RequestOptions::get()).await?;

        let is_html = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"));
        if is_html {
            return Err(ClientError::NoSession);
        }

        resp.text()
            .await
            .map_err(|e| ClientError::Http(format!("GET {url}: {e}")))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
