use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

use crate::ClientError;

/// Method, extra headers and optional JSON body for [`fetch_json`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }
}

/// Send a JSON request and parse the JSON response.
///
/// `Content-Type: application/json` is set first and then merged with
/// `options.headers`, so callers can override it. Non-success statuses are
/// errors; a `{"error": "..."}` body becomes [`ClientError::Api`].
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    options: RequestOptions,
) -> Result<T, ClientError> {
    let method = options.method.clone();
    let resp = send(client, url, options).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Parse(format!("parse response from {method} {url}: {e}")))
}

/// Like [`fetch_json`], returning the raw response once its status is known
/// to be a success.
pub(crate) async fn send(
    client: &Client,
    url: &str,
    options: RequestOptions,
) -> Result<Response, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(options.headers);

    let mut req = client.request(options.method.clone(), url).headers(headers);
    if let Some(body) = &options.body {
        req = req.body(body.to_string());
    }

    tracing::debug!(method = %options.method, url, "sending request");
    let resp = req
        .send()
        .await
        .map_err(|e| ClientError::Http(format!("{} {url}: {e}", options.method)))?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &body).unwrap_or_else(|| {
        ClientError::Http(format!("{} {url}: status {status}", options.method))
    }))
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

fn error_from_body(status: u16, body: &str) -> Option<ClientError> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    Some(ClientError::Api {
        status,
        message: parsed.error,
    })
}
