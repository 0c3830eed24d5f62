//! HTTP plumbing shared by every endpoint group.

use crate::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default remote API base URL, overridable via `CLINICA_API_URL`.
pub const DEFAULT_API_URL: &str = "http://localhost:3333/api";

/// Resolve the API base URL from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_API_URL`].
pub fn base_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Client for the remote patient-management API.
///
/// Cheap to clone; holds the base URL and a connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the URL does not parse.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        trimmed
            .parse::<reqwest::Url>()
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Absolute URL for an endpoint path (no leading slash).
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let response = self
            .http
            .get(self.endpoint(path))
            .query(query)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(path, "POST");
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(path, "PUT");
        let response = self.http.put(self.endpoint(path)).json(body).send().await?;
        Self::read_json(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        tracing::debug!(path, "DELETE");
        let response = self.http.delete(self.endpoint(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        decode_body(&body)
    }
}

/// JSON error body returned by the remote API.
///
/// The deployed API names the message field inconsistently across
/// endpoints; all observed spellings are accepted.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "erro", alias = "message")]
    error: String,
}

/// Translate a non-2xx response into a typed failure.
///
/// Falls back to the HTTP status text when the body is not a parseable
/// JSON error object.
pub(crate) fn error_from_response(status: reqwest::StatusCode, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };

    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Decode a success body, surfacing the path to any failing field.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);

    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        ApiError::Decode {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path
            },
            message: err.into_inner().to_string(),
        }
    })
}
