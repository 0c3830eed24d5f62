/// Errors returned by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the human-readable text from the JSON error body,
    /// falling back to the HTTP status text.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("decode error at {path}: {message}")]
    Decode { path: String, message: String },

    /// Input rejected before any request was made.
    #[error(transparent)]
    Invalid(#[from] clinica_core::ClinicalError),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
