use serde::Deserialize;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum BaasError {
    /// Missing or unusable credential, detected before any network call.
    #[error("config error: {0}")]
    Config(String),
    /// Caller supplied an empty required identifier.
    #[error("validation error: {0}")]
    Validation(String),
    /// Network, connection or timeout error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// Non-success HTTP status with a structured error body.
    #[error("server error: {0}")]
    Server(ServerError),
    /// Response body was not the JSON shape that was expected.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),
    /// Request body could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl BaasError {
    /// Returns `true` only for a server error carrying
    /// [`ServerError::OBJECT_NOT_FOUND`].
    pub fn is_object_not_found(&self) -> bool {
        match self {
            Self::Server(error) => error.is_object_not_found(),
            _ => false,
        }
    }

    /// Returns the structured server error, if this is one.
    pub fn as_server_error(&self) -> Option<&ServerError> {
        match self {
            Self::Server(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ServerError> for BaasError {
    fn from(error: ServerError) -> Self {
        Self::Server(error)
    }
}

/// Failure reported by the backend as `{"code": <int>, "error": <string>}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("{message} (code {code}, http {status})")]
pub struct ServerError {
    /// Backend error code.
    pub code: i64,
    /// Human readable message from the `error` field.
    #[serde(rename = "error")]
    pub message: String,
    /// HTTP status of the response that carried this error.
    #[serde(skip)]
    pub status: u16,
}

impl ServerError {
    /// Code reserved for "object not found".
    pub const OBJECT_NOT_FOUND: i64 = 101;

    pub fn is_object_not_found(&self) -> bool {
        self.code == Self::OBJECT_NOT_FOUND
    }
}
