//! Error Taxonomy
//!
//! - **Client input errors** (`ApiError`): answered synchronously with a 4xx and a
//!   `{"code": .., "msg": ..}` body. `ApiError::Internal` covers the rare 500.
//! - **Upstream network errors** (`FetchError`, `DeliveryError`): raised inside worker
//!   jobs, logged by the worker and never surfaced to the original caller.
//! - **Store and queue errors** (`StoreError`, `QueueError`): only possible once an
//!   actor or pool has stopped.
//!
//! Missing keys are not errors anywhere: stores answer with empty values.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The `{"code": 200, "msg": "..."}` body shared by every plain acknowledgement or error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub code: u16,
    pub msg: String,
}

impl StatusMessage {
    pub fn ok(msg: &str) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            msg: msg.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unable to parse payload.")]
    BadPayload,

    #[error("Method Not Allowed.")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadPayload => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = StatusMessage {
            code: status.as_u16(),
            msg: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Fallback for any method a route does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Failure to retrieve a document's source text.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Unable to retrieve URL: {url}. Error: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unable to retrieve URL: {url}. Status Code: {status}")]
    Status { url: String, status: u16 },

    #[error("Error while reading response: URL: {url}. Error: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure to hand a token occurrence to its shard.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Error while posting to shard {endpoint}: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Shard {endpoint} rejected token (status {status}): {msg}")]
    Rejected {
        endpoint: String,
        status: u16,
        msg: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0} is no longer accepting messages")]
    Closed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("{0} queue is closed")]
    Closed(&'static str),
}
