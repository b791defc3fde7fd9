//! HTTP error mapping for the site API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_gateway::GatewayError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the public API handlers.
#[derive(Error, Debug)]
pub enum HttpError {
    /// A contact-form field failed validation. `field` names the offending
    /// input so the page can highlight it.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Decode(#[from] folio_core::AppError),
}

impl HttpError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Validation { field, message } => {
                let body = Json(json!({ "error": message, "field": field }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            HttpError::Gateway(err) => {
                // Backend details stay in the logs, not in public responses.
                match &err {
                    GatewayError::Api { status, message } => {
                        tracing::error!(status, %message, "backend rejected request");
                    }
                    GatewayError::Http(err) => {
                        tracing::error!("backend unreachable: {}", err);
                    }
                }
                let body = Json(json!({ "error": "Upstream service unavailable" }));
                (StatusCode::BAD_GATEWAY, body).into_response()
            }
            HttpError::Decode(err) => {
                tracing::error!("backend returned malformed rows: {}", err);
                let body = Json(json!({ "error": "Internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
