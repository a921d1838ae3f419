//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::{error_body, plain_text};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("document decode: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("fetch: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("source responded with status {0}")]
    Status(u16),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Persistence failure behind a page or form action. `message` is what the user sees.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
    /// Persistence failure while listing; answered with a JSON body.
    #[error("list: {0}")]
    Listing(StoreError),
}

impl AppError {
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Internal { message, source }
    }
}

pub const NOT_FOUND_MESSAGE: &str = "País no encontrado";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(id) => {
                tracing::debug!(id = %id, "country not found");
                plain_text(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            AppError::BadRequest(detail) => {
                tracing::debug!(detail = %detail, "rejected request body");
                plain_text(StatusCode::BAD_REQUEST, "Solicitud inválida")
            }
            AppError::Internal { message, ref source } => {
                tracing::error!(error = %source, "{}", message);
                plain_text(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::Listing(ref source) => {
                tracing::error!(error = %source, "listing countries failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(error_body("Error interno del servidor")),
                )
                    .into_response()
            }
        }
    }
}
