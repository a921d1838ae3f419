//! Response helpers shared by handlers: plain-text errors, JSON error bodies, flash redirects.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::flash::FlashStore;

/// Where every successful mutation lands.
pub const LIST_PATH: &str = "/paises";

pub fn plain_text(status: StatusCode, message: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message.to_string(),
    )
        .into_response()
}

pub fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

/// Store `message` as a one-shot notice and redirect to the list view carrying its token.
pub fn redirect_with_flash(flash: &FlashStore, message: &str) -> Redirect {
    let token = flash.push(message);
    Redirect::to(&format!("{}?flash={}", LIST_PATH, token))
}
