//! Extract a country form from a URL-encoded or JSON body.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};

use crate::error::AppError;
use crate::input::CountryForm;

/// Body extractor for create and update. JSON when the content type says so, URL-encoded otherwise.
#[derive(Clone, Debug)]
pub struct CountryPayload(pub CountryForm);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for CountryPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(form) = Json::<CountryForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(CountryPayload(form));
        }
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(CountryPayload(CountryForm::from_pairs(pairs)))
    }
}
