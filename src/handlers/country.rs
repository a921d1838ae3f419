//! Country handlers: list, add form, create, edit form, update, delete.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::Markup;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::CountryPayload;
use crate::input::CountryForm;
use crate::response::redirect_with_flash;
use crate::service::{CountryService, RequestValidator};
use crate::state::AppState;
use crate::views;

pub const CREATED_MESSAGE: &str = "País agregado correctamente";
pub const UPDATED_MESSAGE: &str = "País actualizado correctamente";
pub const DELETED_MESSAGE: &str = "País eliminado correctamente";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub flash: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Markup, AppError> {
    let countries = CountryService::list(state.store.as_ref())
        .await
        .map_err(AppError::Listing)?;
    let message = params
        .flash
        .as_deref()
        .and_then(|t| Uuid::parse_str(t).ok())
        .and_then(|t| state.flash.take(&t));
    Ok(views::list(&countries, message.as_deref()))
}

pub async fn add_form() -> Markup {
    views::add_form(&[], &CountryForm::default())
}

pub async fn create(
    State(state): State<AppState>,
    CountryPayload(form): CountryPayload,
) -> Result<Response, AppError> {
    let errors = RequestValidator::validate(&form);
    if !errors.is_empty() {
        tracing::debug!(?errors, "create rejected");
        return Ok(views::add_form(&errors, &form).into_response());
    }
    CountryService::create(state.store.as_ref(), &form)
        .await
        .map_err(AppError::internal("Error al agregar país"))?;
    Ok(redirect_with_flash(&state.flash, CREATED_MESSAGE).into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Markup, AppError> {
    let country = CountryService::read(state.store.as_ref(), &id)
        .await
        .map_err(AppError::internal("Error al obtener el país"))?
        .ok_or_else(|| AppError::NotFound(id.clone()))?;
    Ok(views::edit_form(&country, &[]))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CountryPayload(form): CountryPayload,
) -> Result<Response, AppError> {
    let errors = RequestValidator::validate(&form);
    if !errors.is_empty() {
        tracing::debug!(%id, ?errors, "update rejected");
        // The stored record is shown again, not the rejected draft.
        let country = CountryService::read(state.store.as_ref(), &id)
            .await
            .map_err(AppError::internal("Error al actualizar país"))?
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        return Ok(views::edit_form(&country, &errors).into_response());
    }
    let updated = CountryService::update(state.store.as_ref(), &id, &form)
        .await
        .map_err(AppError::internal("Error al actualizar país"))?;
    if !updated {
        return Err(AppError::NotFound(id));
    }
    Ok(redirect_with_flash(&state.flash, UPDATED_MESSAGE).into_response())
}

/// Missing ids are not an error: the outcome is the same as deleting an existing record.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    CountryService::delete(state.store.as_ref(), &id)
        .await
        .map_err(AppError::internal("Error al eliminar país"))?;
    Ok(redirect_with_flash(&state.flash, DELETED_MESSAGE).into_response())
}
