//! Country page and form routes.

use crate::handlers::{add_form, create, delete as delete_handler, edit_form, index, list, update};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn country_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/paises", get(list))
        .route("/addPais", get(add_form))
        .route("/pais", post(create))
        .route("/editPais/:id", get(edit_form))
        .route("/pais/:id", put(update).delete(delete_handler))
        .with_state(state)
}
