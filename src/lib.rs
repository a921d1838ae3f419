//! Paises: server-rendered CRUD catalog of countries, seeded once from a public REST API.

pub mod config;
pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod input;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::{AppError, SeedError, StoreError};
pub use middleware::method_override;
pub use model::{Country, CountryPatch, NO_BORDERS, OWNER_TAG};
pub use routes::{app, common_routes_with_ready, country_routes};
pub use seed::{seed_if_empty, CountrySource, RestCountriesClient, SeedOutcome};
pub use service::{CountryService, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, CountryStore, MemoryCountryStore, PgCountryStore, COLLECTION};
