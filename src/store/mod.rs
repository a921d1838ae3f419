//! Country persistence: the document-store trait and its PostgreSQL and in-process implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::ConnectOptions;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{Country, CountryPatch};

pub use memory::MemoryCountryStore;
pub use postgres::PgCountryStore;

/// Fixed name of the country collection.
pub const COLLECTION: &str = "grupo_07";

/// One collection of country documents. Ids are assigned on insert and never stored in the document.
#[async_trait]
pub trait CountryStore: Send + Sync + 'static {
    async fn count(&self) -> Result<u64, StoreError>;

    /// Insert one record and return its new id.
    async fn insert(&self, country: &Country) -> Result<Uuid, StoreError>;

    /// Insert all records atomically. Returns the number inserted.
    async fn insert_many(&self, countries: &[Country]) -> Result<u64, StoreError>;

    /// Records whose `creador` equals `owner`, in insertion order.
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Country>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Country>, StoreError>;

    /// Replace the top-level fields present in `patch`. Returns false if no record has `id`.
    async fn update_by_id(&self, id: Uuid, patch: &CountryPatch) -> Result<bool, StoreError>;

    /// Returns true if a record was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into the admin URL (same server, `postgres` database) and the database name.
/// A URL without a path names no database.
fn parse_db_name_from_url(url: &str) -> (String, String) {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    let Some(slash) = url[authority_start..].find('/').map(|i| authority_start + i) else {
        return (url.to_string(), String::new());
    };
    let path_start = slash + 1;
    let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
    (format!("{}postgres", &url[..path_start]), db_name.to_string())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_points_at_postgres_database() {
        let (admin, db) = parse_db_name_from_url("postgres://user:pw@localhost:5432/paises?sslmode=disable");
        assert_eq!(admin, "postgres://user:pw@localhost:5432/postgres");
        assert_eq!(db, "paises");
    }

    #[test]
    fn url_without_database_path_names_no_database() {
        for url in ["postgres://localhost:5432", "postgres://user:pw@host", "postgres://host:5432/?sslmode=disable"] {
            let (_, db) = parse_db_name_from_url(url);
            assert_eq!(db, "", "{url}");
        }
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("paises"), "\"paises\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
