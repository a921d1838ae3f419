//! PostgreSQL store: one row per country, the document kept as JSONB.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CountryStore, COLLECTION};
use crate::error::StoreError;
use crate::model::{Country, CountryPatch};

#[derive(Clone)]
pub struct PgCountryStore {
    pool: PgPool,
    table: String,
}

impl PgCountryStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_table(pool, COLLECTION)
    }

    /// Store backed by `table` instead of the default collection. `table` must be a plain identifier.
    pub fn with_table(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the collection table and its owner index if they do not exist.
    /// `seq` records insertion order; timestamps alone tie inside one transaction.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                seq BIGSERIAL NOT NULL,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        // Tables created before `seq` existed.
        let add_seq = format!("ALTER TABLE {} ADD COLUMN IF NOT EXISTS seq BIGSERIAL", self.table);
        sqlx::query(&add_seq).execute(&self.pool).await?;
        let index = format!(
            "CREATE INDEX IF NOT EXISTS {0}_creador_idx ON {0} ((doc->>'creador'))",
            self.table
        );
        sqlx::query(&index).execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_country((id, doc): (Uuid, Value)) -> Result<Country, StoreError> {
    let mut country: Country = serde_json::from_value(doc)?;
    country.id = Some(id);
    Ok(country)
}

#[async_trait]
impl CountryStore for PgCountryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let n: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn insert(&self, country: &Country) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table);
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query(&sql)
            .bind(id)
            .bind(serde_json::to_value(country)?)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert_many(&self, countries: &[Country]) -> Result<u64, StoreError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table);
        tracing::debug!(sql = %sql, rows = countries.len(), "query (tx)");
        let mut tx = self.pool.begin().await?;
        for country in countries {
            sqlx::query(&sql)
                .bind(Uuid::new_v4())
                .bind(serde_json::to_value(country)?)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(countries.len() as u64)
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Country>, StoreError> {
        let sql = format!(
            "SELECT id, doc FROM {} WHERE doc->>'creador' = $1 ORDER BY seq",
            self.table
        );
        tracing::debug!(sql = %sql, owner, "query");
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(&sql).bind(owner).fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_country).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Country>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(row_to_country).transpose()
    }

    async fn update_by_id(&self, id: Uuid, patch: &CountryPatch) -> Result<bool, StoreError> {
        // `||` on JSONB replaces top-level keys present on the right.
        let sql = format!("UPDATE {} SET doc = doc || $2 WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, %id, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(patch.to_document()?))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, %id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
