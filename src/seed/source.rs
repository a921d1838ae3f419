//! Where seed data comes from.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SeedError;

pub const DEFAULT_COUNTRIES_API_URL: &str = "https://restcountries.com/v3.1/all";

/// A read-only source of raw country entries.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Value>, SeedError>;
}

/// The public REST countries endpoint. One GET, no retries, no auth.
pub struct RestCountriesClient {
    client: reqwest::Client,
    url: String,
}

impl RestCountriesClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Value>, SeedError> {
        tracing::info!(url = %self.url, "fetching seed countries");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }
        Ok(response.json::<Vec<Value>>().await?)
    }
}
