//! One-time population of an empty collection from the seed source.

pub mod source;

use serde_json::Value;

use crate::error::SeedError;
use crate::model::{Country, OWNER_TAG, SPANISH};
use crate::store::CountryStore;

pub use source::{CountrySource, RestCountriesClient, DEFAULT_COUNTRIES_API_URL};

/// Source fields never stored.
pub const STRIPPED_FIELDS: &[&str] = &[
    "translations",
    "tld",
    "cca2",
    "ccn3",
    "cca3",
    "idd",
    "altSpellings",
    "car",
    "coatOfArms",
    "postalCode",
    "demonyms",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection already held this many records; nothing was fetched.
    AlreadySeeded(u64),
    Inserted(u64),
}

/// Fetch and insert Spanish-speaking countries if the collection is empty.
pub async fn seed_if_empty(store: &dyn CountryStore, source: &dyn CountrySource) -> Result<SeedOutcome, SeedError> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::info!(existing, "collection already populated, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded(existing));
    }

    let raw = source.fetch_all().await?;
    let fetched = raw.len();
    let countries: Vec<Country> = raw.into_iter().filter_map(to_seed_country).collect();
    let inserted = store.insert_many(&countries).await?;
    tracing::info!(fetched, inserted, "seeded countries");
    Ok(SeedOutcome::Inserted(inserted))
}

fn speaks_spanish(entry: &Value) -> bool {
    entry
        .get("languages")
        .and_then(Value::as_object)
        .is_some_and(|langs| langs.contains_key(SPANISH))
}

/// Filter, strip, and stamp one source entry. `None` for entries that are skipped.
pub fn to_seed_country(entry: Value) -> Option<Country> {
    if !speaks_spanish(&entry) {
        return None;
    }
    let Value::Object(mut fields) = entry else {
        return None;
    };
    for field in STRIPPED_FIELDS {
        fields.remove(*field);
    }
    match serde_json::from_value::<Country>(Value::Object(fields)) {
        Ok(mut country) => {
            country.creador = OWNER_TAG.to_string();
            Some(country)
        }
        Err(e) => {
            tracing::warn!(error = %e, "skipping seed entry with unexpected shape");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCountryStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        entries: Vec<Value>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(entries: Vec<Value>) -> Self {
            Self {
                entries,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CountrySource for StubSource {
        async fn fetch_all(&self) -> Result<Vec<Value>, SeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.entries.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CountrySource for FailingSource {
        async fn fetch_all(&self) -> Result<Vec<Value>, SeedError> {
            Err(SeedError::Status(503))
        }
    }

    fn sample() -> Vec<Value> {
        vec![
            json!({
                "name": { "common": "Uruguay", "official": "Oriental Republic of Uruguay",
                          "nativeName": { "spa": { "official": "República Oriental del Uruguay", "common": "Uruguay" } } },
                "cca3": "URY", "tld": [".uy"], "translations": { "ita": { "common": "Uruguay" } },
                "capital": ["Montevideo"], "region": "Americas", "area": 181034.0, "population": 3473727,
                "borders": ["ARG", "BRA"], "languages": { "spa": "Spanish" }, "currencies": { "UYU": { "name": "Uruguayan peso" } }
            }),
            json!({
                "name": { "common": "Brazil", "official": "Federative Republic of Brazil" },
                "languages": { "por": "Portuguese" }
            }),
            json!({ "name": { "common": "Antarctica" } }),
        ]
    }

    #[test]
    fn entries_are_filtered_stripped_and_stamped() {
        let countries: Vec<Country> = sample().into_iter().filter_map(to_seed_country).collect();
        assert_eq!(countries.len(), 1);
        let uruguay = &countries[0];
        assert_eq!(uruguay.creador, OWNER_TAG);
        assert_eq!(uruguay.borders, vec!["ARG".to_string(), "BRA".to_string()]);
        assert!(uruguay.extra.contains_key("currencies"));
        for field in STRIPPED_FIELDS {
            assert!(!uruguay.extra.contains_key(*field), "{field}");
        }
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = MemoryCountryStore::new();
        let source = StubSource::new(sample());

        assert_eq!(seed_if_empty(&store, &source).await.unwrap(), SeedOutcome::Inserted(1));
        assert_eq!(seed_if_empty(&store, &source).await.unwrap(), SeedOutcome::AlreadySeeded(1));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_collection_empty() {
        let store = MemoryCountryStore::new();
        let err = seed_if_empty(&store, &FailingSource).await.unwrap_err();
        assert!(matches!(err, SeedError::Status(503)));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
