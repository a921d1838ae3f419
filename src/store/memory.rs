//! In-process store. Used when no database is configured, and by tests.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CountryStore;
use crate::error::StoreError;
use crate::model::{Country, CountryPatch};

#[derive(Default)]
pub struct MemoryCountryStore {
    records: RwLock<Vec<(Uuid, Country)>>,
}

impl MemoryCountryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stored(id: Uuid, country: &Country) -> Country {
    let mut out = country.clone();
    out.id = Some(id);
    out
}

#[async_trait]
impl CountryStore for MemoryCountryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn insert(&self, country: &Country) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut doc = country.clone();
        doc.id = None;
        self.records.write().await.push((id, doc));
        Ok(id)
    }

    async fn insert_many(&self, countries: &[Country]) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        for country in countries {
            let mut doc = country.clone();
            doc.id = None;
            records.push((Uuid::new_v4(), doc));
        }
        Ok(countries.len() as u64)
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Country>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|(_, c)| c.creador == owner)
            .map(|(id, c)| stored(*id, c))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Country>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|(rid, _)| *rid == id)
            .map(|(rid, c)| stored(*rid, c)))
    }

    async fn update_by_id(&self, id: Uuid, patch: &CountryPatch) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let Some((_, country)) = records.iter_mut().find(|(rid, _)| *rid == id) else {
            return Ok(false);
        };
        let mut doc = match serde_json::to_value(&*country)? {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        doc.extend(patch.to_document()?);
        *country = serde_json::from_value(Value::Object(doc))?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(rid, _)| *rid != id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OWNER_TAG;
    use serde_json::json;

    fn country(common: &str, owner: &str) -> Country {
        let mut c = Country {
            creador: owner.to_string(),
            region: "Americas".into(),
            ..Default::default()
        };
        c.name.common = common.to_string();
        c.extra.insert("landlocked".into(), json!(true));
        c
    }

    #[tokio::test]
    async fn update_replaces_only_supplied_fields() {
        let store = MemoryCountryStore::new();
        let id = store.insert(&country("Paraguay", OWNER_TAG)).await.unwrap();
        let patch = CountryPatch {
            population: Some(7_000_000),
            ..Default::default()
        };
        assert!(store.update_by_id(id, &patch).await.unwrap());

        let c = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(c.population, 7_000_000);
        assert_eq!(c.region, "Americas");
        assert_eq!(c.name.common, "Paraguay");
        assert_eq!(c.extra.get("landlocked"), Some(&json!(true)));
        assert!(!store.update_by_id(Uuid::new_v4(), &patch).await.unwrap());
    }

    #[tokio::test]
    async fn find_by_owner_filters_and_keeps_order() {
        let store = MemoryCountryStore::new();
        store
            .insert_many(&[
                country("Chile", OWNER_TAG),
                country("Otro", "alguien"),
                country("Perú", OWNER_TAG),
            ])
            .await
            .unwrap();
        let names: Vec<_> = store
            .find_by_owner(OWNER_TAG)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name.common)
            .collect();
        assert_eq!(names, vec!["Chile", "Perú"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }
}
