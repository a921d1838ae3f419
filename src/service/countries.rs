//! Country operations over a [`CountryStore`]: building records and patches from validated forms.

use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::StoreError;
use crate::input::{CountryForm, OneOrMany};
use crate::model::{Country, CountryName, CountryPatch, LanguageEntry, NativeName, NO_BORDERS, OWNER_TAG, SPANISH};
use crate::service::validation::{parse_area, parse_population, split_codes};
use crate::store::CountryStore;

pub struct CountryService;

impl CountryService {
    /// Every record carrying the owner tag, in insertion order.
    pub async fn list(store: &dyn CountryStore) -> Result<Vec<Country>, StoreError> {
        store.find_by_owner(OWNER_TAG).await
    }

    /// Fetch one record. Ids that are not UUIDs cannot exist and yield `None`.
    pub async fn read(store: &dyn CountryStore, id: &str) -> Result<Option<Country>, StoreError> {
        match parse_id(id) {
            Some(id) => store.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Persist a new record built from a validated form. Returns the new id.
    pub async fn create(store: &dyn CountryStore, form: &CountryForm) -> Result<Uuid, StoreError> {
        let country = new_country(form);
        let id = store.insert(&country).await?;
        tracing::info!(%id, name = %country.name.common, "country created");
        Ok(id)
    }

    /// Replace the supplied fields of one record. Returns false when no record has that id.
    pub async fn update(store: &dyn CountryStore, id: &str, form: &CountryForm) -> Result<bool, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let updated = store.update_by_id(id, &update_patch(form)).await?;
        if updated {
            tracing::info!(%id, "country updated");
        }
        Ok(updated)
    }

    /// Delete one record if it exists. Returns whether anything was removed.
    pub async fn delete(store: &dyn CountryStore, id: &str) -> Result<bool, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = store.delete_by_id(id).await?;
        tracing::info!(%id, deleted, "country delete");
        Ok(deleted)
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// `languages` map from a comma list: lowercase code → `true`.
pub fn languages_map(raw: Option<&str>) -> BTreeMap<String, LanguageEntry> {
    split_codes(raw)
        .into_iter()
        .map(|code| (code.to_lowercase(), LanguageEntry::Present(true)))
        .collect()
}

/// A single string is split on commas; lists are kept as submitted, trimmed.
fn timezone_list(raw: &OneOrMany) -> Vec<String> {
    match raw {
        OneOrMany::One(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        OneOrMany::Many(v) => v.iter().map(|t| t.trim().to_string()).collect(),
    }
}

fn capital_list(raw: Option<&OneOrMany>) -> Vec<String> {
    raw.map(|c| c.as_slice().to_vec()).unwrap_or_default()
}

/// Record for the create path. Blank borders become an empty list.
pub fn new_country(form: &CountryForm) -> Country {
    let official = form.spanish_official().unwrap_or_default().to_string();
    let mut native_name = BTreeMap::new();
    native_name.insert(
        SPANISH.to_string(),
        NativeName {
            official: official.clone(),
            common: None,
        },
    );

    Country {
        id: None,
        name: CountryName {
            common: form.name.common.clone().unwrap_or_default(),
            official,
            native_name,
        },
        independent: form.independent,
        status: form.status.clone().unwrap_or_default(),
        un_member: form.un_member,
        capital: capital_list(form.capital.as_ref()),
        region: form.region.clone().unwrap_or_default(),
        subregion: form.subregion.clone().unwrap_or_default(),
        area: parse_area(form.area.as_deref()).unwrap_or_default(),
        population: parse_population(form.population.as_deref()).unwrap_or_default(),
        flag: form.flag.clone().unwrap_or_default(),
        borders: split_codes(form.borders.as_deref()),
        languages: languages_map(form.languages.as_deref()),
        timezones: form.timezones.as_ref().map(timezone_list).unwrap_or_default(),
        creador: OWNER_TAG.to_string(),
        extra: Default::default(),
    }
}

/// Patch for the update path. Blank borders become the single sentinel entry.
/// Checkboxes are always written: an unchecked box clears the flag.
pub fn update_patch(form: &CountryForm) -> CountryPatch {
    let native_name = form
        .name
        .native_name
        .iter()
        .map(|(lang, n)| {
            (
                lang.clone(),
                NativeName {
                    official: n.official.clone().unwrap_or_default(),
                    common: None,
                },
            )
        })
        .collect();

    let borders = match split_codes(form.borders.as_deref()) {
        codes if codes.is_empty() => vec![NO_BORDERS.to_string()],
        codes => codes,
    };

    CountryPatch {
        name: Some(CountryName {
            common: form.name.common.clone().unwrap_or_default(),
            official: form.name.official.clone().unwrap_or_default(),
            native_name,
        }),
        independent: Some(form.independent),
        status: form.status.clone(),
        un_member: Some(form.un_member),
        capital: Some(capital_list(form.capital.as_ref())),
        borders: Some(borders),
        area: parse_area(form.area.as_deref()),
        population: parse_population(form.population.as_deref()),
        timezones: form.timezones.as_ref().map(timezone_list),
        region: form.region.clone(),
        subregion: form.subregion.clone(),
        flag: form.flag.clone(),
        languages: Some(languages_map(form.languages.as_deref())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NativeNameForm;
    use crate::store::memory::MemoryCountryStore;

    fn la_paz_form(borders: &str) -> CountryForm {
        let mut form = CountryForm {
            capital: Some(OneOrMany::One("La Paz".into())),
            area: Some("1098581".into()),
            population: Some("11000000".into()),
            languages: Some("SPA".into()),
            borders: Some(borders.into()),
            timezones: Some(OneOrMany::One("UTC-04:00".into())),
            ..Default::default()
        };
        form.name.common = Some("Bolivia".into());
        form.name.official = Some("Estado Plurinacional de Bolivia".into());
        form.name.native_name.insert(
            "spa".into(),
            NativeNameForm {
                official: Some("Estado Plurinacional de Bolivia".into()),
            },
        );
        form
    }

    #[test]
    fn create_keeps_blank_borders_empty() {
        let country = new_country(&la_paz_form(""));
        assert!(country.borders.is_empty());
        assert_eq!(country.capital, vec!["La Paz".to_string()]);
        assert_eq!(country.area, 1098581.0);
        assert_eq!(country.population, 11_000_000);
        assert_eq!(country.creador, OWNER_TAG);
        assert_eq!(country.languages.get("spa"), Some(&LanguageEntry::Present(true)));
        assert_eq!(country.name.official, "Estado Plurinacional de Bolivia");
        assert_eq!(country.timezones, vec!["UTC-04:00".to_string()]);
        assert!(!country.independent);
        assert_eq!(country.status, "");
    }

    #[test]
    fn update_uses_sentinel_for_blank_borders() {
        let patch = update_patch(&la_paz_form("  "));
        assert_eq!(patch.borders, Some(vec![NO_BORDERS.to_string()]));

        let patch = update_patch(&la_paz_form("arg, per"));
        assert_eq!(patch.borders, Some(vec!["ARG".to_string(), "PER".to_string()]));
    }

    #[test]
    fn update_carries_flags_and_descriptive_fields() {
        let mut form = la_paz_form("");
        form.status = Some("officially-assigned".into());
        form.subregion = Some("South America".into());
        form.flag = Some("🇧🇴".into());
        let patch = update_patch(&form);
        assert_eq!(patch.independent, Some(false));
        assert_eq!(patch.un_member, Some(false));
        assert_eq!(patch.status.as_deref(), Some("officially-assigned"));
        assert_eq!(patch.subregion.as_deref(), Some("South America"));
        assert_eq!(patch.flag.as_deref(), Some("🇧🇴"));

        form.independent = true;
        assert_eq!(update_patch(&form).independent, Some(true));
    }

    #[test]
    fn timezones_split_from_single_string() {
        let mut form = la_paz_form("");
        form.timezones = Some(OneOrMany::One("UTC-05:00, UTC-04:00".into()));
        assert_eq!(
            update_patch(&form).timezones,
            Some(vec!["UTC-05:00".to_string(), "UTC-04:00".to_string()])
        );
        form.timezones = None;
        assert_eq!(update_patch(&form).timezones, None);
    }

    #[tokio::test]
    async fn service_round_trip_against_memory_store() {
        let store = MemoryCountryStore::new();
        let id = CountryService::create(&store, &la_paz_form("")).await.unwrap();

        let listed = CountryService::list(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Some(id));

        assert!(CountryService::update(&store, &id.to_string(), &la_paz_form("")).await.unwrap());
        let stored = CountryService::read(&store, &id.to_string()).await.unwrap().unwrap();
        assert_eq!(stored.borders, vec![NO_BORDERS.to_string()]);
        assert_eq!(stored.creador, OWNER_TAG);

        assert!(CountryService::read(&store, "not-a-uuid").await.unwrap().is_none());
        assert!(!CountryService::update(&store, "not-a-uuid", &la_paz_form("")).await.unwrap());
        assert!(CountryService::delete(&store, &id.to_string()).await.unwrap());
        assert!(!CountryService::delete(&store, &id.to_string()).await.unwrap());
    }
}
