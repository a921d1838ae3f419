//! Country document shape, as stored and as received from the seed source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Provenance marker stamped on every record this application writes.
pub const OWNER_TAG: &str = "Matias";

/// Stored in place of an empty border list when a record is updated.
pub const NO_BORDERS: &str = "no tiene fronteras";

/// Language key whose native name is edited through the forms.
pub const SPANISH: &str = "spa";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub official: String,
    #[serde(rename = "nativeName", default)]
    pub native_name: BTreeMap<String, NativeName>,
}

/// A `languages` map value: records created here store `true`, seeded records store the
/// language's display name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageEntry {
    Present(bool),
    Named(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Assigned by the store; never part of the document.
    #[serde(skip)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub independent: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub un_member: bool,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageEntry>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub creador: String,
    /// Seed-source fields kept verbatim (currencies, latlng, maps, flags, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Country {
    /// Official name of the Spanish native-name entry, if any.
    pub fn spanish_official(&self) -> Option<&str> {
        self.name
            .native_name
            .get(SPANISH)
            .map(|n| n.official.as_str())
    }

    /// Language codes as entered in the forms: uppercase, comma separated.
    pub fn language_codes(&self) -> String {
        self.languages
            .keys()
            .map(|k| k.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Top-level fields replaced by an update. Absent fields are left untouched in the stored document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CountryName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub independent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub un_member: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, LanguageEntry>>,
}

impl CountryPatch {
    /// The patch as a JSON object, ready for a shallow merge into a stored document.
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seed_document_keeps_unknown_fields() {
        let doc = json!({
            "name": {
                "common": "Bolivia",
                "official": "Plurinational State of Bolivia",
                "nativeName": { "spa": { "official": "Estado Plurinacional de Bolivia", "common": "Bolivia" } }
            },
            "independent": true,
            "unMember": true,
            "capital": ["Sucre"],
            "region": "Americas",
            "area": 1098581.0,
            "population": 11673029,
            "languages": { "spa": "Spanish", "aym": "Aymara" },
            "latlng": [-17.0, -65.0],
            "landlocked": true
        });
        let country: Country = serde_json::from_value(doc).unwrap();
        assert_eq!(country.spanish_official(), Some("Estado Plurinacional de Bolivia"));
        assert!(country.un_member);
        assert_eq!(
            country.languages.get("spa"),
            Some(&LanguageEntry::Named("Spanish".into()))
        );
        assert_eq!(country.extra.get("landlocked"), Some(&json!(true)));
        assert_eq!(country.language_codes(), "AYM, SPA");

        let back = serde_json::to_value(&country).unwrap();
        assert_eq!(back["latlng"], json!([-17.0, -65.0]));
        assert_eq!(back["unMember"], json!(true));
        assert!(back.get("id").is_none());
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = CountryPatch {
            borders: Some(vec![NO_BORDERS.to_string()]),
            population: Some(42),
            ..Default::default()
        };
        let doc = patch.to_document().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["borders"], json!(["no tiene fronteras"]));

        let flags = CountryPatch {
            un_member: Some(false),
            ..Default::default()
        };
        assert_eq!(flags.to_document().unwrap()["unMember"], json!(false));
    }
}
