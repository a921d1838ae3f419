//! Raw country form payload, parsed once at the request boundary.
//!
//! URL-encoded bodies use bracketed names (`name[nativeName][spa][official]`, `capital[]`);
//! JSON bodies use the nested object shape. Both end up in [`CountryForm`].

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use crate::model::SPANISH;

/// A field that may arrive as one string or as a list of strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(s) => std::slice::from_ref(s),
            OneOrMany::Many(v) => v,
        }
    }

    /// Joined back for echoing into a single text input.
    pub fn joined(&self) -> String {
        self.as_slice().join(", ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NativeNameForm {
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
    #[serde(rename = "nativeName", default)]
    pub native_name: BTreeMap<String, NativeNameForm>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryForm {
    #[serde(default)]
    pub name: NameForm,
    #[serde(default, deserialize_with = "checkbox")]
    pub independent: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub un_member: bool,
    #[serde(default)]
    pub capital: Option<OneOrMany>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default, deserialize_with = "number_text")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "number_text")]
    pub population: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub borders: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub timezones: Option<OneOrMany>,
}

impl CountryForm {
    /// Build from URL-encoded `(key, value)` pairs in body order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = CountryForm::default();
        let mut capital = ListField::default();
        let mut timezones = ListField::default();

        for (key, value) in pairs {
            match key.as_str() {
                "name[common]" => form.name.common = Some(value),
                "name[official]" => form.name.official = Some(value),
                "independent" => form.independent = checkbox_value(&value),
                "unMember" => form.un_member = checkbox_value(&value),
                "status" => form.status = Some(value),
                "capital" => capital.push(value, false),
                "capital[]" => capital.push(value, true),
                "region" => form.region = Some(value),
                "subregion" => form.subregion = Some(value),
                "area" => form.area = Some(value),
                "population" => form.population = Some(value),
                "flag" => form.flag = Some(value),
                "borders" => form.borders = Some(value),
                "languages" => form.languages = Some(value),
                "timezones" => timezones.push(value, false),
                "timezones[]" => timezones.push(value, true),
                other => {
                    if let Some(lang) = native_official_key(other) {
                        form.name.native_name.entry(lang.to_string()).or_default().official = Some(value);
                    }
                }
            }
        }
        form.capital = capital.finish();
        form.timezones = timezones.finish();
        form
    }

    /// `name.nativeName.spa.official`, the name the validator checks.
    pub fn spanish_official(&self) -> Option<&str> {
        self.name
            .native_name
            .get(SPANISH)
            .and_then(|n| n.official.as_deref())
    }
}

/// `name[nativeName][<lang>][official]` → `<lang>`.
fn native_official_key(key: &str) -> Option<&str> {
    key.strip_prefix("name[nativeName][")?
        .strip_suffix("][official]")
        .filter(|lang| !lang.is_empty() && !lang.contains(['[', ']']))
}

#[derive(Default)]
struct ListField {
    values: Vec<String>,
    bracketed: bool,
}

impl ListField {
    fn push(&mut self, value: String, bracketed: bool) {
        self.bracketed |= bracketed;
        self.values.push(value);
    }

    fn finish(mut self) -> Option<OneOrMany> {
        match self.values.len() {
            0 => None,
            1 if !self.bracketed => self.values.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(self.values)),
        }
    }
}

fn checkbox_value(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "on" | "true" | "1" | "yes")
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Bool(b)) => b,
        Some(Raw::Text(s)) => checkbox_value(&s),
        None => false,
    })
}

/// Numbers may arrive as JSON numbers or as text; both are kept as text for the validator.
fn number_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Number(n) => number_to_text(&n),
        Raw::Text(s) => s,
    }))
}

/// `11000000.0` is written as `11000000` so whole floats pass the integer check.
fn number_to_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn urlencoded_pairs_fill_nested_names() {
        let form = CountryForm::from_pairs(pairs(&[
            ("name[common]", "Bolivia"),
            ("name[nativeName][spa][official]", "Estado Plurinacional de Bolivia"),
            ("capital", "La Paz"),
            ("unMember", "on"),
            ("area", "1098581"),
        ]));
        assert_eq!(form.name.common.as_deref(), Some("Bolivia"));
        assert_eq!(form.spanish_official(), Some("Estado Plurinacional de Bolivia"));
        assert_eq!(form.capital, Some(OneOrMany::One("La Paz".into())));
        assert!(form.un_member);
        assert!(!form.independent);
        assert_eq!(form.area.as_deref(), Some("1098581"));
    }

    #[test]
    fn repeated_or_bracketed_keys_become_lists() {
        let form = CountryForm::from_pairs(pairs(&[
            ("capital", "Sucre"),
            ("capital", "La Paz"),
            ("timezones[]", "UTC-04:00"),
        ]));
        assert_eq!(
            form.capital,
            Some(OneOrMany::Many(vec!["Sucre".into(), "La Paz".into()]))
        );
        assert_eq!(form.timezones, Some(OneOrMany::Many(vec!["UTC-04:00".into()])));
    }

    #[test]
    fn malformed_native_name_keys_are_ignored() {
        let form = CountryForm::from_pairs(pairs(&[
            ("name[nativeName][][official]", "x"),
            ("name[nativeName][spa][common]", "y"),
        ]));
        assert!(form.name.native_name.is_empty());
    }

    #[test]
    fn json_body_accepts_numbers_and_single_strings() {
        let form: CountryForm = serde_json::from_value(json!({
            "name": { "common": "Chile", "nativeName": { "spa": { "official": "República de Chile" } } },
            "independent": true,
            "capital": "Santiago",
            "area": 756102.4,
            "population": "19116209",
            "timezones": ["UTC-06:00", "UTC-04:00"]
        }))
        .unwrap();
        assert!(form.independent);
        assert_eq!(form.area.as_deref(), Some("756102.4"));
        assert_eq!(form.population.as_deref(), Some("19116209"));
        assert_eq!(form.capital.as_ref().map(OneOrMany::as_slice), Some(&["Santiago".to_string()][..]));
        assert_eq!(form.spanish_official(), Some("República de Chile"));
    }

    #[test]
    fn whole_json_floats_read_as_integers() {
        let form: CountryForm = serde_json::from_value(json!({
            "area": 1098581.0,
            "population": 11000000.0
        }))
        .unwrap();
        assert_eq!(form.area.as_deref(), Some("1098581"));
        assert_eq!(form.population.as_deref(), Some("11000000"));
        assert_eq!(crate::service::validation::validate_population(form.population.as_deref()), None);

        let form: CountryForm = serde_json::from_value(json!({ "population": 12.5 })).unwrap();
        assert_eq!(form.population.as_deref(), Some("12.5"));
    }
}
