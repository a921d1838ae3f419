//! Field checks for country form payloads.
//!
//! Every check runs; the result is the ordered list of messages for the checks that failed.

use regex::Regex;
use std::sync::OnceLock;

use crate::input::CountryForm;

/// Language codes accepted in the `languages` field.
pub const LANGUAGE_WHITELIST: &[&str] = &[
    "SPA", "ENG", "FRA", "DEU", "AYM", "QUE", "GRN", "CAT", "EUS", "GLC", "BER", "MEY", "POR", "BJZ", "CHA",
];

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 90;

pub const OFFICIAL_NAME_ERROR: &str = "El nombre oficial debe tener entre 3 y 90 caracteres.";
pub const CAPITAL_ERROR: &str = "Cada capital debe tener entre 3 y 90 caracteres.";
pub const BORDERS_ERROR: &str = "Cada frontera debe ser una cadena de 3 letras mayúsculas.";
pub const AREA_ERROR: &str = "El área debe ser un número positivo.";
pub const POPULATION_ERROR: &str = "La población debe ser un número entero positivo.";

fn border_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[A-Z]{3}$").expect("static pattern"))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a whole form. Empty result means valid.
    pub fn validate(form: &CountryForm) -> Vec<String> {
        let borders = split_codes(form.borders.as_deref());
        let languages = split_codes(form.languages.as_deref());
        [
            validate_official_name(form.spanish_official()),
            validate_capital(form.capital.as_ref().map(|c| c.as_slice())),
            validate_borders(&borders),
            validate_area(form.area.as_deref()),
            validate_population(form.population.as_deref()),
            validate_languages(&languages),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Comma-separated input → trimmed, uppercased entries. Absent or blank input is an empty list.
pub fn split_codes(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) if !s.trim().is_empty() => s.split(',').map(|c| c.trim().to_uppercase()).collect(),
        _ => Vec::new(),
    }
}

fn length_in_range(s: &str) -> bool {
    (NAME_MIN..=NAME_MAX).contains(&s.chars().count())
}

pub fn validate_official_name(name: Option<&str>) -> Option<String> {
    match name {
        Some(n) if length_in_range(n) => None,
        _ => Some(OFFICIAL_NAME_ERROR.to_string()),
    }
}

/// `None` means the field was missing, which fails like any bad element.
pub fn validate_capital(capital: Option<&[String]>) -> Option<String> {
    match capital {
        Some(list) if list.iter().all(|c| length_in_range(c)) => None,
        _ => Some(CAPITAL_ERROR.to_string()),
    }
}

pub fn validate_borders(borders: &[String]) -> Option<String> {
    if borders.iter().all(|b| border_pattern().is_match(b)) {
        None
    } else {
        Some(BORDERS_ERROR.to_string())
    }
}

/// Parsed area, if the text is a finite positive number.
pub fn parse_area(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|a| a.is_finite() && *a > 0.0)
}

pub fn validate_area(raw: Option<&str>) -> Option<String> {
    match parse_area(raw) {
        Some(_) => None,
        None => Some(AREA_ERROR.to_string()),
    }
}

/// Parsed population, if the text is a positive integer.
pub fn parse_population(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).filter(|p| *p > 0)
}

pub fn validate_population(raw: Option<&str>) -> Option<String> {
    match parse_population(raw) {
        Some(_) => None,
        None => Some(POPULATION_ERROR.to_string()),
    }
}

/// Reports the first code outside the whitelist.
pub fn validate_languages(codes: &[String]) -> Option<String> {
    codes
        .iter()
        .find(|code| !LANGUAGE_WHITELIST.contains(&code.as_str()))
        .map(|code| format!("El idioma {} no es válido.", code))
}
