use maud::{html, Markup};

use super::{error_list, layout};
use crate::input::CountryForm;
use crate::model::{Country, LanguageEntry};

/// Text values for the shared form fields, from either a submitted draft or a stored record.
#[derive(Default)]
struct FieldValues {
    common: String,
    official: String,
    native_official: String,
    independent: bool,
    un_member: bool,
    status: String,
    capital: Vec<String>,
    region: String,
    subregion: String,
    area: String,
    population: String,
    flag: String,
    borders: String,
    languages: String,
    timezones: String,
}

impl From<&CountryForm> for FieldValues {
    fn from(form: &CountryForm) -> Self {
        Self {
            common: form.name.common.clone().unwrap_or_default(),
            official: form.name.official.clone().unwrap_or_default(),
            native_official: form.spanish_official().unwrap_or_default().to_string(),
            independent: form.independent,
            un_member: form.un_member,
            status: form.status.clone().unwrap_or_default(),
            capital: form.capital.as_ref().map(|c| c.as_slice().to_vec()).unwrap_or_default(),
            region: form.region.clone().unwrap_or_default(),
            subregion: form.subregion.clone().unwrap_or_default(),
            area: form.area.clone().unwrap_or_default(),
            population: form.population.clone().unwrap_or_default(),
            flag: form.flag.clone().unwrap_or_default(),
            borders: form.borders.clone().unwrap_or_default(),
            languages: form.languages.clone().unwrap_or_default(),
            timezones: form.timezones.as_ref().map(|t| t.joined()).unwrap_or_default(),
        }
    }
}

impl From<&Country> for FieldValues {
    fn from(c: &Country) -> Self {
        Self {
            common: c.name.common.clone(),
            official: c.name.official.clone(),
            native_official: c.spanish_official().unwrap_or_default().to_string(),
            independent: c.independent,
            un_member: c.un_member,
            status: c.status.clone(),
            capital: c.capital.clone(),
            region: c.region.clone(),
            subregion: c.subregion.clone(),
            area: c.area.to_string(),
            population: c.population.to_string(),
            flag: c.flag.clone(),
            // The sentinel is not a code; show it as blank so resubmitting keeps it.
            borders: c
                .borders
                .iter()
                .filter(|b| b.len() == 3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            languages: c.language_codes(),
            timezones: c.timezones.join(", "),
        }
    }
}

fn text_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            input type="text" name=(name) value=(value);
        }
    }
}

fn form_fields(v: &FieldValues) -> Markup {
    html! {
        (text_field("Nombre común", "name[common]", &v.common))
        (text_field("Nombre oficial", "name[official]", &v.official))
        (text_field("Nombre oficial (español)", "name[nativeName][spa][official]", &v.native_official))
        label {
            input type="checkbox" name="independent" value="true" checked[v.independent];
            " Independiente"
        }
        label {
            input type="checkbox" name="unMember" value="true" checked[v.un_member];
            " Miembro de la ONU"
        }
        (text_field("Estado", "status", &v.status))
        fieldset {
            legend { "Capitales" }
            @if v.capital.is_empty() {
                input type="text" name="capital[]" value="";
            }
            @for c in &v.capital {
                input type="text" name="capital[]" value=(c);
            }
        }
        (text_field("Región", "region", &v.region))
        (text_field("Subregión", "subregion", &v.subregion))
        (text_field("Área (km²)", "area", &v.area))
        (text_field("Población", "population", &v.population))
        (text_field("Bandera", "flag", &v.flag))
        (text_field("Fronteras (códigos separados por coma)", "borders", &v.borders))
        (text_field("Idiomas (códigos separados por coma)", "languages", &v.languages))
        (text_field("Zonas horarias (separadas por coma)", "timezones", &v.timezones))
    }
}

pub fn add_form(errors: &[String], draft: &CountryForm) -> Markup {
    let values = FieldValues::from(draft);
    layout(
        "Agregar País",
        html! {
            (error_list(errors))
            form method="post" action="/pais" {
                (form_fields(&values))
                button type="submit" { "Agregar" }
            }
        },
    )
}

pub fn edit_form(country: &Country, errors: &[String]) -> Markup {
    let values = FieldValues::from(country);
    let id = country.id.map(|id| id.to_string()).unwrap_or_default();
    layout(
        "Editar País",
        html! {
            (error_list(errors))
            form method="post" action={ "/pais/" (id) "?_method=PUT" } {
                (form_fields(&values))
                button type="submit" { "Guardar cambios" }
            }
        },
    )
}

fn language_label(code: &str, entry: &LanguageEntry) -> String {
    match entry {
        LanguageEntry::Named(name) => name.clone(),
        LanguageEntry::Present(_) => code.to_uppercase(),
    }
}

pub fn list(countries: &[Country], message: Option<&str>) -> Markup {
    let total_population: u64 = countries.iter().map(|c| c.population).sum();
    let total_area: f64 = countries.iter().map(|c| c.area).sum();
    layout(
        "Lista de Países",
        html! {
            @if let Some(msg) = message {
                p.success { (msg) }
            }
            @if countries.is_empty() {
                p { "No hay países cargados." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Bandera" }
                            th { "Nombre" }
                            th { "Nombre oficial" }
                            th { "Capital" }
                            th { "Región" }
                            th { "Área (km²)" }
                            th { "Población" }
                            th { "Fronteras" }
                            th { "Idiomas" }
                            th { "Zonas horarias" }
                            th { "Creador" }
                            th { "Acciones" }
                        }
                    }
                    tbody {
                        @for c in countries {
                            @let id = c.id.map(|id| id.to_string()).unwrap_or_default();
                            tr {
                                td { (c.flag) }
                                td { (c.name.common) }
                                td { (c.spanish_official().unwrap_or(&c.name.official)) }
                                td { (c.capital.join(", ")) }
                                td { (c.region) }
                                td { (c.area) }
                                td { (c.population) }
                                td { (c.borders.join(", ")) }
                                td {
                                    (c.languages.iter().map(|(k, v)| language_label(k, v)).collect::<Vec<_>>().join(", "))
                                }
                                td { (c.timezones.join(", ")) }
                                td { (c.creador) }
                                td {
                                    a href={ "/editPais/" (id) } { "Editar" }
                                    form method="post" action={ "/pais/" (id) "?_method=DELETE" } {
                                        button type="submit" { "Eliminar" }
                                    }
                                }
                            }
                        }
                    }
                    tfoot {
                        tr {
                            td colspan="5" { "Totales" }
                            td { (total_area) }
                            td { (total_population) }
                            td colspan="5" {}
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_BORDERS;

    #[test]
    fn add_form_echoes_draft_and_errors() {
        let draft = CountryForm {
            area: Some("-5".into()),
            flag: Some("<script>".into()),
            ..Default::default()
        };
        let html = add_form(&["El área debe ser un número positivo.".to_string()], &draft).into_string();
        assert!(html.contains("El área debe ser un número positivo."));
        assert!(html.contains(r#"value="-5""#));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn edit_form_hides_sentinel_border() {
        let country = Country {
            id: Some(uuid::Uuid::nil()),
            borders: vec![NO_BORDERS.to_string()],
            ..Default::default()
        };
        let html = edit_form(&country, &[]).into_string();
        assert!(html.contains("/pais/00000000-0000-0000-0000-000000000000?_method=PUT"));
        assert!(!html.contains(NO_BORDERS));
    }
}
