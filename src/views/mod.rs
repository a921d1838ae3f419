//! Server-rendered pages. All dynamic content is HTML-escaped by maud.

mod countries;
mod home;

pub use countries::{add_form, edit_form, list};
pub use home::index;

use maud::{html, Markup, DOCTYPE};

/// Shared page frame: head, navigation, and the page body.
pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/css/styles.css";
            }
            body {
                nav {
                    a href="/" { "Inicio" }
                    " | "
                    a href="/paises" { "Lista de Países" }
                    " | "
                    a href="/addPais" { "Agregar País" }
                }
                main {
                    h1 { (title) }
                    (body)
                }
            }
        }
    }
}

/// Validation messages above a form.
fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errores {
                @for e in errors {
                    li { (e) }
                }
            }
        }
    }
}
