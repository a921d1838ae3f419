use maud::{html, Markup};

use super::layout;

pub fn index() -> Markup {
    layout(
        "Inicio",
        html! {
            p { "Catálogo de países de habla hispana." }
            ul {
                li { a href="/paises" { "Ver la lista de países" } }
                li { a href="/addPais" { "Agregar un país" } }
            }
        },
    )
}
