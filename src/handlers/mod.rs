//! HTTP handlers for the country pages and forms.

pub mod country;
pub mod pages;
pub use country::*;
pub use pages::*;
