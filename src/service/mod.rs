//! CountryService and form validation.

mod countries;
pub mod validation;
pub use countries::{languages_map, new_country, update_patch, CountryService};
pub use validation::RequestValidator;
