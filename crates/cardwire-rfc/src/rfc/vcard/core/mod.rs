//! vCard core types (RFC 6350).
//!
//! - [`VCard`] - the record container
//! - [`VCardVersion`] - target format revision
//! - [`CompatibilityMode`] - consumer-specific tolerance flag
//! - [`ParameterTable`] / [`VCardParameter`] - property parameters

mod compat;
mod parameter;
mod vcard;
mod version;

pub use compat::CompatibilityMode;
pub use parameter::{ParameterTable, VALUE_PARAM, VCardParameter};
pub use vcard::VCard;
pub use version::{VCardVersion, format_versions};
