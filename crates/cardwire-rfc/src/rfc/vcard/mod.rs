//! vCard (RFC 6350) properties and their plain-text, xCard and jCard forms.
//!
//! A [`core::VCard`] holds property types implementing
//! [`types::VCardType`]; [`xcard::XCardMarshaller`] turns records into an
//! xCard document.

pub mod core;
pub mod escape;
pub mod jcard;
pub mod types;
pub mod xcard;

#[cfg(test)]
mod tests;

pub use core::{VCard, VCardVersion};
pub use types::{SkipMe, VCardType};
pub use xcard::{AddVCardOutcome, XCardMarshaller};
