//! Contact data formats.

pub mod vcard;
