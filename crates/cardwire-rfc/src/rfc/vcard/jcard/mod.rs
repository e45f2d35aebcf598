//! jCard (RFC 7095) values.

mod property;
mod value;

pub use property::JCardProperty;
pub use value::{JCardDataType, JCardValue};
