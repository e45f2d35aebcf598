//! xCard (RFC 6351): the XML representation of vCards.
//!
//! [`XCardMarshaller`] assembles a `<vcards>` document one record at a time;
//! [`XCardElement`] is the namespaced element tree it builds and that
//! property types read their values from.

mod element;
mod error;
mod marshaller;
mod namespace;

pub use element::{XCardElement, XmlNode};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use marshaller::{AddVCardOutcome, GENERATOR_VALUE, XCardMarshaller, parameter_value_element};
pub use namespace::{Namespace, XCARD_NS_PREFIX, XCARD_NS_V2_1, XCARD_NS_V3_0, XCARD_NS_V4_0};
