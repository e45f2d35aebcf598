//! Properties whose value is an ordered list of text values.

use super::{PropertyHeader, SkipMe, VCardType, names};
use crate::rfc::vcard::core::{CompatibilityMode, VCardVersion};
use crate::rfc::vcard::escape;
use crate::rfc::vcard::jcard::JCardValue;
use crate::rfc::vcard::xcard::XCardElement;

const V3_AND_V4: &[VCardVersion] = &[VCardVersion::V3_0, VCardVersion::V4_0];

/// A property holding an ordered list of text values (e.g. NICKNAME).
///
/// In plain text the values are escape-joined with a property-specific
/// separator. In xCard each value is its own `text` element and in jCard its
/// own `text` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextListType {
    header: PropertyHeader,
    values: Vec<String>,
    separator: char,
}

impl TextListType {
    /// Creates an empty list property supported by every version.
    #[must_use]
    pub fn new(name: impl Into<String>, separator: char) -> Self {
        Self {
            header: PropertyHeader::new(name, &VCardVersion::ALL),
            values: Vec::new(),
            separator,
        }
    }

    /// NICKNAME (RFC 6350 §6.2.3).
    #[must_use]
    pub fn nickname() -> Self {
        Self {
            header: PropertyHeader::new(names::NICKNAME, V3_AND_V4),
            values: Vec::new(),
            separator: ',',
        }
    }

    /// CATEGORIES (RFC 6350 §6.7.1).
    #[must_use]
    pub fn categories() -> Self {
        Self {
            header: PropertyHeader::new(names::CATEGORIES, V3_AND_V4),
            values: Vec::new(),
            separator: ',',
        }
    }

    /// Sets the values, builder style.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<String> {
        &mut self.values
    }

    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Removes the first occurrence of `value`. Returns whether one was found.
    pub fn remove_value(&mut self, value: &str) -> bool {
        if let Some(index) = self.values.iter().position(|v| v == value) {
            self.values.remove(index);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }
}

impl VCardType for TextListType {
    header_accessors!();

    fn marshal_text(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<String, SkipMe> {
        Ok(escape::join(&self.values, self.separator))
    }

    fn unmarshal_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        self.values = escape::split(value, self.separator, true, true);
    }

    fn marshal_xml(
        &self,
        parent: &mut XCardElement,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<(), SkipMe> {
        parent.append("text", &self.values);
        Ok(())
    }

    fn unmarshal_xml(
        &mut self,
        element: &XCardElement,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        self.values = element.get_all("text");
    }

    fn marshal_json(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) -> Result<JCardValue, SkipMe> {
        Ok(JCardValue::text(self.values.iter().cloned()))
    }

    fn unmarshal_json(
        &mut self,
        value: &JCardValue,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) {
        self.values = value
            .values_as_strings()
            .into_iter()
            .filter_map(|group| group.into_iter().next())
            .collect();
    }
}
