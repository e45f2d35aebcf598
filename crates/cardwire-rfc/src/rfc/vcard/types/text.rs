//! Properties with a single text value.

use super::{PropertyHeader, SkipMe, VCardType, names};
use crate::rfc::vcard::core::{CompatibilityMode, VCardVersion};
use crate::rfc::vcard::escape;
use crate::rfc::vcard::jcard::JCardValue;
use crate::rfc::vcard::xcard::XCardElement;

/// A property with one text value (FN, NOTE, extended `X-` properties).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextType {
    header: PropertyHeader,
    value: String,
}

impl TextType {
    /// Creates a text property supported by every version.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header: PropertyHeader::new(name, &VCardVersion::ALL),
            value: value.into(),
        }
    }

    /// FN (RFC 6350 §6.2.1).
    #[must_use]
    pub fn formatted_name(value: impl Into<String>) -> Self {
        Self::new(names::FN, value)
    }

    /// Creates a text property in a group.
    #[must_use]
    pub fn grouped(
        group: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut text = Self::new(name, value);
        text.header.group = Some(group.into());
        text
    }

    /// Restricts the versions this property may be written to.
    #[must_use]
    pub fn with_supported_versions(mut self, versions: &'static [VCardVersion]) -> Self {
        self.header.supported_versions = versions;
        self
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl VCardType for TextType {
    header_accessors!();

    fn marshal_text(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<String, SkipMe> {
        Ok(escape::escape_text(&self.value))
    }

    fn unmarshal_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        self.value = escape::unescape(value);
    }

    fn marshal_xml(
        &self,
        parent: &mut XCardElement,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<(), SkipMe> {
        parent.append_text("text", &self.value);
        Ok(())
    }

    fn unmarshal_xml(
        &mut self,
        element: &XCardElement,
        warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        if let Some(text) = element.first("text") {
            self.value = text;
        } else {
            warnings.push(format!(
                "{} element has no <text> child; using its text content.",
                self.header.name
            ));
            self.value = element.text_content();
        }
    }

    fn marshal_json(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) -> Result<JCardValue, SkipMe> {
        Ok(JCardValue::text([self.value.as_str()]))
    }

    fn unmarshal_json(
        &mut self,
        value: &JCardValue,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) {
        self.value = value
            .values_as_strings()
            .into_iter()
            .find_map(|group| group.into_iter().next())
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const V4: VCardVersion = VCardVersion::V4_0;
    const RFC: CompatibilityMode = CompatibilityMode::Rfc;

    #[test]
    fn text_names_are_uppercased() {
        let text = TextType::new("x-generator", "cardwire");
        assert_eq!(text.type_name(), "X-GENERATOR");
        assert_eq!(text.group(), None);
    }

    #[test]
    fn text_round_trips_plain_text() {
        let text = TextType::formatted_name("Doe, John; Jr.");
        let mut warnings = Vec::new();
        let marshalled = text.marshal_text(V4, &mut warnings, RFC).unwrap();
        assert_eq!(marshalled, r"Doe\, John\; Jr.");

        let mut parsed = TextType::formatted_name("");
        parsed.unmarshal_text(&marshalled, V4, &mut warnings, RFC);
        assert_eq!(parsed.value(), "Doe, John; Jr.");
        assert!(warnings.is_empty());
    }

    #[test]
    fn unmarshal_xml_without_text_child_warns() {
        let element = XCardElement::parse(
            br#"<note xmlns="urn:ietf:params:xml:ns:vcard-4.0">loose</note>"#,
        )
        .unwrap();

        let mut note = TextType::new(names::NOTE, "");
        let mut warnings = Vec::new();
        note.unmarshal_xml(&element, &mut warnings, RFC);

        assert_eq!(note.value(), "loose");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn json_value_is_single_text() {
        let text = TextType::grouped("item1", "NOTE", "hello");
        let mut warnings = Vec::new();
        let jcard = text.to_jcard(V4, &mut warnings).unwrap();
        assert_eq!(jcard.to_json(), json!(["note", {"group": "item1"}, "text", "hello"]));

        let mut parsed = TextType::new("NOTE", "");
        parsed.unmarshal_json(&jcard.value, V4, &mut warnings);
        assert_eq!(parsed.value(), "hello");
    }
}
