//! KIND (RFC 6350 §6.1.4).

use super::{PropertyHeader, SkipMe, VCardType, names};
use crate::rfc::vcard::core::{CompatibilityMode, VCardVersion};
use crate::rfc::vcard::escape;
use crate::rfc::vcard::jcard::JCardValue;
use crate::rfc::vcard::xcard::XCardElement;

const V4_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

/// vCard KIND property values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VCardKind {
    /// An individual person.
    #[default]
    Individual,
    /// A group of people.
    Group,
    /// An organization.
    Organization,
    /// A named location.
    Location,
    /// Extension or unknown kind.
    Other(String),
}

impl VCardKind {
    /// Parses from kind string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "individual" => Self::Individual,
            "group" => Self::Group,
            "org" | "organization" => Self::Organization,
            "location" => Self::Location,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the kind string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Individual => "individual",
            Self::Group => "group",
            Self::Organization => "org",
            Self::Location => "location",
            Self::Other(s) => s,
        }
    }
}

/// The record classification property. Only vCard 4.0 defines it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindType {
    header: PropertyHeader,
    kind: VCardKind,
}

impl KindType {
    #[must_use]
    pub fn new(kind: VCardKind) -> Self {
        Self {
            header: PropertyHeader::new(names::KIND, V4_ONLY),
            kind,
        }
    }

    #[must_use]
    pub fn group() -> Self {
        Self::new(VCardKind::Group)
    }

    #[must_use]
    pub fn kind(&self) -> &VCardKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: VCardKind) {
        self.kind = kind;
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == VCardKind::Group
    }
}

impl VCardType for KindType {
    header_accessors!();

    fn marshal_text(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<String, SkipMe> {
        Ok(escape::escape_text(self.kind.as_str()))
    }

    fn unmarshal_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        self.kind = VCardKind::parse(&escape::unescape(value));
    }

    fn marshal_xml(
        &self,
        parent: &mut XCardElement,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<(), SkipMe> {
        parent.append_text("text", self.kind.as_str());
        Ok(())
    }

    fn unmarshal_xml(
        &mut self,
        element: &XCardElement,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        let text = element
            .first("text")
            .unwrap_or_else(|| element.text_content());
        self.kind = VCardKind::parse(&text);
    }

    fn marshal_json(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) -> Result<JCardValue, SkipMe> {
        Ok(JCardValue::text([self.kind.as_str()]))
    }

    fn unmarshal_json(
        &mut self,
        value: &JCardValue,
        _version: VCardVersion,
        warnings: &mut Vec<String>,
    ) {
        match value
            .values_as_strings()
            .into_iter()
            .find_map(|group| group.into_iter().next())
        {
            Some(text) => self.kind = VCardKind::parse(&text),
            None => warnings.push("KIND has no value; keeping the default kind.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse() {
        assert_eq!(VCardKind::parse("individual"), VCardKind::Individual);
        assert_eq!(VCardKind::parse("GROUP"), VCardKind::Group);
        assert_eq!(VCardKind::parse("org"), VCardKind::Organization);
        assert_eq!(VCardKind::parse("x-robot").as_str(), "x-robot");
    }

    #[test]
    fn kind_is_group() {
        assert!(KindType::group().is_group());
        assert!(!KindType::new(VCardKind::Location).is_group());
    }

    #[test]
    fn kind_only_supports_v4() {
        assert_eq!(KindType::group().supported_versions(), [VCardVersion::V4_0]);
    }

    #[test]
    fn kind_unmarshal_text() {
        let mut kind = KindType::new(VCardKind::Individual);
        let mut warnings = Vec::new();
        kind.unmarshal_text("group", VCardVersion::V4_0, &mut warnings, CompatibilityMode::Rfc);
        assert!(kind.is_group());
    }

    #[test]
    fn kind_unmarshal_empty_json_warns() {
        let mut kind = KindType::group();
        let mut warnings = Vec::new();
        kind.unmarshal_json(&JCardValue::default(), VCardVersion::V4_0, &mut warnings);
        assert!(kind.is_group());
        assert_eq!(warnings.len(), 1);
    }
}
