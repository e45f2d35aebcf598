//! The contact record container.

use super::version::VCardVersion;
use crate::rfc::vcard::types::{KindType, TextType, VCardType};

/// A complete vCard.
///
/// Holds typed slots for the properties marshallers need to inspect (FN and
/// KIND), an ordered list of general properties and the extended properties.
/// [`VCard::types`] enumerates all of them without introspection.
#[derive(Debug, Default)]
pub struct VCard {
    /// Version the record was read from or is meant for.
    pub version: VCardVersion,
    formatted_name: Option<TextType>,
    kind: Option<KindType>,
    properties: Vec<Box<dyn VCardType>>,
    extended: Vec<Box<dyn VCardType>>,
}

impl VCard {
    /// Creates a new vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Returns the FN property.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&TextType> {
        self.formatted_name.as_ref()
    }

    pub fn set_formatted_name(&mut self, formatted_name: Option<TextType>) {
        self.formatted_name = formatted_name;
    }

    /// Returns the KIND property.
    #[must_use]
    pub fn kind(&self) -> Option<&KindType> {
        self.kind.as_ref()
    }

    pub fn set_kind(&mut self, kind: Option<KindType>) {
        self.kind = kind;
    }

    /// Returns whether KIND is present and set to `group`.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind.as_ref().is_some_and(KindType::is_group)
    }

    /// Adds a property to the vCard.
    pub fn add_type(&mut self, property: impl VCardType + 'static) {
        self.properties.push(Box::new(property));
    }

    /// Adds an extended (`X-` or otherwise unrecognised) property.
    pub fn add_extended_type(&mut self, property: impl VCardType + 'static) {
        self.extended.push(Box::new(property));
    }

    /// Returns the extended properties with the given name (case-insensitive).
    #[must_use]
    pub fn extended_types(&self, name: &str) -> Vec<&(dyn VCardType + 'static)> {
        self.extended
            .iter()
            .filter(|p| p.type_name().eq_ignore_ascii_case(name))
            .map(Box::as_ref)
            .collect()
    }

    /// Removes every extended property with the given name.
    pub fn remove_extended_types(&mut self, name: &str) {
        self.extended
            .retain(|p| !p.type_name().eq_ignore_ascii_case(name));
    }

    /// Enumerates every property: FN, KIND, the general properties in
    /// insertion order, then the extended properties in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &(dyn VCardType + 'static)> {
        let formatted_name = self
            .formatted_name
            .iter()
            .map(|p| p as &(dyn VCardType + 'static));
        let kind = self
            .kind
            .iter()
            .map(|p| p as &(dyn VCardType + 'static));
        formatted_name
            .chain(kind)
            .chain(self.properties.iter().map(Box::as_ref))
            .chain(self.extended.iter().map(Box::as_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::types::{MemberType, TextListType, VCardKind};

    #[test]
    fn vcard_new() {
        let card = VCard::new();
        assert_eq!(card.version, VCardVersion::V4_0);
        assert_eq!(card.types().count(), 0);
        assert!(!card.is_group());
    }

    #[test]
    fn types_enumerates_in_registration_order() {
        let mut card = VCard::new();
        card.add_extended_type(TextType::new("X-SPOUSE", "Bob"));
        card.add_type(TextListType::nickname().with_values(["Anna"]));
        card.set_kind(Some(KindType::group()));
        card.set_formatted_name(Some(TextType::formatted_name("Anna")));
        card.add_type(MemberType::new("urn:uuid:1"));

        let names: Vec<&str> = card.types().map(VCardType::type_name).collect();
        assert_eq!(names, vec!["FN", "KIND", "NICKNAME", "MEMBER", "X-SPOUSE"]);
        assert!(card.is_group());
    }

    #[test]
    fn extended_types_by_name() {
        let mut card = VCard::new();
        card.add_extended_type(TextType::new("X-SPOUSE", "Bob"));
        card.add_extended_type(TextType::new("x-spouse", "Carl"));
        card.add_extended_type(TextType::new("X-PET", "Rex"));

        assert_eq!(card.extended_types("X-Spouse").len(), 2);
        card.remove_extended_types("x-spouse");
        assert!(card.extended_types("X-SPOUSE").is_empty());
        assert_eq!(card.types().count(), 1);
    }

    #[test]
    fn kind_other_than_group() {
        let mut card = VCard::new();
        card.set_kind(Some(KindType::new(VCardKind::Organization)));
        assert!(!card.is_group());
    }
}
