//! MEMBER (RFC 6350 §6.6.5).

use super::{PropertyHeader, SkipMe, VCardType, names};
use crate::rfc::vcard::core::{CompatibilityMode, VCardVersion};
use crate::rfc::vcard::jcard::{JCardDataType, JCardValue};
use crate::rfc::vcard::xcard::XCardElement;

const V4_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

/// A member of a group record, identified by URI.
///
/// Only valid on records whose KIND is `group`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberType {
    header: PropertyHeader,
    uri: String,
}

impl MemberType {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            header: PropertyHeader::new(names::MEMBER, V4_ONLY),
            uri: uri.into(),
        }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }
}

impl VCardType for MemberType {
    header_accessors!();

    fn requires_group_kind(&self) -> bool {
        true
    }

    fn marshal_text(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<String, SkipMe> {
        if self.uri.is_empty() {
            return Err(SkipMe::new("MEMBER has no URI"));
        }
        Ok(self.uri.clone())
    }

    fn unmarshal_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        self.uri = value.trim().to_string();
    }

    fn marshal_xml(
        &self,
        parent: &mut XCardElement,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) -> Result<(), SkipMe> {
        if self.uri.is_empty() {
            return Err(SkipMe::new("MEMBER has no URI"));
        }
        parent.append_text("uri", &self.uri);
        Ok(())
    }

    fn unmarshal_xml(
        &mut self,
        element: &XCardElement,
        warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
    ) {
        if let Some(uri) = element.first("uri") {
            self.uri = uri;
        } else {
            warnings.push("MEMBER element has no <uri> child.".to_string());
            self.uri.clear();
        }
    }

    fn marshal_json(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) -> Result<JCardValue, SkipMe> {
        if self.uri.is_empty() {
            return Err(SkipMe::new("MEMBER has no URI"));
        }
        Ok(JCardValue::single(JCardDataType::Uri, self.uri.clone()))
    }

    fn unmarshal_json(
        &mut self,
        value: &JCardValue,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
    ) {
        self.uri = value
            .values_as_strings()
            .into_iter()
            .find_map(|group| group.into_iter().next())
            .unwrap_or_default();
    }
}
