//! The property contract and the concrete property types.
//!
//! Every property ("type" in vCard parlance) implements [`VCardType`]: it
//! marshals itself to and from the plain-text, xCard and jCard formats and
//! declares which vCard versions may carry it. Orchestrators depend on the
//! trait only.

use std::fmt;

use crate::rfc::vcard::core::{CompatibilityMode, ParameterTable, VCard, VCardVersion};
use crate::rfc::vcard::jcard::{JCardProperty, JCardValue};
use crate::rfc::vcard::xcard::XCardElement;

/// Common property names.
pub mod names {
    pub const FN: &str = "FN";
    pub const NICKNAME: &str = "NICKNAME";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const KIND: &str = "KIND";
    pub const MEMBER: &str = "MEMBER";
    pub const NOTE: &str = "NOTE";
    pub const X_GENERATOR: &str = "X-GENERATOR";
}

/// A property's request to be left out of the output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct SkipMe {
    pub reason: String,
}

impl SkipMe {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Name, group and parameters shared by every property type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyHeader {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    pub sub_types: ParameterTable,
    pub supported_versions: &'static [VCardVersion],
}

impl PropertyHeader {
    #[must_use]
    pub fn new(name: impl Into<String>, supported_versions: &'static [VCardVersion]) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            group: None,
            sub_types: ParameterTable::new(),
            supported_versions,
        }
    }
}

/// Implements the header accessors of [`VCardType`] for a struct with a
/// `header: PropertyHeader` field.
macro_rules! header_accessors {
    () => {
        fn type_name(&self) -> &str {
            &self.header.name
        }

        fn group(&self) -> Option<&str> {
            self.header.group.as_deref()
        }

        fn set_group(&mut self, group: Option<String>) {
            self.header.group = group;
        }

        fn sub_types(&self) -> &$crate::rfc::vcard::core::ParameterTable {
            &self.header.sub_types
        }

        fn sub_types_mut(&mut self) -> &mut $crate::rfc::vcard::core::ParameterTable {
            &mut self.header.sub_types
        }

        fn supported_versions(&self) -> &[$crate::rfc::vcard::core::VCardVersion] {
            self.header.supported_versions
        }
    };
}

mod kind;
mod member;
mod text;
mod text_list;

pub use kind::{KindType, VCardKind};
pub use member::MemberType;
pub use text::TextType;
pub use text_list::TextListType;

/// The contract every property type fulfils.
///
/// Content problems are reported by pushing human-readable strings onto
/// `warnings`; unmarshalling never fails and always replaces the previous
/// value.
pub trait VCardType: fmt::Debug {
    /// Property name, uppercase (e.g. `NICKNAME`).
    fn type_name(&self) -> &str;

    fn group(&self) -> Option<&str>;

    fn set_group(&mut self, group: Option<String>);

    /// The parameters as stored on the property.
    fn sub_types(&self) -> &ParameterTable;

    fn sub_types_mut(&mut self) -> &mut ParameterTable;

    /// Versions this property may be written to.
    fn supported_versions(&self) -> &[VCardVersion];

    /// Whether the record must be classified as a group for this property to
    /// be written (true for the member-list kind).
    fn requires_group_kind(&self) -> bool {
        false
    }

    /// Writes the plain-text value.
    ///
    /// ## Errors
    /// Returns [`SkipMe`] when the property must not be written.
    fn marshal_text(
        &self,
        version: VCardVersion,
        warnings: &mut Vec<String>,
        compatibility_mode: CompatibilityMode,
    ) -> Result<String, SkipMe>;

    /// Replaces the value with the one read from a plain-text value.
    fn unmarshal_text(
        &mut self,
        value: &str,
        version: VCardVersion,
        warnings: &mut Vec<String>,
        compatibility_mode: CompatibilityMode,
    );

    /// Appends the value children to a property element.
    ///
    /// ## Errors
    /// Returns [`SkipMe`] when the property must not be written.
    fn marshal_xml(
        &self,
        parent: &mut XCardElement,
        warnings: &mut Vec<String>,
        compatibility_mode: CompatibilityMode,
    ) -> Result<(), SkipMe>;

    /// Replaces the value with the one held by a property element.
    fn unmarshal_xml(
        &mut self,
        element: &XCardElement,
        warnings: &mut Vec<String>,
        compatibility_mode: CompatibilityMode,
    );

    /// Builds the jCard value.
    ///
    /// ## Errors
    /// Returns [`SkipMe`] when the property must not be written.
    fn marshal_json(
        &self,
        version: VCardVersion,
        warnings: &mut Vec<String>,
    ) -> Result<JCardValue, SkipMe>;

    /// Replaces the value with the one held by a jCard value.
    fn unmarshal_json(
        &mut self,
        value: &JCardValue,
        version: VCardVersion,
        warnings: &mut Vec<String>,
    );

    /// The parameters to write for `version`.
    ///
    /// Types whose parameters depend on the version or on the rest of the
    /// record override this.
    fn marshal_sub_types(
        &self,
        _version: VCardVersion,
        _warnings: &mut Vec<String>,
        _compatibility_mode: CompatibilityMode,
        _vcard: &VCard,
    ) -> ParameterTable {
        self.sub_types().clone()
    }

    /// The plain-text value, or `None` if the property asked to be skipped.
    fn marshal_value(
        &self,
        version: VCardVersion,
        warnings: &mut Vec<String>,
        compatibility_mode: CompatibilityMode,
    ) -> Option<String> {
        match self.marshal_text(version, warnings, compatibility_mode) {
            Ok(value) => Some(value),
            Err(skip) => {
                tracing::debug!(property = %self.type_name(), reason = %skip, "Property skipped");
                None
            }
        }
    }

    /// The complete jCard property, or `None` if the property asked to be
    /// skipped.
    fn to_jcard(&self, version: VCardVersion, warnings: &mut Vec<String>) -> Option<JCardProperty> {
        match self.marshal_json(version, warnings) {
            Ok(value) => Some(JCardProperty {
                group: self.group().map(str::to_string),
                name: self.type_name().to_string(),
                parameters: self.sub_types().clone(),
                value,
            }),
            Err(skip) => {
                tracing::debug!(property = %self.type_name(), reason = %skip, "Property skipped");
                None
            }
        }
    }
}
