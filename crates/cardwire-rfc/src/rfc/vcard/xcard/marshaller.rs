//! xCard document assembly.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};

use cardwire_core::config::MarshalConfig;
use cardwire_core::error::CoreError;

use super::element::XCardElement;
use crate::error::RfcResult;
use crate::rfc::vcard::core::{
    CompatibilityMode, ParameterTable, VALUE_PARAM, VCard, VCardVersion, format_versions,
};
use crate::rfc::vcard::types::{TextType, VCardType, names};

/// Value of the `X-GENERATOR` property added to every record by default.
pub const GENERATOR_VALUE: &str = concat!(
    "cardwire v",
    env!("CARGO_PKG_VERSION"),
    " ",
    env!("CARGO_PKG_REPOSITORY")
);

/// Element name holding each value of a known parameter (RFC 6351 §4).
const PARAMETER_VALUE_ELEMENTS: &[(&str, &str)] = &[
    ("altid", "text"),
    ("calscale", "text"),
    ("geo", "uri"),
    ("label", "text"),
    ("language", "language-tag"),
    ("mediatype", "text"),
    ("pid", "text"),
    ("pref", "integer"),
    ("sort-as", "text"),
    ("type", "text"),
    ("tz", "uri"),
];

/// Returns the element name used for values of the parameter `name`.
///
/// Unknown parameters use `unknown`.
#[must_use]
pub fn parameter_value_element(name: &str) -> &'static str {
    PARAMETER_VALUE_ELEMENTS
        .iter()
        .find(|(param, _)| param.eq_ignore_ascii_case(name))
        .map_or("unknown", |(_, element)| element)
}

/// Result of adding one record to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddVCardOutcome {
    /// The `<vcard>` element appended to the document.
    pub element: XCardElement,
    /// Problems found while marshalling this record only.
    pub warnings: Vec<String>,
}

/// Builds an xCard document containing zero or more vCards.
///
/// Not meant to be shared between threads while records are being added;
/// use one marshaller per document.
#[derive(Debug, Clone)]
pub struct XCardMarshaller {
    target_version: VCardVersion,
    compatibility_mode: CompatibilityMode,
    add_generator: bool,
    root: XCardElement,
}

impl Default for XCardMarshaller {
    fn default() -> Self {
        Self::new()
    }
}

impl XCardMarshaller {
    /// Creates a marshaller producing vCard 4.0, the only version xCard defines.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(VCardVersion::V4_0)
    }

    /// Creates a marshaller whose elements use the namespace of `target_version`.
    #[must_use]
    pub fn with_version(target_version: VCardVersion) -> Self {
        Self {
            target_version,
            compatibility_mode: CompatibilityMode::Rfc,
            add_generator: true,
            root: XCardElement::for_version(target_version, "vcards"),
        }
    }

    /// Creates a marshaller from configuration.
    ///
    /// ## Errors
    /// Returns an error if the configured version or compatibility mode is
    /// unknown.
    pub fn from_config(config: &MarshalConfig) -> RfcResult<Self> {
        let target_version = VCardVersion::parse(&config.target_version).ok_or_else(|| {
            CoreError::InvalidConfiguration(format!(
                "unknown vCard version: {}",
                config.target_version
            ))
        })?;
        let compatibility_mode = CompatibilityMode::parse(&config.compatibility_mode)
            .ok_or_else(|| {
                CoreError::InvalidConfiguration(format!(
                    "unknown compatibility mode: {}",
                    config.compatibility_mode
                ))
            })?;

        if target_version != VCardVersion::V4_0 {
            tracing::warn!(version = %target_version, "xCard is only defined for vCard 4.0");
        }

        let mut marshaller = Self::with_version(target_version);
        marshaller.compatibility_mode = compatibility_mode;
        marshaller.add_generator = config.add_generator;
        Ok(marshaller)
    }

    #[must_use]
    pub fn target_version(&self) -> VCardVersion {
        self.target_version
    }

    #[must_use]
    pub fn compatibility_mode(&self) -> CompatibilityMode {
        self.compatibility_mode
    }

    /// Customizes marshalling for the software the document is generated for.
    pub fn set_compatibility_mode(&mut self, compatibility_mode: CompatibilityMode) {
        self.compatibility_mode = compatibility_mode;
    }

    #[must_use]
    pub fn add_generator(&self) -> bool {
        self.add_generator
    }

    /// Sets whether an `X-GENERATOR` property is added to each record
    /// (defaults to true).
    pub fn set_add_generator(&mut self, add_generator: bool) {
        self.add_generator = add_generator;
    }

    /// Returns the `<vcards>` root element.
    #[must_use]
    pub fn document(&self) -> &XCardElement {
        &self.root
    }

    /// Number of records added so far.
    #[must_use]
    pub fn vcard_count(&self) -> usize {
        self.root.children().count()
    }

    /// Marshals a vCard and appends it to the document.
    ///
    /// ## Summary
    /// Properties are bucketed by group: ungrouped ones go directly under
    /// `<vcard>`, named groups are wrapped in `<group name="...">` in the order
    /// their first property appears. Properties that are unsupported by the
    /// target version, that break the member/group rule, or that ask to be
    /// skipped are left out and reported in the returned warnings.
    #[tracing::instrument(skip_all, fields(version = %self.target_version))]
    pub fn add_vcard(&mut self, vcard: &VCard) -> AddVCardOutcome {
        let mut warnings = Vec::new();

        if vcard.formatted_name().is_none() {
            warnings.push(format!(
                "vCard version {} requires that a formatted name be defined.",
                self.target_version
            ));
        }

        let generator = self
            .add_generator
            .then(|| TextType::new(names::X_GENERATOR, GENERATOR_VALUE));
        let generator = generator
            .iter()
            .map(|p| p as &(dyn VCardType + 'static));

        // The ungrouped bucket always comes first.
        let mut buckets: Vec<(Option<&str>, Vec<&dyn VCardType>)> = vec![(None, Vec::new())];
        for property in vcard.types().chain(generator) {
            if !self.admits(property, vcard, &mut warnings) {
                continue;
            }

            let group = property.group();
            if let Some((_, bucket)) = buckets.iter_mut().find(|(g, _)| same_group(*g, group)) {
                bucket.push(property);
            } else {
                buckets.push((group, vec![property]));
            }
        }

        let mut vcard_element = self.create_element("vcard");
        for (group, properties) in buckets {
            let marshalled = properties
                .into_iter()
                .filter_map(|property| self.marshal_type(property, vcard, &mut warnings))
                .collect::<Vec<_>>();

            if let Some(name) = group {
                let mut group_element = self.create_element("group");
                group_element.set_attribute("name", name);
                for element in marshalled {
                    group_element.push_element(element);
                }
                vcard_element.push_element(group_element);
            } else {
                for element in marshalled {
                    vcard_element.push_element(element);
                }
            }
        }

        self.root.push_element(vcard_element.clone());
        tracing::debug!(warnings = warnings.len(), "vCard added to xCard document");

        AddVCardOutcome {
            element: vcard_element,
            warnings,
        }
    }

    /// Applies the version and member/group rules. Runs before bucketing, so
    /// a group holding only rejected properties is never created.
    fn admits(&self, property: &dyn VCardType, vcard: &VCard, warnings: &mut Vec<String>) -> bool {
        let name = property.type_name();

        if !property.supported_versions().contains(&self.target_version) {
            tracing::debug!(property = %name, "Property not supported by target version");
            warnings.push(format!(
                "The {name} type is not supported by vCard version {}. The supported versions are {}. This type will not be added to the vCard.",
                self.target_version,
                format_versions(property.supported_versions()),
            ));
            return false;
        }

        if property.requires_group_kind() && !vcard.is_group() {
            tracing::debug!(property = %name, "Record is not a group");
            warnings.push(format!(
                "The value of KIND must be set to \"group\" in order to add {name}s to the vCard."
            ));
            return false;
        }

        true
    }

    /// Marshals one admitted property, or returns `None` if it asked to be
    /// skipped.
    fn marshal_type(
        &self,
        property: &dyn VCardType,
        vcard: &VCard,
        warnings: &mut Vec<String>,
    ) -> Option<XCardElement> {
        let name = property.type_name();

        // Merged into `warnings` once, after both marshal steps.
        let mut property_warnings = Vec::new();
        let sub_types = property.marshal_sub_types(
            self.target_version,
            &mut property_warnings,
            self.compatibility_mode,
            vcard,
        );
        let parameters = self.marshal_parameters(&sub_types);
        let value = property.marshal_value(
            self.target_version,
            &mut property_warnings,
            self.compatibility_mode,
        );
        warnings.append(&mut property_warnings);

        let Some(value) = value else {
            warnings.push(format!(
                "{name} type has requested that it not be marshalled."
            ));
            return None;
        };

        let mut element = self.create_element(&name.to_ascii_lowercase());
        if let Some(parameters) = parameters {
            element.push_element(parameters);
        }
        element.append_text("text", &value);

        tracing::trace!(property = %name, "Property marshalled");
        Some(element)
    }

    /// Builds the `<parameters>` element, or `None` if nothing is left to
    /// write once `VALUE` is dropped.
    fn marshal_parameters(&self, sub_types: &ParameterTable) -> Option<XCardElement> {
        let mut parameters = self.create_element("parameters");

        for param in sub_types.iter() {
            if param.name.eq_ignore_ascii_case(VALUE_PARAM) || param.values.is_empty() {
                continue;
            }

            let name = param.name.to_ascii_lowercase();
            let value_element = parameter_value_element(&name);
            let mut parameter = self.create_element(&name);
            parameter.append(value_element, &param.values);
            parameters.push_element(parameter);
        }

        let has_parameters = parameters.children().next().is_some();
        has_parameters.then_some(parameters)
    }

    fn create_element(&self, name: &str) -> XCardElement {
        XCardElement::for_version(self.target_version, name)
    }

    /// Writes the XML document.
    ///
    /// ## Errors
    /// Returns an error if writing to `out` fails.
    #[tracing::instrument(skip_all, fields(vcards = self.vcard_count()))]
    pub fn write<W: std::io::Write>(&self, out: W) -> RfcResult<()> {
        let mut writer = Writer::new(out);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.root.write_to(&mut writer, None)?;
        Ok(())
    }

    /// Returns the XML document as a string.
    ///
    /// ## Errors
    /// Returns an error if serialization fails.
    pub fn to_xml_string(&self) -> RfcResult<String> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(String::from_utf8(out)?)
    }
}

fn same_group(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
