//! xCard namespaces (RFC 6351 §3).

use std::borrow::Cow;

use crate::rfc::vcard::core::VCardVersion;

/// Common prefix of every xCard namespace URI; the version string follows.
pub const XCARD_NS_PREFIX: &str = "urn:ietf:params:xml:ns:vcard-";

/// xCard namespace for vCard 2.1 documents.
pub const XCARD_NS_V2_1: &str = const_str::concat!(XCARD_NS_PREFIX, "2.1");

/// xCard namespace for vCard 3.0 documents.
pub const XCARD_NS_V3_0: &str = const_str::concat!(XCARD_NS_PREFIX, "3.0");

/// xCard namespace for vCard 4.0 documents (the only one RFC 6351 defines).
pub const XCARD_NS_V4_0: &str = const_str::concat!(XCARD_NS_PREFIX, "4.0");

/// An XML namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(pub Cow<'static, str>);

impl Namespace {
    /// The standard xCard namespace.
    pub const XCARD: Self = Self(Cow::Borrowed(XCARD_NS_V4_0));

    /// No namespace.
    pub const NONE: Self = Self(Cow::Borrowed(""));

    /// Creates a new namespace from a string.
    #[must_use]
    pub fn new(uri: impl Into<Cow<'static, str>>) -> Self {
        Self(uri.into())
    }

    /// Returns the xCard namespace for a target version.
    #[must_use]
    pub const fn for_version(version: VCardVersion) -> Self {
        let uri = match version {
            VCardVersion::V2_1 => XCARD_NS_V2_1,
            VCardVersion::V3_0 => XCARD_NS_V3_0,
            VCardVersion::V4_0 => XCARD_NS_V4_0,
        };
        Self(Cow::Borrowed(uri))
    }

    /// Returns the namespace URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for Namespace {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_embeds_version() {
        assert_eq!(
            Namespace::for_version(VCardVersion::V4_0).as_str(),
            "urn:ietf:params:xml:ns:vcard-4.0"
        );
        assert_eq!(
            Namespace::for_version(VCardVersion::V3_0).as_str(),
            "urn:ietf:params:xml:ns:vcard-3.0"
        );
        assert_eq!(Namespace::for_version(VCardVersion::V4_0), Namespace::XCARD);
    }

    #[test]
    fn owned_and_borrowed_compare_equal() {
        let owned = Namespace::from(String::from(XCARD_NS_V4_0));
        assert_eq!(owned, Namespace::XCARD);
        assert!(Namespace::NONE.is_none());
    }
}
