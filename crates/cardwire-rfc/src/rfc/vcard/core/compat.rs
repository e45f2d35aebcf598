//! Consumer-specific marshalling tolerance.

use serde::Deserialize;

/// Compatibility mode for the software a vCard is generated for.
///
/// Passed through to every property; the orchestrator itself does not
/// interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityMode {
    /// Follow the RFCs strictly.
    #[default]
    Rfc,
    /// Microsoft Outlook.
    MsOutlook,
    /// Apple Address Book.
    MacAddressBook,
    /// Google Contacts.
    Gmail,
    /// iPhone contacts.
    IPhone,
    /// GNOME Evolution.
    Evolution,
}

impl CompatibilityMode {
    /// Parses a mode name such as `rfc` or `ms_outlook` (case-insensitive,
    /// `-` and `_` interchangeable).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rfc" => Some(Self::Rfc),
            "ms_outlook" | "outlook" => Some(Self::MsOutlook),
            "mac_address_book" => Some(Self::MacAddressBook),
            "gmail" => Some(Self::Gmail),
            "iphone" | "i_phone" => Some(Self::IPhone),
            "evolution" => Some(Self::Evolution),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!(CompatibilityMode::parse("rfc"), Some(CompatibilityMode::Rfc));
        assert_eq!(
            CompatibilityMode::parse("MS-Outlook"),
            Some(CompatibilityMode::MsOutlook)
        );
        assert_eq!(
            CompatibilityMode::parse("iphone"),
            Some(CompatibilityMode::IPhone)
        );
        assert_eq!(CompatibilityMode::parse("lotus"), None);
    }
}
