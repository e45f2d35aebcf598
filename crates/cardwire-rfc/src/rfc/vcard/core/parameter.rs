//! vCard parameters (RFC 6350 §5).

/// Name of the reserved parameter carrying a value-type hint.
pub const VALUE_PARAM: &str = "VALUE";

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values in insertion order.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// The parameters ("sub types") of one property.
///
/// A multimap keyed by case-insensitive parameter name. Values keep their
/// insertion order per key and keys keep first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterTable {
    params: Vec<VCardParameter>,
}

impl ParameterTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name`.
    pub fn put(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(param) = self.find_mut(name) {
            param.values.push(value);
        } else {
            self.params.push(VCardParameter::new(name, value));
        }
    }

    /// Replaces every value under `name` with a single value.
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(param) = self.find_mut(name) {
            param.values = vec![value];
        } else {
            self.params.push(VCardParameter::new(name, value));
        }
    }

    /// Removes `name` entirely, returning its values.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        match self
            .params
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
        {
            Some(index) => self.params.remove(index).values,
            None => Vec::new(),
        }
    }

    /// Returns all values stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.find(name).map_or(&[], |p| p.values.as_slice())
    }

    /// Returns the first value stored under `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.find(name)?.value()
    }

    /// Returns the parameter names (uppercase) in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VCardParameter> {
        self.params.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.iter().all(|p| p.values.is_empty())
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    // --- Typed accessors ---

    /// Returns the VALUE parameter.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.first(VALUE_PARAM)
    }

    /// Sets the VALUE parameter.
    pub fn set_value_type(&mut self, value_type: impl Into<String>) {
        self.replace(VALUE_PARAM, value_type);
    }

    /// Returns the PREF value if present and numeric.
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.first("PREF").and_then(|v| v.parse().ok())
    }

    /// Sets the PREF parameter (1-100, lower is preferred).
    pub fn set_pref(&mut self, priority: u8) {
        self.replace("PREF", priority.to_string());
    }

    /// Returns the LANGUAGE parameter.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.first("LANGUAGE")
    }

    /// Sets the LANGUAGE parameter.
    pub fn set_language(&mut self, tag: impl Into<String>) {
        self.replace("LANGUAGE", tag);
    }

    /// Returns all TYPE values.
    #[must_use]
    pub fn types(&self) -> &[String] {
        self.get("TYPE")
    }

    /// Adds a TYPE value.
    pub fn add_type(&mut self, type_value: impl Into<String>) {
        self.put("TYPE", type_value);
    }

    fn find(&self, name: &str) -> Option<&VCardParameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut VCardParameter> {
        self.params
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl FromIterator<VCardParameter> for ParameterTable {
    fn from_iter<I: IntoIterator<Item = VCardParameter>>(iter: I) -> Self {
        let mut table = Self::new();
        for param in iter {
            for value in param.values {
                table.put(&param.name, value);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_single_value() {
        let param = VCardParameter::new("type", "home");
        assert_eq!(param.name, "TYPE");
        assert_eq!(param.value(), Some("home"));
    }

    #[test]
    fn parameter_has_value() {
        let param = VCardParameter::multi("TYPE", vec!["home".into(), "work".into()]);
        assert!(param.has_value("HOME"));
        assert!(param.has_value("work"));
        assert!(!param.has_value("cell"));
    }

    #[test]
    fn table_keys_are_case_insensitive() {
        let mut table = ParameterTable::new();
        table.put("type", "home");
        table.put("TYPE", "work");
        table.put("Language", "en");

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Type"), ["home", "work"]);
        assert_eq!(table.language(), Some("en"));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["TYPE", "LANGUAGE"]);
    }

    #[test]
    fn table_replace_and_remove() {
        let mut table = ParameterTable::new();
        table.set_pref(2);
        table.set_pref(1);
        assert_eq!(table.get("PREF"), ["1"]);
        assert_eq!(table.pref(), Some(1));

        assert_eq!(table.remove("pref"), vec!["1".to_string()]);
        assert!(table.is_empty());
        assert!(table.remove("pref").is_empty());
    }

    #[test]
    fn table_from_parameters() {
        let table: ParameterTable = vec![
            VCardParameter::new("TYPE", "home"),
            VCardParameter::multi("type", vec!["voice".into()]),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.types(), ["home", "voice"]);
    }
}
