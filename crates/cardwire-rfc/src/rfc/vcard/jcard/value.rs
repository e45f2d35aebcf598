//! The value portion of a jCard property.

use serde_json::Value;

/// jCard value data type (the third element of a property array).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JCardDataType {
    #[default]
    Text,
    Uri,
    Integer,
    Boolean,
    LanguageTag,
    Unknown,
    Other(String),
}

impl JCardDataType {
    /// Parses from the data type name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "uri" => Self::Uri,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "language-tag" => Self::LanguageTag,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the data type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::LanguageTag => "language-tag",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }
}

/// A jCard property value: a data type plus an ordered list of value groups.
///
/// A group with a single entry is written as a scalar; any other group is
/// written as a JSON array (structured value).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JCardValue {
    data_type: JCardDataType,
    values: Vec<Vec<Value>>,
}

impl JCardValue {
    #[must_use]
    pub fn new(data_type: JCardDataType, values: Vec<Vec<Value>>) -> Self {
        Self { data_type, values }
    }

    /// One `text` entry per value.
    #[must_use]
    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data_type: JCardDataType::Text,
            values: values
                .into_iter()
                .map(|v| vec![Value::String(v.into())])
                .collect(),
        }
    }

    /// A single scalar value.
    #[must_use]
    pub fn single(data_type: JCardDataType, value: impl Into<Value>) -> Self {
        Self {
            data_type,
            values: vec![vec![value.into()]],
        }
    }

    /// A single structured value whose components are written as one array.
    #[must_use]
    pub fn structured<I, S>(data_type: JCardDataType, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data_type,
            values: vec![
                components
                    .into_iter()
                    .map(|c| Value::String(c.into()))
                    .collect(),
            ],
        }
    }

    #[must_use]
    pub fn data_type(&self) -> &JCardDataType {
        &self.data_type
    }

    #[must_use]
    pub fn values(&self) -> &[Vec<Value>] {
        &self.values
    }

    /// Returns every group with its entries rendered as strings.
    ///
    /// `null` becomes an empty string; numbers and booleans use their JSON
    /// text.
    #[must_use]
    pub fn values_as_strings(&self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .map(|group| group.iter().map(value_to_string).collect())
            .collect()
    }

    /// Renders the values as the trailing elements of a jCard property array.
    #[must_use]
    pub fn to_json(&self) -> Vec<Value> {
        self.values
            .iter()
            .map(|group| match group.as_slice() {
                [single] if !single.is_array() => single.clone(),
                _ => Value::Array(group.clone()),
            })
            .collect()
    }

    /// Builds a value from the trailing elements of a jCard property array.
    #[must_use]
    pub fn from_json(data_type: &str, values: &[Value]) -> Self {
        Self {
            data_type: JCardDataType::parse(data_type),
            values: values
                .iter()
                .map(|value| match value {
                    Value::Array(items) => items.clone(),
                    other => vec![other.clone()],
                })
                .collect(),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_values_are_scalars() {
        let value = JCardValue::text(["Anna", "Ann"]);
        assert_eq!(value.data_type().as_str(), "text");
        assert_eq!(value.to_json(), vec![json!("Anna"), json!("Ann")]);
    }

    #[test]
    fn structured_value_is_one_array() {
        let value = JCardValue::structured(JCardDataType::Text, ["Doe", "John", ""]);
        assert_eq!(value.to_json(), vec![json!(["Doe", "John", ""])]);
    }

    #[test]
    fn from_json_groups_entries() {
        let value = JCardValue::from_json("TEXT", &[json!("a"), json!(["b", "c"]), json!([]), json!(7)]);

        assert_eq!(value.data_type(), &JCardDataType::Text);
        assert_eq!(
            value.values_as_strings(),
            vec![
                vec!["a".to_string()],
                vec!["b".to_string(), "c".to_string()],
                vec![],
                vec!["7".to_string()],
            ]
        );
    }

    #[test]
    fn null_renders_as_empty_string() {
        let value = JCardValue::single(JCardDataType::Unknown, Value::Null);
        assert_eq!(value.values_as_strings(), vec![vec![String::new()]]);
    }

    #[test]
    fn data_type_parse() {
        assert_eq!(JCardDataType::parse("language-tag"), JCardDataType::LanguageTag);
        assert_eq!(
            JCardDataType::parse("x-thing").as_str(),
            "x-thing"
        );
    }
}
