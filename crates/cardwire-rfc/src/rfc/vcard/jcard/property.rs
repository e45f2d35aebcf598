//! jCard property arrays.

use serde_json::{Map, Value};

use super::value::JCardValue;
use crate::rfc::vcard::core::{ParameterTable, VALUE_PARAM};

/// A complete jCard property: `[name, {parameters}, type, value...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JCardProperty {
    pub group: Option<String>,
    pub name: String,
    pub parameters: ParameterTable,
    pub value: JCardValue,
}

impl JCardProperty {
    /// Renders the property array.
    ///
    /// Names are lower-cased. A single-valued parameter is a string, a
    /// multi-valued one an array. The group travels as the `group` parameter.
    /// The `VALUE` parameter is omitted; the data type element replaces it.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut params = Map::new();
        if let Some(group) = &self.group {
            params.insert("group".to_string(), Value::String(group.clone()));
        }
        for param in self.parameters.iter() {
            if param.name == VALUE_PARAM || param.values.is_empty() {
                continue;
            }
            let value = match param.values.as_slice() {
                [single] => Value::String(single.clone()),
                many => Value::Array(many.iter().cloned().map(Value::String).collect()),
            };
            params.insert(param.name.to_ascii_lowercase(), value);
        }

        let mut array = vec![
            Value::String(self.name.to_ascii_lowercase()),
            Value::Object(params),
            Value::String(self.value.data_type().as_str().to_string()),
        ];
        array.extend(self.value.to_json());
        Value::Array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_array_layout() {
        let mut parameters = ParameterTable::new();
        parameters.add_type("work");
        parameters.add_type("home");
        parameters.set_pref(1);
        parameters.set_value_type("text");

        let property = JCardProperty {
            group: Some("item1".to_string()),
            name: "NICKNAME".to_string(),
            parameters,
            value: JCardValue::text(["Anna", "Ann"]),
        };

        assert_eq!(
            property.to_json(),
            json!([
                "nickname",
                {"group": "item1", "type": ["work", "home"], "pref": "1"},
                "text",
                "Anna",
                "Ann"
            ])
        );
    }
}
