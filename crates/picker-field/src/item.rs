use serde::Deserialize;
use serde_json::{Map, Value};

/// A selectable value: nothing, a plain string, or a record of named fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SelectableItem {
    #[default]
    Empty,
    Primitive(String),
    Structured(Map<String, Value>),
}

impl SelectableItem {
    /// Converts a JSON value. `null`, `false`, `0` and `""` carry no selection.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => Self::Empty,
            Value::Number(number) if number.as_f64() == Some(0.0) => Self::Empty,
            Value::String(text) => Self::from(text),
            Value::Object(record) => Self::Structured(record),
            other => Self::Primitive(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Structured(record) => record.get(name),
            _ => None,
        }
    }
}

impl From<&str> for SelectableItem {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for SelectableItem {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Primitive(value)
        }
    }
}

impl From<Map<String, Value>> for SelectableItem {
    fn from(record: Map<String, Value>) -> Self {
        Self::Structured(record)
    }
}

impl From<Value> for SelectableItem {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl<T: Into<SelectableItem>> From<Option<T>> for SelectableItem {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Names of the record fields holding the human-readable text and the unique key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorConfig {
    #[serde(default, alias = "display_property")]
    pub display_property: Option<String>,
    #[serde(default, alias = "key_property")]
    pub key_property: Option<String>,
}

impl AccessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, property: impl Into<String>) -> Self {
        self.display_property = Some(property.into());
        self
    }

    pub fn key(mut self, property: impl Into<String>) -> Self {
        self.key_property = Some(property.into());
        self
    }
}

/// Renders a field value the way a form shows it: strings verbatim, everything else as
/// compact JSON text.
pub(crate) fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
