//! Dynamic record with dot-path field access.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::FieldError;

/// A loosely-shaped row from the backend.
///
/// Used where columns are driven by server-stored [`ColumnSetting`]s rather
/// than a fixed struct: the column `key` resolves against the record,
/// dot-paths included.
///
/// # Example
///
/// ```
/// use wareboard_api::model::Record;
///
/// let record: Record = serde_json::from_str(
///     r#"{"id": "o-1", "customer": {"name": "Acme"}}"#,
/// ).unwrap();
///
/// assert_eq!(record.display("customer.name"), "Acme");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record id, if present.
    ///
    /// Accepts string and integer ids; everything in the dashboard treats
    /// ids as opaque strings.
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Resolves a field by key, following dot-paths through nested objects.
    pub fn get_path(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Returns `true` if the key resolves to a value.
    pub fn contains(&self, key: &str) -> bool {
        self.get_path(key).is_some()
    }

    /// Renders a field for display; missing or null fields render empty.
    pub fn display(&self, key: &str) -> String {
        match self.get_path(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Gets a string field.
    pub fn get_string(&self, key: &str) -> Result<Option<&str>, FieldError> {
        match self.get_path(key) {
            None => Err(FieldError::missing(key)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(key, "string", type_name(other))),
        }
    }

    /// Gets an integer field.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, FieldError> {
        match self.get_path(key) {
            None => Err(FieldError::missing(key)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.as_i64()),
            Some(other) => Err(FieldError::type_mismatch(key, "int", type_name(other))),
        }
    }

    /// Gets a boolean field.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, FieldError> {
        match self.get_path(key) {
            None => Err(FieldError::missing(key)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(key, "bool", type_name(other))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
