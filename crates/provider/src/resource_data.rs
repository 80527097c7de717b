use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// ResourceData is the declarative definition of a resource, as supplied
/// by the host: an identifier and a flat mapping of field names to values.
/// An empty identifier denotes a resource which doesn't (or no longer) exist.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    fields: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Builder-style variant of set().
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Set `field` if `value` is Some, or clear it otherwise.
    pub fn set_opt<V: Into<Value>>(&mut self, field: &str, value: Option<V>) {
        match value {
            Some(value) => self.set(field, value),
            None => {
                self.fields.remove(field);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn get_string_list(&self, field: &str) -> Option<Vec<String>> {
        self.get(field)?
            .as_array()?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    pub fn require_str(&self, field: &str) -> anyhow::Result<&str> {
        self.get_str(field)
            .ok_or_else(|| anyhow::anyhow!("field {field} is required"))
    }

    pub fn require_i64(&self, field: &str) -> anyhow::Result<i64> {
        self.get_i64(field)
            .ok_or_else(|| anyhow::anyhow!("field {field} is required"))
    }

    pub fn require_string_list(&self, field: &str) -> anyhow::Result<Vec<String>> {
        self.get_string_list(field)
            .ok_or_else(|| anyhow::anyhow!("field {field} is required"))
    }
}
