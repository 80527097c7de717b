use super::ResourceData;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    StringList,
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "integer",
            FieldType::Float => "float",
            FieldType::Bool => "boolean",
            FieldType::StringList => "list of strings",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Int => value.is_i64(),
            // Integers are rejected, as they couldn't be read back unchanged.
            FieldType::Float => value.is_f64(),
            FieldType::Bool => value.is_boolean(),
            FieldType::StringList => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The field must be supplied by the user.
    Required,
    /// The field may be supplied by the user.
    Optional,
    /// The field is derived by the provider, and read-only to the user.
    Computed,
}

/// SchemaField declares the constraints of a single field of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub field_type: FieldType,
    pub presence: Presence,
    pub description: &'static str,
    /// Closed set of values accepted by a String field. Empty if unconstrained.
    pub allowed_values: Vec<&'static str>,
    /// Value assumed for an Optional field which isn't supplied.
    pub default: Option<Value>,
}

impl SchemaField {
    fn new(field_type: FieldType, presence: Presence, description: &'static str) -> Self {
        Self {
            field_type,
            presence,
            description,
            allowed_values: Vec::new(),
            default: None,
        }
    }

    pub fn required(field_type: FieldType, description: &'static str) -> Self {
        Self::new(field_type, Presence::Required, description)
    }

    pub fn optional(field_type: FieldType, description: &'static str) -> Self {
        Self::new(field_type, Presence::Optional, description)
    }

    pub fn computed(field_type: FieldType, description: &'static str) -> Self {
        Self::new(field_type, Presence::Computed, description)
    }

    pub fn with_allowed_values(self, allowed_values: Vec<&'static str>) -> Self {
        Self {
            allowed_values,
            ..self
        }
    }

    pub fn with_default(self, default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            ..self
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("field {0} is not defined by the schema")]
    UnknownField(String),
    #[error("field {0} is required")]
    MissingField(&'static str),
    #[error("field {0} must not be empty")]
    EmptyField(&'static str),
    #[error("field {field} must be of type {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field {field} value {value:?} is not one of {allowed:?}")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },
}

/// Schema maps the field names of a resource to their declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: BTreeMap<&'static str, SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, field: SchemaField) -> Self {
        self.fields.insert(name, field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SchemaField)> {
        self.fields.iter().map(|(name, field)| (*name, field))
    }

    /// Fill in defaults of Optional fields which `data` doesn't supply.
    pub fn apply_defaults(&self, data: &mut ResourceData) {
        for (name, field) in self.iter() {
            if let Some(default) = &field.default {
                if data.get(name).is_none() {
                    data.set(name, default.clone());
                }
            }
        }
    }

    /// Verify that `data` conforms to the schema, returning the first violation.
    pub fn validate(&self, data: &ResourceData) -> Result<(), SchemaError> {
        for (name, value) in data.fields() {
            let Some((&name, field)) = self.fields.get_key_value(name) else {
                return Err(SchemaError::UnknownField(name.to_string()));
            };

            if !field.field_type.accepts(value) {
                return Err(SchemaError::WrongType {
                    field: name,
                    expected: field.field_type.name(),
                });
            }
            match value.as_str() {
                Some("") if field.presence == Presence::Required => {
                    return Err(SchemaError::EmptyField(name));
                }
                Some(value)
                    if !field.allowed_values.is_empty()
                        && !field.allowed_values.contains(&value) =>
                {
                    return Err(SchemaError::NotAllowed {
                        field: name,
                        value: value.to_string(),
                        allowed: field.allowed_values.clone(),
                    });
                }
                _ => (),
            }
        }

        for (name, field) in self.iter() {
            if field.presence == Presence::Required && data.get(name).is_none() {
                return Err(SchemaError::MissingField(name));
            }
        }
        Ok(())
    }
}
