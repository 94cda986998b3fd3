//! Tagged, recursively nested field values.
//!
//! A [`Field`] is the payload tree of a record: a scalar, an unordered map,
//! an insertion-ordered map, or a list, nested to arbitrary depth. Every
//! nested field is exclusively owned by its container, so a derived `clone`
//! is always a fully independent deep copy.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::FieldError;

/// Discriminant naming the concrete shape of a [`Field`].
///
/// The display form matches the wire-level type vocabulary used in pipeline
/// configurations and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Bytes,
    Datetime,
    Map,
    ListMap,
    List,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Bool => "BOOLEAN",
            FieldType::Short => "SHORT",
            FieldType::Integer => "INTEGER",
            FieldType::Long => "LONG",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Decimal => "DECIMAL",
            FieldType::String => "STRING",
            FieldType::Bytes => "BYTE_ARRAY",
            FieldType::Datetime => "DATETIME",
            FieldType::Map => "MAP",
            FieldType::ListMap => "LIST_MAP",
            FieldType::List => "LIST",
        };
        f.write_str(name)
    }
}

/// One unit of pipeline data.
///
/// `Map` keeps no key order; `ListMap` preserves insertion order on iteration
/// and serialization. Absence is modeled as `Option<Field>` (or a missing map
/// key), never as a variant, so a present-but-empty container is always
/// distinct from "no field here".
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Bool(bool),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(f64),
    String(String),
    Bytes(Vec<u8>),
    Datetime(DateTime<Utc>),
    Map(HashMap<String, Field>),
    ListMap(IndexMap<String, Field>),
    List(Vec<Field>),
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Bool(_) => FieldType::Bool,
            Field::Short(_) => FieldType::Short,
            Field::Integer(_) => FieldType::Integer,
            Field::Long(_) => FieldType::Long,
            Field::Float(_) => FieldType::Float,
            Field::Double(_) => FieldType::Double,
            Field::Decimal(_) => FieldType::Decimal,
            Field::String(_) => FieldType::String,
            Field::Bytes(_) => FieldType::Bytes,
            Field::Datetime(_) => FieldType::Datetime,
            Field::Map(_) => FieldType::Map,
            Field::ListMap(_) => FieldType::ListMap,
            Field::List(_) => FieldType::List,
        }
    }

    /// Borrows the string payload, or `None` for any other variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Widens any integer variant to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Short(value) => Some(i64::from(*value)),
            Field::Integer(value) => Some(i64::from(*value)),
            Field::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Widens any numeric variant to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Short(value) => Some(f64::from(*value)),
            Field::Integer(value) => Some(f64::from(*value)),
            Field::Long(value) => Some(*value as f64),
            Field::Float(value) => Some(f64::from(*value)),
            Field::Double(value) => Some(*value),
            Field::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Field::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Field::Datetime(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Field>> {
        match self {
            Field::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list_map(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            Field::ListMap(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a key in either map variant.
    pub fn map_entry(&self, name: &str) -> Option<&Field> {
        match self {
            Field::Map(entries) => entries.get(name),
            Field::ListMap(entries) => entries.get(name),
            _ => None,
        }
    }
}

/// The field factory: recursively builds a [`Field`] tree from a decoded
/// generic value.
///
/// Integers become `Long`, other numbers become `Double`, objects become
/// unordered maps, arrays become lists. JSON `null` has no field
/// representation and fails with [`FieldError::UnsupportedType`].
impl TryFrom<&serde_json::Value> for Field {
    type Error = FieldError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Err(FieldError::UnsupportedType {
                kind: "null".to_string(),
            }),
            serde_json::Value::Bool(value) => Ok(Field::Bool(*value)),
            serde_json::Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Ok(Field::Long(value))
                } else if let Some(value) = number.as_f64() {
                    Ok(Field::Double(value))
                } else {
                    Err(FieldError::UnsupportedType {
                        kind: format!("number {number}"),
                    })
                }
            }
            serde_json::Value::String(value) => Ok(Field::String(value.clone())),
            serde_json::Value::Array(items) => {
                let fields = items
                    .iter()
                    .map(Field::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Field::List(fields))
            }
            serde_json::Value::Object(entries) => {
                let mut fields = HashMap::with_capacity(entries.len());
                for (key, entry) in entries {
                    fields.insert(key.clone(), Field::try_from(entry)?);
                }
                Ok(Field::Map(fields))
            }
        }
    }
}

impl TryFrom<serde_json::Value> for Field {
    type Error = FieldError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Field::try_from(&value)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Bool(value)
    }
}

impl From<i16> for Field {
    fn from(value: i16) -> Self {
        Field::Short(value)
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Field::Integer(value)
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Field::Long(value)
    }
}

impl From<f32> for Field {
    fn from(value: f32) -> Self {
        Field::Float(value)
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Double(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::String(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::String(value)
    }
}

impl From<Vec<u8>> for Field {
    fn from(value: Vec<u8>) -> Self {
        Field::Bytes(value)
    }
}

impl From<DateTime<Utc>> for Field {
    fn from(value: DateTime<Utc>) -> Self {
        Field::Datetime(value)
    }
}

impl From<Vec<Field>> for Field {
    fn from(items: Vec<Field>) -> Self {
        Field::List(items)
    }
}

impl From<HashMap<String, Field>> for Field {
    fn from(entries: HashMap<String, Field>) -> Self {
        Field::Map(entries)
    }
}

impl From<IndexMap<String, Field>> for Field {
    fn from(entries: IndexMap<String, Field>) -> Self {
        Field::ListMap(entries)
    }
}
