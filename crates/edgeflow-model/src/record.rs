//! The record: one header plus an optional payload tree.

use std::collections::HashMap;
use std::mem;

use crate::error::{FieldError, PathParseError};
use crate::field::Field;
use crate::header::Header;
use crate::path::{PathElement, parse_field_path};

/// Derives a record source id from the origin's message id and a per-reader
/// counter. Unique and reproducible within one reader's lifetime.
pub fn create_record_id(message_id: &str, counter: u64) -> String {
    format!("{message_id}::{counter}")
}

/// Policy for path-addressed [`Record::set`] when an intermediate container
/// along the path does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Fail with [`FieldError::PathNotFound`] on a missing intermediate.
    Strict,
    /// Materialize missing intermediate maps and lists along the path.
    CreateParents,
}

/// Record-creation seam owned by the pipeline runtime.
///
/// Format readers never build records directly; they hand the decoded value
/// to the context so the runtime can apply pipeline-wide policy, such as
/// injecting default header attributes. The default body applies no policy.
pub trait StageContext {
    fn create_record(
        &self,
        source_id: &str,
        value: Option<&serde_json::Value>,
    ) -> Result<Record, FieldError> {
        Record::from_value(source_id, value)
    }
}

/// The atomic unit flowing through a pipeline.
///
/// A record's pipeline identity is its header's source id, not its payload.
/// The root value may be absent: a record with no payload yet is legal and
/// distinct from one holding an empty container.
#[derive(Debug, PartialEq)]
pub struct Record {
    header: Header,
    value: Option<Field>,
}

impl Record {
    pub fn new(source_id: impl Into<String>, value: Option<Field>) -> Self {
        Self {
            header: Header::new(source_id),
            value,
        }
    }

    /// Builds a record by running the decoded value through the field
    /// factory. `None` produces a record with no payload.
    pub fn from_value(
        source_id: impl Into<String>,
        value: Option<&serde_json::Value>,
    ) -> Result<Self, FieldError> {
        let root = value.map(Field::try_from).transpose()?;
        Ok(Self::new(source_id, root))
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// The root field, possibly absent.
    pub fn root(&self) -> Option<&Field> {
        self.value.as_ref()
    }

    /// Replaces the root value wholesale, returning the previous root. A
    /// pure swap; never fails.
    pub fn set_root(&mut self, field: Field) -> Option<Field> {
        self.value.replace(field)
    }

    /// Resolves a field path against the payload tree.
    ///
    /// Resolution is best-effort: only a fully resolved path returns the
    /// field at its final element. A path that stops early for any reason
    /// (absent root, absent key, wrong container type, index out of range)
    /// returns `Ok(None)` so stages can probe optional fields freely. Only a
    /// malformed expression is an error.
    pub fn get(&self, field_path: &str) -> Result<Option<&Field>, PathParseError> {
        let elements = parse_field_path(field_path)?;
        let Some(mut current) = self.value.as_ref() else {
            return Ok(None);
        };
        for element in &elements {
            let next = match element {
                PathElement::Root => Some(current),
                PathElement::Map(name) => current.map_entry(name),
                PathElement::List(index) => match current {
                    Field::List(items) => items.get(*index),
                    _ => None,
                },
            };
            match next {
                Some(field) => current = field,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Writes a field at a path, returning the field it replaced, if any.
    ///
    /// Inserting a new final map key (or appending at a list's exact end) is
    /// always allowed when the parent container exists; whether *missing
    /// intermediate* containers fail or get created is the caller's explicit
    /// [`SetMode`] choice. A step that lands on a container of the wrong
    /// shape fails in either mode.
    pub fn set(
        &mut self,
        field_path: &str,
        field: Field,
        mode: SetMode,
    ) -> Result<Option<Field>, FieldError> {
        let elements = parse_field_path(field_path)?;
        let steps = &elements[1..];
        if steps.is_empty() {
            return Ok(self.value.replace(field));
        }
        if self.value.is_none() {
            match mode {
                SetMode::Strict => return Err(not_found(field_path)),
                SetMode::CreateParents => self.value = Some(empty_container(&steps[0])),
            }
        }
        let Some(root) = self.value.as_mut() else {
            return Err(not_found(field_path));
        };
        set_in(root, steps, field_path, field, mode)
    }
}

/// Cloning a record starts a new lineage: the header keeps only its
/// attribute map, and the payload is an independent deep copy.
impl Clone for Record {
    fn clone(&self) -> Self {
        Self {
            header: self.header.attributes_only(),
            value: self.value.clone(),
        }
    }
}

fn not_found(path: &str) -> FieldError {
    FieldError::PathNotFound {
        path: path.to_string(),
    }
}

fn empty_container(step: &PathElement) -> Field {
    match step {
        PathElement::List(_) => Field::List(Vec::new()),
        PathElement::Root | PathElement::Map(_) => Field::Map(HashMap::new()),
    }
}

fn set_in(
    current: &mut Field,
    steps: &[PathElement],
    path: &str,
    value: Field,
    mode: SetMode,
) -> Result<Option<Field>, FieldError> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(Some(mem::replace(current, value)));
    };
    match step {
        PathElement::Root => set_in(current, rest, path, value, mode),
        PathElement::Map(name) => match current {
            Field::Map(entries) => {
                if rest.is_empty() {
                    return Ok(entries.insert(name.clone(), value));
                }
                if !entries.contains_key(name) {
                    match mode {
                        SetMode::Strict => return Err(not_found(path)),
                        SetMode::CreateParents => {
                            entries.insert(name.clone(), empty_container(&rest[0]));
                        }
                    }
                }
                match entries.get_mut(name) {
                    Some(child) => set_in(child, rest, path, value, mode),
                    None => Err(not_found(path)),
                }
            }
            Field::ListMap(entries) => {
                if rest.is_empty() {
                    return Ok(entries.insert(name.clone(), value));
                }
                if !entries.contains_key(name) {
                    match mode {
                        SetMode::Strict => return Err(not_found(path)),
                        SetMode::CreateParents => {
                            entries.insert(name.clone(), empty_container(&rest[0]));
                        }
                    }
                }
                match entries.get_mut(name) {
                    Some(child) => set_in(child, rest, path, value, mode),
                    None => Err(not_found(path)),
                }
            }
            _ => Err(not_found(path)),
        },
        PathElement::List(index) => match current {
            Field::List(items) => {
                if rest.is_empty() {
                    if *index < items.len() {
                        return Ok(Some(mem::replace(&mut items[*index], value)));
                    }
                    if *index == items.len() {
                        items.push(value);
                        return Ok(None);
                    }
                    return Err(not_found(path));
                }
                if *index == items.len() && mode == SetMode::CreateParents {
                    items.push(empty_container(&rest[0]));
                }
                match items.get_mut(*index) {
                    Some(child) => set_in(child, rest, path, value, mode),
                    None => Err(not_found(path)),
                }
            }
            _ => Err(not_found(path)),
        },
    }
}
