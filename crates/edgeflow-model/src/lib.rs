//! Record, field, and field-path data model for edge pipelines.
//!
//! This crate defines the in-memory representation of a unit of pipeline
//! data: a [`Record`] pairing a metadata [`Header`] with an optional tree of
//! nested [`Field`] values, addressed by a small path language (`/key`,
//! `[index]`). Format readers and writers in `edgeflow-recordio` convert
//! byte streams to and from these records; everything here is
//! format-agnostic.

pub mod error;
pub mod field;
pub mod header;
pub mod path;
pub mod record;
pub mod util;

pub use error::{FieldError, PathParseError, Result};
pub use field::{Field, FieldType};
pub use header::Header;
pub use path::{PathElement, parse_field_path};
pub use record::{Record, SetMode, StageContext, create_record_id};
