//! Data-format conversion between byte streams and records.
//!
//! This crate defines the pluggable reader/writer contract (byte stream in,
//! [`edgeflow_model::Record`] sequence out, and back) and ships the
//! line-oriented text format as its reference implementation. Every other
//! wire format follows the same contract.

pub mod contract;
pub mod error;
pub mod text;

pub use contract::{RecordReader, RecordReaderFactory, RecordWriter, RecordWriterFactory};
pub use error::{RecordIoError, Result};
pub use text::{
    TEXT_FIELD, TextReaderFactory, TextRecordReader, TextRecordWriter, TextWriterFactory,
};
