//! The pluggable contract between byte streams and record sequences.
//!
//! A format plugs in by implementing the two factory traits: the reader
//! factory binds a byte source and a message id and yields records until the
//! stream drains; the writer factory binds a byte sink and serializes one
//! record per call. Flush and close are optional capabilities with no-op
//! defaults, so callers invoke them uniformly on any implementation and
//! absence costs nothing.

use std::io::{Read, Write};
use std::sync::Arc;

use edgeflow_model::{Record, StageContext};

use crate::error::Result;

/// A stateful reader bound to one byte stream and one message/batch id.
///
/// The record sequence is lazy, finite, and non-restartable: once
/// `read_record` returns `Ok(None)` (clean end-of-stream) or an error, the
/// sequence is over for good. Readers are single-caller; parallel pipeline
/// lanes each own their own reader.
pub trait RecordReader {
    fn read_record(&mut self) -> Result<Option<Record>>;

    /// Optional capability; the default holds no resources to release.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A stateful writer bound to one byte sink.
pub trait RecordWriter {
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Optional capability; the default buffers nothing.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Optional capability; the default holds no resources to release.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Produces readers for one data format.
pub trait RecordReaderFactory {
    fn create_reader(
        &self,
        context: Arc<dyn StageContext>,
        input: Box<dyn Read>,
        message_id: &str,
    ) -> Result<Box<dyn RecordReader>>;

    /// Synthesizes a record directly from an already-decoded line and
    /// message-header key/value pairs, bypassing `read_record`. Header pairs
    /// land in the record header's attribute map.
    fn create_record(
        &self,
        context: &dyn StageContext,
        line: &str,
        message_id: &str,
        header_attributes: &[(String, String)],
    ) -> Result<Record>;
}

/// Produces writers for one data format.
pub trait RecordWriterFactory {
    fn create_writer(
        &self,
        context: Arc<dyn StageContext>,
        output: Box<dyn Write>,
    ) -> Result<Box<dyn RecordWriter>>;
}
