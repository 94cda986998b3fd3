//! Line-oriented text format: the reference implementation of the
//! reader/writer contract.
//!
//! Each `\n`-delimited line becomes one record whose root is the single-key
//! map `{"text": <line>}`; writing is the exact inverse. Source ids are
//! derived from the reader's message id plus a per-reader counter starting
//! at 1, so ids are unique and reproducible within one reader's lifetime.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::sync::Arc;

use edgeflow_model::{FieldType, Record, StageContext, create_record_id};
use serde_json::json;

use crate::contract::{RecordReader, RecordReaderFactory, RecordWriter, RecordWriterFactory};
use crate::error::{RecordIoError, Result};

/// Map key holding the line content.
pub const TEXT_FIELD: &str = "text";

#[derive(Debug, Default)]
pub struct TextReaderFactory;

impl RecordReaderFactory for TextReaderFactory {
    fn create_reader(
        &self,
        context: Arc<dyn StageContext>,
        input: Box<dyn Read>,
        message_id: &str,
    ) -> Result<Box<dyn RecordReader>> {
        Ok(Box::new(TextRecordReader::new(context, input, message_id)))
    }

    fn create_record(
        &self,
        context: &dyn StageContext,
        line: &str,
        message_id: &str,
        header_attributes: &[(String, String)],
    ) -> Result<Record> {
        let value = json!({ "text": line });
        let mut record = context.create_record(message_id, Some(&value))?;
        for (name, attribute) in header_attributes {
            record.header_mut().set_attribute(name, attribute);
        }
        Ok(record)
    }
}

pub struct TextRecordReader {
    context: Arc<dyn StageContext>,
    reader: BufReader<Box<dyn Read>>,
    message_id: String,
    counter: u64,
    done: bool,
}

impl TextRecordReader {
    pub fn new(context: Arc<dyn StageContext>, input: Box<dyn Read>, message_id: &str) -> Self {
        Self {
            context,
            reader: BufReader::new(input),
            message_id: message_id.to_string(),
            counter: 0,
            done: false,
        }
    }
}

impl RecordReader for TextRecordReader {
    fn read_record(&mut self) -> Result<Option<Record>> {
        if self.done {
            return Ok(None);
        }
        let mut line = String::new();
        let bytes = match self.reader.read_line(&mut line) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.done = true;
                return Err(err.into());
            }
        };
        if bytes == 0 {
            self.done = true;
            tracing::debug!(
                message_id = %self.message_id,
                records = self.counter,
                "text stream drained"
            );
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        self.counter += 1;
        let source_id = create_record_id(&self.message_id, self.counter);
        let value = json!({ "text": line });
        let record = self.context.create_record(&source_id, Some(&value))?;
        Ok(Some(record))
    }
}

#[derive(Debug, Default)]
pub struct TextWriterFactory;

impl RecordWriterFactory for TextWriterFactory {
    fn create_writer(
        &self,
        _context: Arc<dyn StageContext>,
        output: Box<dyn Write>,
    ) -> Result<Box<dyn RecordWriter>> {
        Ok(Box::new(TextRecordWriter::new(output)))
    }
}

pub struct TextRecordWriter {
    writer: BufWriter<Box<dyn Write>>,
}

impl TextRecordWriter {
    pub fn new(output: Box<dyn Write>) -> Self {
        Self {
            writer: BufWriter::new(output),
        }
    }
}

impl RecordWriter for TextRecordWriter {
    /// Writes the record's `text` field followed by a line terminator. The
    /// record is validated before any byte is written, so a failed record
    /// leaves no partial output behind.
    fn write_record(&mut self, record: &Record) -> Result<()> {
        let line = text_field_value(record)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
    }
}

fn text_field_value(record: &Record) -> Result<&str> {
    let Some(root) = record.root() else {
        return Err(RecordIoError::FieldNotFound {
            field: TEXT_FIELD.to_string(),
        });
    };
    match root.field_type() {
        FieldType::Map | FieldType::ListMap => {}
        actual => return Err(RecordIoError::UnsupportedRootType { actual }),
    }
    let Some(field) = root.map_entry(TEXT_FIELD) else {
        return Err(RecordIoError::FieldNotFound {
            field: TEXT_FIELD.to_string(),
        });
    };
    field
        .as_str()
        .ok_or_else(|| RecordIoError::InvalidFieldType {
            field: TEXT_FIELD.to_string(),
            expected: FieldType::String,
            actual: field.field_type(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeflow_model::Field;

    struct PlainContext;
    impl StageContext for PlainContext {}

    fn reader_for(data: &'static [u8], message_id: &str) -> Box<dyn RecordReader> {
        TextReaderFactory
            .create_reader(Arc::new(PlainContext), Box::new(data), message_id)
            .expect("create reader")
    }

    #[test]
    fn lines_become_records_with_counted_ids() {
        let mut reader = reader_for(b"hello\nworld\n", "m1");

        let first = reader.read_record().expect("read").expect("first record");
        assert_eq!(first.header().source_id, "m1::1");
        assert_eq!(
            first.get("/text").expect("parse"),
            Some(&Field::String("hello".to_string()))
        );

        let second = reader.read_record().expect("read").expect("second record");
        assert_eq!(second.header().source_id, "m1::2");
        assert_eq!(
            second.get("/text").expect("parse"),
            Some(&Field::String("world".to_string()))
        );

        assert!(reader.read_record().expect("end of stream").is_none());
        assert!(reader.read_record().expect("stays terminated").is_none());
    }

    #[test]
    fn final_line_without_newline_is_kept() {
        let mut reader = reader_for(b"tail", "m2");
        let record = reader.read_record().expect("read").expect("record");
        assert_eq!(
            record.get("/text").expect("parse"),
            Some(&Field::String("tail".to_string()))
        );
        assert!(reader.read_record().expect("end of stream").is_none());
    }

    #[test]
    fn blank_line_is_an_empty_record_not_a_skip() {
        let mut reader = reader_for(b"a\n\nb\n", "m3");
        let ids: Vec<String> = std::iter::from_fn(|| {
            reader
                .read_record()
                .expect("read")
                .map(|r| r.header().source_id.clone())
        })
        .collect();
        assert_eq!(ids, ["m3::1", "m3::2", "m3::3"]);
    }

    #[test]
    fn factory_synthesizes_record_with_header_attributes() {
        let attributes = [("topic".to_string(), "sensors".to_string())];
        let record = TextReaderFactory
            .create_record(&PlainContext, "payload", "m4", &attributes)
            .expect("create record");
        assert_eq!(record.header().source_id, "m4");
        assert_eq!(record.header().attribute("topic"), Some("sensors"));
        assert_eq!(
            record.get("/text").expect("parse"),
            Some(&Field::String("payload".to_string()))
        );
    }
}
