//! Per-record lineage, error, and attribute metadata.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Metadata carried alongside a record's payload.
///
/// The serialized field names are wire-visible and must stay bit-exact for
/// compatibility with peers that exchange record headers as JSON.
///
/// Attributes are string-valued by construction: [`Header::set_attribute`]
/// only accepts strings, so no attribute read ever needs a cast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub stage_creator: String,
    pub source_id: String,
    pub stages_path: String,
    pub tracking_id: String,
    pub previous_tracking_id: String,
    pub error_data_collector_id: String,
    pub error_pipeline_name: String,
    pub error_stage: String,
    pub error_message: String,
    /// Epoch milliseconds; zero until the record is redirected to error
    /// handling.
    pub error_timestamp: i64,
    #[serde(rename = "values")]
    attributes: HashMap<String, String>,
}

impl Header {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            ..Self::default()
        }
    }

    /// Stores a stage-specific annotation. Keys are unique; a repeated key
    /// overwrites the earlier value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns a fresh copy of the attribute map. Mutating the returned map
    /// never affects this header.
    pub fn attributes(&self) -> HashMap<String, String> {
        self.attributes.clone()
    }

    /// Attribute keys in unspecified order.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    /// Fills the error-context block and stamps the current time, recording
    /// why and where this record was redirected to error handling.
    pub fn mark_error(
        &mut self,
        data_collector_id: impl Into<String>,
        pipeline_name: impl Into<String>,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.error_data_collector_id = data_collector_id.into();
        self.error_pipeline_name = pipeline_name.into();
        self.error_stage = stage.into();
        self.error_message = message.into();
        self.error_timestamp = Utc::now().timestamp_millis();
    }

    /// A header carrying only the attribute map. Lineage and error fields
    /// reset; used when cloning a record into a new lineage root.
    pub(crate) fn attributes_only(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            ..Self::default()
        }
    }
}
