use crate::utils::error::{MappingError, SinkError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One customer document as read from the source collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub data: HashMap<String, serde_json::Value>,
}

impl SourceRecord {
    pub fn new(data: HashMap<String, serde_json::Value>) -> Self {
        Self { data }
    }

    /// Builds a record from a JSON object; any other JSON value yields `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(obj) => Some(Self {
                data: obj.into_iter().collect(),
            }),
            _ => None,
        }
    }
}

/// Parameter names of the upsert procedure, in call order.
pub const PARAMETER_NAMES: [&str; 5] = ["p_name", "p_email", "p_street", "p_city", "p_country"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub p_name: String,
    pub p_email: String,
    pub p_street: String,
    pub p_city: String,
    pub p_country: String,
}

impl ParameterSet {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        PARAMETER_NAMES.into_iter().zip([
            self.p_name.as_str(),
            self.p_email.as_str(),
            self.p_street.as_str(),
            self.p_city.as_str(),
            self.p_country.as_str(),
        ])
    }
}

/// Text rendering of whatever the upsert procedure returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertResult {
    pub value: Option<String>,
}

impl fmt::Display for UpsertResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => f.write_str(value),
            None => f.write_str("NULL"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[derive(Debug)]
pub enum RecordOutcome {
    Applied { index: usize, result: UpsertResult },
    Failed { index: usize, error: RecordError },
}

impl RecordOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Applied { index, .. } | Self::Failed { index, .. } => *index,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Per-record outcomes in read order; one entry per record read.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchOutcome {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.applied()
    }

    pub fn failures(&self) -> impl Iterator<Item = (usize, &RecordError)> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Failed { index, error } => Some((*index, error)),
            RecordOutcome::Applied { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Reading,
    Processing,
    Aborted,
    Done,
}
