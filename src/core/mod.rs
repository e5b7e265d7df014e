pub mod batch;
pub mod report;
pub mod transform;

pub use crate::domain::model::{BatchOutcome, ParameterSet, RecordOutcome, RunState, SourceRecord};
pub use crate::domain::ports::{SourceReader, UpsertSink};
pub use crate::utils::error::Result;
