pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::SyncConfig;

pub use crate::adapters::{MongoSourceReader, PostgresUpsertSink};
pub use crate::core::{batch::BatchRunner, report::BatchReport, transform::RecordTransformer};
pub use utils::error::{Result, SyncError};
