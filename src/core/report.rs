use crate::domain::model::{BatchOutcome, RecordError};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Result of a completed run. Partial failure is reported, never hidden.
#[derive(Debug)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_read: usize,
    pub applied: usize,
    pub failed: usize,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_read: usize,
    pub applied: usize,
    pub failed: usize,
    pub failures: Vec<FailureSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub index: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
}

impl BatchReport {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcome: BatchOutcome,
    ) -> Self {
        Self {
            started_at,
            finished_at,
            total_read: outcome.len(),
            applied: outcome.applied(),
            failed: outcome.failed(),
            outcome,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }

    pub fn summary(&self) -> ReportSummary {
        let failures = self
            .outcome
            .failures()
            .map(|(index, error)| match error {
                RecordError::Mapping(e) => FailureSummary {
                    index,
                    kind: "mapping",
                    field: Some(e.field.clone()),
                    email: None,
                    message: e.to_string(),
                },
                RecordError::Sink(e) => FailureSummary {
                    index,
                    kind: "sink",
                    field: None,
                    email: Some(e.params.p_email.clone()),
                    message: e.to_string(),
                },
            })
            .collect();

        ReportSummary {
            started_at: self.started_at,
            finished_at: self.finished_at,
            total_read: self.total_read,
            applied: self.applied,
            failed: self.failed,
            failures,
        }
    }

    /// Writes `summary()` as pretty JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.summary())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Records read:    {}", self.total_read),
            format!("Records applied: {}", self.applied),
            format!("Records failed:  {}", self.failed),
        ];
        for (index, error) in self.outcome.failures() {
            lines.push(format!("  #{}: {}", index, error));
        }
        lines
    }
}
