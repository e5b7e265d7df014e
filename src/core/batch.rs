use crate::core::report::BatchReport;
use crate::core::transform::RecordTransformer;
use crate::domain::model::{BatchOutcome, RecordOutcome, RunState, SourceRecord};
use crate::domain::ports::{SourceReader, UpsertSink};
use crate::utils::error::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};

/// Drives read -> transform -> upsert over one closed batch.
///
/// Only a failed read stops the run. Mapping and sink failures are recorded
/// per record and the remaining records are still processed.
pub struct BatchRunner<R: SourceReader, S: UpsertSink> {
    reader: R,
    sink: S,
    transformer: RecordTransformer,
    concurrency: usize,
    state: RunState,
}

impl<R: SourceReader, S: UpsertSink> BatchRunner<R, S> {
    pub fn new(reader: R, sink: S, transformer: RecordTransformer) -> Self {
        Self {
            reader,
            sink,
            transformer,
            concurrency: 1,
            state: RunState::Init,
        }
    }

    /// Number of records transformed and upserted at once. Outcomes stay in read order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub async fn run(&mut self) -> Result<BatchReport> {
        let started_at = Utc::now();

        self.state = RunState::Reading;
        tracing::info!("Reading source records...");
        let records = match self.reader.read_all().await {
            Ok(records) => records,
            Err(e) => {
                self.state = RunState::Aborted;
                tracing::error!("❌ Source read failed, aborting run: {}", e);
                self.release().await;
                return Err(e);
            }
        };
        tracing::info!("Read {} records", records.len());

        self.state = RunState::Processing;
        let outcome = self.process(records).await;

        self.release().await;
        self.state = RunState::Done;

        let report = BatchReport::new(started_at, Utc::now(), outcome);
        tracing::info!(
            "Run finished: {} read, {} applied, {} failed",
            report.total_read,
            report.applied,
            report.failed
        );
        Ok(report)
    }

    async fn process(&self, records: Vec<SourceRecord>) -> BatchOutcome {
        let transformer = &self.transformer;
        let sink = &self.sink;

        // buffered 保持輸出順序與讀取順序一致
        let outcomes = stream::iter(records.into_iter().enumerate())
            .map(move |(index, record)| process_record(transformer, sink, index, record))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        BatchOutcome { outcomes }
    }

    async fn release(&self) {
        self.reader.release().await;
        self.sink.release().await;
    }
}

async fn process_record<S: UpsertSink>(
    transformer: &RecordTransformer,
    sink: &S,
    index: usize,
    record: SourceRecord,
) -> RecordOutcome {
    let params = match transformer.transform(&record) {
        Ok(params) => params,
        Err(e) => {
            tracing::error!(index, field = %e.field, "Error processing record: {}", e);
            return RecordOutcome::Failed {
                index,
                error: e.into(),
            };
        }
    };

    match sink.apply(params).await {
        Ok(result) => {
            tracing::info!(index, "Upsert OK -> result: {}", result);
            RecordOutcome::Applied { index, result }
        }
        Err(e) => {
            tracing::error!(index, email = %e.params.p_email, "Error processing record: {}", e);
            RecordOutcome::Failed {
                index,
                error: e.into(),
            }
        }
    }
}
