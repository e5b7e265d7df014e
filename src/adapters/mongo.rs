use crate::config::SourceConfig;
use crate::domain::model::SourceRecord;
use crate::domain::ports::SourceReader;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::redact;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

/// Reads every document of one MongoDB collection.
pub struct MongoSourceReader {
    client: Client,
    collection: Collection<Document>,
}

impl MongoSourceReader {
    pub async fn connect(config: &SourceConfig) -> Result<Self> {
        tracing::debug!(
            "Connecting to MongoDB at {} ({}.{})",
            redact(&config.uri),
            config.database,
            config.collection
        );
        let client = Client::with_uri_str(&config.uri).await.map_err(|e| {
            SyncError::source_unavailable(
                format!("cannot create MongoDB client for {}", redact(&config.uri)),
                e,
            )
        })?;

        Ok(Self::from_client(client, &config.database, &config.collection))
    }

    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        Self { client, collection }
    }

    fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }
}

#[async_trait]
impl SourceReader for MongoSourceReader {
    async fn read_all(&self) -> Result<Vec<SourceRecord>> {
        let cursor = self.collection.find(doc! {}).await.map_err(|e| {
            SyncError::source_unavailable(format!("find on {} failed", self.namespace()), e)
        })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            SyncError::source_unavailable(
                format!("reading cursor of {} failed", self.namespace()),
                e,
            )
        })?;

        tracing::debug!("Fetched {} documents from {}", documents.len(), self.namespace());
        Ok(documents.into_iter().map(document_to_record).collect())
    }

    async fn release(&self) {
        tracing::debug!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}

/// BSON -> relaxed extended JSON. Strings stay strings; ObjectId and dates
/// become `$oid`/`$date` objects.
pub fn document_to_record(document: Document) -> SourceRecord {
    SourceRecord::new(
        document
            .into_iter()
            .map(|(key, value)| (key, value.into_relaxed_extjson()))
            .collect(),
    )
}
