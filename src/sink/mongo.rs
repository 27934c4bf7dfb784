//! MongoDB sink

use mongodb::bson::Document;
use mongodb::{Client, Collection};

use crate::error::{Result, TripUnifyError};
use crate::sink::{SinkFuture, TripSink, redact_uri};

/// Appends trip documents to one collection of a MongoDB deployment
#[derive(Debug, Clone)]
pub struct MongoSink {
    client: Client,
    collection: Collection<Document>,
    namespace: String,
}

impl MongoSink {
    /// Build a client for `uri` targeting `database.collection`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first write rather than here. A malformed URI fails immediately.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            TripUnifyError::sink(format!(
                "failed to configure client for {}: {e}",
                redact_uri(uri)
            ))
        })?;
        let collection = client.database(database).collection::<Document>(collection);
        log::info!(
            "Configured MongoDB sink {}.{} at {}",
            database,
            collection.name(),
            redact_uri(uri)
        );

        Ok(Self {
            client,
            namespace: format!("{database}.{}", collection.name()),
            collection,
        })
    }
}

impl TripSink for MongoSink {
    fn append(&self, documents: Vec<Document>) -> SinkFuture<'_, usize> {
        Box::pin(async move {
            if documents.is_empty() {
                log::warn!("No documents to write to {}", self.namespace);
                return Ok(0);
            }

            let result = self.collection.insert_many(documents).await.map_err(|e| {
                TripUnifyError::sink(format!("insert into {} failed: {e}", self.namespace))
            })?;
            Ok(result.inserted_ids.len())
        })
    }

    fn shutdown(&self) -> SinkFuture<'_, ()> {
        Box::pin(async move {
            self.client.clone().shutdown().await;
            log::debug!("MongoDB client for {} shut down", self.namespace);
            Ok(())
        })
    }

    fn describe(&self) -> String {
        self.namespace.clone()
    }
}
