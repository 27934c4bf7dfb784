//! Destinations for unified trip documents
//!
//! A sink is constructed once by the caller, handed to the job, and shut down by
//! the caller afterwards whether or not the job succeeded.

use std::future::Future;
use std::pin::Pin;

use mongodb::bson::Document;

use crate::error::Result;

pub mod mongo;

pub use mongo::MongoSink;

/// Boxed future returned by sink operations
pub type SinkFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Core trait for appending trip documents to a store
pub trait TripSink: Send + Sync {
    /// Append all documents to the target collection in one batched write.
    ///
    /// Returns the number of documents the store acknowledged. There is no
    /// rollback: a failure part-way leaves whatever the store already persisted.
    fn append(&self, documents: Vec<Document>) -> SinkFuture<'_, usize>;

    /// Release the connection
    fn shutdown(&self) -> SinkFuture<'_, ()>;

    /// Target description for logs, e.g. `nyc_taxi.trips_2025_01`
    fn describe(&self) -> String;
}

/// Hide the password of a connection URI, e.g. for log lines
///
/// The authority ends at the first `/` or `?`. Credentials are expected to be
/// percent-encoded, so the last `@` inside the authority separates them from
/// the host list.
#[must_use]
pub fn redact_uri(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => {
            let credentials = &rest[..at];
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***{}", &rest[at..])
        }
        None => uri.to_string(),
    }
}
