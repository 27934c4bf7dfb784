//! End-to-end unification run: read, map, union, write.

use std::time::Instant;

use mongodb::bson::Document;

use crate::config::UnifierConfig;
use crate::error::Result;
use crate::reader::load_sources_parallel;
use crate::schema::{UnifiedTrips, union_by_name};
use crate::sink::TripSink;
use crate::source::TripSource;
use crate::transform::transform_all;
use crate::utils::logging::{create_spinner, finish_progress_bar};
use crate::utils::log_row_counts;

/// Counts reported by a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    /// Rows read per source, in union order
    pub initial_counts: Vec<(TripSource, usize)>,
    /// Rows in the unified set
    pub unified_rows: usize,
    /// Documents acknowledged by the sink
    pub written: usize,
}

/// Read all four extracts, map them to the canonical schema and concatenate
/// them in union order. Nothing is written.
pub fn unify_sources(config: &UnifierConfig) -> Result<(Vec<(TripSource, usize)>, UnifiedTrips)> {
    let frames = load_sources_parallel(config)?;
    let initial_counts: Vec<_> = frames.iter().map(|f| (f.source, f.num_rows())).collect();
    log_row_counts("Initial", &initial_counts);

    let mapped = transform_all(&frames, &config.date_format_config)?;
    drop(frames);

    let unified = union_by_name(mapped)?;
    Ok((initial_counts, unified))
}

fn log_sample(unified: &UnifiedTrips, rows: usize) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    log::info!("Sample of unified data:");
    for record in unified.sample(rows)? {
        match serde_json::to_string(&record) {
            Ok(json) => log::info!("  {json}"),
            Err(e) => log::warn!("Could not render sample row: {e}"),
        }
    }
    Ok(())
}

/// Unified set converted for the sink, with the counts logged along the way
struct PreparedDocuments {
    initial_counts: Vec<(TripSource, usize)>,
    unified_rows: usize,
    documents: Vec<Document>,
}

fn prepare_documents(config: &UnifierConfig) -> Result<PreparedDocuments> {
    let (initial_counts, unified) = unify_sources(config)?;
    log_sample(&unified, config.sample_rows)?;

    let unified_rows = unified.num_rows();
    log::info!("Unified count: {unified_rows}");
    log_row_counts("Unified", &unified.counts_by_source());

    Ok(PreparedDocuments {
        initial_counts,
        unified_rows,
        documents: unified.into_documents()?,
    })
}

/// Run a full unification against `sink`.
///
/// Reading, mapping and document conversion run on the blocking pool. Any
/// failure before the write returns early and leaves the sink untouched.
/// The caller owns the sink and is responsible for shutting it down.
pub async fn run_job(config: &UnifierConfig, sink: &dyn TripSink) -> Result<JobSummary> {
    config.validate()?;
    let start = Instant::now();

    let owned_config = config.clone();
    let PreparedDocuments {
        initial_counts,
        unified_rows,
        documents,
    } = tokio::task::spawn_blocking(move || prepare_documents(&owned_config)).await??;

    log::info!("Writing {} documents to {}", documents.len(), sink.describe());
    let spinner = config
        .show_progress
        .then(|| create_spinner(Some(&format!("Writing to {}", sink.describe()))));
    let outcome = sink.append(documents).await;
    if let Some(pb) = &spinner {
        finish_progress_bar(pb, None);
    }
    let written = outcome?;

    log::info!(
        "Wrote {} documents to {} in {:?}",
        written,
        sink.describe(),
        start.elapsed()
    );
    log::info!("ETL job completed successfully");

    Ok(JobSummary {
        initial_counts,
        unified_rows,
        written,
    })
}
