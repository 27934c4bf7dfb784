use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use trip_unify::{MongoSink, TripSink, UnifierConfig, run_job};

/// Unify one month of Yellow, Green, FHV and FHVHV trip extracts into a
/// MongoDB collection
#[derive(Parser, Debug)]
#[command(name = "trip-unify", version, about)]
struct Cli {
    /// Directory containing the four monthly CSV extracts
    #[arg(long)]
    input: PathBuf,

    /// MongoDB connection URI of the destination store
    #[arg(long)]
    output: String,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = UnifierConfig::new(cli.input, cli.output);
    config.validate().context("invalid configuration")?;
    info!(
        "Unifying trips from {} into {}.{}",
        config.input_dir.display(),
        config.database,
        config.collection
    );

    let sink = MongoSink::connect(&config.output_uri, &config.database, &config.collection)
        .await
        .context("failed to set up the document store")?;

    let outcome = run_job(&config, &sink).await;
    let closed = sink.shutdown().await;

    let summary = outcome.context("trip unification failed")?;
    closed.context("failed to close the document store connection")?;
    info!(
        "Appended {} of {} unified trips",
        summary.written, summary.unified_rows
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e:?}");
        std::process::exit(1);
    }
}
