use trip_unify::{MongoSink, TripSink, TripUnifyError, UnifierConfig};

#[tokio::test]
async fn test_malformed_uri_is_sink_error() {
    let err = MongoSink::connect("localhost:27017", "nyc_taxi", "trips_2025_01")
        .await
        .unwrap_err();
    assert!(matches!(err, TripUnifyError::SinkError(_)));
}

#[tokio::test]
async fn test_sink_targets_configured_collection() -> trip_unify::Result<()> {
    let config = UnifierConfig::new("/data", "mongodb://localhost:27017");
    let sink = MongoSink::connect(&config.output_uri, &config.database, &config.collection).await?;
    assert_eq!(sink.describe(), "nyc_taxi.trips_2025_01");
    Ok(())
}

#[tokio::test]
async fn test_empty_append_writes_nothing() -> trip_unify::Result<()> {
    let sink = MongoSink::connect("mongodb://localhost:27017", "nyc_taxi", "trips_2025_01").await?;
    assert_eq!(sink.append(Vec::new()).await?, 0);
    Ok(())
}
