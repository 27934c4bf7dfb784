use crate::utils::{fixture_dir, test_config, write_source};
use trip_unify::{CANONICAL_FIELDS, TripRecord, TripSource, TripType, TripUnifyError, unify_sources};

#[test]
fn test_unified_set_has_canonical_columns() -> trip_unify::Result<()> {
    let dir = fixture_dir();
    let (_, unified) = unify_sources(&test_config(dir.path()))?;

    assert_eq!(unified.columns(), CANONICAL_FIELDS);
    for (source, batch) in unified.parts() {
        let names: Vec<&str> = batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, CANONICAL_FIELDS, "{source} batch");
    }
    Ok(())
}

#[test]
fn test_row_counts_and_source_order() -> trip_unify::Result<()> {
    let dir = fixture_dir();
    write_source(
        dir.path(),
        TripSource::Green,
        "lpep_pickup_datetime,lpep_dropoff_datetime,PULocationID,DOLocationID,trip_type\n\
         2025-01-01 00:00:00,2025-01-01 00:05:00,1,2,1\n\
         2025-01-01 00:10:00,2025-01-01 00:15:00,3,4,2\n\
         2025-01-01 00:20:00,2025-01-01 00:25:00,5,6,1\n",
    );

    let (initial, unified) = unify_sources(&test_config(dir.path()))?;
    assert_eq!(
        initial,
        vec![
            (TripSource::Yellow, 1),
            (TripSource::Green, 3),
            (TripSource::Fhv, 1),
            (TripSource::Fhvhv, 1),
        ]
    );
    assert_eq!(unified.num_rows(), 6);
    assert_eq!(unified.counts_by_source(), initial);
    assert_eq!(
        unified.row_sources(),
        vec![
            TripSource::Yellow,
            TripSource::Green,
            TripSource::Green,
            TripSource::Green,
            TripSource::Fhv,
            TripSource::Fhvhv,
        ]
    );
    Ok(())
}

#[test]
fn test_non_numeric_codes_become_null() -> trip_unify::Result<()> {
    let dir = fixture_dir();
    write_source(
        dir.path(),
        TripSource::Yellow,
        "tpep_pickup_datetime,tpep_dropoff_datetime,RatecodeID,PULocationID,DOLocationID\n\
         2025-01-01 00:00:00,2025-01-01 00:05:00,XX,10,20\n\
         2025-01-01 00:10:00,2025-01-01 00:15:00,99,unknown,20\n",
    );
    write_source(
        dir.path(),
        TripSource::Fhv,
        "pickup_datetime,dropOff_datetime,PUlocationID,DOlocationID,SR_Flag\n\
         2025-01-01 00:00:00,2025-01-01 00:30:00,10,20,\n",
    );

    let (_, unified) = unify_sources(&test_config(dir.path()))?;
    let records = unified.records()?;
    assert_eq!(records.len(), 5);

    assert_eq!(records[0].trip_type, None);
    assert_eq!(records[1].trip_type, Some(TripType::Code(99)));
    assert_eq!(records[1].pu_location_id, None);
    assert_eq!(records[1].do_location_id, Some(20));
    assert_eq!(records[3].trip_type, None);
    Ok(())
}

#[test]
fn test_fhvhv_tag_survives_missing_zone_columns() -> trip_unify::Result<()> {
    let dir = fixture_dir();
    write_source(
        dir.path(),
        TripSource::Fhvhv,
        "hvfhs_license_num,pickup_datetime,dropoff_datetime\n\
         HV0005,2025-01-01 00:14:00,2025-01-01 00:40:00\n\
         HV0003,2025-01-01 01:14:00,2025-01-01 01:40:00\n",
    );

    let (_, unified) = unify_sources(&test_config(dir.path()))?;
    let fhvhv: Vec<TripRecord> = unified.records()?.into_iter().skip(3).collect();
    assert_eq!(fhvhv.len(), 2);
    for record in fhvhv {
        assert_eq!(record.trip_type, Some(TripType::Tag("FHVHV".to_string())));
        assert_eq!(record.pu_location_id, None);
        assert_eq!(record.do_location_id, None);
        assert!(record.pickup_datetime.is_some());
    }
    Ok(())
}

#[test]
fn test_missing_timestamp_column_is_schema_error() {
    let dir = fixture_dir();
    write_source(
        dir.path(),
        TripSource::Green,
        "lpep_pickup_datetime,PULocationID,DOLocationID,trip_type\n\
         2025-01-01 00:00:00,10,20,1\n",
    );

    let err = unify_sources(&test_config(dir.path())).unwrap_err();
    assert!(matches!(err, TripUnifyError::SchemaError(_)));
    assert!(err.to_string().contains("Green"));
}

#[test]
fn test_unparseable_timestamp_is_fatal() {
    let dir = fixture_dir();
    write_source(
        dir.path(),
        TripSource::Fhv,
        "pickup_datetime,dropOff_datetime,PUlocationID,DOlocationID,SR_Flag\n\
         yesterday,2025-01-01 00:30:00,10,20,1\n",
    );

    let err = unify_sources(&test_config(dir.path())).unwrap_err();
    assert!(matches!(err, TripUnifyError::CastError(_)));
}
