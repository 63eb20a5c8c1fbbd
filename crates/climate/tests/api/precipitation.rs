use crate::helpers::{create_dataset, spawn_app, spawn_dataset_app, store_unavailable, MockClimateAccess};
use climate::{db::PrecipitationReading, PrecipitationRecord, RangeFilter};
use std::sync::Arc;
use time::macros::date;

#[tokio::test]
async fn drops_dates_with_missing_precipitation() {
    let dir = tempfile::tempdir().unwrap();
    let database = create_dataset(
        dir.path(),
        &[("S1", Some("HONOLULU OBSERVATORY 702.2, HI US"))],
        &[
            ("S1", "2017-08-22", Some(0.1), Some(80.0)),
            ("S1", "2017-08-23", None, Some(81.0)),
        ],
    )
    .await;
    let test_app = spawn_dataset_app(&database, RangeFilter::ReferenceWindow).await;

    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert!(status.is_success());
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"[{"Date":"2017-08-22","Precipitation":0.1}]"#
    );
}

#[tokio::test]
async fn only_returns_dates_inside_window_in_ascending_order() {
    let dir = tempfile::tempdir().unwrap();
    let database = create_dataset(
        dir.path(),
        &[("S1", Some("WAIKIKI 717.2, HI US")), ("S2", Some("KANEOHE 838.1, HI US"))],
        &[
            ("S1", "2017-08-23", Some(0.0), Some(81.0)),
            ("S2", "2016-08-22", Some(2.0), Some(76.0)),
            ("S1", "2016-08-23", Some(0.7), Some(77.0)),
            ("S2", "2017-01-04", Some(0.2), Some(70.0)),
            ("S1", "2015-03-02", Some(1.1), Some(68.0)),
        ],
    )
    .await;
    let test_app = spawn_dataset_app(&database, RangeFilter::ReferenceWindow).await;

    let (status, json) = test_app.get_json("/api/v1.0/precipitation").await;
    assert!(status.is_success());

    let records: Vec<PrecipitationRecord> = serde_json::from_value(json).unwrap();
    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2016-08-23", "2017-01-04", "2017-08-23"]);
    assert!(records.iter().all(|r| r.date.as_str() >= "2016-08-23"));
}

#[tokio::test]
async fn same_date_from_several_stations_keeps_last_reading() {
    let dir = tempfile::tempdir().unwrap();
    let database = create_dataset(
        dir.path(),
        &[("S1", Some("WAIKIKI 717.2, HI US")), ("S2", Some("KANEOHE 838.1, HI US"))],
        &[
            ("S1", "2017-08-22", Some(0.5), Some(80.0)),
            ("S2", "2017-08-22", Some(0.0), Some(79.0)),
            ("S1", "2017-08-23", Some(0.1), Some(81.0)),
        ],
    )
    .await;
    let test_app = spawn_dataset_app(&database, RangeFilter::ReferenceWindow).await;

    let (_, json) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(
        json,
        serde_json::json!([
            {"Date": "2017-08-22", "Precipitation": 0.0},
            {"Date": "2017-08-23", "Precipitation": 0.1}
        ])
    );
}

#[tokio::test]
async fn queries_from_start_of_reference_window() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_precipitation_since()
        .withf(|since| *since == date!(2016 - 08 - 23))
        .times(2)
        .returning(|_| {
            Ok(vec![PrecipitationReading {
                date: String::from("2016-08-23"),
                precipitation: Some(0.15),
            }])
        });
    let test_app = spawn_app(Arc::new(climate_data), RangeFilter::ReferenceWindow);

    let (first_status, first) = test_app.get("/api/v1.0/precipitation").await;
    let (_, second) = test_app.get("/api/v1.0/precipitation").await;

    assert!(first_status.is_success());
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_precipitation_since()
        .times(1)
        .returning(|_| Err(store_unavailable()));
    let test_app = spawn_app(Arc::new(climate_data), RangeFilter::ReferenceWindow);

    let (status, json) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status.as_u16(), 500);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to read dataset"));
}
