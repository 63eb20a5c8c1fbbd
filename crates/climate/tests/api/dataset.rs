use crate::helpers::{create_dataset, MockClimateAccess};
use climate::{
    build_app_state,
    db::{self, ClimateAccess, ClimateData, StationActivity},
    reference_window, RangeFilter, ReferenceWindow,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use time::macros::date;

#[tokio::test]
async fn most_recent_date_is_lexicographic_max() {
    let dir = tempfile::tempdir().unwrap();
    let database = create_dataset(
        dir.path(),
        &[("S1", Some("WAIKIKI 717.2, HI US"))],
        &[
            ("S1", "2017-08-01", None, None),
            ("S1", "2017-08-23", None, None),
            ("S1", "2010-01-01", None, None),
        ],
    )
    .await;

    let climate_db = ClimateAccess::new(&database).await.unwrap();

    assert_eq!(
        climate_db.most_recent_date().await.unwrap().as_deref(),
        Some("2017-08-23")
    );
    let window = ReferenceWindow::compute(&climate_db).await.unwrap();
    assert_eq!(window.most_recent_date, date!(2017 - 08 - 23));
    assert_eq!(window.one_year_prior_date, date!(2016 - 08 - 23));
}

#[tokio::test]
async fn empty_measurement_table_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let database = create_dataset(dir.path(), &[("S1", Some("WAIKIKI 717.2, HI US"))], &[]).await;

    let climate_db = ClimateAccess::new(&database).await.unwrap();
    assert!(matches!(
        ReferenceWindow::compute(&climate_db).await,
        Err(reference_window::Error::EmptyDataset)
    ));

    let app_state = build_app_state(
        String::from("http://127.0.0.1:5000"),
        database,
        RangeFilter::ReferenceWindow,
    )
    .await;
    assert!(app_state.is_err());
}

#[tokio::test]
async fn dataset_without_measurement_table_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stations.sqlite");
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await.unwrap();
    sqlx::query("CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
    let database = path.to_str().unwrap().to_string();

    let climate_db = ClimateAccess::new(&database).await.unwrap();
    assert!(matches!(
        ReferenceWindow::compute(&climate_db).await,
        Err(reference_window::Error::Store(db::Error::Query(_)))
    ));

    let app_state = build_app_state(
        String::from("http://127.0.0.1:5000"),
        database,
        RangeFilter::ReferenceWindow,
    )
    .await;
    assert!(app_state.is_err());
}

#[tokio::test]
async fn missing_dataset_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.sqlite");

    let result = ClimateAccess::new(missing.to_str().unwrap()).await;

    assert!(matches!(result, Err(db::Error::NotFound(_))));
}

#[tokio::test]
async fn store_errors_abort_window_computation() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_most_recent_date()
        .times(1)
        .returning(|| Err(crate::helpers::store_unavailable()));

    let result = ReferenceWindow::compute(&climate_data).await;

    assert!(matches!(result, Err(reference_window::Error::Store(_))));
}

#[tokio::test]
async fn station_activity_counts_only_rows_inside_range() {
    let dir = tempfile::tempdir().unwrap();
    let database = create_dataset(
        dir.path(),
        &[("A", Some("WAIKIKI 717.2, HI US")), ("B", Some("KANEOHE 838.1, HI US"))],
        &[
            ("A", "2017-08-20", None, Some(78.0)),
            ("A", "2017-08-21", None, Some(79.0)),
            ("B", "2017-08-21", None, Some(70.0)),
            ("B", "2017-08-22", None, Some(71.0)),
            ("B", "2015-08-22", None, Some(71.0)),
            ("B", "2015-08-23", None, Some(71.0)),
        ],
    )
    .await;
    let climate_db = ClimateAccess::new(&database).await.unwrap();

    let activity = climate_db
        .station_activity(date!(2016 - 08 - 23), date!(2017 - 08 - 23))
        .await
        .unwrap();

    assert_eq!(
        activity,
        vec![
            StationActivity {
                station: Some(String::from("A")),
                observations: 2,
            },
            StationActivity {
                station: Some(String::from("B")),
                observations: 2,
            },
        ]
    );
}
