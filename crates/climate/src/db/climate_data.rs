use async_trait::async_trait;
use climate_core::is_file;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use std::{str::FromStr, time::Duration};
use time::Date;

use crate::reference_window::format_iso_date;

/// Read-only access to the `measurement` and `station` tables
pub struct ClimateAccess {
    pool: SqlitePool,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Dataset not found: {0}")]
    NotFound(String),
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date: {0}")]
    TimeFormat(#[from] time::error::Format),
}

/// One `(date, prcp)` row of the measurement table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

/// Station id with its location label
///
/// Neither column is constrained, so a row may carry a NULL id.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StationName {
    pub station: Option<String>,
    pub name: Option<String>,
}

/// Number of measurement rows a station reported within a date range
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StationActivity {
    pub station: Option<String>,
    pub observations: i64,
}

/// One `(date, tobs)` row of the measurement table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub temperature: Option<f64>,
}

/// Min/avg/max of `tobs` over a grouping of measurement rows
///
/// Every column is nullable: an aggregate over zero rows, or over rows whose
/// temperatures are all missing, comes back as NULL.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureSummary {
    pub date: Option<String>,
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Greatest `date` string in the measurement table, `None` when it is empty
    async fn most_recent_date(&self) -> Result<Option<String>, Error>;
    /// Precipitation rows on or after `since`, ordered by date
    async fn precipitation_since(&self, since: Date) -> Result<Vec<PrecipitationReading>, Error>;
    /// All stations in table order
    async fn stations(&self) -> Result<Vec<StationName>, Error>;
    /// Measurement counts per station within `[start, end]`
    async fn station_activity(&self, start: Date, end: Date)
        -> Result<Vec<StationActivity>, Error>;
    /// Temperature rows of one station within `[start, end]`, ordered by date
    async fn station_temperatures(
        &self,
        station_id: String,
        start: Date,
        end: Date,
    ) -> Result<Vec<TemperatureReading>, Error>;
    /// Per-date temperature summaries for dates on or after `since`, ordered by date
    async fn daily_temperature_summaries(
        &self,
        since: Date,
    ) -> Result<Vec<TemperatureSummary>, Error>;
    /// One ungrouped temperature summary over `[start, end]`
    async fn temperature_summary(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<TemperatureSummary>, Error>;
}

impl ClimateAccess {
    pub async fn new(path: &str) -> Result<Self, Error> {
        if !is_file(path) {
            return Err(Error::NotFound(path.to_owned()));
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("SQLite dataset opened read-only at: {}", path);
        Ok(Self { pool })
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn most_recent_date(&self) -> Result<Option<String>, Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT date FROM measurement ORDER BY date DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(date,)| date))
    }

    async fn precipitation_since(&self, since: Date) -> Result<Vec<PrecipitationReading>, Error> {
        let since = format_iso_date(since)?;
        debug!("querying precipitation since {}", since);

        let readings = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, prcp AS precipitation
             FROM measurement
             WHERE date >= ?
             ORDER BY date, rowid",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    async fn stations(&self) -> Result<Vec<StationName>, Error> {
        let stations = sqlx::query_as::<_, StationName>(
            "SELECT station, name FROM station ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    async fn station_activity(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<StationActivity>, Error> {
        let activity = sqlx::query_as::<_, StationActivity>(
            "SELECT station, COUNT(station) AS observations
             FROM measurement
             WHERE date >= ? AND date <= ?
             GROUP BY station
             ORDER BY observations DESC, station ASC",
        )
        .bind(format_iso_date(start)?)
        .bind(format_iso_date(end)?)
        .fetch_all(&self.pool)
        .await?;
        Ok(activity)
    }

    async fn station_temperatures(
        &self,
        station_id: String,
        start: Date,
        end: Date,
    ) -> Result<Vec<TemperatureReading>, Error> {
        let readings = sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, tobs AS temperature
             FROM measurement
             WHERE station = ? AND date >= ? AND date <= ?
             ORDER BY date, rowid",
        )
        .bind(station_id)
        .bind(format_iso_date(start)?)
        .bind(format_iso_date(end)?)
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    async fn daily_temperature_summaries(
        &self,
        since: Date,
    ) -> Result<Vec<TemperatureSummary>, Error> {
        let summaries = sqlx::query_as::<_, TemperatureSummary>(
            "SELECT date, MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax
             FROM measurement
             WHERE date >= ?
             GROUP BY date
             ORDER BY date",
        )
        .bind(format_iso_date(since)?)
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }

    async fn temperature_summary(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<TemperatureSummary>, Error> {
        // MAX(date) names the row after the latest day that fed the aggregate
        let summary = sqlx::query_as::<_, TemperatureSummary>(
            "SELECT MAX(date) AS date, MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(format_iso_date(start)?)
        .bind(format_iso_date(end)?)
        .fetch_all(&self.pool)
        .await?;
        Ok(summary)
    }
}
