use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};
use time::Date;
use utoipa::ToSchema;

use crate::{
    db::{self, ClimateData, StationActivity},
    precipitation_records,
    reference_window::{parse_iso_date, ReferenceWindow},
    station_records, temperature_observation_records, temperature_summary_records,
    PrecipitationRecord, StationRecord, TemperatureObservationRecord, TemperatureSummaryRecord,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read dataset: {0}")]
    Store(#[from] db::Error),
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    BadDate(String),
    #[error("Start date {start} is after end date {end}")]
    BadRange { start: String, end: String },
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Store(e) => {
                error!("error reading climate dataset: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::BadDate(_) | Error::BadRange { .. } => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// How the `{start}` and `{end}` path segments of the summary routes are used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeFilter {
    /// Path dates are accepted but ignored; the reference window is used instead
    #[default]
    ReferenceWindow,
    /// Path dates are validated and applied as the range bounds
    Requested,
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeFilter::ReferenceWindow => write!(f, "reference-window"),
            RangeFilter::Requested => write!(f, "requested"),
        }
    }
}

impl FromStr for RangeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference-window" | "reference_window" | "window" => Ok(RangeFilter::ReferenceWindow),
            "requested" => Ok(RangeFilter::Requested),
            other => Err(format!(
                "unknown range filter `{}`, expected `reference-window` or `requested`",
                other
            )),
        }
    }
}

/// The five read-only questions the API answers about the dataset
pub struct Climate {
    climate_db: Arc<dyn ClimateData>,
    window: ReferenceWindow,
    range_filter: RangeFilter,
}

impl Climate {
    pub fn new(
        climate_db: Arc<dyn ClimateData>,
        window: ReferenceWindow,
        range_filter: RangeFilter,
    ) -> Self {
        Self {
            climate_db,
            window,
            range_filter,
        }
    }

    pub fn window(&self) -> ReferenceWindow {
        self.window
    }

    pub fn range_filter(&self) -> RangeFilter {
        self.range_filter
    }

    /// Precipitation keyed by date from the start of the reference window onward
    pub async fn precipitation(&self) -> Result<Vec<PrecipitationRecord>, Error> {
        let readings = self
            .climate_db
            .precipitation_since(self.window.one_year_prior_date)
            .await?;
        Ok(precipitation_records(readings))
    }

    pub async fn stations(&self) -> Result<Vec<StationRecord>, Error> {
        let stations = self.climate_db.stations().await?;
        Ok(station_records(stations))
    }

    /// Temperature history of whichever station reported most often inside the reference window
    pub async fn most_active_station_temperatures(
        &self,
    ) -> Result<Vec<TemperatureObservationRecord>, Error> {
        let ReferenceWindow {
            most_recent_date,
            one_year_prior_date,
        } = self.window;

        let activity = self
            .climate_db
            .station_activity(one_year_prior_date, most_recent_date)
            .await?;
        let Some((station_id, observations)) = most_active_station(&activity) else {
            info!("no station reported inside the reference window");
            return Ok(vec![]);
        };
        debug!(
            "most active station {} with {} observations",
            station_id, observations
        );

        let readings = self
            .climate_db
            .station_temperatures(station_id.to_owned(), one_year_prior_date, most_recent_date)
            .await?;
        Ok(temperature_observation_records(readings))
    }

    /// Per-date TMIN/TAVG/TMAX from a start date onward
    pub async fn temperature_summary_from(
        &self,
        start: &str,
    ) -> Result<Vec<TemperatureSummaryRecord>, Error> {
        let since = match self.range_filter {
            RangeFilter::ReferenceWindow => self.window.one_year_prior_date,
            RangeFilter::Requested => requested_date(start)?,
        };

        let summaries = self.climate_db.daily_temperature_summaries(since).await?;
        Ok(temperature_summary_records(summaries))
    }

    /// A single TMIN/TAVG/TMAX row over a start/end range
    pub async fn temperature_summary_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<TemperatureSummaryRecord>, Error> {
        let (from, to) = match self.range_filter {
            RangeFilter::ReferenceWindow => {
                (self.window.one_year_prior_date, self.window.most_recent_date)
            }
            RangeFilter::Requested => {
                let (from, to) = (requested_date(start)?, requested_date(end)?);
                if from > to {
                    return Err(Error::BadRange {
                        start: start.to_owned(),
                        end: end.to_owned(),
                    });
                }
                (from, to)
            }
        };

        let summary = self.climate_db.temperature_summary(from, to).await?;
        Ok(temperature_summary_records(summary))
    }
}

/// Highest observation count wins, ties go to the lexicographically smallest station id.
/// Groups without a station id are never picked.
pub fn most_active_station(activity: &[StationActivity]) -> Option<(&str, i64)> {
    activity
        .iter()
        .filter_map(|a| Some((a.station.as_deref()?, a.observations)))
        .max_by(|(a_id, a_count), (b_id, b_count)| {
            a_count.cmp(b_count).then_with(|| b_id.cmp(a_id))
        })
}

fn requested_date(value: &str) -> Result<Date, Error> {
    parse_iso_date(value).map_err(|_| Error::BadDate(value.to_owned()))
}
