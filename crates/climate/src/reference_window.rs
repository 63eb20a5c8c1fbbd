//! The fixed one-year window most queries are scoped to.
//!
//! Computed once during startup from the newest measurement date and shared
//! read-only for the life of the process. Picking up new data needs a restart.

use log::info;
use time::{macros::format_description, Date, Duration};

use crate::db::{self, ClimateData};

/// Fixed offset between the newest date and the start of the window.
/// Not leap-year aware: a window spanning Feb 29 ends one day short of a year.
pub const WINDOW_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Measurement table has no rows")]
    EmptyDataset,
    #[error("Most recent date `{0}` is not a valid ISO date: {1}")]
    InvalidDate(String, time::error::Parse),
    #[error("Most recent date `{0}` is too early to compute a one year window")]
    OutOfRange(String),
    #[error("Failed to read most recent date: {0}")]
    Store(#[from] db::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWindow {
    pub most_recent_date: Date,
    pub one_year_prior_date: Date,
}

impl ReferenceWindow {
    /// Builds the window ending on `most_recent`, an ISO `YYYY-MM-DD` string.
    pub fn ending_on(most_recent: &str) -> Result<Self, Error> {
        let most_recent_date = parse_iso_date(most_recent)
            .map_err(|e| Error::InvalidDate(most_recent.to_owned(), e))?;
        let one_year_prior_date = most_recent_date
            .checked_sub(Duration::days(WINDOW_DAYS))
            .ok_or_else(|| Error::OutOfRange(most_recent.to_owned()))?;

        Ok(Self {
            most_recent_date,
            one_year_prior_date,
        })
    }

    /// Reads the newest measurement date from the store and builds the window.
    pub async fn compute(climate_db: &dyn ClimateData) -> Result<Self, Error> {
        let most_recent = climate_db
            .most_recent_date()
            .await?
            .ok_or(Error::EmptyDataset)?;
        let window = Self::ending_on(&most_recent)?;
        info!(
            "reference window: {} to {}",
            window.one_year_prior_date, window.most_recent_date
        );
        Ok(window)
    }
}

pub fn parse_iso_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

pub fn format_iso_date(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}
