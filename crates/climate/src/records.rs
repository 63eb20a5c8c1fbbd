//! JSON records returned by the `/api/v1.0` routes.
//!
//! Store rows carry nullable columns; the records here do not. Any row with a
//! missing value is dropped while converting, so every serialized object has
//! all of its fields.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, hash::Hash};
use utoipa::ToSchema;

use crate::db::{PrecipitationReading, StationName, TemperatureReading, TemperatureSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrecipitationRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationRecord {
    #[serde(rename = "Station ID")]
    pub station_id: String,
    #[serde(rename = "Location")]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservationRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Observed Temp (TOBS)")]
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureSummaryRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "TMIN")]
    pub tmin: f64,
    #[serde(rename = "TAVG")]
    pub tavg: f64,
    #[serde(rename = "TMAX")]
    pub tmax: f64,
}

/// Collapses rows that share a key.
///
/// The first occurrence of a key fixes its position in the output and the
/// last occurrence supplies the value. Nothing is aggregated.
pub fn last_write_wins<K, V, I>(rows: I) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut collapsed: Vec<(K, V)> = Vec::new();

    for (key, value) in rows {
        match positions.get(&key) {
            Some(&index) => collapsed[index].1 = value,
            None => {
                positions.insert(key.clone(), collapsed.len());
                collapsed.push((key, value));
            }
        }
    }

    collapsed
}

/// Keyed by date; a missing value that wins the collapse drops the date.
pub fn precipitation_records(readings: Vec<PrecipitationReading>) -> Vec<PrecipitationRecord> {
    last_write_wins(readings.into_iter().map(|r| (r.date, r.precipitation)))
        .into_iter()
        .filter_map(|(date, precipitation)| {
            Some(PrecipitationRecord {
                date,
                precipitation: precipitation?,
            })
        })
        .collect()
}

/// Rows without a station id never take part in the collapse.
pub fn station_records(stations: Vec<StationName>) -> Vec<StationRecord> {
    last_write_wins(
        stations
            .into_iter()
            .filter_map(|s| Some((s.station?, s.name))),
    )
        .into_iter()
        .filter_map(|(station_id, location)| {
            Some(StationRecord {
                station_id,
                location: location?,
            })
        })
        .collect()
}

pub fn temperature_observation_records(
    readings: Vec<TemperatureReading>,
) -> Vec<TemperatureObservationRecord> {
    last_write_wins(readings.into_iter().map(|r| (r.date, r.temperature)))
        .into_iter()
        .filter_map(|(date, temperature)| {
            Some(TemperatureObservationRecord {
                date,
                temperature: temperature?,
            })
        })
        .collect()
}

pub fn temperature_summary_records(
    summaries: Vec<TemperatureSummary>,
) -> Vec<TemperatureSummaryRecord> {
    summaries
        .into_iter()
        .filter_map(|s| {
            Some(TemperatureSummaryRecord {
                date: s.date?,
                tmin: s.tmin?,
                tavg: s.tavg?,
                tmax: s.tmax?,
            })
        })
        .collect()
}
