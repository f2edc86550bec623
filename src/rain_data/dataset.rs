//! The result of a paginated fetch: every record the server returned, in
//! fetch order, plus conversions into Polars frames for tabular work and
//! plotting.

use crate::error::HeavyRainError;
use crate::types::reading::RainReading;
use chrono::{DateTime, Utc};
use log::info;
use polars::prelude::*;
use std::collections::HashSet;

/// All records of one query, concatenated across pages in fetch order.
///
/// The dataset does not re-sort: if the server returns newest-first, so does
/// the dataset. Records whose numeric fields failed coercion are kept here;
/// only the plotting projection ([`plot_frame`](Dataset::plot_frame)) leaves
/// them out.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<RainReading>,
    pages: u32,
}

impl Dataset {
    pub(crate) fn new(records: Vec<RainReading>, pages: u32) -> Self {
        Self { records, pages }
    }

    /// The fetched records, in fetch order.
    pub fn records(&self) -> &[RainReading] {
        &self.records
    }

    /// Consumes the dataset, returning the records.
    pub fn into_records(self) -> Vec<RainReading> {
        self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of page requests that produced this dataset.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Distinguishes "query matched nothing" from a usable result, so a
    /// notebook can print a message instead of handing an empty frame to a
    /// plotting call that would fail on it.
    ///
    /// # Errors
    ///
    /// Returns [`HeavyRainError::EmptyResult`] when the dataset has no
    /// records.
    pub fn ensure_non_empty(&self) -> Result<&Self, HeavyRainError> {
        if self.records.is_empty() {
            Err(HeavyRainError::EmptyResult)
        } else {
            Ok(self)
        }
    }

    /// Collapses records sharing (`dev_eui`, `city`, `timestamp`) to their
    /// first occurrence, returning how many were removed.
    pub fn dedup(&mut self) -> usize {
        let mut seen: HashSet<(Option<String>, Option<String>, DateTime<Utc>)> = HashSet::new();
        let before = self.records.len();
        self.records
            .retain(|r| seen.insert((r.dev_eui.clone(), r.city.clone(), r.timestamp)));
        let removed = before - self.records.len();
        if removed > 0 {
            info!("removed {} duplicate record(s) across page boundaries", removed);
        }
        removed
    }

    /// Converts every record into a `DataFrame`.
    ///
    /// Numeric fields that failed coercion become nulls, which Polars (and
    /// anything plotting from it) handles without raising: the sentinel
    /// never turns into a crash or a fake zero.
    pub fn frame(&self) -> Result<DataFrame, PolarsError> {
        build_frame(&self.records)
    }

    /// Like [`frame`](Dataset::frame) but without the records whose
    /// `rain_value` failed coercion, i.e. only rows that can actually be
    /// plotted. The raw records stay available on the dataset for inspection.
    pub fn plot_frame(&self) -> Result<DataFrame, PolarsError> {
        let plottable: Vec<RainReading> = self
            .records
            .iter()
            .filter(|r| r.rain_mm().is_some())
            .cloned()
            .collect();
        build_frame(&plottable)
    }
}

fn build_frame(records: &[RainReading]) -> Result<DataFrame, PolarsError> {
    let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp.timestamp_millis()).collect();
    let dev_euis: Vec<Option<String>> = records.iter().map(|r| r.dev_eui.clone()).collect();
    let cities: Vec<Option<String>> = records.iter().map(|r| r.city.clone()).collect();
    let sources: Vec<Option<String>> = records.iter().map(|r| r.source.clone()).collect();
    let rain: Vec<Option<f64>> = records.iter().map(|r| r.rain_value.as_f64()).collect();
    let latitudes: Vec<Option<f64>> = records.iter().map(|r| r.latitude.as_f64()).collect();
    let longitudes: Vec<Option<f64>> = records.iter().map(|r| r.longitude.as_f64()).collect();

    let timestamp_column = Column::new("timestamp".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    DataFrame::new(vec![
        timestamp_column,
        Column::new("dev_eui".into(), dev_euis),
        Column::new("city".into(), cities),
        Column::new("source".into(), sources),
        Column::new("rain_value".into(), rain),
        Column::new("latitude".into(), latitudes),
        Column::new("longitude".into(), longitudes),
    ])
}
