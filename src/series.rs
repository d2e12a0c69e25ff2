// Scalar summaries over a (timestamp, value) series from the stats API.
//
// Every sample counts, zeros included: a zero reading is data, not "no data".

use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::EmptySeriesError;

/// One `[epoch_ms, value]` pair as returned by the Linode stats endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn timestamp(&self) -> f64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Summary {
    sum: f64,
    avg: f64,
    min: f64,
    max: f64,
}

/// Owns one series for the duration of a pass. All four statistics are
/// computed together on first use and memoized.
#[derive(Debug)]
pub struct TimeSeries {
    points: Vec<Point>,
    summary: OnceLock<Option<Summary>>,
}

impl TimeSeries {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            summary: OnceLock::new(),
        }
    }

    fn summary(&self) -> Option<&Summary> {
        self.summary
            .get_or_init(|| {
                let first = self.points.first()?.value();
                let mut s = Summary {
                    sum: 0.0,
                    avg: 0.0,
                    min: first,
                    max: first,
                };
                for p in &self.points {
                    s.sum += p.value();
                    s.min = s.min.min(p.value());
                    s.max = s.max.max(p.value());
                }
                s.avg = s.sum / self.points.len() as f64;
                Some(s)
            })
            .as_ref()
    }

    /// Total of all values; 0 for an empty series.
    pub fn sum(&self) -> f64 {
        self.summary().map_or(0.0, |s| s.sum)
    }

    pub fn average(&self) -> Result<f64, EmptySeriesError> {
        self.summary().map(|s| s.avg).ok_or(EmptySeriesError)
    }

    pub fn min(&self) -> Result<f64, EmptySeriesError> {
        self.summary().map(|s| s.min).ok_or(EmptySeriesError)
    }

    pub fn max(&self) -> Result<f64, EmptySeriesError> {
        self.summary().map(|s| s.max).ok_or(EmptySeriesError)
    }

    /// Value of the most recent point (greatest timestamp).
    pub fn latest(&self) -> Result<f64, EmptySeriesError> {
        self.points
            .iter()
            .max_by(|a, b| a.timestamp().total_cmp(&b.timestamp()))
            .map(Point::value)
            .ok_or(EmptySeriesError)
    }
}
