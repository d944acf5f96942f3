use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SunDashError};

// ---------------------------------------------------------------------------
// TimeUnit – observation precision / smoothing unit / cycle domain
// ---------------------------------------------------------------------------

/// A unit of time as offered by the dashboard selectors.
///
/// Used both as the observation precision passed to the loader and as the
/// unit a smoothing window is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Months,
    Years,
}

impl TimeUnit {
    /// Observation types the user can pick for the main chart.
    pub const OBSERVATION_TYPES: [TimeUnit; 2] = [TimeUnit::Days, TimeUnit::Months];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }

    /// Granularity of the source file backing this precision.
    /// `Years` views are derived from the monthly file.
    pub fn granularity(self) -> Granularity {
        match self {
            TimeUnit::Days => Granularity::Daily,
            TimeUnit::Months | TimeUnit::Years => Granularity::Monthly,
        }
    }

    /// Smoothing units that have a reconciliation path for this observation type.
    /// The first entry is the default.
    pub fn smoothing_options(self) -> &'static [TimeUnit] {
        match self.granularity() {
            Granularity::Daily => &[TimeUnit::Days, TimeUnit::Months],
            Granularity::Monthly => &[TimeUnit::Months],
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = SunDashError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "days" => Ok(TimeUnit::Days),
            "months" => Ok(TimeUnit::Months),
            "years" => Ok(TimeUnit::Years),
            other => Err(SunDashError::InvalidArgument(format!(
                "unknown time unit '{other}' (expected days, months or years)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

/// Sampling rate of a loaded series. Uniform within one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Monthly,
}

// ---------------------------------------------------------------------------
// Observation – one row of a sunspot file
// ---------------------------------------------------------------------------

/// A single measurement instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year: i32,
    /// 1–12.
    pub month: u32,
    /// 1–31, only populated at daily granularity.
    pub day: Option<u32>,
    pub fractional_year: f64,
    /// Raw value as published; negative means "missing".
    pub sunspot_number: f64,
}

impl Observation {
    /// The sunspot number, or `None` when the row carries the missing sentinel.
    pub fn value(&self) -> Option<f64> {
        (self.sunspot_number >= 0.0).then_some(self.sunspot_number)
    }

    /// Calendar key used to detect duplicate rows.
    pub fn key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day.unwrap_or(0))
    }
}

// ---------------------------------------------------------------------------
// ObservationSeries – ordered rows of one granularity
// ---------------------------------------------------------------------------

/// Observations ordered by `fractional_year` ascending.
///
/// Filtering and smoothing never mutate a series; they build new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    pub granularity: Granularity,
    pub observations: Vec<Observation>,
}

impl ObservationSeries {
    pub fn new(granularity: Granularity, observations: Vec<Observation>) -> Self {
        Self {
            granularity,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Inclusive `(min, max)` calendar year, `None` for an empty series.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.observations.iter().map(|o| o.year).min()?;
        let max = self.observations.iter().map(|o| o.year).max()?;
        Some((min, max))
    }

    /// `[x, y]` pairs for plotting, skipping rows with a missing value.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.observations
            .iter()
            .filter_map(|o| o.value().map(|v| [o.fractional_year, v]))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// One output position of the smoothing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPoint {
    pub fractional_year: f64,
    /// `None` until the window holds enough defined samples.
    pub value: Option<f64>,
}

/// An observation folded onto its position within a repeating cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePoint {
    /// `fractional_year mod cycle_length`, in `[0, cycle_length)`.
    pub phase: f64,
    pub sunspot_number: f64,
    /// Which repetition of the cycle the observation falls in.
    pub cycle_index: i64,
}
