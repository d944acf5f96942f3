use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{ObservationSeries, SmoothedPoint};

// ---------------------------------------------------------------------------
// CSV export of the displayed series
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ExportRow {
    fractional_year: f64,
    /// Empty when the source row is missing.
    sunspot_number: Option<f64>,
    /// Empty when the position is outside the smoothing support.
    smoothed: Option<f64>,
}

/// Write the raw series alongside its smoothed values.
///
/// Smoothed points are matched to raw rows by fractional year; a daily series
/// smoothed in months only has smoothed values on the first of each month.
pub fn write_csv<W: Write>(writer: W, raw: &ObservationSeries, smoothed: &[SmoothedPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut pending = smoothed.iter().peekable();

    for obs in raw.iter() {
        // Both sequences are chronological, so a merge walk is enough.
        while pending
            .peek()
            .is_some_and(|p| p.fractional_year < obs.fractional_year)
        {
            pending.next();
        }
        let aligned = pending
            .peek()
            .is_some_and(|p| p.fractional_year == obs.fractional_year);
        let smoothed = if aligned {
            pending.next().and_then(|p| p.value)
        } else {
            None
        };
        wtr.serialize(ExportRow {
            fractional_year: obs.fractional_year,
            sunspot_number: obs.value(),
            smoothed,
        })
        .context("writing CSV row")?;
    }

    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// Export to a file at `path`, returning the number of rows written.
pub fn export_csv(path: &Path, raw: &ObservationSeries, smoothed: &[SmoothedPoint]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, raw, smoothed)?;
    Ok(raw.len())
}
