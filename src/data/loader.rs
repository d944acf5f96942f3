use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::config::DashConfig;
use crate::error::{Result, SunDashError};

use super::model::{Granularity, Observation, ObservationSeries, TimeUnit};

// ---------------------------------------------------------------------------
// Source files
// ---------------------------------------------------------------------------

/// Location of the two published sunspot files.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    pub dir: PathBuf,
    pub daily_file: String,
    pub monthly_file: String,
}

impl DataSource {
    pub fn from_config(config: &DashConfig) -> Self {
        DataSource {
            dir: config.data_dir.clone(),
            daily_file: config.daily_file.clone(),
            monthly_file: config.monthly_file.clone(),
        }
    }

    /// File backing the given precision. `years` reads the monthly file.
    pub fn path_for(&self, precision: TimeUnit) -> PathBuf {
        match precision.granularity() {
            Granularity::Daily => self.dir.join(&self.daily_file),
            Granularity::Monthly => self.dir.join(&self.monthly_file),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the series for `precision` from its fixed-format file.
pub fn load(source: &DataSource, precision: TimeUnit) -> Result<ObservationSeries> {
    let path = source.path_for(precision);
    let text = std::fs::read_to_string(&path)
        .map_err(|e| SunDashError::data_unavailable(&path, e.to_string()))?;
    let series = parse_series(&text, precision.granularity(), &path)?;
    log::info!(
        "Loaded {} {} observations from {}",
        series.len(),
        precision,
        path.display()
    );
    Ok(series)
}

// ---------------------------------------------------------------------------
// Fixed-width parser
// ---------------------------------------------------------------------------

/// Column layout of one published file.
///
/// Rows are space-aligned fixed-width records, so splitting on whitespace
/// recovers the columns. The two columns after the sunspot number (standard
/// deviation and observation count) are required but dropped; any further
/// trailing columns (the provisional/definitive marker) are ignored.
struct Layout {
    has_day: bool,
}

impl Layout {
    const DROPPED_COLUMNS: usize = 2;

    fn for_granularity(granularity: Granularity) -> Self {
        Layout {
            has_day: granularity == Granularity::Daily,
        }
    }

    fn used_columns(&self) -> usize {
        if self.has_day { 5 } else { 4 }
    }

    fn min_columns(&self) -> usize {
        self.used_columns() + Self::DROPPED_COLUMNS
    }
}

/// Parse the text of one sunspot file.
///
/// `path` is only used to label errors. Blank lines are skipped. Rows must be
/// in chronological order with no repeated calendar key, because windowed
/// smoothing depends on that order.
pub fn parse_series(text: &str, granularity: Granularity, path: &Path) -> Result<ObservationSeries> {
    let layout = Layout::for_granularity(granularity);
    let mut observations: Vec<Observation> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(line, &layout)
            .map_err(|reason| SunDashError::data_unavailable(path, format!("line {}: {reason}", line_no + 1)))?;

        if let Some(prev) = observations.last() {
            if row.key() <= prev.key() || row.fractional_year < prev.fractional_year {
                return Err(SunDashError::data_unavailable(
                    path,
                    format!("line {}: row is out of chronological order", line_no + 1),
                ));
            }
        }
        observations.push(row);
    }

    Ok(ObservationSeries::new(granularity, observations))
}

fn parse_row(line: &str, layout: &Layout) -> std::result::Result<Observation, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < layout.min_columns() {
        return Err(format!(
            "expected at least {} columns, found {}",
            layout.min_columns(),
            fields.len()
        ));
    }

    let year: i32 = parse_field(fields[0], "year")?;
    let month: u32 = parse_field(fields[1], "month")?;
    if !(1..=12).contains(&month) {
        return Err(format!("month {month} out of range"));
    }

    let (day, rest) = if layout.has_day {
        let day: u32 = parse_field(fields[2], "day")?;
        if !(1..=31).contains(&day) {
            return Err(format!("day {day} out of range"));
        }
        (Some(day), &fields[3..])
    } else {
        (None, &fields[2..])
    };

    let fractional_year: f64 = parse_field(rest[0], "fractional year")?;
    let sunspot_number: f64 = parse_field(rest[1], "sunspot number")?;

    Ok(Observation {
        year,
        month,
        day,
        fractional_year,
        sunspot_number,
    })
}

fn parse_field<T: std::str::FromStr>(token: &str, name: &str) -> std::result::Result<T, String> {
    token
        .parse::<T>()
        .map_err(|_| format!("'{token}' is not a valid {name}"))
}

// ---------------------------------------------------------------------------
// Memoized loading
// ---------------------------------------------------------------------------

struct CachedSeries {
    modified: Option<SystemTime>,
    series: Arc<ObservationSeries>,
}

/// Parsed datasets keyed by source granularity.
///
/// An entry is reused until the file's modification time changes.
pub struct DatasetCache {
    source: DataSource,
    entries: HashMap<Granularity, CachedSeries>,
}

impl DatasetCache {
    pub fn new(source: DataSource) -> Self {
        DatasetCache {
            source,
            entries: HashMap::new(),
        }
    }

    /// Point the cache at a different directory, dropping all entries.
    pub fn set_source(&mut self, source: DataSource) {
        if source != self.source {
            self.source = source;
            self.entries.clear();
        }
    }

    pub fn get(&mut self, precision: TimeUnit) -> Result<Arc<ObservationSeries>> {
        let granularity = precision.granularity();
        let path = self.source.path_for(precision);

        let modified = match std::fs::metadata(&path) {
            Ok(meta) => meta.modified().ok(),
            Err(e) => {
                self.entries.remove(&granularity);
                return Err(SunDashError::data_unavailable(&path, e.to_string()));
            }
        };

        if let Some(cached) = self.entries.get(&granularity) {
            if modified.is_some() && cached.modified == modified {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&cached.series));
            }
        }

        let series = Arc::new(load(&self.source, precision)?);
        self.entries.insert(
            granularity,
            CachedSeries {
                modified,
                series: Arc::clone(&series),
            },
        );
        Ok(series)
    }
}
