use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::CycleColors;
use crate::config::{DashConfig, WIDGETS};
use crate::data::cycle::project_cycle;
use crate::data::export::export_csv;
use crate::data::filter::filter_by_range;
use crate::data::loader::{DataSource, DatasetCache};
use crate::data::model::{CyclePoint, ObservationSeries, SmoothedPoint, TimeUnit};
use crate::data::smoothing::smooth;
use crate::error::Result;
use crate::remote::{SunImage, fetch_sun_image};

// ---------------------------------------------------------------------------
// Widget values
// ---------------------------------------------------------------------------

/// Current value of every dashboard selector. Persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub precision: TimeUnit,
    /// `None` means "earliest year in the dataset".
    pub lower_year: Option<i32>,
    /// `None` means "latest year in the dataset".
    pub upper_year: Option<i32>,
    pub smoothing_unit: TimeUnit,
    pub smoothing_period: usize,
    pub cycle_domain: TimeUnit,
    pub cycle_length: u32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            precision: WIDGETS.precision,
            lower_year: None,
            upper_year: None,
            smoothing_unit: WIDGETS.smoothing_unit,
            smoothing_period: WIDGETS.smoothing_period,
            cycle_domain: WIDGETS.cycle_domain,
            cycle_length: WIDGETS.cycle_length,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart inputs
// ---------------------------------------------------------------------------

/// Everything the main chart draws for one set of controls.
#[derive(Debug, Clone)]
pub struct SunspotView {
    pub title: String,
    /// Years offered by both bound selectors.
    pub year_options: RangeInclusive<i32>,
    pub raw: ObservationSeries,
    pub smoothed: Vec<SmoothedPoint>,
    /// Set when the smoothing request was rejected; the raw curve still shows.
    pub smoothing_error: Option<String>,
}

impl SunspotView {
    pub fn smoothed_points(&self) -> Vec<[f64; 2]> {
        self.smoothed
            .iter()
            .filter_map(|p| p.value.map(|v| [p.fractional_year, v]))
            .collect()
    }
}

/// Everything the cycle chart draws.
#[derive(Debug, Clone)]
pub struct CycleView {
    pub title: String,
    pub points: Vec<CyclePoint>,
    pub colors: CycleColors,
}

/// Load → filter → smooth for the main chart.
///
/// Bounds outside the dataset's years are clamped to it. A rejected
/// smoothing request leaves `smoothed` empty and records the reason.
pub fn build_sunspot_view(series: &ObservationSeries, controls: &Controls) -> SunspotView {
    let year_options = match series.year_span() {
        Some((min, max)) => min..=max,
        None => 0..=0,
    };
    let lower = controls
        .lower_year
        .unwrap_or(*year_options.start())
        .clamp(*year_options.start(), *year_options.end());
    let upper = controls
        .upper_year
        .unwrap_or(*year_options.end())
        .clamp(*year_options.start(), *year_options.end());

    let raw = filter_by_range(series, lower, upper);
    let (smoothed, smoothing_error) =
        match smooth(&raw, controls.smoothing_unit, controls.smoothing_period) {
            Ok(smoothed) => (smoothed, None),
            Err(e) => {
                log::warn!("Smoothing rejected: {e}");
                (Vec::new(), Some(e.to_string()))
            }
        };

    SunspotView {
        title: format!(
            "Average Sunspot Number: Mean by {}, smoothed by {} {}",
            controls.precision, controls.smoothing_period, controls.smoothing_unit
        ),
        year_options,
        raw,
        smoothed,
        smoothing_error,
    }
}

/// Load → project for the cycle chart.
pub fn build_cycle_view(series: &ObservationSeries, cycle_length: u32, domain: TimeUnit) -> Result<CycleView> {
    let points = project_cycle(series, cycle_length)?;
    let first = points.iter().map(|p| p.cycle_index).min().unwrap_or(0);
    let last = points.iter().map(|p| p.cycle_index).max().unwrap_or(-1);
    Ok(CycleView {
        title: format!("Sunspot Cycle: {cycle_length} {domain}"),
        points,
        colors: CycleColors::new(first, last),
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashConfig,
    pub controls: Controls,
    cache: DatasetCache,

    pub sunspot_view: Option<SunspotView>,
    pub cycle_view: Option<CycleView>,

    /// Latest solar image; `None` until fetched or after a failed refresh.
    pub sun_image: Option<SunImage>,
    pub image_error: Option<String>,
    image_generation: u64,

    /// Messages shown in the UI, one per source so a success in one
    /// pipeline never clears another's error.
    pub sunspot_status: Option<String>,
    pub cycle_status: Option<String>,
    pub export_status: Option<String>,
}

impl AppState {
    pub fn new(config: DashConfig, controls: Controls) -> Self {
        let cache = DatasetCache::new(DataSource::from_config(&config));
        Self {
            config,
            controls,
            cache,
            sunspot_view: None,
            cycle_view: None,
            sun_image: None,
            image_error: None,
            image_generation: 0,
            sunspot_status: None,
            cycle_status: None,
            export_status: None,
        }
    }

    /// Every active status message, main chart first.
    pub fn status_messages(&self) -> impl Iterator<Item = &str> {
        [&self.sunspot_status, &self.cycle_status, &self.export_status]
            .into_iter()
            .filter_map(|m| m.as_deref())
    }

    /// Recompute both charts from the current controls.
    pub fn refresh_all(&mut self) {
        self.refresh_sunspot_view();
        self.refresh_cycle_view();
    }

    /// Re-run the main chart pipeline.
    pub fn refresh_sunspot_view(&mut self) {
        match self.cache.get(self.controls.precision) {
            Ok(series) => {
                let view = build_sunspot_view(&series, &self.controls);
                self.sunspot_status = view.smoothing_error.clone();
                self.sunspot_view = Some(view);
            }
            Err(e) => {
                log::error!("Failed to load sunspot data: {e:#}");
                self.sunspot_status = Some(format!("Error: {e}"));
                self.sunspot_view = None;
            }
        }
    }

    /// Re-run the cycle chart pipeline.
    pub fn refresh_cycle_view(&mut self) {
        let result = self.cache.get(self.controls.cycle_domain).and_then(|series| {
            build_cycle_view(&series, self.controls.cycle_length, self.controls.cycle_domain)
        });
        match result {
            Ok(view) => {
                self.cycle_status = None;
                self.cycle_view = Some(view);
            }
            Err(e) => {
                log::error!("Failed to build cycle view: {e:#}");
                self.cycle_status = Some(format!("Error: {e}"));
                self.cycle_view = None;
            }
        }
    }

    /// Switch observation type. The smoothing unit resets to the first unit
    /// the new type supports.
    pub fn set_precision(&mut self, precision: TimeUnit) {
        self.controls.precision = precision;
        self.controls.smoothing_unit = precision.smoothing_options()[0];
        self.refresh_sunspot_view();
    }

    /// Read data from another directory.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        log::info!("Switching data directory to {}", dir.display());
        self.config.data_dir = dir;
        self.cache.set_source(DataSource::from_config(&self.config));
        self.controls.lower_year = None;
        self.controls.upper_year = None;
        self.refresh_all();
    }

    /// Fetch the solar image again, replacing the one shown.
    pub fn refresh_image(&mut self) {
        self.image_generation += 1;
        match fetch_sun_image(&self.config.image_url, self.image_generation) {
            Ok(image) => {
                self.sun_image = Some(image);
                self.image_error = None;
            }
            Err(e) => {
                log::error!("Failed to fetch solar image: {e:#}");
                self.sun_image = None;
                self.image_error = Some(e.to_string());
            }
        }
    }

    /// Write the displayed main-chart series to `path` as CSV.
    pub fn export_view(&mut self, path: &Path) {
        let Some(view) = &self.sunspot_view else {
            self.export_status = Some("Nothing to export".into());
            return;
        };
        match export_csv(path, &view.raw, &view.smoothed) {
            Ok(rows) => {
                log::info!("Exported {rows} rows to {}", path.display());
                self.export_status = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.export_status = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::{DAILY_SAMPLE, MONTHLY_SAMPLE, scratch_dir};
    use crate::data::model::{Granularity, Observation};

    fn monthly(first_year: i32, years: i32) -> ObservationSeries {
        let observations = (first_year..first_year + years)
            .flat_map(|year| {
                (1..=12).map(move |month| Observation {
                    year,
                    month,
                    day: None,
                    fractional_year: year as f64 + (month as f64 - 0.5) / 12.0,
                    sunspot_number: 10.0 * month as f64,
                })
            })
            .collect();
        ObservationSeries::new(Granularity::Monthly, observations)
    }

    fn monthly_controls() -> Controls {
        Controls {
            precision: TimeUnit::Months,
            smoothing_unit: TimeUnit::Months,
            ..Controls::default()
        }
    }

    fn state_in(dir: &Path) -> AppState {
        let config = DashConfig {
            data_dir: dir.to_path_buf(),
            fetch_image_on_startup: false,
            ..DashConfig::default()
        };
        AppState::new(config, Controls::default())
    }

    #[test]
    fn default_controls_match_dashboard() {
        let c = Controls::default();
        assert_eq!(c.precision, TimeUnit::Days);
        assert_eq!(c.smoothing_unit, TimeUnit::Days);
        assert_eq!(c.smoothing_period, 5);
        assert_eq!(c.cycle_length, 11);
    }

    #[test]
    fn view_spans_whole_dataset_by_default() {
        let series = monthly(1818, 10);
        let view = build_sunspot_view(&series, &monthly_controls());
        assert_eq!(view.year_options, 1818..=1827);
        // Upper bound 1827 excludes the mid-month rows of 1827.
        assert_eq!(view.raw.len(), 9 * 12);
        assert_eq!(view.smoothed.len(), view.raw.len());
        assert!(view.smoothing_error.is_none());
        assert_eq!(
            view.title,
            "Average Sunspot Number: Mean by months, smoothed by 5 months"
        );
    }

    #[test]
    fn bounds_are_clamped_to_dataset() {
        let series = monthly(1818, 10);
        let controls = Controls {
            lower_year: Some(1700),
            upper_year: Some(1820),
            ..monthly_controls()
        };
        let view = build_sunspot_view(&series, &controls);
        assert_eq!(view.raw.len(), 24);
    }

    #[test]
    fn rejected_smoothing_keeps_raw_curve() {
        let series = monthly(1900, 2);
        let controls = Controls {
            smoothing_period: 0,
            ..monthly_controls()
        };
        let view = build_sunspot_view(&series, &controls);
        assert!(!view.raw.is_empty());
        assert!(view.smoothed.is_empty());
        assert!(view.smoothing_error.is_some());
    }

    #[test]
    fn cycle_view_colours_each_repetition() {
        let series = monthly(1900, 24);
        let view = build_cycle_view(&series, 11, TimeUnit::Years).unwrap();
        assert_eq!(view.title, "Sunspot Cycle: 11 years");
        assert_eq!(view.points.len(), 24 * 12);
        assert_eq!(view.colors.len(), 3);
    }

    #[test]
    fn switching_to_months_resets_smoothing_unit() {
        let dir = scratch_dir("state-precision");
        std::fs::write(dir.join("SN_m_tot_V2.0.txt"), MONTHLY_SAMPLE).unwrap();
        let mut state = state_in(&dir);
        state.set_precision(TimeUnit::Months);
        assert_eq!(state.controls.smoothing_unit, TimeUnit::Months);
        assert!(state.sunspot_view.is_some());
    }

    #[test]
    fn missing_files_surface_as_status() {
        let dir = scratch_dir("state-missing");
        let mut state = state_in(&dir);
        state.refresh_all();
        assert!(state.sunspot_view.is_none());
        assert!(state.cycle_view.is_none());
        assert!(state.sunspot_status.as_deref().unwrap().starts_with("Error"));
        assert!(state.cycle_status.as_deref().unwrap().starts_with("Error"));
        assert_eq!(state.status_messages().count(), 2);
    }

    #[test]
    fn refresh_and_export_round_through_files() {
        let dir = scratch_dir("state-export");
        std::fs::write(dir.join("SN_d_tot_V2.0.txt"), DAILY_SAMPLE).unwrap();
        std::fs::write(dir.join("SN_m_tot_V2.0.txt"), MONTHLY_SAMPLE).unwrap();
        let mut state = state_in(&dir);
        state.refresh_all();
        let view = state.sunspot_view.as_ref().unwrap();
        assert_eq!(view.year_options, 1818..=2023);
        assert!(state.cycle_view.is_some());

        let out = dir.join("export.csv");
        state.export_view(&out);
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("fractional_year,sunspot_number,smoothed"));
    }

    #[test]
    fn smoothing_success_keeps_cycle_and_export_errors() {
        let dir = scratch_dir("state-status");
        std::fs::write(dir.join("SN_d_tot_V2.0.txt"), DAILY_SAMPLE).unwrap();
        let mut state = state_in(&dir);

        // No monthly file, so the cycle chart fails.
        state.refresh_all();
        assert!(state.cycle_status.is_some());

        state.export_view(&dir.join("missing-dir").join("out.csv"));
        assert!(state.export_status.is_some());

        state.controls.smoothing_period = 3;
        state.refresh_sunspot_view();
        assert!(state.sunspot_status.is_none());
        assert!(state.cycle_status.is_some());
        assert!(state.export_status.is_some());
        assert_eq!(state.status_messages().count(), 2);
    }
}
