//! Runtime configuration: built-in defaults, an optional JSON file, then
//! command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::data::model::TimeUnit;

/// Live solar image published by SOHO (HMI intensitygram).
pub const DEFAULT_IMAGE_URL: &str = "https://soho.nascom.nasa.gov/data/realtime/hmi_igr/1024/latest.jpg";
pub const DEFAULT_DAILY_FILE: &str = "SN_d_tot_V2.0.txt";
pub const DEFAULT_MONTHLY_FILE: &str = "SN_m_tot_V2.0.txt";

/// Ranges and defaults offered by the dashboard widgets.
pub struct WidgetDefaults {
    pub precision: TimeUnit,
    pub smoothing_unit: TimeUnit,
    pub smoothing_period: usize,
    /// Periods offered by the selector: `0..smoothing_period_options`.
    pub smoothing_period_options: usize,
    pub cycle_domain: TimeUnit,
    pub cycle_length: u32,
    pub cycle_length_range: std::ops::RangeInclusive<u32>,
}

pub const WIDGETS: WidgetDefaults = WidgetDefaults {
    precision: TimeUnit::Days,
    smoothing_unit: TimeUnit::Days,
    smoothing_period: 5,
    smoothing_period_options: 30,
    cycle_domain: TimeUnit::Years,
    cycle_length: 11,
    cycle_length_range: 1..=30,
};

// ---------------------------------------------------------------------------
// DashConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Directory holding the sunspot files.
    pub data_dir: PathBuf,
    pub daily_file: String,
    pub monthly_file: String,
    pub image_url: String,
    pub fetch_image_on_startup: bool,
}

impl Default for DashConfig {
    fn default() -> Self {
        DashConfig {
            data_dir: PathBuf::from("."),
            daily_file: DEFAULT_DAILY_FILE.to_string(),
            monthly_file: DEFAULT_MONTHLY_FILE.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            fetch_image_on_startup: true,
        }
    }
}

impl DashConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the final configuration for a set of command-line arguments.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(url) = &cli.image_url {
            config.image_url = url.clone();
        }
        if cli.no_image {
            config.fetch_image_on_startup = false;
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Default)]
#[command(name = "sun-dash", about = "Monitor and analyze solar activity")]
pub struct Cli {
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing SN_d_tot_V2.0.txt and SN_m_tot_V2.0.txt
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// URL of the live solar image
    #[arg(long)]
    pub image_url: Option<String>,

    /// Don't fetch the solar image at startup
    #[arg(long)]
    pub no_image: bool,
}
