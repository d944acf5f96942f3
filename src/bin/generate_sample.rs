use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sun_dash::config::{DEFAULT_DAILY_FILE, DEFAULT_MONTHLY_FILE};
use sun_dash::data::loader::parse_series;
use sun_dash::data::model::Granularity;

/// Write synthetic daily and monthly sunspot files in the published layout.
#[derive(Parser, Debug)]
struct Args {
    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// First year of the daily file
    #[arg(long, default_value_t = 1818)]
    daily_from: i32,

    /// First year of the monthly file
    #[arg(long, default_value_t = 1749)]
    monthly_from: i32,

    /// Last year of both files
    #[arg(long, default_value_t = 2023)]
    until: i32,

    /// Seed for the synthetic sunspot numbers
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Roughly 11-year activity cycle with drifting amplitude.
fn activity(t: f64) -> f64 {
    let phase = (t - 1755.2) / 11.0 * std::f64::consts::PI;
    let amplitude = 120.0 + 60.0 * ((t - 1750.0) / 90.0).sin();
    amplitude * phase.sin().powi(2)
}

fn daily_file(args: &Args, rng: &mut SimpleRng) -> String {
    let mut out = String::new();
    for year in args.daily_from..=args.until {
        let year_days = if is_leap(year) { 366.0 } else { 365.0 };
        let mut day_of_year = 0u32;
        for month in 1..=12 {
            for day in 1..=days_in_month(year, month) {
                let frac = year as f64 + (day_of_year as f64 + 0.5) / year_days;
                day_of_year += 1;

                // Early records have gaps, published as -1.
                let missing = year < 1850 && rng.next_f64() < 0.3;
                let (sn, sd, nobs) = if missing {
                    (-1, -1.0, 0)
                } else {
                    let value = (activity(frac) + rng.gauss(0.0, 20.0)).max(0.0).round() as i64;
                    (value, (value as f64).sqrt() * 1.5, 1 + (rng.next_f64() * 40.0) as u32)
                };
                let _ = writeln!(
                    out,
                    "{year:4} {month:02} {day:02} {frac:8.3} {sn:4} {sd:5.1} {nobs:4} 1"
                );
            }
        }
    }
    out
}

fn monthly_file(args: &Args, rng: &mut SimpleRng) -> String {
    let mut out = String::new();
    for year in args.monthly_from..=args.until {
        for month in 1..=12u32 {
            let frac = year as f64 + (month as f64 - 0.5) / 12.0;
            let value = (activity(frac) + rng.gauss(0.0, 8.0)).max(0.0);
            let _ = writeln!(out, "{year:4} {month:02} {frac:8.3} {value:6.1} {:5.1} {:4} 1", -1.0, -1);
        }
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    std::fs::create_dir_all(&args.out).context("creating output directory")?;

    for (name, text, granularity) in [
        (DEFAULT_DAILY_FILE, daily_file(&args, &mut rng), Granularity::Daily),
        (DEFAULT_MONTHLY_FILE, monthly_file(&args, &mut rng), Granularity::Monthly),
    ] {
        let path = args.out.join(name);
        // Make sure the dashboard can read what we wrote.
        let series = parse_series(&text, granularity, &path)?;
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {} rows to {}", series.len(), path.display());
    }
    Ok(())
}
