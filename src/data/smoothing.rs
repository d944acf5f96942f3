use std::collections::VecDeque;

use crate::error::{Result, SunDashError};

use super::model::{Granularity, Observation, ObservationSeries, SmoothedPoint, TimeUnit};

// ---------------------------------------------------------------------------
// Smoothing engine
// ---------------------------------------------------------------------------

/// Moving average of the sunspot number over `window_length` units.
///
/// A daily series smoothed in `months` is first reduced to the rows where
/// `day == 1`; a month whose first day is absent is dropped, not interpolated.
/// Each output position averages the defined values among the last
/// `2 * window_length` samples and stays `None` until at least
/// `window_length` of them are defined.
///
/// The window trails the position it is reported at, so the smoothed curve
/// lags the raw curve by about half a window. Kept for compatibility with the
/// published dashboard.
pub fn smooth(series: &ObservationSeries, unit: TimeUnit, window_length: usize) -> Result<Vec<SmoothedPoint>> {
    if window_length == 0 {
        return Err(SunDashError::InvalidArgument(
            "smoothing window must be at least 1".into(),
        ));
    }

    let samples = reconcile(series, unit)?;
    let values: Vec<Option<f64>> = samples.iter().map(|o| o.value()).collect();
    let averaged = rolling_mean(&values, window_length * 2, window_length);

    Ok(samples
        .iter()
        .zip(averaged)
        .map(|(o, value)| SmoothedPoint {
            fractional_year: o.fractional_year,
            value,
        })
        .collect())
}

/// Bring the series to the sampling rate of `unit`.
fn reconcile(series: &ObservationSeries, unit: TimeUnit) -> Result<Vec<&Observation>> {
    match (series.granularity, unit) {
        (Granularity::Daily, TimeUnit::Days) | (Granularity::Monthly, TimeUnit::Months) => {
            Ok(series.iter().collect())
        }
        (Granularity::Daily, TimeUnit::Months) => {
            Ok(series.iter().filter(|o| o.day == Some(1)).collect())
        }
        (granularity, unit) => Err(SunDashError::InvalidArgument(format!(
            "cannot smooth a {granularity:?} series in {unit}"
        ))),
    }
}

/// Trailing mean over `window` positions, ignoring `None` values.
///
/// A position yields `None` unless at least `min_periods` defined values fall
/// inside its window.
pub fn rolling_mean(values: &[Option<f64>], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let mut in_window: VecDeque<Option<f64>> = VecDeque::with_capacity(window + 1);
    let mut sum = 0.0;
    let mut count = 0usize;

    values
        .iter()
        .map(|&value| {
            in_window.push_back(value);
            if let Some(v) = value {
                sum += v;
                count += 1;
            }
            if in_window.len() > window {
                if let Some(Some(old)) = in_window.pop_front() {
                    sum -= old;
                    count -= 1;
                }
            }
            if count == 0 {
                // Drop rounding residue left by values that have all left the window.
                sum = 0.0;
            }
            (count >= min_periods && count > 0).then(|| sum / count as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Jan 1–31 1900, sunspot number = row index.
    fn january_1900() -> ObservationSeries {
        let observations = (0..31)
            .map(|i| Observation {
                year: 1900,
                month: 1,
                day: Some(i + 1),
                fractional_year: 1900.0 + (i as f64 + 0.5) / 365.0,
                sunspot_number: i as f64,
            })
            .collect();
        ObservationSeries::new(Granularity::Daily, observations)
    }

    fn daily_years(years: std::ops::RangeInclusive<i32>) -> ObservationSeries {
        let mut observations = Vec::new();
        for year in years {
            for month in 1..=12u32 {
                for day in 1..=28u32 {
                    let doy = (month - 1) * 28 + day - 1;
                    observations.push(Observation {
                        year,
                        month,
                        day: Some(day),
                        fractional_year: year as f64 + doy as f64 / 336.0,
                        sunspot_number: month as f64,
                    });
                }
            }
        }
        ObservationSeries::new(Granularity::Daily, observations)
    }

    #[test]
    fn five_day_window_over_january() {
        let smoothed = smooth(&january_1900(), TimeUnit::Days, 5).unwrap();
        assert_eq!(smoothed.len(), 31);
        assert!(smoothed[..4].iter().all(|p| p.value.is_none()));

        // Row 5 averages the five rows seen so far.
        assert!(close(smoothed[4].value.unwrap(), 2.0));
        // From row 10 the full ten-sample window applies.
        assert!(close(smoothed[9].value.unwrap(), 4.5));
        for i in 10..31 {
            let expected = ((i - 9)..=i).sum::<usize>() as f64 / 10.0;
            assert!(close(smoothed[i].value.unwrap(), expected), "row {i}");
        }
    }

    #[test]
    fn output_keeps_positions_of_input() {
        let series = january_1900();
        let smoothed = smooth(&series, TimeUnit::Days, 3).unwrap();
        for (p, o) in smoothed.iter().zip(series.iter()) {
            assert_eq!(p.fractional_year, o.fractional_year);
        }
    }

    #[test]
    fn wider_window_never_shortens_undefined_prefix() {
        let series = january_1900();
        let mut previous = 0;
        for w in 1..12 {
            let smoothed = smooth(&series, TimeUnit::Days, w).unwrap();
            let undefined = smoothed.iter().take_while(|p| p.value.is_none()).count();
            assert_eq!(undefined, w - 1);
            assert!(undefined >= previous);
            previous = undefined;
        }
    }

    #[test]
    fn daily_in_months_keeps_first_of_month() {
        let series = daily_years(1900..=1901);
        let smoothed = smooth(&series, TimeUnit::Months, 2).unwrap();
        assert_eq!(smoothed.len(), 24);
        assert!(smoothed[0].value.is_none());
        // Months 1 and 2 of 1900.
        assert!(close(smoothed[1].value.unwrap(), 1.5));
    }

    #[test]
    fn missing_first_of_month_is_dropped() {
        let mut series = daily_years(1900..=1900);
        series.observations.retain(|o| !(o.month == 3 && o.day == Some(1)));
        let smoothed = smooth(&series, TimeUnit::Months, 1).unwrap();
        assert_eq!(smoothed.len(), 11);
    }

    #[test]
    fn missing_values_do_not_count_towards_support() {
        let mut series = january_1900();
        series.observations[1].sunspot_number = -1.0;
        let smoothed = smooth(&series, TimeUnit::Days, 3).unwrap();
        assert!(smoothed[2].value.is_none());
        // Rows 0, 2, 3.
        assert!(close(smoothed[3].value.unwrap(), 5.0 / 3.0));
    }

    #[test]
    fn zero_window_is_invalid() {
        let err = smooth(&january_1900(), TimeUnit::Days, 0).unwrap_err();
        assert!(matches!(err, SunDashError::InvalidArgument(_)));
    }

    #[test]
    fn unsupported_unit_pairings_are_invalid() {
        let daily = january_1900();
        let monthly = ObservationSeries::new(Granularity::Monthly, Vec::new());
        for (series, unit) in [
            (&daily, TimeUnit::Years),
            (&monthly, TimeUnit::Days),
            (&monthly, TimeUnit::Years),
        ] {
            let err = smooth(series, unit, 3).unwrap_err();
            assert!(matches!(err, SunDashError::InvalidArgument(_)));
        }
    }

    #[test]
    fn rolling_mean_drops_samples_leaving_window() {
        let values = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let out = rolling_mean(&values, 2, 1);
        assert_eq!(out, vec![Some(1.0), Some(1.5), Some(2.5), Some(3.5)]);
    }

    #[test]
    fn emptied_window_forgets_rounding_residue() {
        let mut values: Vec<Option<f64>> = (0..10).map(|i| Some(1e6 + 0.1 * i as f64)).collect();
        values.extend(std::iter::repeat(None).take(10));
        values.push(Some(3.0));
        let out = rolling_mean(&values, 4, 1);
        assert_eq!(out[19], None);
        assert_eq!(out[20], Some(3.0));
    }
}
