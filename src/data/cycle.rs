use crate::error::{Result, SunDashError};

use super::model::{CyclePoint, ObservationSeries};

/// Fold every observation onto its phase within a cycle of `cycle_length` years.
///
/// Points keep the chronological order of the series, so each phase recurs
/// once per cycle; rendered as a scatter this stacks the cycles on top of
/// each other. Sunspot numbers pass through untouched, missing sentinel
/// included; dropping those is up to the renderer.
pub fn project_cycle(series: &ObservationSeries, cycle_length: u32) -> Result<Vec<CyclePoint>> {
    if cycle_length == 0 {
        return Err(SunDashError::InvalidArgument(
            "cycle length must be at least 1 year".into(),
        ));
    }
    let length = f64::from(cycle_length);

    Ok(series
        .iter()
        .map(|o| {
            let (phase, cycle_index) = phase_of(o.fractional_year, length);
            CyclePoint {
                phase,
                sunspot_number: o.sunspot_number,
                cycle_index,
            }
        })
        .collect())
}

/// `(fractional_year mod length, completed cycles)`, with the phase clamped to `[0, length)`.
fn phase_of(fractional_year: f64, length: f64) -> (f64, i64) {
    let mut phase = fractional_year.rem_euclid(length);
    if phase >= length {
        // rem_euclid can round up to `length` for values just below a multiple.
        phase = 0.0;
    }
    let cycle_index = ((fractional_year - phase) / length).round() as i64;
    (phase, cycle_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Granularity, Observation};

    fn monthly(first_year: i32, months: usize) -> ObservationSeries {
        let observations = (0..months)
            .map(|i| {
                let year = first_year + (i / 12) as i32;
                let month = (i % 12) as u32 + 1;
                Observation {
                    year,
                    month,
                    day: None,
                    fractional_year: year as f64 + (month as f64 - 0.5) / 12.0,
                    sunspot_number: i as f64,
                }
            })
            .collect();
        ObservationSeries::new(Granularity::Monthly, observations)
    }

    #[test]
    fn phases_stay_within_cycle() {
        let series = monthly(1749, 12 * 60);
        for length in [1, 7, 11, 30] {
            let points = project_cycle(&series, length).unwrap();
            assert_eq!(points.len(), series.len());
            let l = f64::from(length);
            assert!(points.iter().all(|p| p.phase >= 0.0 && p.phase < l));
        }
    }

    #[test]
    fn observations_one_cycle_apart_share_phase() {
        let series = monthly(1900, 24);
        let eleven_years_on = ObservationSeries::new(
            Granularity::Monthly,
            series
                .iter()
                .map(|o| Observation {
                    year: o.year + 11,
                    fractional_year: o.fractional_year + 11.0,
                    ..o.clone()
                })
                .collect(),
        );

        let base = project_cycle(&series, 11).unwrap();
        let shifted = project_cycle(&eleven_years_on, 11).unwrap();
        for (a, b) in base.iter().zip(&shifted) {
            assert!((a.phase - b.phase).abs() < 1e-9);
            assert_eq!(a.cycle_index + 1, b.cycle_index);
        }
    }

    #[test]
    fn keeps_chronological_order_and_values() {
        let series = monthly(1900, 24);
        let points = project_cycle(&series, 11).unwrap();
        let values: Vec<f64> = points.iter().map(|p| p.sunspot_number).collect();
        let expected: Vec<f64> = (0..24).map(|i| i as f64).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn missing_sentinel_passes_through() {
        let mut series = monthly(1900, 3);
        series.observations[1].sunspot_number = -1.0;
        let points = project_cycle(&series, 11).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].sunspot_number, -1.0);
    }

    #[test]
    fn zero_cycle_is_invalid() {
        let err = project_cycle(&monthly(1900, 3), 0).unwrap_err();
        assert!(matches!(err, SunDashError::InvalidArgument(_)));
    }

    #[test]
    fn phase_wraps_at_cycle_boundary() {
        let (phase, index) = phase_of(1914.0, 11.0);
        assert!(phase.abs() < 1e-9);
        assert_eq!(index, 174);
    }
}
