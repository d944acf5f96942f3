use super::model::ObservationSeries;

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Keep observations whose fractional year lies in `[lower_year, upper_year]`.
///
/// Bounds are integer years compared as floats, so `1900..=1900` keeps
/// `1900.0` but not `1900.5`, and drops `1899.999`. An inverted range yields
/// an empty series rather than an error. Order is preserved.
pub fn filter_by_range(series: &ObservationSeries, lower_year: i32, upper_year: i32) -> ObservationSeries {
    let lower = f64::from(lower_year);
    let upper = f64::from(upper_year);

    let observations = series
        .observations
        .iter()
        .filter(|o| o.fractional_year >= lower && o.fractional_year <= upper)
        .cloned()
        .collect();

    ObservationSeries::new(series.granularity, observations)
}
