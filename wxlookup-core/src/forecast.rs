//! Daily sampling of the 3-hour forecast series.

/// The forecast endpoint reports every 3 hours.
pub const SAMPLES_PER_DAY: usize = 8;

/// Days shown in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

/// Pick one sample per day (raw indices 0, 8, 16, ...) and keep at most
/// [`FORECAST_DAYS`] of them. Short series yield fewer entries; nothing is padded.
pub fn sample_daily<T>(samples: impl IntoIterator<Item = T>) -> Vec<T> {
    samples
        .into_iter()
        .step_by(SAMPLES_PER_DAY)
        .take(FORECAST_DAYS)
        .collect()
}
