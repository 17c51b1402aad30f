//! Epidemiological summary of a completed run.

use ds_core::{MonthCalendar, month_name};
use ds_model::TimeSeries;
use serde::Serialize;

use crate::{ResultsError, ResultsResult};

/// Headline numbers derived once from a complete time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// First day on which I reaches its maximum
    pub peak_day: usize,
    pub peak_infected: f64,
    /// 1-based month of the peak day
    pub peak_month: u32,
    pub peak_month_name: &'static str,
    /// round(S(0) - S(final)): everyone who left the susceptible pool
    pub total_estimated_cases: u64,
    /// `total_estimated_cases` as a share of the population
    pub attack_rate: f64,
    /// Trapezoidal integral of sigma * E(t); lags `total_estimated_cases` by
    /// whoever is still incubating at the end
    pub symptomatic_onsets: f64,
    pub final_infected: f64,
    pub final_recovered: f64,
}

/// Summarize a time series. Fails with `EmptySeries` on an empty series.
pub fn summarize(series: &TimeSeries, calendar: &MonthCalendar) -> ResultsResult<Summary> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ResultsError::EmptySeries),
    };

    let mut peak = first;
    for rec in series {
        if rec.i > peak.i {
            peak = rec;
        }
    }

    let peak_month = calendar.month_of_day(peak.day)?;

    let onsets: f64 = series
        .records()
        .windows(2)
        .map(|pair| 0.5 * (pair[0].e + pair[1].e))
        .sum::<f64>()
        * series.sigma();

    let total_estimated_cases = (first.s - last.s).max(0.0).round() as u64;
    let attack_rate = if series.population() > 0.0 {
        total_estimated_cases as f64 / series.population()
    } else {
        0.0
    };

    Ok(Summary {
        peak_day: peak.day,
        peak_infected: peak.i,
        peak_month,
        peak_month_name: month_name(peak_month)?,
        total_estimated_cases,
        attack_rate,
        symptomatic_onsets: onsets,
        final_infected: last.i,
        final_recovered: last.r,
    })
}
