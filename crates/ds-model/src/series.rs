//! Per-day simulation output.

use serde::{Deserialize, Serialize};

use crate::state::SeirState;

/// One simulated day: the state at the start of the day and the beta used for it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: usize,
    pub s: f64,
    pub e: f64,
    pub i: f64,
    pub r: f64,
    pub beta: f64,
}

impl DayRecord {
    pub fn new(day: usize, state: &SeirState, beta: f64) -> Self {
        Self {
            day,
            s: state.s,
            e: state.e,
            i: state.i,
            r: state.r,
            beta,
        }
    }

    pub fn state(&self) -> SeirState {
        SeirState::new(self.s, self.e, self.i, self.r)
    }
}

/// Completed run output, one record per day in day order.
///
/// Carries the population and E->I rate the run used so derived summaries
/// need nothing else.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    population: f64,
    sigma: f64,
    records: Vec<DayRecord>,
}

impl TimeSeries {
    pub fn new(population: f64, sigma: f64, records: Vec<DayRecord>) -> Self {
        Self {
            population,
            sigma,
            records,
        }
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&DayRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&DayRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a DayRecord;
    type IntoIter = std::slice::Iter<'a, DayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
