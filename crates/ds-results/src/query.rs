//! Query helpers for extracting and exporting series data.

use std::io::Write;
use std::str::FromStr;

use ds_model::{DayRecord, TimeSeries};
use serde::Serialize;

use crate::{ResultsError, ResultsResult};

/// A recorded per-day quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variable {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
    Beta,
}

impl Variable {
    pub const ALL: [Variable; 5] = [
        Variable::Susceptible,
        Variable::Exposed,
        Variable::Infected,
        Variable::Recovered,
        Variable::Beta,
    ];

    /// Column name used in exports.
    pub fn key(&self) -> &'static str {
        match self {
            Variable::Susceptible => "s",
            Variable::Exposed => "e",
            Variable::Infected => "i",
            Variable::Recovered => "r",
            Variable::Beta => "beta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Susceptible => "Susceptible (S)",
            Variable::Exposed => "Exposed (E)",
            Variable::Infected => "Infected (I)",
            Variable::Recovered => "Recovered (R)",
            Variable::Beta => "Transmission rate beta(t) (1/day)",
        }
    }

    pub fn value(&self, record: &DayRecord) -> f64 {
        match self {
            Variable::Susceptible => record.s,
            Variable::Exposed => record.e,
            Variable::Infected => record.i,
            Variable::Recovered => record.r,
            Variable::Beta => record.beta,
        }
    }
}

impl FromStr for Variable {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "susceptible" => Ok(Variable::Susceptible),
            "e" | "exposed" => Ok(Variable::Exposed),
            "i" | "infected" | "infectious" => Ok(Variable::Infected),
            "r" | "recovered" => Ok(Variable::Recovered),
            "beta" | "beta_t" => Ok(Variable::Beta),
            _ => Err(ResultsError::UnknownVariable {
                name: s.to_string(),
            }),
        }
    }
}

/// Extract `(day, value)` pairs for one variable.
pub fn extract_series(series: &TimeSeries, variable: Variable) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|rec| (rec.day as f64, variable.value(rec)))
        .collect()
}

/// Write every column (`day,s,e,i,r,beta`) as CSV.
pub fn write_series_csv<W: Write>(series: &TimeSeries, writer: W) -> ResultsResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in series {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct VariableRow {
    day: usize,
    value: f64,
}

/// Write a single variable as `day,value` CSV.
pub fn write_variable_csv<W: Write>(
    series: &TimeSeries,
    variable: Variable,
    writer: W,
) -> ResultsResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in series {
        csv.serialize(VariableRow {
            day: record.day,
            value: variable.value(record),
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_model::SeirState;

    fn tiny_series() -> TimeSeries {
        TimeSeries::new(
            10.0,
            0.2,
            vec![
                DayRecord::new(0, &SeirState::new(9.0, 0.0, 1.0, 0.0), 0.5),
                DayRecord::new(1, &SeirState::new(8.5, 0.5, 0.75, 0.25), 0.25),
            ],
        )
    }

    #[test]
    fn parse_variables() {
        assert_eq!("I".parse::<Variable>().unwrap(), Variable::Infected);
        assert_eq!("beta".parse::<Variable>().unwrap(), Variable::Beta);
        assert_eq!(" susceptible ".parse::<Variable>().unwrap(), Variable::Susceptible);
        assert!("pressure".parse::<Variable>().is_err());
        for v in Variable::ALL {
            assert_eq!(v.key().parse::<Variable>().unwrap(), v);
        }
    }

    #[test]
    fn extract_pairs() {
        let pairs = extract_series(&tiny_series(), Variable::Recovered);
        assert_eq!(pairs, vec![(0.0, 0.0), (1.0, 0.25)]);
    }

    #[test]
    fn full_csv_has_header_and_rows() {
        let mut out = Vec::new();
        write_series_csv(&tiny_series(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "day,s,e,i,r,beta");
        assert_eq!(lines[1], "0,9.0,0.0,1.0,0.0,0.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn variable_csv() {
        let mut out = Vec::new();
        write_variable_csv(&tiny_series(), Variable::Beta, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "day,value\n0,0.5\n1,0.25\n");
    }
}
