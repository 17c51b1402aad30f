//! Scenario schema definitions.

use chrono::NaiveDate;
use ds_core::MonthCalendar;
use ds_model::{ParameterSet, RawParameters, ValidationError};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

fn latest_version() -> u32 {
    LATEST_VERSION
}

/// One simulation scenario: labelling metadata plus raw model parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    #[serde(default = "latest_version")]
    pub version: u32,
    /// Place or scenario name, used in chart titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Year the input data describes; the simulation is labelled as the following year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Calendar date of day 0. Switches peak-month reporting to calendar months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub parameters: RawParameters,
}

impl ScenarioDef {
    pub fn new(parameters: RawParameters) -> Self {
        Self {
            version: LATEST_VERSION,
            name: None,
            year: None,
            start_date: None,
            parameters,
        }
    }

    pub fn parameter_set(&self) -> Result<ParameterSet, ValidationError> {
        ParameterSet::new(&self.parameters)
    }

    pub fn calendar(&self) -> MonthCalendar {
        MonthCalendar::from_start_date(self.start_date)
    }

    /// Trimmed name, if one was given and is not blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
parameters:
  population: 500
  initial_infected: 2
  incubation_days: 5
  infectious_days: 7
  duration_days: 90
  beta0: 0.3
";

    #[test]
    fn optional_fields_default() {
        let scenario: ScenarioDef = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(scenario.version, LATEST_VERSION);
        assert_eq!(scenario.name, None);
        assert_eq!(scenario.parameters.initial_exposed, 0.0);
        assert_eq!(scenario.parameters.initial_recovered, 0.0);
        assert_eq!(scenario.parameters.seasonal_strength, 0.0);
        assert_eq!(scenario.calendar(), MonthCalendar::ThirtyDay);
        assert!(scenario.parameter_set().is_ok());
    }

    #[test]
    fn start_date_selects_calendar() {
        let yaml = format!("start_date: 2025-03-01\n{MINIMAL}");
        let scenario: ScenarioDef = serde_yaml::from_str(&yaml).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(scenario.calendar(), MonthCalendar::FromDate(date));
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut scenario: ScenarioDef = serde_yaml::from_str(MINIMAL).unwrap();
        scenario.name = Some("   ".to_string());
        assert_eq!(scenario.display_name(), None);
        scenario.name = Some(" Oaxaca ".to_string());
        assert_eq!(scenario.display_name(), Some("Oaxaca"));
    }
}
