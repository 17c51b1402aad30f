//! Chart titles for the two standard views of a run.

use ds_project::ScenarioDef;

/// Titles for the compartment chart and the beta(t) chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTitles {
    pub seir: String,
    pub beta: String,
}

/// Horizons this close to one year are labelled as a seasonal model.
const FULL_YEAR_DAYS: std::ops::RangeInclusive<u32> = 360..=370;

/// Build titles from the scenario's name, data year and horizon.
///
/// With a data year the run is labelled as starting the following year and
/// spanning `ceil(duration / 365)` years.
pub fn chart_titles(scenario: &ScenarioDef, duration_days: u32) -> ChartTitles {
    let Some(year) = scenario.year else {
        return if FULL_YEAR_DAYS.contains(&duration_days) {
            ChartTitles {
                seir: "Seasonal SEIR model".to_string(),
                beta: "Seasonal transmission rate beta(t)".to_string(),
            }
        } else {
            ChartTitles {
                seir: format!("SEIR model (~{duration_days} days)"),
                beta: format!("Transmission rate beta(t) (~{duration_days} days)"),
            }
        };
    };

    let name = scenario.display_name().unwrap_or("scenario");
    let first_year = year + 1;
    let years = duration_days.div_ceil(365).max(1) as i32;
    let range = if years == 1 {
        format!("{first_year}")
    } else {
        format!("{first_year}-{}", first_year + years - 1)
    };

    if years == 1 && FULL_YEAR_DAYS.contains(&duration_days) {
        ChartTitles {
            seir: format!("Seasonal model {name} {range}"),
            beta: format!("Transmission rate beta(t) - {name} {range}"),
        }
    } else {
        ChartTitles {
            seir: format!("SEIR model {name} {range} (~{duration_days} days)"),
            beta: format!("Transmission rate beta(t) - {name} {range} (~{duration_days} days)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_model::RawParameters;

    fn scenario(name: Option<&str>, year: Option<i32>) -> ScenarioDef {
        let mut s = ScenarioDef::new(RawParameters {
            population: 100.0,
            initial_exposed: 0.0,
            initial_infected: 1.0,
            initial_recovered: 0.0,
            incubation_days: 5.0,
            infectious_days: 7.0,
            duration_days: 365.0,
            seasonal_strength: 0.0,
            beta0: 0.4,
        });
        s.name = name.map(str::to_string);
        s.year = year;
        s
    }

    #[test]
    fn one_year_with_data_year() {
        let titles = chart_titles(&scenario(Some("Brazil"), Some(2024)), 365);
        assert_eq!(titles.seir, "Seasonal model Brazil 2025");
        assert_eq!(titles.beta, "Transmission rate beta(t) - Brazil 2025");
    }

    #[test]
    fn multi_year_range() {
        let titles = chart_titles(&scenario(Some("Brazil"), Some(2024)), 1000);
        assert_eq!(titles.seir, "SEIR model Brazil 2025-2027 (~1000 days)");
    }

    #[test]
    fn short_horizon_without_name() {
        let titles = chart_titles(&scenario(None, Some(2024)), 120);
        assert_eq!(titles.seir, "SEIR model scenario 2025 (~120 days)");
    }

    #[test]
    fn no_year() {
        assert_eq!(
            chart_titles(&scenario(Some("Lima"), None), 365).seir,
            "Seasonal SEIR model"
        );
        assert_eq!(
            chart_titles(&scenario(None, None), 90).beta,
            "Transmission rate beta(t) (~90 days)"
        );
    }
}
