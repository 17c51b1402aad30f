//! Spreadsheet column names for scenario parameters.

/// One importable column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    /// Canonical snake_case key, identical to the YAML/JSON field name
    pub key: &'static str,
    /// Descriptive header written into templates
    pub label: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl ColumnSpec {
    /// Whether a header cell names this column (key or label, case-insensitive).
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        header.eq_ignore_ascii_case(self.key) || header.eq_ignore_ascii_case(self.label)
    }
}

pub const COLUMNS: [ColumnSpec; 11] = [
    ColumnSpec {
        key: "year",
        label: "Scenario year",
        description: "Reference year of the input data (e.g. 2024); the simulation is labelled as the following year.",
        required: false,
    },
    ColumnSpec {
        key: "name",
        label: "Place name",
        description: "Place or region being simulated (e.g. 'Oaxaca de Juarez').",
        required: false,
    },
    ColumnSpec {
        key: "population",
        label: "Population (N)",
        description: "Total number of inhabitants.",
        required: true,
    },
    ColumnSpec {
        key: "initial_infected",
        label: "Initial infected (I0)",
        description: "People infectious on day 0.",
        required: true,
    },
    ColumnSpec {
        key: "initial_exposed",
        label: "Initial exposed (E0)",
        description: "People incubating (infected, not yet infectious) on day 0.",
        required: true,
    },
    ColumnSpec {
        key: "initial_recovered",
        label: "Initial recovered (R0)",
        description: "People already immune on day 0.",
        required: true,
    },
    ColumnSpec {
        key: "beta0",
        label: "Baseline transmission rate (beta0)",
        description: "Average transmission rate per day without seasonal effects.",
        required: true,
    },
    ColumnSpec {
        key: "incubation_days",
        label: "Incubation days",
        description: "Mean incubation period in days.",
        required: true,
    },
    ColumnSpec {
        key: "infectious_days",
        label: "Infectious days",
        description: "Mean infectious period in days.",
        required: true,
    },
    ColumnSpec {
        key: "duration_days",
        label: "Simulation days",
        description: "Number of days to simulate (e.g. 365 for one year).",
        required: true,
    },
    ColumnSpec {
        key: "seasonal_strength",
        label: "Seasonal strength (0 to 1)",
        description: "How strongly climate modulates transmission (0 = none, 1 = strongest).",
        required: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_match_key_or_label() {
        let population = &COLUMNS[2];
        assert!(population.matches("population"));
        assert!(population.matches(" Population (N) "));
        assert!(population.matches("POPULATION"));
        assert!(!population.matches("Population"));
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in COLUMNS.iter().enumerate() {
            for b in &COLUMNS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
