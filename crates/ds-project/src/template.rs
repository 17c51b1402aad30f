//! Blank scenario templates for users to fill in.

use std::path::Path;

use crate::columns::COLUMNS;
use crate::schema::LATEST_VERSION;
use crate::{ProjectError, ProjectResult, ScenarioFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateFormat {
    Csv,
    Yaml,
}

/// Header row with descriptive labels, ready for the first data row.
pub fn template_csv() -> ProjectResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS.iter().map(|spec| spec.label))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Commented YAML scenario with example values.
pub fn template_yaml() -> String {
    let mut out = format!(
        "# Dengue SEIR scenario\n\
         version: {LATEST_VERSION}\n\
         # {name_help}\n\
         name: \"\"\n\
         # {year_help}\n\
         # year: 2024\n\
         # Calendar date of day 0; reports the peak month by calendar instead of 30-day months.\n\
         # start_date: 2025-01-01\n\
         parameters:\n",
        name_help = COLUMNS[1].description,
        year_help = COLUMNS[0].description,
    );
    for spec in COLUMNS.iter().filter(|spec| spec.required) {
        out.push_str(&format!(
            "  # {}\n  {}: {}\n",
            spec.description,
            spec.key,
            example_value(spec.key)
        ));
    }
    out
}

/// Plain-text field reference printed alongside CSV templates.
pub fn instructions() -> String {
    let mut out: String = COLUMNS
        .iter()
        .map(|spec| format!("{:<36} {}\n", spec.label, spec.description))
        .collect();
    out.push_str("\nOnly the first data row is read; any further rows are ignored.\n");
    out
}

/// Write a template in the requested format.
pub fn write_template(path: &Path, format: TemplateFormat) -> ProjectResult<()> {
    let content = match format {
        TemplateFormat::Csv => template_csv()?,
        TemplateFormat::Yaml => template_yaml(),
    };
    std::fs::write(path, content)?;
    Ok(())
}

impl TemplateFormat {
    /// Pick the template format from a file extension.
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        match ScenarioFormat::from_path(path)? {
            ScenarioFormat::Csv => Ok(TemplateFormat::Csv),
            ScenarioFormat::Yaml | ScenarioFormat::Json => Ok(TemplateFormat::Yaml),
            ScenarioFormat::Workbook => Err(ProjectError::UnsupportedFormat {
                path: path.to_path_buf(),
                hint: "templates are written as .csv or .yaml",
            }),
        }
    }
}

fn example_value(key: &str) -> &'static str {
    match key {
        "population" => "1000",
        "initial_infected" => "1",
        "initial_exposed" => "0",
        "initial_recovered" => "0",
        "beta0" => "0.4",
        "incubation_days" => "5",
        "infectious_days" => "7",
        "duration_days" => "365",
        "seasonal_strength" => "0.5",
        _ => "0",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_import::read_first_row;
    use crate::schema::ScenarioDef;
    use crate::validate_scenario;

    #[test]
    fn csv_template_is_a_header_only_table() {
        let header = template_csv().unwrap();
        assert!(header.starts_with("Scenario year,Place name,Population (N)"));
        assert_eq!(header.lines().count(), 1);
        assert!(matches!(
            read_first_row(header.as_bytes()),
            Err(ProjectError::EmptyTable)
        ));
    }

    #[test]
    fn filled_csv_template_imports() {
        let mut table = template_csv().unwrap();
        table.push_str("2024,Somewhere,1000,1,0,0,0.4,5,7,365,0.5\n");
        let scenario = read_first_row(table.as_bytes()).unwrap();
        assert!(validate_scenario(&scenario).is_ok());
    }

    #[test]
    fn yaml_template_parses_and_validates() {
        let scenario: ScenarioDef = serde_yaml::from_str(&template_yaml()).unwrap();
        assert_eq!(scenario.display_name(), None);
        let params = validate_scenario(&scenario).unwrap();
        assert_eq!(params.duration_days(), 365);
    }

    #[test]
    fn yaml_template_documents_every_parameter() {
        let text = template_yaml();
        let lines: Vec<&str> = text.lines().collect();
        for spec in COLUMNS.iter().filter(|spec| spec.required) {
            let pos = lines
                .iter()
                .position(|line| line.starts_with(&format!("  {}: ", spec.key)))
                .unwrap_or_else(|| panic!("no line for {}", spec.key));
            assert_eq!(lines[pos - 1], format!("  # {}", spec.description));
        }
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn instructions_cover_every_column() {
        let text = instructions();
        for spec in &COLUMNS {
            assert!(text.contains(spec.label));
        }
    }
}
