//! Import of a scenario from the first data row of a table (CSV here, shared
//! with the workbook reader).

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use ds_core::is_whole;
use ds_model::RawParameters;

use crate::columns::COLUMNS;
use crate::schema::ScenarioDef;
use crate::{ProjectError, ProjectResult, validate_scenario};

/// Load a CSV file and validate the scenario in its first data row.
pub fn load_csv(path: &Path) -> ProjectResult<ScenarioDef> {
    let file = std::fs::File::open(path)?;
    let scenario = read_first_row(file)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Parse the first data row of a CSV table into a scenario (not yet validated).
///
/// Headers may use canonical keys or descriptive labels. Later rows are ignored.
pub fn read_first_row<R: Read>(reader: R) -> ProjectResult<ScenarioDef> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let row = match rdr.records().next() {
        Some(row) => Some(row?.iter().map(str::to_string).collect::<Vec<_>>()),
        None => None,
    };
    scenario_from_table(&headers, row.as_deref())
}

/// Build a scenario from a header row and the first data row of any table.
pub(crate) fn scenario_from_table(
    headers: &[String],
    row: Option<&[String]>,
) -> ProjectResult<ScenarioDef> {
    let mut index: HashMap<&'static str, usize> = HashMap::new();
    for (pos, header) in headers.iter().enumerate() {
        if let Some(spec) = COLUMNS.iter().find(|spec| spec.matches(header)) {
            index.entry(spec.key).or_insert(pos);
        }
    }

    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|spec| spec.required && !index.contains_key(spec.key))
        .map(|spec| spec.label.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ProjectError::MissingColumns { missing });
    }

    let cells = Row {
        cells: row.ok_or(ProjectError::EmptyTable)?,
        index: &index,
    };

    let parameters = RawParameters {
        population: cells.number("population")?,
        initial_exposed: cells.number("initial_exposed")?,
        initial_infected: cells.number("initial_infected")?,
        initial_recovered: cells.number("initial_recovered")?,
        incubation_days: cells.number("incubation_days")?,
        infectious_days: cells.number("infectious_days")?,
        duration_days: cells.number("duration_days")?,
        seasonal_strength: cells.number("seasonal_strength")?,
        beta0: cells.number("beta0")?,
    };

    let mut scenario = ScenarioDef::new(parameters);
    scenario.name = cells.text("name").map(str::to_string);
    scenario.year = cells.year()?;
    Ok(scenario)
}

struct Row<'a> {
    cells: &'a [String],
    index: &'a HashMap<&'static str, usize>,
}

impl Row<'_> {
    /// Non-empty cell content for a column, if the column exists.
    fn text(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .and_then(|&pos| self.cells.get(pos))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    fn number(&self, key: &str) -> ProjectResult<f64> {
        let cell = self.text(key).unwrap_or_default();
        cell.parse::<f64>().map_err(|_| ProjectError::InvalidCell {
            column: key.to_string(),
            value: cell.to_string(),
        })
    }

    /// Spreadsheets often store years as reals ("2024.0").
    fn year(&self) -> ProjectResult<Option<i32>> {
        let Some(cell) = self.text("year") else {
            return Ok(None);
        };
        let invalid = || ProjectError::InvalidCell {
            column: "year".to_string(),
            value: cell.to_string(),
        };
        let value: f64 = cell.parse().map_err(|_| invalid())?;
        if !is_whole(value) || value.abs() > f64::from(i32::MAX) {
            return Err(invalid());
        }
        Ok(Some(value as i32))
    }
}
