//! Import of a scenario from the parameter sheet of a spreadsheet workbook.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::csv_import::scenario_from_table;
use crate::schema::ScenarioDef;
use crate::{ProjectError, ProjectResult, validate_scenario};

/// Sheet holding the header row and the parameter row.
pub const PARAMETER_SHEET: &str = "Datos";

/// Load a workbook (.xlsx, .xlsm, .xls, .ods) and validate the scenario in
/// the first data row of its parameter sheet.
pub fn load_workbook(path: &Path) -> ProjectResult<ScenarioDef> {
    let mut workbook = open_workbook_auto(path)?;
    if !workbook
        .sheet_names()
        .iter()
        .any(|name| name == PARAMETER_SHEET)
    {
        return Err(ProjectError::MissingSheet {
            sheet: PARAMETER_SHEET,
        });
    }
    let range = workbook.worksheet_range(PARAMETER_SHEET)?;
    let scenario = read_sheet(&range)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Parse the first row of a sheet as headers and the second as parameters.
pub fn read_sheet(range: &Range<Data>) -> ProjectResult<ScenarioDef> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();
    let first = rows.next();
    scenario_from_table(&headers, first.as_deref())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::COLUMNS;

    fn sheet(values: &[f64], name: &str) -> Range<Data> {
        let mut range = Range::new((0, 0), (1, COLUMNS.len() as u32 - 1));
        for (col, spec) in COLUMNS.iter().enumerate() {
            range.set_value((0, col as u32), Data::String(spec.label.to_string()));
        }
        range.set_value((1, 0), Data::Float(2024.0));
        range.set_value((1, 1), Data::String(format!(" {name} ")));
        for (offset, value) in values.iter().enumerate() {
            range.set_value((1, offset as u32 + 2), Data::Float(*value));
        }
        range
    }

    #[test]
    fn reads_numeric_cells_from_the_parameter_row() {
        // population, I0, E0, R0, beta0, incubation, infectious, days, strength
        let range = sheet(&[1000.0, 1.0, 0.0, 0.0, 0.4, 5.0, 7.0, 365.0, 0.5], "Cali");
        let scenario = read_sheet(&range).unwrap();
        assert_eq!(scenario.name.as_deref(), Some("Cali"));
        assert_eq!(scenario.year, Some(2024));
        assert_eq!(scenario.parameters.population, 1000.0);
        assert_eq!(scenario.parameters.beta0, 0.4);
        assert_eq!(scenario.parameters.duration_days, 365.0);
        assert!(validate_scenario(&scenario).is_ok());
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let mut range = Range::new((0, 0), (0, COLUMNS.len() as u32 - 1));
        for (col, spec) in COLUMNS.iter().enumerate() {
            range.set_value((0, col as u32), Data::String(spec.key.to_string()));
        }
        assert!(matches!(read_sheet(&range), Err(ProjectError::EmptyTable)));
    }

    #[test]
    fn blank_numeric_cell_is_reported() {
        let mut range = sheet(&[1000.0, 1.0, 0.0, 0.0, 0.4, 5.0, 7.0, 365.0, 0.5], "Cali");
        range.set_value((1, 6), Data::Empty);
        match read_sheet(&range) {
            Err(ProjectError::InvalidCell { column, .. }) => assert_eq!(column, "beta0"),
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }
}
