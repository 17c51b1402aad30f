//! ds-project: scenario file formats, CSV and workbook import, templates.

pub mod columns;
pub mod csv_import;
pub mod schema;
pub mod template;
pub mod xlsx_import;

pub use columns::{COLUMNS, ColumnSpec};
pub use csv_import::{load_csv, read_first_row};
pub use schema::{LATEST_VERSION, ScenarioDef};
pub use template::{TemplateFormat, instructions, template_csv, template_yaml, write_template};
pub use xlsx_import::{PARAMETER_SHEET, load_workbook, read_sheet};

use std::path::{Path, PathBuf};

use ds_model::{ParameterSet, ValidationError};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported scenario version: {version} (latest is {})", LATEST_VERSION)]
    UnsupportedVersion { version: u32 },

    #[error("Unsupported file type: {} ({hint})", .path.display())]
    UnsupportedFormat { path: PathBuf, hint: &'static str },

    #[error("Missing columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Workbook has no '{sheet}' sheet")]
    MissingSheet { sheet: &'static str },

    #[error("Table has a header but no data rows")]
    EmptyTable,

    #[error("Invalid cell in column '{column}': '{value}' is not a number")]
    InvalidCell { column: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

/// Scenario file encodings, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
    Csv,
    Workbook,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ScenarioFormat::Yaml),
            "json" => Ok(ScenarioFormat::Json),
            "csv" => Ok(ScenarioFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(ScenarioFormat::Workbook),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.to_path_buf(),
                hint: "expected .yaml, .yml, .json, .csv or a spreadsheet workbook",
            }),
        }
    }
}

/// Load and validate a scenario from any supported file type.
pub fn load_scenario(path: &Path) -> ProjectResult<ScenarioDef> {
    match ScenarioFormat::from_path(path)? {
        ScenarioFormat::Yaml => load_yaml(path),
        ScenarioFormat::Json => load_json(path),
        ScenarioFormat::Csv => load_csv(path),
        ScenarioFormat::Workbook => load_workbook(path),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<ScenarioDef> {
    let content = std::fs::read_to_string(path)?;
    let scenario: ScenarioDef = serde_yaml::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_yaml(path: &Path, scenario: &ScenarioDef) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<ScenarioDef> {
    let content = std::fs::read_to_string(path)?;
    let scenario: ScenarioDef = serde_json::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &Path, scenario: &ScenarioDef) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Check the file version and build the validated parameter set.
pub fn validate_scenario(scenario: &ScenarioDef) -> ProjectResult<ParameterSet> {
    if scenario.version > LATEST_VERSION {
        return Err(ProjectError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    Ok(scenario.parameter_set()?)
}
