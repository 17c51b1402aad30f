use clap::{Parser, Subcommand, ValueEnum};
use ds_app::{
    AppError, AppResult, RunProgressEvent, RunRequest, RunResponse, RunStage, RunTimingSummary,
    run_service, sweep_seasonal_strength,
};
use ds_model::RawParameters;
use ds_project::{ScenarioDef, TemplateFormat};
use ds_results::{Summary, Variable, write_series_csv, write_variable_csv};
use ds_sim::{IntegratorType, SeirOptions};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "denguesim")]
#[command(about = "Seasonal SEIR dengue outbreak simulator", long_about = None)]
struct Cli {
    /// Log debug output from the simulation (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a scenario file and its parameters
    Validate {
        /// Scenario file (.yaml, .json, .csv or a workbook with a "Datos" sheet)
        scenario_path: PathBuf,
    },
    /// Run a scenario file and print its summary
    Run {
        /// Scenario file (.yaml, .json, .csv or a workbook with a "Datos" sheet)
        scenario_path: PathBuf,
        #[command(flatten)]
        numerics: NumericArgs,
        /// Write the full daily series (day,s,e,i,r,beta) to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run a scenario given entirely on the command line
    Simulate {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        numerics: NumericArgs,
        /// Write the full daily series to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a blank scenario template (.csv or .yaml)
    Template {
        /// Output path; the extension selects the format
        output: PathBuf,
    },
    /// Export one variable of a run as day,value CSV
    ExportSeries {
        /// Scenario file (.yaml, .json, .csv or a workbook with a "Datos" sheet)
        scenario_path: PathBuf,
        /// Variable name (s, e, i, r, beta)
        variable: String,
        #[command(flatten)]
        numerics: NumericArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare summaries across seasonal strengths, run in parallel
    Sweep {
        /// Scenario file (.yaml, .json, .csv or a workbook with a "Datos" sheet)
        scenario_path: PathBuf,
        /// Comma-separated seasonal strengths in [0, 1]
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.25, 0.5, 0.75, 1.0])]
        strengths: Vec<f64>,
        #[command(flatten)]
        numerics: NumericArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Rk4,
    Euler,
}

#[derive(clap::Args)]
struct NumericArgs {
    /// Integration scheme
    #[arg(long, value_enum, default_value_t = IntegratorArg::Rk4)]
    integrator: IntegratorArg,
    /// Integrator substeps per day
    #[arg(long, default_value_t = 1)]
    substeps: usize,
}

impl NumericArgs {
    fn options(&self) -> SeirOptions {
        SeirOptions {
            integrator: match self.integrator {
                IntegratorArg::Rk4 => IntegratorType::RK4,
                IntegratorArg::Euler => IntegratorType::ForwardEuler,
            },
            substeps: self.substeps,
            ..SeirOptions::default()
        }
    }
}

#[derive(clap::Args)]
struct ParamArgs {
    /// Place name for chart titles
    #[arg(long)]
    name: Option<String>,
    /// Year the input data describes
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    population: f64,
    #[arg(long, default_value_t = 0.0)]
    initial_exposed: f64,
    #[arg(long)]
    initial_infected: f64,
    #[arg(long, default_value_t = 0.0)]
    initial_recovered: f64,
    #[arg(long)]
    incubation_days: f64,
    #[arg(long)]
    infectious_days: f64,
    #[arg(long)]
    duration_days: f64,
    #[arg(long, default_value_t = 0.0)]
    seasonal_strength: f64,
    #[arg(long)]
    beta0: f64,
}

impl ParamArgs {
    fn scenario(&self) -> ScenarioDef {
        let mut scenario = ScenarioDef::new(RawParameters {
            population: self.population,
            initial_exposed: self.initial_exposed,
            initial_infected: self.initial_infected,
            initial_recovered: self.initial_recovered,
            incubation_days: self.incubation_days,
            infectious_days: self.infectious_days,
            duration_days: self.duration_days,
            seasonal_strength: self.seasonal_strength,
            beta0: self.beta0,
        });
        scenario.name = self.name.clone();
        scenario.year = self.year;
        scenario
    }
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            numerics,
            output,
            json,
        } => {
            let scenario = ds_project::load_scenario(&scenario_path)?;
            cmd_run(&scenario, numerics.options(), output.as_deref(), json)
        }
        Commands::Simulate {
            params,
            numerics,
            output,
        } => cmd_run(&params.scenario(), numerics.options(), output.as_deref(), false),
        Commands::Template { output } => cmd_template(&output),
        Commands::ExportSeries {
            scenario_path,
            variable,
            numerics,
            output,
        } => cmd_export_series(
            &scenario_path,
            &variable,
            numerics.options(),
            output.as_deref(),
        ),
        Commands::Sweep {
            scenario_path,
            strengths,
            numerics,
        } => cmd_sweep(&scenario_path, &strengths, numerics.options()),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = ds_project::load_scenario(scenario_path)?;
    let params = ds_project::validate_scenario(&scenario)?;
    println!("✓ Scenario is valid");
    if let Some(name) = scenario.display_name() {
        println!("  Name: {}", name);
    }
    println!(
        "  N = {}, E0 = {}, I0 = {}, R0 = {}, S0 = {}",
        params.population(),
        params.initial_exposed(),
        params.initial_infected(),
        params.initial_recovered(),
        params.initial_susceptible()
    );
    println!(
        "  beta0 = {}, s = {}, sigma = {:.4}, gamma = {:.4}, {} days",
        params.beta0(),
        params.seasonal_strength(),
        params.sigma(),
        params.gamma(),
        params.duration_days()
    );
    Ok(())
}

fn cmd_run(
    scenario: &ScenarioDef,
    options: SeirOptions,
    output: Option<&Path>,
    json: bool,
) -> AppResult<()> {
    let response = run_with_progress_bar(scenario, options, !json)?;

    if json {
        let text = serde_json::to_string_pretty(&response.summary)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        println!("{}", text);
    } else {
        println!("✓ {}", response.titles.seir);
        print_summary(&response.summary);
        print_timing_summary(&response.timing);
    }

    if let Some(path) = output {
        let file = BufWriter::new(File::create(path)?);
        write_series_csv(&response.series, file)?;
        if !json {
            println!("✓ Wrote {} days to {}", response.series.len(), path.display());
        }
    }
    Ok(())
}

fn run_with_progress_bar(
    scenario: &ScenarioDef,
    options: SeirOptions,
    show_progress: bool,
) -> AppResult<RunResponse> {
    let request = RunRequest { scenario, options };
    if !show_progress {
        return run_service::run_scenario(&request);
    }

    let mut last_emit = Instant::now();
    let response = run_service::run_scenario_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            if event.stage != RunStage::Simulating || last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(&event);
                last_emit = Instant::now();
            }
            ControlFlow::Continue(())
        }),
    );
    clear_progress_line();
    response
}

fn cmd_template(output: &Path) -> AppResult<()> {
    let format = TemplateFormat::from_path(output)?;
    ds_project::write_template(output, format)?;
    println!("✓ Template written to {}", output.display());
    println!();
    println!("{}", ds_project::instructions());
    Ok(())
}

fn cmd_export_series(
    scenario_path: &Path,
    variable: &str,
    options: SeirOptions,
    output: Option<&Path>,
) -> AppResult<()> {
    let variable: Variable = variable.parse()?;
    let scenario = ds_project::load_scenario(scenario_path)?;
    let response = run_service::run_scenario(&RunRequest {
        scenario: &scenario,
        options,
    })?;

    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            write_variable_csv(&response.series, variable, file)?;
            println!("✓ Exported {} to {}", variable.label(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_variable_csv(&response.series, variable, stdout.lock())?;
        }
    }
    Ok(())
}

fn cmd_sweep(scenario_path: &Path, strengths: &[f64], options: SeirOptions) -> AppResult<()> {
    if strengths.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one seasonal strength is required".to_string(),
        ));
    }
    let scenario = ds_project::load_scenario(scenario_path)?;
    let started = Instant::now();
    let points = sweep_seasonal_strength(&scenario, strengths, &options)?;

    println!(
        "{:>8}  {:>8}  {:>10}  {:<10}  {:>12}",
        "strength", "peak day", "peak I", "month", "total cases"
    );
    for point in &points {
        println!(
            "{:>8.3}  {:>8}  {:>10.1}  {:<10}  {:>12}",
            point.seasonal_strength,
            point.summary.peak_day,
            point.summary.peak_infected,
            point.summary.peak_month_name,
            point.summary.total_estimated_cases
        );
    }
    println!(
        "\n✓ {} runs in {:.3}s",
        points.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("  Peak day:              {}", summary.peak_day);
    println!("  Peak infected:         {:.1}", summary.peak_infected);
    println!(
        "  Peak month:            {} ({})",
        summary.peak_month, summary.peak_month_name
    );
    println!("  Total estimated cases: {}", summary.total_estimated_cases);
    println!("  Attack rate:           {:.1}%", summary.attack_rate * 100.0);
    println!("  Symptomatic onsets:    {:.1}", summary.symptomatic_onsets);
    println!(
        "  Final I / R:           {:.1} / {:.1}",
        summary.final_infected, summary.final_recovered
    );
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("\nTiming summary:");
    println!("  Validate:  {:.3}s", timing.validate_time_s);
    println!("  Simulate:  {:.3}s", timing.simulate_time_s);
    println!("  Summarize: {:.3}s", timing.summarize_time_s);
    println!("  Total:     {:.3}s", timing.total_time_s);
    println!(
        "  Integrator steps: {}  cutbacks: {}  repairs: {}",
        timing.stats.integrator_steps, timing.stats.cutbacks, timing.stats.repairs
    );
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, event.day, event.duration_days) {
        (RunStage::Simulating, Some(day), Some(duration)) => {
            let width = 28usize;
            let filled = ((event.fraction_complete * width as f64).round() as usize).min(width);
            print!(
                "\r[{}{}] {:>6.2}%  day={}/{}  elapsed={:.1}s",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled)),
                event.fraction_complete * 100.0,
                day,
                duration,
                event.elapsed_wall_s
            );
        }
        _ => {
            print!(
                "\r{}... elapsed={:.1}s",
                event.stage.label(),
                event.elapsed_wall_s
            );
        }
    }
    let _ = io::stdout().flush();
}
