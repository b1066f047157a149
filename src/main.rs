use anyhow::{Context, Result};
use clap::Parser;
use hyposim::cli::{Cli, CsvContent, OutputFormat};
use hyposim::config::SimulationConfig;
use hyposim::csv_output::{CsvHistogramOutput, CsvTableOutput};
use hyposim::html_output::HtmlOutput;
use hyposim::json_output::JsonOutput;
use hyposim::report::SimulationReport;
use hyposim::session::SimulationSession;
use hyposim::sweep::run_sweep;
use hyposim::text_output::TextOutput;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file if given, then apply CLI flags on top
fn load_config(args: &Cli) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    args.apply_to(&mut config);
    Ok(config)
}

/// Render the report in the requested format
fn render(args: &Cli, report: &SimulationReport) -> Result<String> {
    let output = match args.format {
        OutputFormat::Text => {
            let rows = if args.table { args.table_rows } else { 0 };
            TextOutput::new(args.histogram, rows).render(report)
        }
        OutputFormat::Json => JsonOutput::from_report(report, args.histogram).to_json()?,
        OutputFormat::Csv => match args.csv_content {
            CsvContent::Table => {
                let mut csv = CsvTableOutput::new();
                for row in report.rows.iter().flatten() {
                    csv.add_row(*row);
                }
                csv.to_csv()
            }
            CsvContent::Histogram => {
                let mut csv = CsvHistogramOutput::new();
                for hist in &report.histograms {
                    csv.add_histogram(hist);
                }
                csv.to_csv()
            }
        },
        OutputFormat::Html => HtmlOutput::new(args.histogram).to_html(report),
    };
    Ok(output)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let params = config.validate().context("Invalid simulation settings")?;

    // The first k draws do not depend on the pool size, so a one-shot run
    // only needs as many outcomes as the largest count it reports
    let capacity = args
        .sweep
        .iter()
        .map(|&n| hyposim::config::clamp_simulation_size(n))
        .chain(std::iter::once(params.simulation_size))
        .max()
        .unwrap_or(params.simulation_size);

    let mut session = SimulationSession::with_capacity(params, capacity)
        .context("Failed to draw simulated samples")?;
    tracing::info!(
        sample_size = params.sample_size,
        simulations = session.selected().len(),
        "simulation ready"
    );

    let sweep = if args.sweep.is_empty() {
        None
    } else {
        Some(run_sweep(&mut session, &args.sweep)?)
    };

    let mut report = session.report(&config.display, args.wants_table());
    report.sweep = sweep;

    print!("{}", render(&args, &report)?);

    Ok(())
}
