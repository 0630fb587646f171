mod reports;
mod rider;
mod runner;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use railfolio_core::{Language, Viewport};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use runner::{ScenarioResult, ScenarioRunner};
use scenario::{get_scenario, list_scenarios, scenario_keys};

#[derive(Debug, Parser)]
#[command(name = "railfolio-tester", version)]
#[command(about = "Headless scenario runner for the Railfolio journey engine")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for the whole catalog)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Narration language for every ride (en, de)
    #[arg(long, default_value = "en")]
    language: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Full document height in pixels
    #[arg(long, default_value_t = 8000.0)]
    scroll_height: f64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let language: Language = args
        .language
        .parse()
        .with_context(|| format!("invalid --language {}", args.language))?;
    let viewport = Viewport::new(args.width, args.height, args.scroll_height);
    let runner = ScenarioRunner::new(language, viewport, args.verbose);
    let scenarios = expand_scenarios(&args.scenarios);
    let results = run_scenarios(&runner, &scenarios, args.iterations);

    write_reports(&args, &results, start_time)?;

    if results.is_empty() || results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut sink = ReportSink::open(args.output.as_deref())?;
    writeln!(sink, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(sink, "  {key:<22} {description}")?;
    }
    sink.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🚆 Railfolio Journey Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in scenario_keys() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_scenarios(
    runner: &ScenarioRunner,
    scenarios: &[String],
    iterations: usize,
) -> Vec<ScenarioResult> {
    println!("{}", "🛤️  Running Journey Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut results = Vec::new();
    for key in scenarios {
        match get_scenario(key) {
            Some(scenario) => results.push(runner.run_scenario(&scenario, iterations)),
            None => eprintln!("⚠️  Unknown scenario: {}", key.yellow()),
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut sink = ReportSink::open(args.output.as_deref())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut sink, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut sink,
                    "# Railfolio Journey Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut sink, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut sink, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut sink,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    if args.report != "json" {
        writeln!(&mut sink)?;
        writeln!(&mut sink, "🏁 Total time: {:?}", start_time.elapsed())?;
    }
    sink.flush()?;
    Ok(())
}

/// Report destination: stdout unless `--output` names a file.
struct ReportSink {
    inner: Box<dyn Write>,
}

impl ReportSink {
    fn open(path: Option<&Path>) -> Result<Self> {
        let inner: Box<dyn Write> = match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("cannot write report to {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(stdout())),
        };
        Ok(Self { inner })
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
