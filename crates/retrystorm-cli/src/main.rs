use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use retrystorm_analysis::reporters::create_reporter;
use retrystorm_analysis::{analyze, load_topology_file, AnalysisOptions, Outcome};
use retrystorm_core::config::{CliOverrides, RetryStormConfig};
use retrystorm_core::constants::EXIT_REPORT_ERROR;
use retrystorm_core::errors::{ConfigError, ErrorCode};
use retrystorm_core::tracing::init_tracing;

#[derive(Parser)]
#[command(name = "retrystorm")]
#[command(about = "Detect retry storms, timeout inversions, and circuit breaker gaps", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to topology YAML file
    topology: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Retry amplification threshold (default: 10)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    threshold: Option<u64>,

    /// Exit 1 on any finding, not just errors
    #[arg(long)]
    strict: bool,

    /// Stop after enumerating this many call paths
    #[arg(long)]
    max_paths: Option<usize>,

    /// Never follow a call path beyond this many services
    #[arg(long)]
    max_path_length: Option<usize>,

    /// Config file (default: retrystorm.toml in the current directory, if present)
    #[arg(long, env = "RETRYSTORM_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors in text output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Sarif,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Sarif => "sarif",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(outcome) => exit_code(outcome.exit_code()),
        Err(err) => {
            match &err {
                RunError::Config(e) => eprintln!("Error loading config: {}", e.diagnostic()),
                RunError::Report(message) => eprintln!("Error rendering report: {message}"),
            }
            exit_code(err.exit_code())
        }
    }
}

#[derive(Debug)]
enum RunError {
    Config(ConfigError),
    Report(String),
}

impl RunError {
    /// Bad input exits 2; a rendering failure is the tool's own fault and exits 3.
    fn exit_code(&self) -> i32 {
        match self {
            Self::Config(e) => e.exit_code(),
            Self::Report(_) => EXIT_REPORT_ERROR,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

fn run(cli: &Cli) -> Result<Outcome, RunError> {
    let overrides = CliOverrides {
        amplification_threshold: cli.threshold,
        max_paths: cli.max_paths,
        max_path_length: cli.max_path_length,
        strict: cli.strict.then_some(true),
    };
    let config = match &cli.config {
        Some(path) => RetryStormConfig::load_file(path, Some(&overrides))?,
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            RetryStormConfig::load(&cwd, Some(&overrides))?
        }
    };

    let topology = load_topology_file(&cli.topology)?;
    let options = AnalysisOptions::from_config(&config.analysis);
    let analysis = analyze(&topology, &options)?;
    if analysis.stats.paths_truncated {
        tracing::warn!(
            paths = analysis.stats.paths_enumerated,
            "amplification analysis incomplete: path cap reached"
        );
    }

    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let artifact = artifact_uri(&cli.topology);
    let reporter = create_reporter(cli.format.name(), &artifact, use_color)
        .ok_or_else(|| RunError::Report(format!("unknown format {}", cli.format.name())))?;
    let rendered = reporter.generate(&analysis.report).map_err(RunError::Report)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(analysis.report.summary.outcome(config.gate.effective_strict()))
}

/// SARIF URIs use forward slashes regardless of platform.
fn artifact_uri(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
