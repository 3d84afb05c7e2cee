use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use commando_core::{ParseOutcome, SpecDocument, SwitchSpec, Values, parse, render_help, validate_spec};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for resolved values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "commando")]
#[command(about = "Parse command lines against declarative switch specs")]
struct Cli {
    /// Emit debug logs on stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments against a spec and print the resolved values.
    Run(RunArgs),
    /// Print the help text generated from a spec.
    Render(SpecArgs),
    /// Check one or more spec files for structural problems.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct SpecArgs {
    /// Spec document path (.yaml, .yml or .json).
    #[arg(long)]
    spec: PathBuf,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Spec document path (.yaml, .yml or .json).
    #[arg(long)]
    spec: PathBuf,
    /// Output format for resolved values.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse, after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Spec document paths.
    #[arg(long = "spec", required = true)]
    specs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Run(args) => run_parse(args),
        Command::Render(args) => run_render(args),
        Command::Validate(args) => run_validate(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_spec(path: &Path) -> Result<SwitchSpec, String> {
    let doc = SpecDocument::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    doc.into_spec()
        .map_err(|err| format!("Invalid spec '{}': {err}", path.display()))
}

fn run_parse(args: RunArgs) -> Result<ExitCode, String> {
    let spec = load_spec(&args.spec)?;
    debug!(spec = %args.spec.display(), args = args.args.len(), "parsing arguments");

    match parse(&spec, args.args.as_slice()) {
        ParseOutcome::Help { message } => {
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
        ParseOutcome::Ok { values } => {
            println!("{}", format_values(&values, args.format)?);
            Ok(ExitCode::SUCCESS)
        }
        ParseOutcome::Error { message } => {
            eprintln!("{message}");
            Ok(ExitCode::from(2))
        }
    }
}

fn format_values(values: &Values, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(values)
            .map_err(|err| format!("Failed to serialize values: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(values)
            .map(|raw| raw.trim_end().to_string())
            .map_err(|err| format!("Failed to serialize values: {err}")),
    }
}

fn run_render(args: SpecArgs) -> Result<ExitCode, String> {
    let spec = load_spec(&args.spec)?;
    println!("{}", render_help(&spec));
    Ok(ExitCode::SUCCESS)
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode, String> {
    let mut failed = 0usize;

    for path in &args.specs {
        let spec = load_spec(path)?;
        let issues = validate_spec(&spec);
        if issues.is_empty() {
            continue;
        }
        failed += 1;
        for issue in issues {
            eprintln!("{}: {issue}", path.display());
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} spec file(s) failed validation.", args.specs.len());
        return Ok(ExitCode::from(1));
    }

    println!("Validated {} spec file(s).", args.specs.len());
    Ok(ExitCode::SUCCESS)
}
