//! Command-line inspection of the blog's global data.
#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use blogdata_common::config::encode_component;
use blogdata_common::{EnvSource, GlobalData, GlobalDataReport, LogConfig, ProcessEnv, init_logging};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "blogdata",
    version,
    about = "Resolve the blog's global data (name, title, footer) from BLOG_* environment variables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the global data and print it
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Include where each value came from
        #[arg(long)]
        sources: bool,
    },
    /// Report every BLOG_* variable that fails to decode
    Check,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
    /// BLOG_*=value lines, percent-encoded
    Env,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the record.
    let mut log_config = LogConfig::from_env("warn").with_stderr();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let _logging_guards = init_logging(&log_config)?;

    match cli.command {
        Commands::Show { format, sources } => {
            let output = render_show(&ProcessEnv, format, sources)?;
            println!("{output}");
        }
        Commands::Check => {
            let summary = run_check(&ProcessEnv)?;
            println!("{summary}");
        }
    }

    Ok(())
}

fn render_show<E: EnvSource + ?Sized>(
    env: &E,
    format: OutputFormat,
    sources: bool,
) -> Result<String> {
    let report = GlobalData::resolve_sourced(env).context("failed to resolve blog global data")?;
    for (var, value) in report.entries() {
        debug!(var, origin = value.origin(), "resolved");
    }

    if sources {
        return render_sources(&report, format);
    }

    let data = report.into_data();
    let output = match format {
        OutputFormat::Json => serde_json::to_string(&data)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(&data)?,
        OutputFormat::Env => data
            .env_pairs()
            .iter()
            .map(|(var, value)| format!("{var}={}", encode_component(value)))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

fn render_sources(report: &GlobalDataReport, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(report)?,
        OutputFormat::Env => report
            .entries()
            .iter()
            .map(|(var, value)| {
                format!("{var}={}  # {}", encode_component(&value.value), value.origin())
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

fn run_check<E: EnvSource + ?Sized>(env: &E) -> Result<String> {
    let errors = GlobalData::check(env);
    if errors.is_empty() {
        return Ok("ok: all BLOG_* variables resolve".to_string());
    }

    for err in &errors {
        warn!(var = err.var(), "invalid blog variable");
        eprintln!("{}: {err}", err.var());
    }
    bail!("{} invalid BLOG_* variable(s)", errors.len())
}
