use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parity_runner::{RunOverrides, Runner, RunnerResult, CONFIG_FILE_NAME};
use parity_validate::rules::RULE_CATALOG;

#[derive(Parser)]
#[command(name = "parity", version, about = "Compare a design export with a captured app UI")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default parity.toml
    Init {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Map screens, run the rules and report mismatches
    Compare {
        #[arg(long, env = "PARITY_CONFIG", default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
        /// Overrides [output] dir
        #[arg(long, env = "PARITY_OUTPUT")]
        output: Option<PathBuf>,
        /// One worker thread per screen
        #[arg(long)]
        parallel: bool,
    },

    /// List the built-in rules
    Rules {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.cmd {
        Command::Init { dir } => {
            let path = Runner::init(&dir)?;
            println!("Config at {}", path.display());
        }
        Command::Compare { config, output, parallel } => {
            tracing::debug!(config = %config.display(), parallel, "starting compare");
            let runner = Runner::open(&config)?;
            let result = runner.run(&RunOverrides {
                output_dir: output,
                parallel,
            })?;
            for line in summary_lines(&result) {
                println!("{}", line);
            }
            if !result.run.passed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Rules { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(RULE_CATALOG)?);
            } else {
                for d in RULE_CATALOG {
                    println!("{:<14} {:<14} {}", d.rule_id, d.rule_name, d.config_schema);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn summary_lines(result: &RunnerResult) -> Vec<String> {
    let run = &result.run;
    let m = &result.mapping;
    let mut lines = vec![
        format!("Run {} ({})", run.run_id, run.platform.as_str()),
        format!(
            "Screens: {}/{} mapped, components: {} mapped, {} design / {} app unmapped",
            m.mapped_screens, m.design_screens, m.mapped_components, m.unmapped_design_components, m.unmapped_app_elements
        ),
        format!("Validations: {}, mismatches: {}", run.validation_count(), run.total_mismatches),
    ];
    let counts = run.severity_counts();
    if !counts.is_empty() {
        let parts: Vec<String> = counts.iter().map(|(s, n)| format!("{}={}", s.as_str(), n)).collect();
        lines.push(format!("By severity: {}", parts.join(" ")));
    }
    for screen in &run.screen_results {
        for mismatch in screen.mismatches() {
            lines.push(format!(
                "  [{}] {} / {} / {}: {}",
                mismatch.severity.as_str(),
                screen.screen_name,
                mismatch.design_ref.display_name(),
                mismatch.rule_id,
                mismatch.message
            ));
        }
    }
    if let Some(path) = &result.result_path {
        lines.push(format!("Result: {}", path.display()));
    }
    lines.push(if run.passed { "PASSED".to_string() } else { "FAILED".to_string() });
    lines
}
