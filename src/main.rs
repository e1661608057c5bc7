use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use waymark::config::{Config, OutputFormat};
use waymark::logging::init_tracing;
use waymark::script::{Script, ScriptRunner};
use waymark::ResolutionPolicy;

#[derive(Parser)]
#[command(
    name = "waymark",
    version,
    about = "Replay navigation and modal scenarios against a coordinator tree"
)]
struct Cli {
    /// Config file (default: ~/.config/waymark/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tracing filter, overrides the config file (RUST_LOG still wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a script and print the transcript
    Run {
        script: PathBuf,

        /// Transcript format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Policy for present steps that do not name one
        #[arg(long, value_parser = parse_policy)]
        policy: Option<ResolutionPolicy>,
    },
    /// Parse and validate a script without running it
    Check { script: PathBuf },
}

fn parse_policy(value: &str) -> Result<ResolutionPolicy, String> {
    match value {
        "over_all" => Ok(ResolutionPolicy::OverAll),
        "replace_current" => Ok(ResolutionPolicy::ReplaceCurrent),
        "reject_if_active" => Ok(ResolutionPolicy::RejectIfActive),
        other => Err(format!(
            "unknown policy '{}' (expected over_all, replace_current or reject_if_active)",
            other
        )),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let filter = cli.log_level.as_deref().unwrap_or(&config.defaults.log_level);
    init_tracing(filter);

    match cli.command {
        Command::Check { script } => {
            let parsed = Script::load(&script)?;
            parsed.validate(config.defaults.max_steps)?;
            println!("{}: {} step(s) ok", script.display(), parsed.steps.len());
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            script,
            format,
            policy,
        } => {
            let parsed = Script::load(&script)?;
            parsed.validate(config.defaults.max_steps)?;
            tracing::info!(
                script = %script.display(),
                steps = parsed.steps.len(),
                "running script"
            );

            let transcript = ScriptRunner::run(&parsed, policy.unwrap_or(config.defaults.policy))?;
            match format.unwrap_or(config.output.format) {
                OutputFormat::Text => print!("{}", transcript),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&transcript)?),
            }

            if transcript.failures() > 0 {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
