mod commands;
mod config;
mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use registration::RegistrationModule;

use crate::commands::FormArgs;
use crate::config::CliOverrides;
use crate::logging::LogFormat;

/// Registration - fill in and submit the registration form
#[derive(Parser)]
#[command(name = "registration")]
#[command(about = "Registration - fill in and submit the registration form")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL override (overrides config and environment)
    #[arg(long)]
    base_url: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the form interactively and submit it
    Fill,
    /// Submit the form from flags
    Submit(FormArgs),
    /// Validate the form from flags without submitting
    Validate {
        #[command(flatten)]
        form: FormArgs,

        /// Print the form view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format);

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (REGISTRATION__*) -> 4) CLI overrides
    let overrides = CliOverrides {
        base_url: cli.base_url.clone(),
    };
    let config = config::load(cli.config.as_deref(), &overrides)?;

    if cli.print_config {
        println!("{}", config::to_yaml(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut stdout = std::io::stdout();

    // Dispatch subcommands (default: fill)
    match cli.command.unwrap_or(Commands::Fill) {
        Commands::Check => {
            commands::check(&config, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fill => {
            let module = RegistrationModule::new(&config)?;
            let mut session = module.session();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let outcome = commands::fill(&mut session, stdin, &mut stdout).await?;
            Ok(outcome.exit_code())
        }
        Commands::Submit(form) => {
            let module = RegistrationModule::new(&config)?;
            commands::submit(&module, form, &mut stdout).await
        }
        Commands::Validate { form, json } => {
            let module = RegistrationModule::offline(&config);
            commands::validate(&module, form, json, &mut stdout)
        }
    }
}
