#![forbid(unsafe_code)]

mod commands;
mod constants;
mod desktop;
mod entry;
mod error;
mod registry;
mod transform;

use clap::{Parser, Subcommand};
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

use registry::Registry;

/// Toggle GPU-offload launch prefixes on desktop application shortcuts
#[derive(Parser, Debug)]
#[command(
    name = "bumblectl",
    version,
    about = "Toggle GPU-offload launch prefixes on desktop application shortcuts",
    long_about = "bumblectl rewrites the Exec lines of registered .desktop files to launch \
                  applications through a Bumblebee GPU-offload wrapper (primusrun or optirun)."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register applications and enable the GPU-offload prefix for them
    #[command(alias = "a")]
    Add {
        /// Application names (desktop file stems, e.g. "firefox")
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Restore launch commands and unregister applications
    #[command(alias = "rm")]
    Remove {
        /// Application names to unregister
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Show registered applications and their offload status
    #[command(alias = "ls")]
    List,

    /// Change the wrapper command and rewrite all registered entries to use it
    Switch {
        /// Wrapper command (primusrun or optirun)
        #[arg(value_name = "PREFIX")]
        prefix: String,
    },

    /// Re-apply the current prefix to every registered application
    Sync,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut registry = Registry::load()?;

    match cli.command {
        Command::Add { names } => commands::add::run(&mut registry, &names)?,
        Command::Remove { names } => commands::remove::run(&mut registry, &names)?,
        Command::List => commands::list::run(&registry)?,
        Command::Switch { prefix } => commands::switch::run(&mut registry, &prefix)?,
        Command::Sync => commands::sync::run(&registry)?,
    }

    Ok(())
}
