use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ruprojectgames_lib::{Catalog, Error, HttpBackend, config::CoreConfig};
use sysexits::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod guide;
mod translation;

#[derive(Parser, Debug)]
#[command(name = "ruprojectgames")]
#[command(author, version, about = "Browse and manage the ruprojectgames translation catalogue")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Use this configuration file instead of the default one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List published translations
    List(translation::ListArgs),
    /// Publish a new translation
    Add(translation::AddArgs),
    /// Remove a published translation
    Remove(translation::RemoveArgs),
    /// List the supported games
    Games,
    /// Show how to install a translation
    Guide(guide::Args),
    /// Inspect the configuration
    #[command(subcommand)]
    Config(config::Command),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging goes to stderr so it never mixes with listings
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::Ok,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            exit_code(&e)
        }
    }
}

async fn run(cli: Cli) -> ruprojectgames_lib::Result<()> {
    let cfg = match &cli.config {
        Some(path) => CoreConfig::load_from(path)?,
        None => CoreConfig::load()?,
    };

    match cli.command {
        Command::Games => {
            guide::games();
            Ok(())
        }
        Command::Guide(args) => {
            guide::show(&args);
            Ok(())
        }
        Command::Config(cmd) => config::handle(&cfg, cli.config.as_deref(), &cmd),
        Command::List(args) => {
            let mut catalog = Catalog::new(HttpBackend::new(&cfg)?);
            translation::list(&mut catalog, &args).await
        }
        Command::Add(args) => {
            let mut catalog = Catalog::new(HttpBackend::new(&cfg)?);
            translation::add(&mut catalog, args).await
        }
        Command::Remove(args) => {
            let mut catalog = Catalog::new(HttpBackend::new(&cfg)?);
            translation::remove(&mut catalog, args).await
        }
    }
}

fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::Validation(_) => ExitCode::DataErr,
        Error::InvalidCredentials | Error::NotAuthenticated => ExitCode::NoPerm,
        Error::Network(_) | Error::Timeout(_) | Error::ServerRejected { .. } => {
            ExitCode::Unavailable
        }
        Error::Decode(_) => ExitCode::Protocol,
        Error::AlreadyInFlight => ExitCode::TempFail,
        Error::InvalidEndpoint { .. }
        | Error::NoConfigDir
        | Error::ConfigParse { .. }
        | Error::ConfigSerialize(_) => ExitCode::Config,
        Error::Io(_) => ExitCode::IoErr,
    }
}
