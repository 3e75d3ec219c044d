use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use lakes_lib::{CoreConfig, Error, FetchError, Fetcher, Repository, repository::CONFIG_ENV};
use sysexits::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod fetch;
mod lake;

#[derive(Parser, Debug)]
#[command(name = "lakes")]
#[command(author, version, about)]
/// Manage the lakes catalog from the command line
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file to use instead of the default location
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List lake names
    List {
        /// Only names containing this text, ignoring case
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a lake's description
    Show {
        name: String,
        /// Write the stored picture to this file
        #[arg(long)]
        picture_out: Option<PathBuf>,
    },
    /// Add a new lake
    Add(lake::AddArgs),
    /// Change an existing lake
    Edit(lake::EditArgs),
    /// Delete a lake
    Delete { name: String },
    /// Print the encyclopedia text for a lake without storing it
    Fetch { name: String },
}

/// Everything a command can fail with
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Catalog(e) => match e {
                Error::EmptyName | Error::DuplicateName(_) | Error::NotFound(_) => {
                    ExitCode::DataErr
                }
                Error::Store(_) => ExitCode::Unavailable,
                Error::Io { .. } => ExitCode::NoInput,
                Error::ConfigParse { .. } | Error::ConfigSerialize(_) | Error::NoHomeDirectory => {
                    ExitCode::Config
                }
                Error::Task(_) => ExitCode::Software,
            },
            CliError::Fetch(e) => match e {
                FetchError::EmptyName
                | FetchError::NotFound { .. }
                | FetchError::MissingContent(_) => ExitCode::DataErr,
                FetchError::NoNetwork(_) => ExitCode::Unavailable,
                FetchError::InvalidUrl { .. } => ExitCode::Config,
                FetchError::Client(_) | FetchError::Extraction(_) => ExitCode::Software,
            },
            CliError::Write { .. } => ExitCode::CantCreat,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::Ok,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            e.exit_code()
        }
    }
}

async fn run(cli: &Cli) -> CliResult<()> {
    let cfg = match &cli.config {
        Some(path) => CoreConfig::load_from(path)?,
        None => CoreConfig::load()?,
    };
    let fetcher = Fetcher::new(&cfg.fetcher)?;
    let repo = Repository::from_config(cfg)?;
    debug!("Using catalog {}", repo.database_path().display());

    match &cli.command {
        Command::List { search } => lake::list(&repo, search.as_deref()),
        Command::Show { name, picture_out } => lake::show(&repo, name, picture_out.as_deref()),
        Command::Add(args) => lake::add(&repo, &fetcher, args).await,
        Command::Edit(args) => lake::edit(&repo, &fetcher, args).await,
        Command::Delete { name } => lake::delete(&repo, name),
        Command::Fetch { name } => fetch::print(&fetcher, name).await,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["lakes", "list", "--config", "lakes.toml"]);

        assert_eq!(cli.config, Some(PathBuf::from("lakes.toml")));
        assert!(matches!(cli.command, Command::List { search: None }));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::from(Error::DuplicateName("Байкал".into())).exit_code(),
            ExitCode::DataErr
        );
        assert_eq!(
            CliError::from(Error::NoHomeDirectory).exit_code(),
            ExitCode::Config
        );
        assert_eq!(
            CliError::from(FetchError::EmptyName).exit_code(),
            ExitCode::DataErr
        );
    }
}
