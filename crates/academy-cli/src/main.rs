use academy_application::{AdminConsole, ConsoleOptions};
use academy_core::AcademyError;
use academy_core::config::BASE_URL_ENV;
use academy_core::session::SessionEvent;
use academy_infrastructure::AcademyPaths;
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::broadcast;

mod commands;
mod logging;

use commands::analytics::AnalyticsCommand;
use commands::config::ConfigCommand;
use commands::quiz::QuizCommand;
use commands::tracks::TracksCommand;
use commands::videos::VideosCommand;

#[derive(Parser)]
#[command(name = "academy")]
#[command(about = "Academy admin console - manage training videos, quizzes, tracks and analytics", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file to read instead of the default one
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Backend base URL (overrides config and environment)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Keep config, session and logs under this directory
    #[arg(long, global = true, env = "ACADEMY_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a phone number and a one-time password
    Login {
        /// 10-digit registered phone number
        phone: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in administrator
    Whoami {
        /// Also ask the server whether the session is still valid
        #[arg(long)]
        check: bool,
    },
    /// Manage training videos
    Videos {
        #[command(subcommand)]
        action: VideosCommand,
    },
    /// Manage the quiz of a video
    Quiz {
        #[command(subcommand)]
        action: QuizCommand,
    },
    /// Manage mandatory tracks per delivery type
    Tracks {
        #[command(subcommand)]
        action: TracksCommand,
    },
    /// Training completion analytics
    Analytics {
        #[command(subcommand)]
        action: AnalyticsCommand,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), banner(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = AcademyPaths::new(cli.home.as_deref())?;
    let _guard = logging::init(&paths.logs_dir(), cli.verbose);

    let console = AdminConsole::bootstrap(ConsoleOptions {
        base_dir: cli.home,
        config_file: cli.config_file,
        base_url: cli.base_url,
        env_base_url: std::env::var(BASE_URL_ENV).ok(),
    })?;
    let mut events = console.subscribe();

    let result = match cli.command {
        Commands::Login { phone } => commands::auth::login(&console, &phone).await,
        Commands::Logout => commands::auth::logout(&console).await,
        Commands::Whoami { check } => commands::auth::whoami(&console, check).await,
        Commands::Videos { action } => commands::videos::run(&console, action).await,
        Commands::Quiz { action } => commands::quiz::run(&console, action).await,
        Commands::Tracks { action } => commands::tracks::run(&console, action).await,
        Commands::Analytics { action } => commands::analytics::run(&console, action).await,
        Commands::Config { action } => commands::config::run(&console, action),
    };

    report_session_events(&mut events);
    result
}

/// Tells the user to sign in again when a request expired the session.
fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(event) = events.try_recv() {
        if event == SessionEvent::Expired {
            eprintln!(
                "{}",
                "Your session has expired. Run `academy login <phone>` to sign in again.".yellow()
            );
        }
    }
}

/// One line per failure, whatever its source.
fn banner(err: &anyhow::Error) -> String {
    let message = match err.downcast_ref::<AcademyError>() {
        Some(academy) => academy.to_string(),
        None => format!("{err:#}"),
    };
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "academy",
            "--base-url",
            "http://localhost:8080",
            "tracks",
            "copy",
            "--from",
            "amazon",
            "--to",
            "ZOMATO",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(
            cli.command,
            Commands::Tracks {
                action: TracksCommand::Copy { .. }
            }
        ));
    }

    #[test]
    fn test_banner_is_single_line() {
        let err = anyhow::Error::new(AcademyError::validation("Title is required"));
        assert_eq!(banner(&err), "Title is required");

        let err = anyhow::Error::new(AcademyError::api(500, "Internal\nServer   Error"));
        assert_eq!(banner(&err), "API error (500): Internal Server Error");
    }
}
