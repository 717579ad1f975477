use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use remote_cache::{setup_remote_cache, ProcessRunner, SetupOutcome};
use shared::error::ToolError;
use sourcerer::{parse_actions, SourcererState, SourcererStore};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "scope-tools", about = "Developer tooling for the security workspace")]
struct Cli {
    /// Config file; defaults to ./tools.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the remote build-cache settings file if it is missing.
    SetupRemoteCache {
        #[arg(long)]
        repo_root: Option<PathBuf>,
        /// Behave as if running under CI.
        #[arg(long)]
        ci: bool,
    },
    Sourcerer {
        #[command(subcommand)]
        command: SourcererCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SourcererCommand {
    /// Print the initial scope state.
    Init {
        #[arg(long)]
        signal_index_name: Option<String>,
    },
    /// Apply a JSON array of actions and print the resulting state.
    Replay {
        actions: PathBuf,
        /// Start from this state instead of the configured initial one.
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::SetupRemoteCache { repo_root, ci } => {
            if let Some(repo_root) = repo_root {
                settings.repo_root = repo_root;
            }
            settings.ci |= ci;

            match setup_remote_cache(&settings.remote_cache_config(), &ProcessRunner).await {
                SetupOutcome::Written(path) => println!("wrote {}", path.display()),
                SetupOutcome::Skipped(reason) => println!("skipped: {reason:?}"),
            }
        }
        Command::Sourcerer { command } => match command {
            SourcererCommand::Init { signal_index_name } => {
                if signal_index_name.is_some() {
                    settings.signal_index_name = signal_index_name;
                }
                print_state(&settings.initial_sourcerer_state())?;
            }
            SourcererCommand::Replay { actions, state } => {
                let initial = match state {
                    Some(path) => load_state(&path)
                        .with_context(|| format!("failed to load state '{}'", path.display()))?,
                    None => settings.initial_sourcerer_state(),
                };
                let raw = tokio::fs::read_to_string(&actions)
                    .await
                    .with_context(|| format!("failed to read actions '{}'", actions.display()))?;
                let actions = parse_actions(&raw).context("invalid actions file")?;
                tracing::info!(count = actions.len(), "replaying sourcerer actions");

                let store = SourcererStore::new(initial);
                let final_state = store.dispatch_all(actions);
                print_state(&final_state)?;
            }
        },
    }

    Ok(())
}

fn load_state(path: &Path) -> Result<SourcererState, ToolError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_state(state: &SourcererState) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_replay_with_starting_state() {
        let cli = Cli::try_parse_from([
            "scope-tools",
            "sourcerer",
            "replay",
            "actions.json",
            "--state",
            "state.json",
        ])
        .expect("parse");

        match cli.command {
            Command::Sourcerer {
                command: SourcererCommand::Replay { actions, state },
            } => {
                assert_eq!(actions, PathBuf::from("actions.json"));
                assert_eq!(state, Some(PathBuf::from("state.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn load_state_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_state(&dir.path().join("state.json")).expect_err("missing");
        assert_eq!(err.code, shared::error::ErrorCode::NotFound);
    }

    #[test]
    fn load_state_reads_printed_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        let state = config::Settings::default().initial_sourcerer_state();
        std::fs::write(&path, serde_json::to_string_pretty(&state).expect("json"))
            .expect("write");

        assert_eq!(load_state(&path).expect("load"), state);
    }
}
