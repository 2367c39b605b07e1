//! sandvox - a text-driven voxel sandbox simulation
//!
//! Reads one command per line, advances the simulation one fixed step per
//! movement command, and prints textual responses.

mod command_script;
mod commands;
mod config;
mod game;
mod transcript;

use anyhow::Result;
use command_script::CommandScriptPlayer;
use config::SimConfig;
use game::GameSession;
use std::{env, path::PathBuf};
use tracing::info;
use transcript::TranscriptSink;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting sandvox v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));

    let config = match &cli.config_path {
        Some(path) => SimConfig::load_from_path(path),
        None => SimConfig::load(),
    };

    let mut transcript = match &cli.transcript_path {
        Some(path) => Some(TranscriptSink::create(path)?),
        None => None,
    };

    let mut session = GameSession::new(&config);

    println!();
    println!("=== 3D SANDBOX GAME ===");
    println!("Welcome to the 3D Sandbox!");
    println!("Use WASD to move, and try the 'create' and 'destroy' commands!");
    if session.is_help_shown() {
        for line in session.help_lines() {
            println!("{line}");
        }
    }

    match &cli.script_path {
        Some(path) => {
            let script = CommandScriptPlayer::from_path(path)?;
            game::run_script(&mut session, script, &mut transcript)?;
        }
        None => game::run_repl(&mut session, &mut transcript)?,
    }

    info!("sandvox shutting down");
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    script_path: Option<PathBuf>,
    transcript_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--transcript" => {
                    if let Some(path) = args.next() {
                        opts.transcript_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--transcript requires a file path");
                    }
                }
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                _ => {}
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn cli_parses_paths_after_flags() {
        let opts = CliOptions::parse(
            ["--script", "run.txt", "--transcript", "log.jsonl"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(opts.script_path.as_deref(), Some(Path::new("run.txt")));
        assert_eq!(
            opts.transcript_path.as_deref(),
            Some(Path::new("log.jsonl"))
        );
        assert!(opts.config_path.is_none());
    }

    #[test]
    fn cli_ignores_unknown_flags() {
        let opts = CliOptions::parse(
            ["--frobnicate", "--config", "sim.toml"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(opts.config_path.as_deref(), Some(Path::new("sim.toml")));
    }
}
