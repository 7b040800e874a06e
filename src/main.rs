use anyhow::{Context, Result};
use clap::Parser;
use duel_trivia::Game;
use duel_trivia::config::{Cli, Command};
use duel_trivia::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    match &cli.command {
        Command::Serve { port, static_dir } => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();

            info!("Starting duel-trivia server");
            server::run(*port, cli.serve_source(), cli.question_count(), static_dir.clone())
                .await
                .with_context(|| format!("server on port {} failed", port))?;
        }
        Command::Play { server, log_file } => {
            // The terminal belongs to the game, so logs only go to a file.
            let _guard = match log_file {
                Some(path) => {
                    let file = std::fs::OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .with_context(|| format!("cannot open log file {}", path.display()))?;
                    let (writer, guard) = tracing_appender::non_blocking(file);
                    tracing_subscriber::fmt()
                        .with_env_filter(filter)
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer)
                        .init();
                    Some(guard)
                }
                None => None,
            };

            let source = cli.play_source(server.as_deref());
            info!(remote = source.has_remote(), "Starting duel-trivia game");
            Game::new(source, cli.question_count()).run().await?;
        }
    }

    Ok(())
}
