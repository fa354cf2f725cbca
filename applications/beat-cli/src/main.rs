/// Beat Player - headless command-line player
use anyhow::Context;
use beat_cli::{app::describe, session, App, CliConfig};
use beat_core::TrackId;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beat")]
#[command(about = "Beat Player headless playback client", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./beat.toml when present)
    #[arg(short, long, env = "BEAT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List trending tracks
    Trending {
        /// Number of tracks to fetch
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Play a trending track by id
    Play {
        /// Track id as listed by `trending`
        id: String,
    },
    /// Run an interactive session reading commands from stdin
    Session,
    /// Show recently played tracks, newest first
    Recent,
    /// Forget the recently played list
    ClearHistory,
    /// Set the saved volume (0.0 - 1.0)
    Volume {
        level: f32,
    },
    /// Toggle shuffle
    Shuffle,
    /// Cycle repeat mode (off -> one -> all)
    Repeat,
    /// Print saved preferences as JSON
    Prefs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beat_cli=info,beat_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let mut app = App::open(&config).context("failed to start player")?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Trending { limit } => {
            for track in app.trending(limit).await? {
                writeln!(out, "{}", describe(&track))?;
            }
        }
        Commands::Play { id } => {
            let track = app.play(&TrackId::new(id)).await?;
            writeln!(out, "playing {}", describe(&track))?;
        }
        Commands::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run(&mut app, stdin, &mut out).await?;
        }
        Commands::Recent => {
            for track in app.recent() {
                writeln!(out, "{}", describe(&track))?;
            }
        }
        Commands::ClearHistory => {
            app.clear_history();
            writeln!(out, "history cleared")?;
        }
        Commands::Volume { level } => {
            writeln!(out, "volume {:.2}", app.set_volume(level))?;
        }
        Commands::Shuffle => {
            let on = app.toggle_shuffle();
            writeln!(out, "shuffle {}", if on { "on" } else { "off" })?;
        }
        Commands::Repeat => {
            writeln!(out, "repeat {}", app.cycle_repeat().as_str())?;
        }
        Commands::Prefs => {
            serde_json::to_writer_pretty(&mut out, &app.preferences())?;
            writeln!(out)?;
        }
    }

    app.shutdown().await;
    Ok(())
}
