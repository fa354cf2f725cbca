//! Interactive playback session
//!
//! Keeps one player alive across commands read line by line, so queue
//! advance, shuffle and repeat can be driven like a real front end.

use crate::app::{describe, App};
use crate::error::{CliError, Result};
use beat_core::TrackId;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// A single session command
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Play(TrackId),
    Next,
    Previous,
    Toggle,
    Seek(f64),
    /// Simulate the current track reaching its end
    End,
    Stop,
    Volume(f32),
    Shuffle,
    Repeat,
    Recent,
    Status,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(CliError::InvalidCommand("empty line".to_string()));
        };
        let arg = parts.next();

        let command = match (word.to_ascii_lowercase().as_str(), arg) {
            ("play", Some(id)) => SessionCommand::Play(TrackId::new(id)),
            ("next" | "n", None) => SessionCommand::Next,
            ("prev" | "previous" | "p", None) => SessionCommand::Previous,
            ("pause" | "resume" | "toggle", None) => SessionCommand::Toggle,
            ("seek", Some(secs)) => SessionCommand::Seek(parse_number(secs)?),
            ("end", None) => SessionCommand::End,
            ("stop", None) => SessionCommand::Stop,
            ("volume" | "vol", Some(level)) => SessionCommand::Volume(parse_number(level)?),
            ("shuffle", None) => SessionCommand::Shuffle,
            ("repeat", None) => SessionCommand::Repeat,
            ("recent", None) => SessionCommand::Recent,
            ("status", None) => SessionCommand::Status,
            ("help" | "?", None) => SessionCommand::Help,
            ("quit" | "exit" | "q", None) => SessionCommand::Quit,
            _ => return Err(CliError::InvalidCommand(line.trim().to_string())),
        };

        if parts.next().is_some() {
            return Err(CliError::InvalidCommand(line.trim().to_string()));
        }
        Ok(command)
    }
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| CliError::InvalidCommand(format!("not a number: {}", raw)))
}

const HELP: &str = "\
commands:
  play <id>      play a trending track, queueing its batch
  next | prev    step through the queue
  pause          toggle play/pause
  seek <secs>    jump within the current track
  end            act as if the current track finished
  stop           close the player
  volume <0-1>   set volume
  shuffle        toggle shuffle
  repeat         cycle repeat off -> one -> all
  recent         list recently played
  status         show what is playing
  quit           leave the session";

/// Run commands from `input` until it ends or `quit` is read
///
/// Bad input and playback failures are reported on `out` and the session
/// carries on.
pub async fn run<R, W>(app: &mut App, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{} (try `help`)", e)?;
                continue;
            }
        };

        if command == SessionCommand::Quit {
            break;
        }

        if let Err(e) = execute(app, command, out).await {
            warn!(error = %e, "Session command failed");
            writeln!(out, "error: {}", e)?;
        }
    }

    Ok(())
}

async fn execute<W: Write>(app: &mut App, command: SessionCommand, out: &mut W) -> Result<()> {
    match command {
        SessionCommand::Play(id) => {
            let track = app.play(&id).await?;
            writeln!(out, "playing {}", describe(&track))?;
        }
        SessionCommand::Next => report_advance(out, app.next().await?)?,
        SessionCommand::Previous => report_advance(out, app.previous().await?)?,
        SessionCommand::Toggle => {
            let playing = app.toggle_play().await?;
            writeln!(out, "{}", if playing { "playing" } else { "paused" })?;
        }
        SessionCommand::Seek(seconds) => {
            let position = app.seek(seconds);
            writeln!(out, "position {:.1}s", position)?;
        }
        SessionCommand::End => {
            app.finish_track().await?;
            write_status(app, out)?;
        }
        SessionCommand::Stop => {
            app.stop();
            writeln!(out, "stopped")?;
        }
        SessionCommand::Volume(level) => {
            let volume = app.set_volume(level);
            writeln!(out, "volume {:.2}", volume)?;
        }
        SessionCommand::Shuffle => {
            let on = app.toggle_shuffle();
            writeln!(out, "shuffle {}", if on { "on" } else { "off" })?;
        }
        SessionCommand::Repeat => {
            writeln!(out, "repeat {}", app.cycle_repeat().as_str())?;
        }
        SessionCommand::Recent => {
            for track in app.recent() {
                writeln!(out, "{}", describe(&track))?;
            }
        }
        SessionCommand::Status => write_status(app, out)?,
        SessionCommand::Help => writeln!(out, "{}", HELP)?,
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn report_advance<W: Write>(out: &mut W, track: Option<beat_core::Track>) -> Result<()> {
    match track {
        Some(track) => writeln!(out, "playing {}", describe(&track))?,
        None => writeln!(out, "nothing to play")?,
    }
    Ok(())
}

fn write_status<W: Write>(app: &App, out: &mut W) -> Result<()> {
    let state = app.state();
    match &state.current_track {
        Some(track) => writeln!(
            out,
            "{} {}",
            if state.is_playing { "playing" } else { "paused" },
            describe(track)
        )?,
        None => writeln!(out, "idle")?,
    }
    writeln!(
        out,
        "queue {} | volume {:.2} | shuffle {} | repeat {}",
        state.queue.len(),
        state.volume,
        if state.shuffle { "on" } else { "off" },
        state.repeat.as_str()
    )?;
    Ok(())
}
