#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the Tether campaign in a terminal.

mod input;
mod manifest;
mod session;
mod terminal;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use tether_core::{Event, LevelId};
use tether_rendering::{Frame, RenderingBackend};
use tether_world::{query, World};

use session::Session;
use terminal::TerminalBackend;

/// Command-line arguments accepted by the Tether binary.
#[derive(Debug, Parser)]
#[command(name = "tether", version, about = "Guide two chained characters to the goal")]
struct Args {
    /// Level manifest listing the campaign in play order.
    #[arg(long, default_value = manifest::DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,
    /// Zero-based level to start on.
    #[arg(long)]
    level: Option<u32>,
    /// Moves to replay instead of reading stdin (`LRUD` or `hjkl`).
    #[arg(long)]
    moves: Option<String>,
    /// Simulated frame length in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Print the final snapshot as JSON instead of a text frame.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Tether command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let campaign = manifest::load_campaign(&args.manifest)?;
    let mut session = Session::new(
        World::new(campaign),
        Duration::from_millis(args.frame_ms),
    );

    if let Some(level) = args.level {
        let events = session.load(LevelId::new(level));
        if events.contains(&Event::LevelUnavailable {
            level: LevelId::new(level),
        }) {
            bail!(
                "level {level} is not part of the campaign ({} levels)",
                query::level_count(session.world())
            );
        }
    }

    let stdout = io::stdout();
    let mut backend = TerminalBackend::new(stdout.lock());

    match args.moves {
        Some(script) => replay(&mut session, &script)?,
        None => play(&mut session, &mut backend)?,
    }

    if args.json {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("failed to serialize snapshot")?;
        backend.status(&json)?;
    } else {
        backend.present(&Frame::compose(&session.snapshot()))?;
    }
    if session.campaign_completed() {
        backend.status("Campaign completed.")?;
    }
    Ok(())
}

/// Applies a scripted move sequence, letting every slide finish between moves.
fn replay(session: &mut Session, script: &str) -> Result<()> {
    let moves = input::parse_script(script)?;
    info!("replaying {} moves", moves.len());
    for direction in moves {
        if session.campaign_completed() {
            break;
        }
        let _ = session.step(direction);
        let _ = session.settle();
    }
    Ok(())
}

/// Reads moves from stdin line by line until `q` or end of input.
fn play<W: Write>(session: &mut Session, backend: &mut TerminalBackend<W>) -> Result<()> {
    let stdin = io::stdin();
    loop {
        backend.status(&format!(
            "{} ({}/{})",
            query::level_name(session.world()),
            query::level(session.world()).get() + 1,
            query::level_count(session.world())
        ))?;
        backend.present(&Frame::compose(&session.snapshot()))?;
        if session.campaign_completed() {
            return Ok(());
        }

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read input")?
            == 0
        {
            return Ok(());
        }

        for key in line.trim().chars() {
            if key == input::QUIT_KEY {
                return Ok(());
            }
            let Some(direction) = input::direction_for(key) else {
                backend.status(&format!("unknown key `{key}`"))?;
                continue;
            };
            let _ = session.step(direction);
            let _ = session.settle();
        }
    }
}
