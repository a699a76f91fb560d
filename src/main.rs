//! Scripted tile-match driver (default binary).
//!
//! Loads a level file, then reads one JSON command per line on stdin and
//! prints one JSON reply per line on stdout. With `--paced`, every resolution
//! is also played back through the step-player in real time and each released
//! event is printed as a `step` line.
//!
//! ```text
//! tile-match level.json [--paced] < commands.jsonl
//! ```

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde_json::json;

use tile_match::adapter::{
    execute, load_level, parse_command, EventMessage, Reply, ReplyMessage, SessionConfig,
};
use tile_match::core::Game;
use tile_match::engine::{PlayerTiming, TracePlayer};
use tile_match::types::ResolutionTrace;

const FRAME_MS: u64 = 16;

struct Args {
    level_path: String,
    paced: bool,
}

fn parse_args() -> Result<Args> {
    let mut level_path = None;
    let mut paced = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--paced" => paced = true,
            s if s.starts_with("--") => bail!("unknown flag {s}"),
            _ if level_path.is_none() => level_path = Some(arg),
            _ => bail!("unexpected argument {arg}"),
        }
    }
    let Some(level_path) = level_path else {
        bail!("usage: tile-match <level.json> [--paced]");
    };
    Ok(Args { level_path, paced })
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = SessionConfig::from_env();
    let level = load_level(&args.level_path)?;
    let mut game = Game::with_seed(level, config.seed).context("level rejected")?;

    let (trace_tx, trace_rx) = mpsc::channel::<ResolutionTrace>();
    game.set_sink(Box::new(move |trace: &ResolutionTrace| {
        let _ = trace_tx.send(trace.clone());
    }));

    eprintln!(
        "[tile-match] loaded {} (seed {}, paced {})",
        args.level_path, config.seed, args.paced
    );

    let mut player = TracePlayer::new(PlayerTiming::default());
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let message = match parse_command(&line) {
            Ok(msg) => {
                let reply = execute(&mut game, msg.command);
                ReplyMessage {
                    seq: msg.seq,
                    reply,
                }
            }
            Err(e) => {
                eprintln!("[tile-match] line {}: {}", line_no + 1, e);
                ReplyMessage {
                    seq: 0,
                    reply: Reply::error("invalid_command", e),
                }
            }
        };
        writeln!(out, "{}", serde_json::to_string(&message)?)?;

        while let Ok(trace) = trace_rx.try_recv() {
            if args.paced {
                player.enqueue(&trace);
            }
        }
        if args.paced {
            play(&mut player, message.seq, &mut out)?;
        }
        out.flush()?;
    }

    Ok(())
}

/// Drain the player in real time, one frame at a time
fn play(player: &mut TracePlayer, seq: u64, out: &mut impl Write) -> Result<()> {
    let started = Instant::now();
    let mut last_frame = started;
    while !player.is_idle() {
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame).as_millis() as u32;
        last_frame = now;

        if let Some(step) = player.tick(elapsed) {
            let line = json!({
                "type": "step",
                "seq": seq,
                "atMs": started.elapsed().as_millis() as u64,
                "holdMs": step.hold_ms,
                "event": EventMessage::from(&step.event),
            });
            writeln!(out, "{line}")?;
            out.flush()?;
            continue;
        }
        std::thread::sleep(Duration::from_millis(FRAME_MS));
    }
    Ok(())
}
