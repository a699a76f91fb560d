//! Session runtime.
//!
//! Runs one `Game` on a tokio task. Commands arrive over a bounded channel and
//! are answered one at a time through oneshot replies; every trace the game
//! produces is also published on a broadcast channel for observers.

use rand::Rng;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::{ConfigError, Game, LevelConfig, SelectionOutcome, TraceSink};
use crate::engine::find_hint;
use crate::protocol::{Command, HintBody, Reply, SelectionState};
use crate::types::{Pos, ResolutionTrace};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for the ability RNG
    pub seed: u64,
    pub max_pending_commands: usize,
    /// Traces buffered per observer before it starts lagging
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_pending_commands: 16,
            event_capacity: 64,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let seed = env::var("TILE_MATCH_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let max_pending_commands = env::var("TILE_MATCH_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        let event_capacity = env::var("TILE_MATCH_EVENT_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.event_capacity);

        Self {
            seed,
            max_pending_commands,
            event_capacity,
        }
    }
}

/// Apply one command to a game and build its reply.
///
/// This is the whole command surface; the async session and the replay binary
/// both go through it.
pub fn execute<R: Rng>(game: &mut Game<R>, command: Command) -> Reply {
    match command {
        Command::Select { x, y } => match game.select(Pos::new(x, y)) {
            Ok(SelectionOutcome::Idle) => Reply::Selection {
                state: SelectionState::Idle,
                armed: None,
                trace: None,
            },
            Ok(SelectionOutcome::Armed(pos)) => Reply::Selection {
                state: SelectionState::Armed,
                armed: Some(pos.into()),
                trace: None,
            },
            Ok(SelectionOutcome::MoveTriggered { trace, .. }) => Reply::Selection {
                state: SelectionState::Idle,
                armed: None,
                trace: Some((&trace).into()),
            },
            Err(err) => err.into(),
        },
        Command::Move { from, to } => match game.submit_move(from.into(), to.into()) {
            Ok(trace) => Reply::trace(&trace),
            Err(err) => err.into(),
        },
        Command::MoveSelection { x, y } => match game.move_selection(Pos::new(x, y)) {
            Ok(trace) => Reply::trace(&trace),
            Err(err) => err.into(),
        },
        Command::RandomMatch => match game.use_random_match() {
            Ok(trace) => Reply::trace(&trace),
            Err(err) => err.into(),
        },
        Command::Shuffle => match game.use_shuffle() {
            Ok(trace) => Reply::trace(&trace),
            Err(err) => err.into(),
        },
        Command::Snapshot => Reply::snapshot(&game.snapshot()),
        Command::Restart => match game.restart() {
            Ok(()) => Reply::snapshot(&game.snapshot()),
            Err(err) => err.into(),
        },
        Command::Hint => Reply::Hint {
            hint: find_hint(game.board()).map(HintBody::from),
        },
    }
}

/// Publishes every trace on a broadcast channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: broadcast::Sender<ResolutionTrace>,
}

impl ChannelSink {
    pub fn new(tx: broadcast::Sender<ResolutionTrace>) -> Self {
        Self { tx }
    }
}

impl TraceSink for ChannelSink {
    fn on_trace(&mut self, trace: &ResolutionTrace) {
        // No subscribers is fine; traces are also returned in replies.
        let _ = self.tx.send(trace.clone());
    }
}

/// Command delivered to the session task.
#[derive(Debug)]
pub struct InboundCommand {
    pub command: Command,
    pub reply: oneshot::Sender<Reply>,
}

/// Handle to a running session.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<InboundCommand>,
    events: broadcast::Sender<ResolutionTrace>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Move `game` onto a new task. Must be called from within a tokio runtime.
    pub fn spawn<R>(mut game: Game<R>, config: &SessionConfig) -> Self
    where
        R: Rng + Send + 'static,
    {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        game.set_sink(Box::new(ChannelSink::new(events.clone())));

        let task = tokio::spawn(async move {
            while let Some(InboundCommand { command, reply }) = cmd_rx.recv().await {
                let name = command.as_str();
                let answer = execute(&mut game, command);
                if let Some(code) = answer.error_code() {
                    eprintln!("[Session] {} rejected: {}", name, code);
                }
                if reply.send(answer).is_err() {
                    eprintln!("[Session] {} reply dropped, requester went away", name);
                }
            }
            eprintln!("[Session] command channel closed, stopping");
        });

        Self {
            cmd_tx,
            events,
            task,
        }
    }

    /// Build a seeded game for `level` and spawn it
    pub fn spawn_level(level: LevelConfig, config: &SessionConfig) -> Result<Self, ConfigError> {
        let game = Game::with_seed(level, config.seed)?;
        Ok(Self::spawn(game, config))
    }

    /// Send a command and wait for its reply
    pub async fn request(&self, command: Command) -> anyhow::Result<Reply> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(InboundCommand { command, reply })
            .await
            .map_err(|_| anyhow::anyhow!("session has stopped"))?;
        rx.await
            .map_err(|_| anyhow::anyhow!("session dropped the command"))
    }

    /// Receive every trace produced after this call
    pub fn subscribe(&self) -> broadcast::Receiver<ResolutionTrace> {
        self.events.subscribe()
    }

    /// Close the command channel and wait for the task to drain it
    pub async fn shutdown(self) -> anyhow::Result<()> {
        drop(self.cmd_tx);
        self.task.await?;
        Ok(())
    }
}
