//! Game loop thread: drives the run engine at `FRAME_RATE` and publishes
//! snapshots.
//!
//! The engine is built on the caller's thread so a bad scene is reported
//! before anything runs, then moved into the loop thread, which owns it
//! exclusively. Commands arrive via `mpsc` channel.

use std::sync::{mpsc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use runner_core::constants::FRAME_RATE;
use runner_core::error::Result;
use runner_core::spec::SceneSpec;
use runner_core::state::RunSnapshot;
use runner_sim::engine::{RunConfig, RunEngine};

use crate::state::{LoopCommand, SharedSnapshot};

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Resolve `spec`, then spawn the game loop in a new thread.
///
/// Returns the command sender and the thread handle; the thread exits on
/// `Shutdown` or when every sender is dropped.
pub fn spawn_game_loop(
    spec: SceneSpec,
    config: RunConfig,
    latest_snapshot: SharedSnapshot,
) -> Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let engine = RunEngine::new(config, spec)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("runner-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: RunEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<RunSnapshot>>,
) {
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    log::debug!("game loop started at {FRAME_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::debug!("game loop stopped after {} ticks", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the wall-clock time since the last frame (the engine clamps it)
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        let snapshot = engine.tick(dt);

        for event in &snapshot.events {
            log::trace!("{event:?}");
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}
