//! State shared between the command reader and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use runner_core::commands::PlayerCommand;
use runner_core::state::RunSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the run engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every frame.
pub type SharedSnapshot = Arc<Mutex<Option<RunSnapshot>>>;

/// Handles held by the front end while a run is live.
///
/// - `command_tx` is wrapped in a `Mutex` so the reader thread and the main
///   thread can both send (`Sender` is `Send` but not `Sync`)
/// - `command_tx` is `None` before the loop is spawned and after shutdown
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    pub latest_snapshot: SharedSnapshot,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
    }
}
