//! Command bridge between the front end and the game loop thread.
//!
//! Commands arrive as JSON lines in the `PlayerCommand` wire format, e.g.
//! `{"type":"KeyDown","code":"KeyW"}`.

use std::io::BufRead;

use runner_core::commands::PlayerCommand;
use runner_core::state::RunSnapshot;

use crate::state::{AppState, LoopCommand};

/// Parse one JSON-lines command.
pub fn parse_command_line(line: &str) -> Result<PlayerCommand, serde_json::Error> {
    serde_json::from_str(line.trim())
}

/// Send a player command to the game loop.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), String> {
    let tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(LoopCommand::Player(command))
            .map_err(|e| format!("Failed to send command: {}", e)),
        None => Err("Game loop not started".into()),
    }
}

/// Get the latest snapshot (for polling / final state).
pub fn get_snapshot(state: &AppState) -> Result<Option<RunSnapshot>, String> {
    let lock = state.latest_snapshot.lock().map_err(|e| e.to_string())?;
    Ok(lock.clone())
}

/// Ask the game loop to stop and forget its sender.
pub fn shutdown(state: &AppState) -> Result<(), String> {
    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    if let Some(tx) = tx_lock.take() {
        // A loop that already exited has nothing left to stop.
        let _ = tx.send(LoopCommand::Shutdown);
    }
    Ok(())
}

/// Forward every command line from `reader` until end of input or until the
/// loop is gone. Blank lines are skipped; malformed lines are logged and
/// skipped. Returns the number of commands forwarded.
pub fn forward_commands(reader: impl BufRead, state: &AppState) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("command input closed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command_line(&line) {
            Ok(command) => {
                if let Err(e) = send_command(state, command) {
                    log::debug!("{e}");
                    break;
                }
                forwarded += 1;
            }
            Err(e) => log::warn!("ignoring malformed command {line:?}: {e}"),
        }
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn test_parse_command_line() {
        let cmd = parse_command_line(r#"  {"type":"KeyDown","code":"KeyW"} "#).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::KeyDown {
                code: "KeyW".into()
            }
        );
        assert_eq!(
            parse_command_line(r#"{"type":"StartRun"}"#).unwrap(),
            PlayerCommand::StartRun
        );
        assert!(parse_command_line(r#"{"type":"Fly"}"#).is_err());
        assert!(parse_command_line("not json").is_err());
    }

    #[test]
    fn test_send_without_loop_fails() {
        let state = AppState::new();
        assert!(send_command(&state, PlayerCommand::Pause).is_err());
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_forward_skips_blank_and_malformed_lines() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        let input = "{\"type\":\"StartRun\"}\n\n garbage \n{\"type\":\"PointerMove\",\"dx\":3.0,\"dy\":-1.0}\n";
        let forwarded = forward_commands(Cursor::new(input), &state);
        assert_eq!(forwarded, 2);

        let received: Vec<LoopCommand> = rx.try_iter().collect();
        assert!(matches!(received[0], LoopCommand::Player(PlayerCommand::StartRun)));
        assert!(matches!(
            received[1],
            LoopCommand::Player(PlayerCommand::PointerMove { dx, dy }) if dx == 3.0 && dy == -1.0
        ));
    }

    #[test]
    fn test_forward_stops_when_loop_gone() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);
        drop(rx);

        let input = "{\"type\":\"Pause\"}\n{\"type\":\"Resume\"}\n";
        assert_eq!(forward_commands(Cursor::new(input), &state), 0);
    }

    #[test]
    fn test_shutdown_clears_sender() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        shutdown(&state).unwrap();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(matches!(rx.try_recv(), Ok(LoopCommand::Shutdown)));
    }
}
