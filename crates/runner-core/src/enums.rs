//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Run lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level built, platforms stationary, waiting for the run to start.
    #[default]
    Ready,
    /// Conveyor moving, score counting.
    Running,
    /// Conveyor stopped and input detached; the pool is kept for resume.
    Paused,
    /// Player fell below the floor.
    Over,
}

/// Logical horizontal movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [
        MoveKey::Forward,
        MoveKey::Back,
        MoveKey::Left,
        MoveKey::Right,
    ];

    /// Map a physical key code to a movement key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(MoveKey::Forward),
            "KeyS" => Some(MoveKey::Back),
            "KeyA" => Some(MoveKey::Left),
            "KeyD" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Key code that requests a jump.
pub const JUMP_CODE: &str = "Space";
