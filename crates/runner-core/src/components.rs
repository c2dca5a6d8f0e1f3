//! Data carried by scene nodes.
//!
//! Components are plain data structs with no behaviour beyond construction.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Identity of a platform. Unique among live platforms, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Indices into the externally owned mesh and texture tables.
/// An untextured mesh has no texture index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRef {
    pub mesh: usize,
    pub texture: Option<usize>,
}

/// Movement and look tuning for a player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Radians of look rotation per pointer unit.
    pub mouse_sensitivity: f32,
    /// Horizontal speed cap (m/s).
    pub max_speed: f32,
    /// Fraction of horizontal velocity shed per tick with no movement key held.
    pub friction: f32,
    /// Scale applied to the input direction (m/s²).
    pub acceleration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            mouse_sensitivity: PLAYER_MOUSE_SENSITIVITY,
            max_speed: PLAYER_MAX_SPEED,
            friction: PLAYER_FRICTION,
            acceleration: PLAYER_ACCELERATION,
        }
    }
}

/// Player-specific node data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub tuning: PlayerTuning,
    /// Whether the last physics step ended standing on a platform.
    pub grounded: bool,
}
