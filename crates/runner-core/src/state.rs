//! Run state snapshot: the numeric state exposed to the UI each tick.
//!
//! The scene graph itself is the render handoff; this is only what a HUD
//! or run-over detector needs to read.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::PlatformId;
use crate::enums::GamePhase;
use crate::events::GameEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Heading in radians, wrapped into [0, 2π).
    pub yaw: f32,
    /// Camera pitch in radians.
    pub pitch: f32,
    pub grounded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformView {
    pub id: PlatformId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub has_coin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    /// Score ticks accumulated while running.
    pub score: u64,
    pub elapsed_secs: f64,
    /// `h:m:s:d` display string.
    pub elapsed_display: String,
}
