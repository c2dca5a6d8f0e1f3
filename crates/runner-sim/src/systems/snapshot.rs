//! Snapshot system: reads the scene and builds a `RunSnapshot`.
//!
//! This system is read-only; it never modifies the scene.

use runner_core::enums::GamePhase;
use runner_core::events::GameEvent;
use runner_core::scene::{Node, Scene};
use runner_core::state::*;
use runner_core::types::SimTime;

use crate::systems::score::ScoreClock;

pub fn build_snapshot(
    scene: &Scene,
    time: &SimTime,
    phase: GamePhase,
    score: &ScoreClock,
    events: Vec<GameEvent>,
) -> RunSnapshot {
    RunSnapshot {
        time: *time,
        phase,
        player: scene.player().map(build_player).unwrap_or_default(),
        platforms: scene.platforms().filter_map(build_platform).collect(),
        score: score.view(),
        events,
    }
}

fn build_player(player: &Node) -> PlayerView {
    PlayerView {
        position: player.transform.translation,
        velocity: player.velocity,
        yaw: player.transform.rotation.y,
        pitch: player.camera().map_or(0.0, |c| c.transform.rotation.x),
        grounded: player.player_state().is_some_and(|s| s.grounded),
    }
}

fn build_platform(platform: &Node) -> Option<PlatformView> {
    Some(PlatformView {
        id: platform.platform_id()?,
        position: platform.transform.translation,
        velocity: platform.velocity,
        has_coin: platform.coin().is_some(),
    })
}
