//! Kinematic integration and landing resolution.
//!
//! Platforms (and the coins riding on them) move by `velocity * dt`.
//! The player gets gravity or a jump impulse on the vertical axis and is
//! snapped onto the first platform whose top face it crossed this step.

use glam::Vec3;

use runner_core::components::PlatformId;
use runner_core::constants::{GRAVITY, JUMP_SPEED, STEP_UP_HEIGHT};
use runner_core::events::GameEvent;
use runner_core::scene::{Node, Scene};
use runner_core::types::Aabb;

use crate::input::InputState;

/// Run one physics step. Returns a `Landed` event on touchdown.
pub fn run(scene: &mut Scene, input: &mut InputState, dt: f32) -> Vec<GameEvent> {
    integrate_velocities(scene, dt);

    let Some(player) = scene.player_mut() else {
        return Vec::new();
    };
    let was_grounded = player.player_state().is_some_and(|s| s.grounded);
    let previous_bottom = apply_vertical(player, input, dt);

    match resolve_landing(scene, previous_bottom) {
        Some(platform) if !was_grounded => vec![GameEvent::Landed { platform }],
        _ => Vec::new(),
    }
}

/// Advance every moving node. Children ride along through their parent's
/// transform. The player only moves horizontally here.
pub fn integrate_velocities(scene: &mut Scene, dt: f32) {
    scene.traverse_mut(
        |node| {
            if node.is_player() {
                node.transform.translation.x += node.velocity.x * dt;
                node.transform.translation.z += node.velocity.z * dt;
            } else if node.velocity != Vec3::ZERO {
                node.transform.translation += node.velocity * dt;
            }
        },
        |_| {},
    );
}

/// Height of the bottom of a node's box.
fn bottom(node: &Node) -> f32 {
    node.transform.translation.y + node.aabb.map_or(0.0, |b| b.min.y)
}

/// Jump or fall, then integrate height. Returns the bottom of the player's
/// box before the step.
pub fn apply_vertical(player: &mut Node, input: &mut InputState, dt: f32) -> f32 {
    let previous_bottom = bottom(player);

    if input.take_jump() {
        player.velocity.y = JUMP_SPEED;
    } else {
        player.velocity.y -= GRAVITY * dt;
    }
    player.transform.translation.y += player.velocity.y * dt;

    previous_bottom
}

/// Box covering the player at both ends of the step.
fn swept_box(player_box: Aabb, previous_bottom: f32) -> Aabb {
    let height = player_box.max.y - player_box.min.y;
    let mut swept = player_box;
    swept.min.y = player_box.min.y.min(previous_bottom);
    swept.max.y = player_box.max.y.max(previous_bottom + height);
    swept
}

/// Snap the player onto the first platform, in scene order, whose top face
/// its feet reached this step. The feet must end at or below the top face and
/// must have started no more than `STEP_UP_HEIGHT` below it, so a player
/// straddling the face lands while one well below it keeps falling.
pub fn resolve_landing(scene: &mut Scene, previous_bottom: f32) -> Option<PlatformId> {
    let supports: Vec<(PlatformId, Aabb)> = scene
        .platforms()
        .filter_map(|p| Some((p.platform_id()?, p.world_aabb()?)))
        .collect();

    let player = scene.player_mut()?;
    let player_box = player.world_aabb()?;
    let swept = swept_box(player_box, previous_bottom);

    let landing = if player.velocity.y <= 0.0 {
        supports.into_iter().find(|(_, platform_box)| {
            let top = platform_box.max.y;
            swept.overlaps(platform_box)
                && player_box.min.y <= top
                && previous_bottom >= top - STEP_UP_HEIGHT
        })
    } else {
        None
    };

    let grounded = landing.is_some();
    if let Some((_, platform_box)) = landing {
        let feet = player.aabb.map_or(0.0, |b| b.min.y);
        player.transform.translation.y = platform_box.max.y - feet;
        player.velocity.y = 0.0;
    }
    if let Some(state) = player.player_state_mut() {
        state.grounded = grounded;
    }

    landing.map(|(id, _)| id)
}
