//! Player controller: horizontal movement and camera look.
//!
//! Vertical motion belongs to the physics system; this module only touches
//! the x/z velocity, the player's yaw and the camera's pitch.

use glam::{Vec2, Vec3};

use runner_core::constants::{CAMERA_PITCH_DOWN, CAMERA_PITCH_UP};
use runner_core::enums::MoveKey;
use runner_core::scene::Node;

use crate::input::InputState;

/// Horizontal forward direction for a yaw (faces -z at yaw 0).
pub fn forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right direction for a yaw.
pub fn right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Accelerate from held keys, apply friction when idle, clamp speed.
pub fn update_horizontal(player: &mut Node, input: &InputState, dt: f32) {
    let Some(tuning) = player.player_state().map(|s| s.tuning) else {
        return;
    };
    let yaw = player.transform.rotation.y;
    let forward = forward(yaw);
    let right = right(yaw);

    let mut acc = Vec3::ZERO;
    if input.is_pressed(MoveKey::Forward) {
        acc += forward;
    }
    if input.is_pressed(MoveKey::Back) {
        acc -= forward;
    }
    if input.is_pressed(MoveKey::Right) {
        acc += right;
    }
    if input.is_pressed(MoveKey::Left) {
        acc -= right;
    }

    let mut xz = Vec2::new(player.velocity.x, player.velocity.z)
        + Vec2::new(acc.x, acc.z) * dt * tuning.acceleration;

    if !input.any_movement() {
        xz *= 1.0 - tuning.friction;
    }

    let speed = xz.length();
    if speed > tuning.max_speed {
        xz *= tuning.max_speed / speed;
    }

    player.velocity.x = xz.x;
    player.velocity.z = xz.y;
}

/// Apply a pointer delta: yaw on the player, pitch on its camera.
pub fn apply_look(player: &mut Node, dx: f32, dy: f32) {
    let Some(sensitivity) = player.player_state().map(|s| s.tuning.mouse_sensitivity) else {
        return;
    };

    let yaw = player.transform.rotation.y - dx * sensitivity;
    player.transform.rotation.y = yaw.rem_euclid(std::f32::consts::TAU);

    if let Some(camera) = player.camera_mut() {
        let pitch = camera.transform.rotation.x - dy * sensitivity;
        camera.transform.rotation.x = pitch.clamp(-CAMERA_PITCH_DOWN, CAMERA_PITCH_UP);
    }
}
