//! Tests for the run engine: lifecycle, determinism, pool invariants.

use std::collections::HashSet;

use glam::Vec3;

use runner_core::commands::PlayerCommand;
use runner_core::components::PlatformId;
use runner_core::enums::GamePhase;
use runner_core::events::GameEvent;
use runner_core::spec::SceneSpec;

use crate::engine::{RunConfig, RunEngine};

const SCENE_JSON: &str = r#"{
    "meshes": [{}, {}],
    "textures": ["sky", "stone", "gold"],
    "nodes": [
        { "type": "model", "mesh": 1, "texture": 0, "translation": [0, -20, 0] },
        {
            "type": "player",
            "translation": [0, 0, 0],
            "children": [ { "type": "camera", "translation": [0, 1.6, 0] } ]
        }
    ]
}"#;

fn spec() -> SceneSpec {
    SceneSpec::from_json(SCENE_JSON).unwrap()
}

fn engine(config: RunConfig) -> RunEngine {
    RunEngine::new(config, spec()).unwrap()
}

/// Config where the player can fall forever, so the run never ends.
fn endless(seed: u64) -> RunConfig {
    RunConfig {
        seed,
        floor_y: f32::NEG_INFINITY,
        ..Default::default()
    }
}

const DT: f32 = 1.0 / 60.0;

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine(endless(12345));
    let mut engine_b = engine(endless(12345));

    engine_a.queue_command(PlayerCommand::StartRun);
    engine_b.queue_command(PlayerCommand::StartRun);

    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine(endless(111));
    let mut engine_b = engine(endless(222));

    // Build-time jitter already differs.
    let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce different pools");
}

// ---- Lifecycle ----

#[test]
fn test_ready_phase_is_stationary_and_player_stands() {
    let mut engine = engine(RunConfig::default());
    let before: Vec<Vec3> = engine
        .scene()
        .platforms()
        .map(|p| p.transform.translation)
        .collect();

    let mut snap = engine.tick(DT);
    for _ in 0..120 {
        snap = engine.tick(DT);
    }

    assert_eq!(snap.phase, GamePhase::Ready);
    let after: Vec<Vec3> = snap.platforms.iter().map(|p| p.position).collect();
    assert_eq!(before, after);
    assert!(snap.player.grounded);
    assert!(snap.player.position.y.abs() < 1e-6);
    assert_eq!(snap.player.velocity.y, 0.0);
    assert_eq!(snap.score.score, 0, "score only counts while running");
}

#[test]
fn test_start_pause_resume() {
    let mut engine = engine(endless(1));
    let conveyor = engine.config().conveyor_speed;

    engine.queue_command(PlayerCommand::StartRun);
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, GamePhase::Running);
    assert!(snap.platforms.iter().all(|p| p.velocity.z == conveyor));
    assert!(engine.input().is_enabled());

    engine.queue_command(PlayerCommand::KeyDown {
        code: "KeyW".into(),
    });
    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, GamePhase::Paused);
    assert!(snap.platforms.iter().all(|p| p.velocity.z == 0.0));
    assert!(!engine.input().is_enabled());
    assert!(!engine.input().any_movement(), "pause releases held keys");
    let paused_tick = snap.time.tick;

    // Time does not advance while paused; the pool is kept.
    let snap = engine.tick(DT);
    assert_eq!(snap.time.tick, paused_tick);
    assert_eq!(snap.platforms.len(), engine.config().pool_size);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, GamePhase::Running);
    assert!(snap.time.tick > paused_tick);
    assert!(snap.platforms.iter().all(|p| p.velocity.z == conveyor));
}

#[test]
fn test_start_run_ignored_when_not_ready() {
    let mut engine = engine(endless(1));
    engine.queue_command(PlayerCommand::Resume);
    assert_eq!(engine.tick(DT).phase, GamePhase::Ready);

    engine.queue_command(PlayerCommand::StartRun);
    engine.queue_command(PlayerCommand::Pause);
    engine.queue_command(PlayerCommand::StartRun);
    assert_eq!(engine.tick(DT).phase, GamePhase::Paused);
}

#[test]
fn test_dt_is_clamped() {
    let mut engine = engine(RunConfig::default());
    let max_dt = engine.config().max_dt;

    let snap = engine.tick(5.0);
    assert!((snap.time.elapsed_secs - max_dt as f64).abs() < 1e-6);

    let snap = engine.tick(f32::NAN);
    assert!((snap.time.elapsed_secs - max_dt as f64).abs() < 1e-6);
    assert_eq!(snap.time.tick, 2);
}

#[test]
fn test_out_of_bounds_ends_run_once() {
    let mut engine = engine(RunConfig::default());
    engine.queue_command(PlayerCommand::StartRun);

    let mut out_of_bounds = 0;
    for _ in 0..3000 {
        let snap = engine.tick(DT);
        out_of_bounds += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::OutOfBounds { .. }))
            .count();
        if snap.phase == GamePhase::Over {
            break;
        }
    }
    assert_eq!(engine.phase(), GamePhase::Over, "idle player falls off the conveyor");
    assert_eq!(out_of_bounds, 1);

    let tick = engine.time().tick;
    let snap = engine.tick(DT);
    assert_eq!(snap.time.tick, tick, "nothing runs after the run is over");
    assert!(snap.player.position.y < engine.config().floor_y);
    assert!(snap.platforms.iter().all(|p| p.velocity.z == 0.0));
}

#[test]
fn test_restart_rebuilds_pool() {
    let mut engine = engine(RunConfig::default());
    engine.queue_command(PlayerCommand::StartRun);
    for _ in 0..3000 {
        if engine.tick(DT).phase == GamePhase::Over {
            break;
        }
    }

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, GamePhase::Ready);
    assert_eq!(snap.platforms.len(), engine.config().pool_size);
    assert_eq!(snap.score.score, 0);
    assert!(snap.player.position.y.abs() < 1e-6);
}

#[test]
fn test_pointer_look_requires_enabled_input() {
    let mut engine = engine(RunConfig::default());
    engine.queue_command(PlayerCommand::PointerMove { dx: 100.0, dy: 0.0 });
    assert_eq!(engine.tick(DT).player.yaw, 0.0);

    engine.queue_command(PlayerCommand::PointerLock { locked: true });
    engine.queue_command(PlayerCommand::PointerMove { dx: -100.0, dy: 50.0 });
    let snap = engine.tick(DT);
    assert!((snap.player.yaw - 0.2).abs() < 1e-5);
    assert!((snap.player.pitch + 0.1).abs() < 1e-5);
}

#[test]
fn test_jump_and_land_emits_event() {
    let mut engine = engine(RunConfig::default());
    engine.queue_command(PlayerCommand::PointerLock { locked: true });
    engine.queue_command(PlayerCommand::KeyDown {
        code: "Space".into(),
    });

    let snap = engine.tick(DT);
    assert!(snap.player.velocity.y > 0.0);
    assert!(!snap.player.grounded);

    let mut landed_on = None;
    for _ in 0..300 {
        let snap = engine.tick(DT);
        if let Some(GameEvent::Landed { platform }) = snap.events.first() {
            landed_on = Some(*platform);
            break;
        }
    }
    assert_eq!(landed_on, Some(PlatformId(1)));
    assert!(engine.scene().player().unwrap().player_state().unwrap().grounded);
}

// ---- Pool invariants ----

#[test]
fn test_pool_size_and_identity_invariants() {
    let mut engine = engine(endless(7));
    let pool_size = engine.config().pool_size;
    engine.queue_command(PlayerCommand::StartRun);

    let mut highest_issued = pool_size as u32;
    let mut recycles = 0;
    for _ in 0..6000 {
        let snap = engine.tick(DT);
        assert_eq!(snap.platforms.len(), pool_size);

        let ids: HashSet<PlatformId> = snap.platforms.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), pool_size, "duplicate platform id");

        for event in &snap.events {
            if let GameEvent::PlatformRecycled {
                retired, spawned, ..
            } = event
            {
                assert!(spawned.0 > highest_issued, "ids must be fresh");
                assert!(!ids.contains(retired));
                highest_issued = spawned.0;
                recycles += 1;
            }
        }
    }
    assert!(recycles > 50, "expected steady recycling, got {recycles}");
    assert_eq!(engine.level().platform_count(), highest_issued);
}

#[test]
fn test_recycled_platforms_stay_within_jitter_of_separation() {
    let mut engine = engine(endless(3));
    engine.queue_command(PlayerCommand::StartRun);
    let separation = engine.config().separation;

    for _ in 0..3000 {
        let snap = engine.tick(DT);
        let mut zs: Vec<f32> = snap.platforms.iter().map(|p| p.position.z).collect();
        zs.sort_by(|a, b| b.total_cmp(a));
        for pair in zs.windows(2) {
            let gap = pair[0] - pair[1];
            assert!(
                gap > separation - 0.5 - 1e-3 && gap < separation + 0.5 + 1e-3,
                "gap {gap} outside separation ± travel jitter"
            );
        }
    }
}
