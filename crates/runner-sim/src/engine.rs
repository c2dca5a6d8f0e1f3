//! Run engine: the core of the game.
//!
//! `RunEngine` owns the scene graph, the level pool, the input state and the
//! RNG, processes buffered commands, runs all systems and produces
//! `RunSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use runner_core::commands::PlayerCommand;
use runner_core::constants::*;
use runner_core::enums::GamePhase;
use runner_core::error::Result;
use runner_core::events::GameEvent;
use runner_core::scene::Scene;
use runner_core::spec::{SceneBuilder, SceneSpec};
use runner_core::state::RunSnapshot;
use runner_core::types::SimTime;

use crate::input::InputState;
use crate::level::Level;
use crate::systems;
use crate::systems::score::ScoreClock;

/// Configuration for starting a new run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// RNG seed for determinism. Same seed = same run.
    pub seed: u64,
    pub pool_size: usize,
    pub stationary_prefix: usize,
    pub separation: f32,
    pub conveyor_speed: f32,
    pub recycle_threshold: f32,
    pub coin_probability: f64,
    /// Upper bound on a single tick's `dt` (seconds).
    pub max_dt: f32,
    /// Player height below which the run is over.
    pub floor_y: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool_size: POOL_SIZE,
            stationary_prefix: STATIONARY_PREFIX,
            separation: PLATFORM_SEPARATION,
            conveyor_speed: CONVEYOR_SPEED,
            recycle_threshold: RECYCLE_THRESHOLD,
            coin_probability: COIN_PROBABILITY,
            max_dt: MAX_DT,
            floor_y: FLOOR_Y,
        }
    }
}

/// The run engine. Owns the scene and all run state.
pub struct RunEngine {
    config: RunConfig,
    spec: SceneSpec,
    scene: Scene,
    level: Level,
    input: InputState,
    rng: ChaCha8Rng,
    time: SimTime,
    phase: GamePhase,
    score: ScoreClock,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

/// Resolve the scene description and populate the platform pool.
fn build_world(spec: &SceneSpec, config: &RunConfig, rng: &mut ChaCha8Rng) -> Result<(Scene, Level)> {
    let mut scene = SceneBuilder::new(spec).build()?;
    let mut level = Level::new(config);
    level.build(&mut scene, rng);
    Ok((scene, level))
}

impl RunEngine {
    /// Resolve `spec` and build the level. No engine exists, and so nothing
    /// runs, unless the whole scene description resolves.
    pub fn new(config: RunConfig, spec: SceneSpec) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let (scene, level) = build_world(&spec, &config, &mut rng)?;

        Ok(Self {
            config,
            spec,
            scene,
            level,
            input: InputState::new(),
            rng,
            time: SimTime::default(),
            phase: GamePhase::default(),
            score: ScoreClock::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the run by `dt` seconds of wall-clock time and return the
    /// resulting snapshot. `dt` is clamped to `max_dt`.
    pub fn tick(&mut self, dt: f32) -> RunSnapshot {
        self.process_commands();

        if matches!(self.phase, GamePhase::Ready | GamePhase::Running) {
            let dt = self.clamp_dt(dt);
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.scene, &self.time, self.phase, &self.score, events)
    }

    /// The live scene graph, for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreClock {
        &self.score
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Mutable scene access for tests that stage positions directly.
    #[cfg(test)]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { code } => self.input.key_down(&code),
            PlayerCommand::KeyUp { code } => self.input.key_up(&code),
            PlayerCommand::PointerMove { dx, dy } => {
                if self.input.is_enabled() {
                    if let Some(player) = self.scene.player_mut() {
                        systems::player::apply_look(player, dx, dy);
                    }
                }
            }
            PlayerCommand::PointerLock { locked } => {
                if locked {
                    self.input.enable();
                } else {
                    self.input.disable();
                }
            }
            PlayerCommand::StartRun => {
                if self.phase == GamePhase::Ready {
                    self.level.set_moving(&mut self.scene, true);
                    self.input.enable();
                    self.phase = GamePhase::Running;
                    log::info!("run started");
                } else {
                    log::warn!("StartRun ignored in {:?}", self.phase);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Running {
                    self.level.set_moving(&mut self.scene, false);
                    self.input.disable();
                    self.phase = GamePhase::Paused;
                    log::info!("run paused at {}", self.score.view().elapsed_display);
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.level.set_moving(&mut self.scene, true);
                    self.input.enable();
                    self.phase = GamePhase::Running;
                    log::info!("run resumed");
                }
            }
            PlayerCommand::Restart => self.restart(),
        }
    }

    /// Rebuild scene and pool from the stored scene description.
    fn restart(&mut self) {
        match build_world(&self.spec, &self.config, &mut self.rng) {
            Ok((scene, level)) => {
                self.scene = scene;
                self.level = level;
                self.input.disable();
                self.time = SimTime::default();
                self.score = ScoreClock::default();
                self.phase = GamePhase::Ready;
                log::info!("level restarted");
            }
            Err(e) => log::error!("restart failed, keeping current run: {e}"),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Player horizontal intent
        if let Some(player) = self.scene.player_mut() {
            systems::player::update_horizontal(player, &self.input, dt);
        }
        // 2. Integration, gravity, landing
        let landed = systems::physics::run(&mut self.scene, &mut self.input, dt);
        self.events.extend(landed);
        // 3. Recycle platforms that scrolled past the threshold
        let recycled = self.level.recycle(&mut self.scene, &mut self.rng);
        self.events.extend(recycled);
        // 4. Score
        if self.phase == GamePhase::Running {
            self.score.advance(dt as f64);
        }
        // 5. Out of bounds
        self.check_floor();
    }

    fn check_floor(&mut self) {
        let Some(y) = self.scene.player().map(|p| p.transform.translation.y) else {
            return;
        };
        if y < self.config.floor_y {
            self.level.set_moving(&mut self.scene, false);
            self.input.disable();
            self.phase = GamePhase::Over;
            self.events.push(GameEvent::OutOfBounds { y });
            log::info!(
                "run over: fell to {y:.2} after {}",
                self.score.view().elapsed_display
            );
        }
    }
}
