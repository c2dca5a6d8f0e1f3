//! Simulation constants and tuning parameters.

use glam::Vec3;

// --- Frame timing ---

/// Target frame rate of the loop driver (Hz).
pub const FRAME_RATE: u32 = 60;

/// Largest `dt` a single tick may integrate (seconds).
/// A stalled frame beyond this is truncated so the player cannot tunnel through a platform.
pub const MAX_DT: f32 = 0.05;

// --- Level / pool ---

/// Number of live platforms for the whole run.
pub const POOL_SIZE: usize = 10;

/// Leading platforms placed without jitter or coin so the start is safe.
pub const STATIONARY_PREFIX: usize = 2;

/// Nominal spacing between consecutive platforms along the travel axis.
pub const PLATFORM_SEPARATION: f32 = 4.0;

/// Travel-axis velocity of moving platforms.
pub const CONVEYOR_SPEED: f32 = 3.0;

/// Travel-axis position past which a platform is recycled.
pub const RECYCLE_THRESHOLD: f32 = 10.0;

/// Chance that a recycled or jittered platform carries a coin.
pub const COIN_PROBABILITY: f64 = 0.4;

// --- Jitter ---

/// Lateral (x) jitter half-width.
pub const JITTER_LATERAL: f32 = 1.5;

/// Vertical (y) jitter half-height.
pub const JITTER_VERTICAL: f32 = 0.5;

/// Travel-axis (z) jitter half-depth.
pub const JITTER_TRAVEL: f32 = 0.25;

/// Decimal places kept on every jitter sample.
pub const JITTER_DECIMALS: i32 = 2;

// --- Platform geometry ---

pub const PLATFORM_AABB_MIN: Vec3 = Vec3::new(-1.0, -0.2, -1.0);
pub const PLATFORM_AABB_MAX: Vec3 = Vec3::new(1.0, 0.2, 1.0);
pub const PLATFORM_SCALE: Vec3 = Vec3::new(1.0, 0.2, 1.0);

/// Base height of a platform centre; puts the top face at y = 0 before jitter.
pub const PLATFORM_BASE_Y: f32 = -0.2;

pub const PLATFORM_MESH: usize = 0;
pub const PLATFORM_TEXTURE: usize = 1;

// --- Coin geometry ---

/// Coin offset relative to its platform.
pub const COIN_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

/// Coin rotation relative to its platform (radians).
pub const COIN_ROTATION: Vec3 = Vec3::new(0.0, std::f32::consts::FRAC_PI_4, 0.0);

pub const COIN_HALF_EXTENT: f32 = 0.25;
pub const COIN_MESH: usize = 1;
pub const COIN_TEXTURE: usize = 2;

// --- Player ---

pub const PLAYER_MOUSE_SENSITIVITY: f32 = 0.002;
pub const PLAYER_MAX_SPEED: f32 = 3.0;
pub const PLAYER_FRICTION: f32 = 0.2;
pub const PLAYER_ACCELERATION: f32 = 20.0;

/// Default player box, feet at the node origin.
pub const PLAYER_AABB_MIN: Vec3 = Vec3::new(-0.3, 0.0, -0.3);
pub const PLAYER_AABB_MAX: Vec3 = Vec3::new(0.3, 1.8, 0.3);

/// Upward pitch limit (radians). Tighter than the downward limit.
pub const CAMERA_PITCH_UP: f32 = std::f32::consts::PI / 64.0;

/// Downward pitch limit (radians).
pub const CAMERA_PITCH_DOWN: f32 = std::f32::consts::PI / 4.0;

// --- Physics ---

/// Downward acceleration applied to the player (m/s²).
pub const GRAVITY: f32 = 10.0;

/// Vertical velocity set by a jump (m/s).
pub const JUMP_SPEED: f32 = 6.0;

/// How far below a top face the player's feet may start a step and still
/// land on it (jump apexes inside a platform, stepping onto a raised one).
pub const STEP_UP_HEIGHT: f32 = 0.25;

/// Player height below which the run is over.
pub const FLOOR_Y: f32 = -10.0;

// --- Score ---

/// Period of the score counter (seconds).
pub const SCORE_TICK_SECS: f64 = 0.1;
