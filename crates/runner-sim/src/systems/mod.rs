//! Systems that operate on the scene each tick.
//!
//! Systems are free functions over `&mut Scene` (or `&Scene` for read-only).
//! Persistent state lives in the engine, the level and the nodes themselves.

pub mod physics;
pub mod player;
pub mod score;
pub mod snapshot;
