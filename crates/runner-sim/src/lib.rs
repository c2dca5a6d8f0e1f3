//! Run engine for the platform runner.
//!
//! Owns the scene graph and the procedural platform pool, runs the player,
//! physics and recycling systems each tick, and produces `RunSnapshot`s.

pub mod engine;
pub mod input;
pub mod level;
pub mod systems;

pub use engine::{RunConfig, RunEngine};
pub use runner_core as core;

#[cfg(test)]
mod tests;
