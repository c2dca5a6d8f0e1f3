//! Core types and definitions for the platform runner.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the scene graph, the scene specification, commands, snapshots, events,
//! and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod scene;
pub mod spec;
pub mod state;
pub mod types;

pub use error::SceneError;
