//! Runner front end.
//!
//! Drives the run engine on its own thread and bridges JSON-lines player
//! commands to it.

pub mod game_loop;
pub mod ipc;
pub mod state;

pub use runner_core as core;
