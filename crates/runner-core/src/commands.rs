//! Input and control commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary, so events
//! arriving between ticks are never lost or applied mid-step.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Input events ---
    /// A key went down, identified by its physical code (e.g. `KeyW`).
    KeyDown { code: String },
    /// A key was released.
    KeyUp { code: String },
    /// Relative pointer motion for look control.
    PointerMove { dx: f32, dy: f32 },
    /// Pointer lock gained or lost; attaches or detaches input.
    PointerLock { locked: bool },

    // --- Run control ---
    /// Start the conveyor and the score clock.
    StartRun,
    /// Stop the conveyor and detach input.
    Pause,
    /// Restart the conveyor and reattach input.
    Resume,
    /// Rebuild the level from the scene specification.
    Restart,
}
