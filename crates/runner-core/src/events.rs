//! Events emitted by the simulation for UI feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::PlatformId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A platform scrolled past the threshold and was replaced ahead of the pack.
    PlatformRecycled {
        retired: PlatformId,
        spawned: PlatformId,
        position: Vec3,
        has_coin: bool,
    },
    /// The player came to rest on a platform after being airborne.
    Landed { platform: PlatformId },
    /// The player dropped below the floor; the run is over.
    OutOfBounds { y: f32 },
}
