//! Buffered input state, owned by the engine and lent to the player systems.

use std::collections::HashSet;

use runner_core::enums::{MoveKey, JUMP_CODE};

#[derive(Debug, Clone, Default)]
pub struct InputState {
    enabled: bool,
    pressed: HashSet<MoveKey>,
    jump_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach input: key and pointer events are accepted from now on.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Detach input and release every key so nothing stays held after focus loss.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.pressed.clear();
        self.jump_requested = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key_down(&mut self, code: &str) {
        if !self.enabled {
            return;
        }
        if code == JUMP_CODE {
            self.jump_requested = true;
        } else if let Some(key) = MoveKey::from_code(code) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = MoveKey::from_code(code) {
            self.pressed.remove(&key);
        }
    }

    pub fn is_pressed(&self, key: MoveKey) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether any horizontal movement key is held.
    pub fn any_movement(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Consume the pending jump request, if any.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }
}
