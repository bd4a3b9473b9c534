//! Bounds-check override for player marker queries

use super::{BoundsCheck, BoundsCheckHook};

/// Reports the player as inside the map while a player marker query runs,
/// so the game keeps emitting a positioned marker instead of dropping it
#[derive(Debug, Clone, Copy)]
pub struct PlayerBoundsOverride {
    enabled: bool,
}

impl PlayerBoundsOverride {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl BoundsCheckHook for PlayerBoundsOverride {
    fn on_bounds_check(&self, check: &BoundsCheck) -> Option<bool> {
        (self.enabled && check.in_player_context).then_some(true)
    }
}
