//! Fix-up applied when the game constructs a player placeholder marker

use super::MarkerConstructedHook;
use crate::core::{Marker, PlayerPose};
use crate::math::map_yaw_to_rotation;
use crate::registry::TypeResolver;
use std::sync::Arc;
use tracing::debug;

/// Turns off-map and off-limits placeholders into the player kind as soon
/// as they are built, facing the player's current yaw
///
/// Markers of any other kind are never touched. Without a client player the
/// marker is left as constructed.
pub struct OffMapConstructionFix {
    resolver: Arc<TypeResolver>,
    enabled: bool,
}

impl OffMapConstructionFix {
    pub fn new(resolver: Arc<TypeResolver>, enabled: bool) -> Self {
        Self { resolver, enabled }
    }
}

impl MarkerConstructedHook for OffMapConstructionFix {
    fn on_marker_constructed(&self, marker: &mut Marker, player: Option<&PlayerPose>) {
        if !self.enabled || !self.resolver.is_off_map_variant(marker) {
            return;
        }
        let Some(player) = player.filter(|p| p.is_finite()) else {
            return;
        };

        marker.rotation = map_yaw_to_rotation(player.yaw);
        if let Some(kind) = self.resolver.resolve_canonical_kind() {
            marker.kind = kind;
        }

        debug!(
            kind = ?marker.kind,
            rotation = marker.rotation,
            "Converted constructed off-map marker"
        );
    }
}
