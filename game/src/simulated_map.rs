//! Headless stand-in for the game's map state
//!
//! Emits the player marker the way the unpatched game does: the real icon
//! while inside the map, an off-map placeholder within tracking range, and
//! nothing beyond it. All marker construction and bounds checks go through
//! the hook bus so the installed fixes see them.

use mapfix::prelude::*;
use mapfix::registry::{PLAYER_ID, PLAYER_OFF_LIMITS_ID, PLAYER_OFF_MAP_ID};
use std::sync::Arc;
use tracing::trace;

/// A held map centered on `origin`, covering `2 * half_size` blocks
pub struct SimulatedMap {
    registry: Arc<MarkerKindRegistry>,
    pub origin: DVec2,
    pub half_size: f64,
    pub tracking_range: f64,
    pub world_border: f64,
}

impl SimulatedMap {
    pub fn new(registry: Arc<MarkerKindRegistry>, origin: DVec2, half_size: f64) -> Self {
        Self {
            registry,
            origin,
            half_size,
            tracking_range: half_size * 5.0,
            world_border: 30_000_000.0,
        }
    }

    /// Retrieve the map's marker list for `player`, running the list hooks
    pub fn markers(&self, hooks: &HookBus, player: &PlayerPose) -> Vec<Marker> {
        let query = MarkerListQuery::new(self.origin, Some(*player));
        hooks.query_markers(&query, || self.produce(hooks, player))
    }

    fn produce(&self, hooks: &HookBus, player: &PlayerPose) -> Vec<Marker> {
        let offset = player.position - self.origin;
        let in_map = hooks.check_bounds(player.position, || {
            offset.x.abs() <= self.half_size && offset.y.abs() <= self.half_size
        });

        let kind_id = if player.position.abs().max_element() > self.world_border {
            &*PLAYER_OFF_LIMITS_ID
        } else if in_map {
            &*PLAYER_ID
        } else if offset.abs().max_element() <= self.tracking_range {
            &*PLAYER_OFF_MAP_ID
        } else {
            trace!(offset = ?offset, "Player beyond tracking range, no marker");
            return Vec::new();
        };

        let Some(kind) = self.registry.lookup(kind_id) else {
            return Vec::new();
        };
        let rotation = if kind.matches_id(&PLAYER_ID) {
            map_yaw_to_rotation(player.yaw)
        } else {
            0
        };

        let scaled = (offset / self.half_size * 127.0)
            .clamp(DVec2::splat(-127.0), DVec2::splat(127.0));
        let marker = Marker::new(kind, scaled.x as i8, scaled.y as i8, rotation, None);
        vec![hooks.construct_marker(marker, Some(player))]
    }
}
