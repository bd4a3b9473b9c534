//! Player state and the map query the engine receives

use glam::DVec2;

/// Position and facing of the local player, as read from client state
///
/// `position` is the world (x, z) position; `yaw` is in degrees using the
/// game's convention (0 = south, 90 = west).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: DVec2,
    pub yaw: f32,
}

impl PlayerPose {
    pub fn new(x: f64, z: f64, yaw: f32) -> Self {
        Self {
            position: DVec2::new(x, z),
            yaw,
        }
    }

    /// Check if all fields are finite (not NaN or infinity)
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.yaw.is_finite()
    }
}

/// Context for one marker-list retrieval
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarkerListQuery {
    /// World (x, z) of the map's center
    pub map_origin: DVec2,
    /// The requesting player, if the client currently has one
    pub player: Option<PlayerPose>,
}

impl MarkerListQuery {
    pub fn new(map_origin: DVec2, player: Option<PlayerPose>) -> Self {
        Self { map_origin, player }
    }

    /// Player offset from the map's origin in world units
    pub fn player_offset(&self) -> Option<DVec2> {
        self.player.map(|p| p.position - self.map_origin)
    }
}
