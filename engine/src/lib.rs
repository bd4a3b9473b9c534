//! Map marker fix for the voxel game client
//!
//! When the player walks past the edge of a held map, the game replaces the
//! player's icon with an off-map placeholder (or drops it). This crate hooks
//! marker construction and marker-list retrieval so the player keeps the
//! real, correctly rotated icon, pinned to the map border when outside it.

pub mod client;
pub mod config;
pub mod core;
pub mod hooks;
pub mod math;
pub mod registry;

// Re-export commonly used types
pub mod prelude {
    pub use crate::client::MapFixClient;
    pub use crate::config::{ConfigError, MapFixConfig};
    pub use crate::core::{Identifier, Marker, MarkerKind, MarkerListQuery, PlayerPose};
    pub use crate::hooks::{
        BoundsCheck, BoundsCheckHook, DecorationTransformer, HookBus, MarkerConstructedHook,
        MarkerListHook, PlayerContext,
    };
    pub use crate::math::{map_yaw_to_rotation, project_to_edge};
    pub use crate::registry::{KindRegistry, MarkerKindRegistry, TypeResolver};

    pub use glam::DVec2;
}

/// Initialize logging for the client
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
