//! Marker kind registry and the player kind resolver
//!
//! Marker kinds are not a fixed enum: the game assigns them at runtime and the
//! concrete values differ between versions. The [`KindRegistry`] trait is the
//! lookup surface the host exposes; [`MarkerKindRegistry`] is an in-process
//! implementation used by the client bootstrap and by tests.

pub mod resolver;

pub use resolver::TypeResolver;

use crate::core::{Identifier, Marker, MarkerKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// The real player icon
pub static PLAYER_ID: Lazy<Identifier> = Lazy::new(|| Identifier::builtin("player"));
/// Player outside the map's render radius
pub static PLAYER_OFF_MAP_ID: Lazy<Identifier> =
    Lazy::new(|| Identifier::builtin("player_off_map"));
/// Player beyond the map's world-border limits
pub static PLAYER_OFF_LIMITS_ID: Lazy<Identifier> =
    Lazy::new(|| Identifier::builtin("player_off_limits"));

/// Vanilla decoration kinds, in registration order
pub const VANILLA_KINDS: &[&str] = &[
    "player",
    "frame",
    "red_marker",
    "blue_marker",
    "target_x",
    "target_point",
    "player_off_map",
    "player_off_limits",
    "mansion",
    "monument",
    "banner_white",
    "banner_orange",
    "banner_magenta",
    "banner_light_blue",
    "banner_yellow",
    "banner_lime",
    "banner_pink",
    "banner_gray",
    "banner_light_gray",
    "banner_cyan",
    "banner_purple",
    "banner_blue",
    "banner_brown",
    "banner_green",
    "banner_red",
    "banner_black",
    "red_x",
    "village_desert",
    "village_plains",
    "village_savanna",
    "village_snowy",
    "village_taiga",
    "jungle_temple",
    "swamp_hut",
    "trial_chambers",
];

/// Lookup of marker kinds by identifier, provided by the host game
pub trait KindRegistry: Send + Sync {
    fn lookup(&self, identifier: &Identifier) -> Option<MarkerKind>;
}

/// The three player-related kinds, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerMarkerKind {
    Player,
    OffMap,
    OffLimits,
}

impl PlayerMarkerKind {
    pub fn from_kind(kind: &MarkerKind) -> Option<Self> {
        if kind.matches_id(&PLAYER_ID) {
            Some(Self::Player)
        } else if kind.matches_id(&PLAYER_OFF_MAP_ID) {
            Some(Self::OffMap)
        } else if kind.matches_id(&PLAYER_OFF_LIMITS_ID) {
            Some(Self::OffLimits)
        } else {
            None
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::OffMap => "off-map",
            Self::OffLimits => "off-limits",
        }
    }
}

/// Whether the marker is one of the off-map placeholders
pub fn is_off_map_variant(marker: &Marker) -> bool {
    matches!(
        PlayerMarkerKind::from_kind(&marker.kind),
        Some(PlayerMarkerKind::OffMap | PlayerMarkerKind::OffLimits)
    )
}

/// Thread-safe in-memory kind registry
#[derive(Default)]
pub struct MarkerKindRegistry {
    kinds: RwLock<HashMap<Identifier, MarkerKind>>,
}

impl MarkerKindRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every vanilla decoration kind registered
    pub fn with_vanilla_kinds() -> Self {
        let registry = Self::new();
        for path in VANILLA_KINDS {
            registry.register(Identifier::builtin(*path));
        }
        debug!(kind_count = registry.len(), "Created registry with vanilla kinds");
        registry
    }

    /// Register a kind, returning the existing one if already registered
    pub fn register(&self, identifier: Identifier) -> MarkerKind {
        let mut kinds = self.kinds.write().unwrap_or_else(|e| e.into_inner());
        let next_id = kinds.len() as u32;
        kinds
            .entry(identifier)
            .or_insert_with_key(|identifier| {
                debug!(%identifier, raw_id = next_id, "Registered marker kind");
                MarkerKind::new(next_id, identifier.clone())
            })
            .clone()
    }

    /// Get the number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered identifiers, ordered by raw id
    pub fn registered_identifiers(&self) -> Vec<Identifier> {
        let kinds = self.kinds.read().unwrap_or_else(|e| e.into_inner());
        let mut sorted: Vec<&MarkerKind> = kinds.values().collect();
        sorted.sort_by_key(|kind| kind.raw_id());
        sorted.into_iter().map(|kind| kind.identifier().clone()).collect()
    }
}

impl KindRegistry for MarkerKindRegistry {
    fn lookup(&self, identifier: &Identifier) -> Option<MarkerKind> {
        self.kinds
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(identifier)
            .cloned()
    }
}

impl std::fmt::Debug for MarkerKindRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerKindRegistry")
            .field("registered_identifiers", &self.registered_identifiers())
            .finish()
    }
}
