//! Resolution and caching of the canonical player marker kind

use super::{is_off_map_variant, KindRegistry, PLAYER_ID};
use crate::core::{Identifier, Marker, MarkerKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Holds the one marker kind that means "this icon is the real player"
///
/// The kind is set at most once, either by a registry lookup or by observing
/// a player marker the game produced, and never changes afterwards. Racing
/// writers are harmless: the first one wins and the rest are no-ops. The
/// registry is consulted at most once per resolver.
pub struct TypeResolver {
    registry: Option<Arc<dyn KindRegistry>>,
    player_id: Identifier,
    canonical: OnceLock<MarkerKind>,
    lookup_attempted: AtomicBool,
}

impl TypeResolver {
    /// Resolver backed by a registry, looking up `player_id`
    pub fn new(registry: Arc<dyn KindRegistry>, player_id: Identifier) -> Self {
        Self {
            registry: Some(registry),
            player_id,
            canonical: OnceLock::new(),
            lookup_attempted: AtomicBool::new(false),
        }
    }

    /// Resolver that only learns the player kind from observed markers
    pub fn observation_only() -> Self {
        Self {
            registry: None,
            player_id: PLAYER_ID.clone(),
            canonical: OnceLock::new(),
            lookup_attempted: AtomicBool::new(false),
        }
    }

    /// The identifier treated as the player kind
    pub fn player_id(&self) -> &Identifier {
        &self.player_id
    }

    /// The cached kind, without triggering a lookup
    pub fn cached_kind(&self) -> Option<&MarkerKind> {
        self.canonical.get()
    }

    /// Whether the one registry lookup has already been spent
    pub fn lookup_attempted(&self) -> bool {
        self.lookup_attempted.load(Ordering::Acquire)
    }

    /// Get the canonical player kind, looking it up on first use
    pub fn resolve_canonical_kind(&self) -> Option<MarkerKind> {
        if let Some(kind) = self.canonical.get() {
            return Some(kind.clone());
        }

        // Only the first caller gets to query the registry
        if !self.lookup_attempted.swap(true, Ordering::AcqRel) {
            self.lookup_from_registry();
        }

        self.canonical.get().cloned()
    }

    fn lookup_from_registry(&self) {
        let Some(registry) = &self.registry else {
            debug!("No kind registry available, relying on observed player markers");
            return;
        };

        match registry.lookup(&self.player_id) {
            Some(kind) => {
                if self.canonical.set(kind).is_ok() {
                    debug!(player_id = %self.player_id, "Cached player marker kind from registry");
                }
            }
            None => {
                warn!(
                    player_id = %self.player_id,
                    "Player marker kind not found in registry"
                );
            }
        }
    }

    /// Learn the player kind from a marker the game produced
    pub fn observe(&self, marker: &Marker) {
        if self.canonical.get().is_some() || !self.is_player_kind(marker) {
            return;
        }
        if self.canonical.set(marker.kind.clone()).is_ok() {
            debug!(kind = ?marker.kind, "Cached player marker kind from game instance");
        }
    }

    /// Whether the marker is a regular player marker
    pub fn is_player_kind(&self, marker: &Marker) -> bool {
        marker.kind.matches_id(&self.player_id)
    }

    /// Whether the marker is an off-map or off-limits player placeholder
    pub fn is_off_map_variant(&self, marker: &Marker) -> bool {
        is_off_map_variant(marker)
    }
}

impl std::fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeResolver")
            .field("player_id", &self.player_id)
            .field("canonical", &self.canonical.get())
            .field("lookup_attempted", &self.lookup_attempted())
            .finish()
    }
}
