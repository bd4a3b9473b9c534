//! Interception points the host game exposes to the marker fix
//!
//! The host calls into a [`HookBus`] at three places: when a map's marker
//! list is retrieved, when a single marker is constructed, and when it asks
//! whether a position is inside a map's bounds. Hooks are registered once
//! during initialization; dispatch takes no locks.

pub mod bounds;
pub mod construction;
pub mod context;
pub mod transformer;

pub use bounds::PlayerBoundsOverride;
pub use construction::OffMapConstructionFix;
pub use context::{PlayerContext, PlayerContextGuard};
pub use transformer::{DecorationTransformer, ScanSummary, TransformError};

use crate::core::{Marker, MarkerListQuery, PlayerPose};
use glam::DVec2;
use std::sync::Arc;
use tracing::trace;

/// Called with a freshly produced marker list; may return a replacement
pub trait MarkerListHook: Send + Sync {
    fn on_marker_list(&self, query: &MarkerListQuery, markers: &[Marker]) -> Option<Vec<Marker>>;
}

/// Called after a marker is constructed; may amend its fields
pub trait MarkerConstructedHook: Send + Sync {
    fn on_marker_constructed(&self, marker: &mut Marker, player: Option<&PlayerPose>);
}

/// Called for a map bounds predicate; `Some` overrides the real answer
pub trait BoundsCheckHook: Send + Sync {
    fn on_bounds_check(&self, check: &BoundsCheck) -> Option<bool>;
}

/// Input to a bounds predicate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsCheck {
    /// World (x, z) position being tested
    pub position: DVec2,
    /// The check runs on behalf of a player marker query
    pub in_player_context: bool,
}

impl BoundsCheck {
    pub fn new(position: DVec2, in_player_context: bool) -> Self {
        Self {
            position,
            in_player_context,
        }
    }

    /// Check whose context flag is taken from the current thread
    pub fn from_current_context(position: DVec2) -> Self {
        Self::new(position, PlayerContext::is_active())
    }
}

/// Registered hooks, dispatched by the host
#[derive(Default, Clone)]
pub struct HookBus {
    list_hooks: Vec<Arc<dyn MarkerListHook>>,
    constructed_hooks: Vec<Arc<dyn MarkerConstructedHook>>,
    bounds_hooks: Vec<Arc<dyn BoundsCheckHook>>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_list_hook(&mut self, hook: Arc<dyn MarkerListHook>) -> &mut Self {
        self.list_hooks.push(hook);
        self
    }

    pub fn add_constructed_hook(&mut self, hook: Arc<dyn MarkerConstructedHook>) -> &mut Self {
        self.constructed_hooks.push(hook);
        self
    }

    pub fn add_bounds_hook(&mut self, hook: Arc<dyn BoundsCheckHook>) -> &mut Self {
        self.bounds_hooks.push(hook);
        self
    }

    /// Run one marker-list retrieval
    ///
    /// `produce` is the game's own list computation. When the query has a
    /// player it runs inside a player context scope, so bounds checks and
    /// nested queries it triggers can see the flag. Each list hook then sees
    /// the output of the previous one.
    pub fn query_markers<F>(&self, query: &MarkerListQuery, produce: F) -> Vec<Marker>
    where
        F: FnOnce() -> Vec<Marker>,
    {
        let _context = query.player.is_some().then(PlayerContext::enter);

        let mut markers = produce();
        for hook in &self.list_hooks {
            if let Some(replaced) = hook.on_marker_list(query, &markers) {
                trace!(before = markers.len(), after = replaced.len(), "Marker list replaced by hook");
                markers = replaced;
            }
        }
        markers
    }

    /// Run the constructed hooks over a new marker
    pub fn construct_marker(&self, mut marker: Marker, player: Option<&PlayerPose>) -> Marker {
        for hook in &self.constructed_hooks {
            hook.on_marker_constructed(&mut marker, player);
        }
        marker
    }

    /// Answer a bounds predicate, taking the context flag from this thread
    pub fn check_bounds<F>(&self, position: DVec2, real: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        self.check_bounds_with(&BoundsCheck::from_current_context(position), real)
    }

    /// Answer a bounds predicate with an explicit check; the first hook to
    /// return `Some` wins, otherwise `real` decides
    pub fn check_bounds_with<F>(&self, check: &BoundsCheck, real: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        self.bounds_hooks
            .iter()
            .find_map(|hook| hook.on_bounds_check(check))
            .unwrap_or_else(real)
    }

    pub fn list_hook_count(&self) -> usize {
        self.list_hooks.len()
    }

    pub fn constructed_hook_count(&self) -> usize {
        self.constructed_hooks.len()
    }

    pub fn bounds_hook_count(&self) -> usize {
        self.bounds_hooks.len()
    }
}

impl std::fmt::Debug for HookBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookBus")
            .field("list_hooks", &self.list_hooks.len())
            .field("constructed_hooks", &self.constructed_hooks.len())
            .field("bounds_hooks", &self.bounds_hooks.len())
            .finish()
    }
}
