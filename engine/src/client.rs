//! Client bootstrap: wires the marker fix hooks into a host

use crate::config::MapFixConfig;
use crate::hooks::{DecorationTransformer, HookBus, OffMapConstructionFix, PlayerBoundsOverride};
use crate::registry::{KindRegistry, TypeResolver};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MOD_NAME: &str = "MapFix";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The initialized marker fix: shared resolver plus the hooks to install
#[derive(Debug)]
pub struct MapFixClient {
    config: MapFixConfig,
    resolver: Arc<TypeResolver>,
    hooks: Arc<HookBus>,
}

impl MapFixClient {
    /// Build the resolver and hooks, pre-caching the player marker kind
    ///
    /// A failed pre-cache is not an error: the kind can still be learned
    /// from the first player marker the game produces.
    pub fn initialize(config: MapFixConfig, registry: Arc<dyn KindRegistry>) -> Self {
        info!("Initializing {} v{}", MOD_NAME, VERSION);

        let resolver = Arc::new(TypeResolver::new(registry, config.player_kind.clone()));
        match resolver.resolve_canonical_kind() {
            Some(kind) => debug!(kind = ?kind, "Pre-cached player marker kind"),
            None => warn!(
                player_kind = %config.player_kind,
                "Failed to pre-cache player marker kind"
            ),
        }

        let mut hooks = HookBus::new();
        hooks
            .add_list_hook(Arc::new(DecorationTransformer::new(
                resolver.clone(),
                config.clone(),
            )))
            .add_constructed_hook(Arc::new(OffMapConstructionFix::new(
                resolver.clone(),
                config.enabled,
            )))
            .add_bounds_hook(Arc::new(PlayerBoundsOverride::new(
                config.enabled && config.force_player_in_bounds,
            )));

        info!("{} v{} initialized successfully", MOD_NAME, VERSION);

        Self {
            config,
            resolver,
            hooks: Arc::new(hooks),
        }
    }

    pub fn config(&self) -> &MapFixConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<TypeResolver> {
        &self.resolver
    }

    /// Hooks for the host to dispatch through; cheap to clone across threads
    pub fn hooks(&self) -> Arc<HookBus> {
        self.hooks.clone()
    }
}
