//! Rewrites player marker lists so the player keeps a real, rotated icon
//!
//! The game swaps the player icon for an off-map or off-limits placeholder
//! once the player leaves the map's tracked area, and drops it entirely when
//! far enough away. The transformer turns placeholders back into the player
//! kind with the player's facing, and adds an edge marker when none exists.

use super::context::PlayerContext;
use super::MarkerListHook;
use crate::config::MapFixConfig;
use crate::core::{Marker, MarkerError, MarkerListQuery, PlayerPose};
use crate::math::{map_yaw_to_rotation, project_to_edge_with_extent};
use crate::registry::{PlayerMarkerKind, TypeResolver};
use glam::DVec2;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Errors raised while rewriting a marker list
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Malformed marker at index {index}: {source}")]
    MalformedMarker {
        index: usize,
        #[source]
        source: MarkerError,
    },

    #[error("Malformed marker query: {0}")]
    MalformedQuery(String),
}

/// What the scan pass found in a marker list
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// A player marker or a placeholder for one is present
    pub has_player: bool,
    /// At least one off-map or off-limits placeholder is present
    pub has_off_map: bool,
}

/// Marker-list hook that restores the player's own icon
pub struct DecorationTransformer {
    resolver: Arc<TypeResolver>,
    config: MapFixConfig,
}

impl DecorationTransformer {
    pub fn new(resolver: Arc<TypeResolver>, config: MapFixConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &Arc<TypeResolver> {
        &self.resolver
    }

    /// Transform a marker list produced for `query`
    ///
    /// Returns the input untouched (borrowed, no allocation) when nothing
    /// needs to change. Any error is logged and also yields the input, so a
    /// broken list never gets worse than what the game produced.
    pub fn transform<'a>(&self, markers: &'a [Marker], query: &MarkerListQuery) -> Cow<'a, [Marker]> {
        if !self.config.enabled {
            return Cow::Borrowed(markers);
        }
        let Some(player) = query.player.as_ref() else {
            return Cow::Borrowed(markers);
        };

        let _context = PlayerContext::enter();
        match self.try_transform(markers, player, query.map_origin) {
            Ok(Some(rewritten)) => Cow::Owned(rewritten),
            Ok(None) => Cow::Borrowed(markers),
            Err(e) => {
                error!(error = %e, marker_count = markers.len(), "Error ensuring player marker exists");
                Cow::Borrowed(markers)
            }
        }
    }

    fn try_transform(
        &self,
        markers: &[Marker],
        player: &PlayerPose,
        map_origin: DVec2,
    ) -> Result<Option<Vec<Marker>>, TransformError> {
        if !player.is_finite() || !map_origin.is_finite() {
            return Err(TransformError::MalformedQuery(format!(
                "non-finite player pose {player:?} or map origin {map_origin:?}"
            )));
        }

        let summary = self.scan(markers)?;
        let canonical = self.resolver.resolve_canonical_kind();
        let synthesize =
            !summary.has_player && self.config.synthesize_missing_player && canonical.is_some();

        if !summary.has_off_map && !synthesize {
            trace!(marker_count = markers.len(), "Marker list needs no changes");
            return Ok(None);
        }

        let rotation = map_yaw_to_rotation(player.yaw);
        let mut rewritten = Vec::with_capacity(markers.len() + usize::from(synthesize));

        for marker in markers {
            if !self.resolver.is_off_map_variant(marker) {
                rewritten.push(marker.clone());
                continue;
            }

            let from = PlayerMarkerKind::from_kind(&marker.kind).map(PlayerMarkerKind::display_name);
            match &canonical {
                Some(kind) => {
                    debug!(from, rotation, x = marker.x, z = marker.z, "Converting marker to player marker");
                    rewritten.push(marker.with_kind_and_rotation(kind.clone(), rotation));
                }
                None => {
                    warn!(from, "Player marker kind unresolved, updating rotation only");
                    rewritten.push(marker.with_kind_and_rotation(marker.kind.clone(), rotation));
                }
            }
        }

        if synthesize {
            if let Some(kind) = canonical {
                let offset = player.position - map_origin;
                let (x, z) = project_to_edge_with_extent(offset, self.config.map_extent);
                debug!(x, z, rotation, "Adding player marker at map edge");
                rewritten.push(Marker::new(kind, x, z, rotation, None));
            }
        }

        Ok(Some(rewritten))
    }

    /// Observe every marker and record which player markers are present
    pub fn scan(&self, markers: &[Marker]) -> Result<ScanSummary, TransformError> {
        let mut summary = ScanSummary::default();
        for (index, marker) in markers.iter().enumerate() {
            marker
                .validate()
                .map_err(|source| TransformError::MalformedMarker { index, source })?;

            self.resolver.observe(marker);

            if self.resolver.is_off_map_variant(marker) {
                summary.has_off_map = true;
                summary.has_player = true;
            } else if self.resolver.is_player_kind(marker)
                || PlayerMarkerKind::from_kind(&marker.kind) == Some(PlayerMarkerKind::Player)
            {
                // A vanilla player icon counts even when another kind is configured
                summary.has_player = true;
            }
        }
        Ok(summary)
    }
}

impl MarkerListHook for DecorationTransformer {
    fn on_marker_list(&self, query: &MarkerListQuery, markers: &[Marker]) -> Option<Vec<Marker>> {
        match self.transform(markers, query) {
            Cow::Owned(rewritten) => Some(rewritten),
            Cow::Borrowed(_) => None,
        }
    }
}
