//! Client entry point: installs the map marker fix into a headless host
//! and walks a player away from a held map

mod simulated_map;

use mapfix::prelude::*;
use simulated_map::SimulatedMap;
use std::sync::Arc;
use tracing::info;

fn main() {
    // Initialize logging
    mapfix::init_logging();

    let config = MapFixConfig::from_env();

    // With the bounds override the game keeps emitting the real icon, clamped
    // per axis; without it the placeholder conversion and edge synthesis run
    walk(config.clone());
    walk(MapFixConfig {
        force_player_in_bounds: false,
        ..config
    });

    info!("Map walk finished");
}

fn walk(config: MapFixConfig) {
    let force_player_in_bounds = config.force_player_in_bounds;
    let registry = Arc::new(MarkerKindRegistry::with_vanilla_kinds());
    let client = MapFixClient::initialize(config, registry.clone());
    let hooks = client.hooks();

    let map = SimulatedMap::new(registry, DVec2::ZERO, 64.0);
    info!(force_player_in_bounds, "Starting map walk");

    // Walk north-east past the map edge and out of tracking range
    for step in 0..12 {
        let distance = step as f64 * 48.0;
        let player = PlayerPose::new(distance, -distance * 0.6, 225.0 - step as f32 * 10.0);

        for marker in map.markers(&hooks, &player) {
            info!(
                step,
                force_player_in_bounds,
                kind = %marker.kind.identifier(),
                x = marker.x,
                z = marker.z,
                rotation = marker.rotation,
                "Player marker"
            );
        }
    }
}
