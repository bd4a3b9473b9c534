//! End-to-end marker list scenarios through the client hooks

use mapfix::prelude::*;
use mapfix::registry::{PLAYER_ID, PLAYER_OFF_LIMITS_ID, PLAYER_OFF_MAP_ID};
use std::borrow::Cow;
use std::sync::Arc;

/// Stand-in for the game's map state: decides which player marker to emit
/// the way vanilla does, asking the bounds predicate through the hook bus
struct FakeMapState {
    registry: Arc<MarkerKindRegistry>,
    origin: DVec2,
    half_size: f64,
    tracking_range: f64,
}

impl FakeMapState {
    fn new(registry: Arc<MarkerKindRegistry>) -> Self {
        Self {
            registry,
            origin: DVec2::ZERO,
            half_size: 64.0,
            tracking_range: 320.0,
        }
    }

    fn kind(&self, id: &Identifier) -> MarkerKind {
        self.registry.lookup(id).unwrap()
    }

    fn produce(&self, hooks: &HookBus, player: &PlayerPose) -> Vec<Marker> {
        let offset = player.position - self.origin;
        let in_map = hooks.check_bounds(player.position, || {
            offset.x.abs() <= self.half_size && offset.y.abs() <= self.half_size
        });

        let scaled = (offset / self.half_size * 127.0).clamp(DVec2::splat(-127.0), DVec2::splat(127.0));
        let construct = |kind: MarkerKind, rotation: u8| {
            let marker = Marker::new(kind, scaled.x as i8, scaled.y as i8, rotation, None);
            hooks.construct_marker(marker, Some(player))
        };

        if in_map {
            vec![construct(self.kind(&PLAYER_ID), map_yaw_to_rotation(player.yaw))]
        } else if offset.abs().max_element() <= self.tracking_range {
            // Placeholders are built facing north
            vec![construct(self.kind(&PLAYER_OFF_MAP_ID), 0)]
        } else {
            Vec::new()
        }
    }

    fn query(&self, hooks: &HookBus, player: PlayerPose) -> Vec<Marker> {
        let query = MarkerListQuery::new(self.origin, Some(player));
        hooks.query_markers(&query, || self.produce(hooks, &player))
    }
}

fn vanilla() -> Arc<MarkerKindRegistry> {
    Arc::new(MarkerKindRegistry::with_vanilla_kinds())
}

#[test]
fn test_off_map_marker_scenario() {
    let registry = vanilla();
    let resolver = Arc::new(TypeResolver::new(registry.clone(), PLAYER_ID.clone()));
    let transformer = DecorationTransformer::new(resolver, MapFixConfig::default());

    let off_map = registry.lookup(&PLAYER_OFF_MAP_ID).unwrap();
    let markers = vec![Marker::new(off_map, 10, -50, 0, None)];
    let query = MarkerListQuery::new(DVec2::ZERO, Some(PlayerPose::new(80.0, -400.0, 90.0)));

    let out = transformer.transform(&markers, &query);

    assert_eq!(out.len(), 1);
    assert!(out[0].kind.matches_id(&PLAYER_ID));
    assert_eq!((out[0].x, out[0].z, out[0].rotation), (10, -50, 4));
}

#[test]
fn test_empty_list_scenario() {
    let client = MapFixClient::initialize(MapFixConfig::default(), vanilla());
    let query = MarkerListQuery::new(DVec2::ZERO, Some(PlayerPose::new(300.0, 0.0, 180.0)));

    let out = client.hooks().query_markers(&query, Vec::new);

    assert_eq!(out.len(), 1);
    assert!(out[0].kind.matches_id(&PLAYER_ID));
    assert_eq!((out[0].x, out[0].z), (127, 0));
    assert_eq!(out[0].rotation, map_yaw_to_rotation(180.0));
}

#[test]
fn test_player_present_scenario() {
    let registry = vanilla();
    let resolver = Arc::new(TypeResolver::new(registry.clone(), PLAYER_ID.clone()));
    let transformer = DecorationTransformer::new(resolver, MapFixConfig::default());

    let player = registry.lookup(&PLAYER_ID).unwrap();
    let markers = vec![Marker::new(player, 3, 4, 0, None)];
    let query = MarkerListQuery::new(DVec2::ZERO, Some(PlayerPose::new(3.0, 4.0, 123.0)));

    let out = transformer.transform(&markers, &query);

    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(&*out, &markers[..]);
}

#[test]
fn test_transform_is_idempotent() {
    let registry = vanilla();
    let resolver = Arc::new(TypeResolver::new(registry.clone(), PLAYER_ID.clone()));
    let transformer = DecorationTransformer::new(resolver, MapFixConfig::default());
    let query = MarkerListQuery::new(DVec2::ZERO, Some(PlayerPose::new(-900.0, 20.0, 300.0)));

    let off_limits = registry.lookup(&PLAYER_OFF_LIMITS_ID).unwrap();
    let markers = vec![Marker::new(off_limits, -127, 3, 0, None)];

    let once = transformer.transform(&markers, &query).into_owned();
    let twice = transformer.transform(&once, &query);

    assert!(matches!(twice, Cow::Borrowed(_)));
    assert_eq!(&*twice, &once[..]);
}

fn walk_away(config: MapFixConfig) -> Vec<Vec<Marker>> {
    let registry = vanilla();
    let client = MapFixClient::initialize(config, registry.clone());
    let hooks = client.hooks();
    let map = FakeMapState::new(registry);

    (0..20)
        .map(|step| {
            let x = step as f64 * 40.0;
            map.query(&hooks, PlayerPose::new(x, x / 4.0, 270.0))
        })
        .collect()
}

#[test]
fn test_walk_away_from_map_keeps_player_icon() {
    for (step, markers) in walk_away(MapFixConfig::default()).iter().enumerate() {
        assert_eq!(markers.len(), 1, "step {step}");
        assert!(markers[0].kind.matches_id(&PLAYER_ID), "step {step}");
        assert_eq!(markers[0].rotation, 12, "step {step}");
    }
}

#[test]
fn test_walk_away_without_bounds_override() {
    let config = MapFixConfig {
        force_player_in_bounds: false,
        ..Default::default()
    };
    let walk = walk_away(config);

    for (step, markers) in walk.iter().enumerate() {
        assert_eq!(markers.len(), 1, "step {step}");
        assert!(markers[0].kind.matches_id(&PLAYER_ID), "step {step}");
        assert_eq!(markers[0].rotation, 12, "step {step}");
    }

    // Beyond tracking range the marker is synthesized on the border
    let last = &walk[19][0];
    assert_eq!(last.x, 127);
    assert_eq!(last.z, 32);
}

#[test]
fn test_bounds_override_only_inside_query() {
    let client = MapFixClient::initialize(MapFixConfig::default(), vanilla());
    let hooks = client.hooks();
    let far = DVec2::new(10_000.0, 0.0);

    assert!(!hooks.check_bounds(far, || false));

    let query = MarkerListQuery::new(DVec2::ZERO, Some(PlayerPose::new(far.x, far.y, 0.0)));
    let mut forced = false;
    hooks.query_markers(&query, || {
        forced = hooks.check_bounds(far, || false);
        Vec::new()
    });
    assert!(forced);

    assert!(!hooks.check_bounds(far, || false));
}

#[test]
fn test_bounds_override_disabled_by_config() {
    let config = MapFixConfig {
        force_player_in_bounds: false,
        ..Default::default()
    };
    let client = MapFixClient::initialize(config, vanilla());
    let hooks = client.hooks();
    let explicit = BoundsCheck::new(DVec2::new(10_000.0, 0.0), true);
    assert!(!hooks.check_bounds_with(&explicit, || false));
}

#[test]
fn test_disabled_client_passes_everything_through() {
    let registry = vanilla();
    let config = MapFixConfig {
        enabled: false,
        ..Default::default()
    };
    let client = MapFixClient::initialize(config, registry.clone());
    let hooks = client.hooks();

    let off_map = registry.lookup(&PLAYER_OFF_MAP_ID).unwrap();
    let original = Marker::new(off_map, 127, 0, 7, None);
    let player = PlayerPose::new(5000.0, 0.0, 90.0);

    assert_eq!(hooks.construct_marker(original.clone(), Some(&player)), original);

    let query = MarkerListQuery::new(DVec2::ZERO, Some(player));
    let out = hooks.query_markers(&query, || vec![original.clone()]);
    assert_eq!(out, vec![original]);
}

#[test]
fn test_banners_survive_rewrite() {
    let registry = vanilla();
    let client = MapFixClient::initialize(MapFixConfig::default(), registry.clone());

    let banner = registry.lookup(&"banner_blue".parse().unwrap()).unwrap();
    let off_map = registry.lookup(&PLAYER_OFF_MAP_ID).unwrap();
    let markers = vec![
        Marker::new(banner.clone(), -40, 12, 0, Some("Camp".into())),
        Marker::new(off_map, 127, 80, 0, None),
    ];
    let query = MarkerListQuery::new(DVec2::ZERO, Some(PlayerPose::new(700.0, 440.0, 0.0)));

    let out = client.hooks().query_markers(&query, || markers.clone());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0], markers[0]);
    assert!(out[1].kind.matches_id(&PLAYER_ID));
    assert_eq!((out[1].x, out[1].z), (127, 80));
}
