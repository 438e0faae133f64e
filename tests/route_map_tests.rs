mod common;

use common::*;
use freightmap::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_new_york_london_by_sea() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london()));

    let surface = surface(&map);
    assert_eq!(surface.layer_count(), 6);
    assert_eq!(surface.source_count(), 3);
    assert_eq!(surface.marker_count(), 4);
    assert_eq!(
        surface.source_ids(),
        vec!["route-segment-0", "route-segment-1", "route-segment-2"]
    );
    assert_eq!(
        sorted(surface.marker_ids()),
        vec!["destination", "origin", "waypoint-0", "waypoint-1"]
    );

    // Glow lines draw beneath main lines
    let layers = surface.layer_ids();
    let first_main = layers.iter().position(|id| id.ends_with("-main")).unwrap();
    assert!(layers[..first_main].iter().all(|id| id.ends_with("-glow")));

    assert!(surface.line_layer("route-segment-1-main").unwrap().is_dashed());
    assert!(!surface.line_layer("route-segment-0-main").unwrap().is_dashed());
    assert_eq!(
        surface.line_layer("route-segment-1-glow").unwrap().mode(),
        TransportMode::Sea
    );

    let port = surface.marker("waypoint-0").unwrap();
    assert_eq!(port.kind(), MarkerKind::Port);
    assert_eq!(port.popup().unwrap().text(), "Port Newark\nPort");
    assert_eq!(surface.marker("origin").unwrap().popup().unwrap().title, "New York");
    assert_eq!(surface.marker("destination").unwrap().popup().unwrap().title, "London");

    assert_eq!(surface.camera_history().len(), 1);
    match surface.last_camera() {
        Some(CameraRequest::FitBounds {
            bounds, padding, ..
        }) => {
            assert_eq!(*padding, constants::FIT_PADDING_PX);
            for point in [
                LatLng::new(40.7, -74.0),
                LatLng::new(40.68, -74.15),
                LatLng::new(50.9, -1.4),
                LatLng::new(51.5, -0.1),
            ] {
                assert!(bounds.contains(&point), "{:?} outside {:?}", point, bounds);
            }
        }
        other => panic!("expected FitBounds, got {:?}", other),
    }
}

#[test]
fn test_reconcile_is_idempotent() {
    let (mut map, _provider) = ready_map();
    let route = new_york_london();

    map.set_route(Some(route.clone()));
    let first = surface(&map).snapshot();

    map.set_route(Some(route));
    let second = surface(&map).snapshot();

    assert_eq!(first.sources, second.sources);
    assert_eq!(first.layers, second.layers);
    assert_eq!(first.markers, second.markers);
    let summary = map.last_summary().unwrap();
    assert_eq!(summary.removed, 3 + 6 + 4);
    assert_eq!(summary.failures, 0);
}

#[test]
fn test_each_response_replaces_the_last() {
    let (mut map, _provider) = ready_map();
    let sequence = [
        (new_york_london(), 3, 4),
        (short_haul(("Pune", 18.52, 73.86), ("Mumbai", 19.07, 72.87)), 1, 2),
        (new_york_london_land(), 0, 2),
        (new_york_london_sea_only(), 3, 4),
    ];

    for (response, sources, markers) in sequence {
        map.set_route(Some(response));
        let surface = surface(&map);
        assert_eq!(surface.source_count(), sources);
        assert_eq!(surface.layer_count(), sources * 2);
        assert_eq!(surface.marker_count(), markers);

        let reconciler = map.reconciler();
        assert_eq!(surface.source_ids(), sorted(reconciler.sources().to_vec()));
        assert_eq!(sorted(surface.layer_ids()), sorted(reconciler.layers().to_vec()));
        assert_eq!(sorted(surface.marker_ids()), sorted(reconciler.markers().to_vec()));
    }
}

#[test]
fn test_clearing_route_resets_view() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london()));
    map.set_route(None);

    let surface = surface(&map);
    assert_eq!(surface.source_count(), 0);
    assert_eq!(surface.layer_count(), 0);
    assert_eq!(surface.marker_count(), 0);

    let viewport = surface.viewport();
    assert_eq!(viewport.center, LatLng::new(20.0, 0.0));
    assert_eq!(viewport.zoom, constants::INITIAL_ZOOM);
    assert!(matches!(
        surface.last_camera(),
        Some(CameraRequest::FlyTo { duration_ms, .. }) if *duration_ms == constants::RESET_DURATION_MS
    ));
    assert!(map.overlay_state().is_empty());
}

#[test]
fn test_toggle_draws_other_variant() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london()));
    assert!(map.toggle_available());
    let origin_before = surface(&map).marker("origin").unwrap().options();

    map.toggle_variant();
    assert_eq!(map.active_variant(), RouteVariant::Shortest);

    let surface = surface(&map);
    assert_eq!(surface.source_count(), 3);
    assert_eq!(
        surface.line_layer("route-segment-1-main").unwrap().mode(),
        TransportMode::Air
    );
    assert_eq!(surface.source("route-segment-1").unwrap().data.properties["mode"], "air");
    assert_eq!(surface.marker("waypoint-0").unwrap().kind(), MarkerKind::Airport);
    assert_eq!(surface.marker("origin").unwrap().options(), origin_before);

    let events = map.process_events();
    assert!(events.contains(&MapEvent::VariantChanged {
        variant: RouteVariant::Shortest
    }));
}

#[test]
fn test_toggle_hidden_when_modes_match() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london_sea_only()));
    let passes = surface(&map).camera_history().len();

    assert!(!map.toggle_available());
    assert!(map.overlay_state().toggle.is_none());
    map.toggle_variant();

    assert_eq!(map.active_variant(), RouteVariant::Efficient);
    assert_eq!(surface(&map).camera_history().len(), passes);
}

#[test]
fn test_selecting_active_variant_is_not_a_change() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london()));
    let passes = surface(&map).camera_history().len();

    map.select_variant(RouteVariant::Efficient);
    assert_eq!(surface(&map).camera_history().len(), passes);
}

#[test]
fn test_non_viable_variant_shows_endpoints() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london_land()));

    let surface = surface(&map);
    assert_eq!(surface.source_count(), 0);
    assert_eq!(surface.layer_count(), 0);
    assert_eq!(sorted(surface.marker_ids()), vec!["destination", "origin"]);

    match surface.last_camera() {
        Some(CameraRequest::FitBounds { bounds, .. }) => {
            assert_eq!(bounds.south_west, LatLng::new(40.7, -74.0));
            assert_eq!(bounds.north_east, LatLng::new(51.5, -0.1));
        }
        other => panic!("expected FitBounds, got {:?}", other),
    }
    // The viable alternative is still reachable
    assert!(map.toggle_available());
}

#[test]
fn test_same_origin_and_destination_flies_to_point() {
    let (mut map, _provider) = ready_map();
    let depot = ("Depot", 52.37, 4.9);
    map.set_route(Some(short_haul(depot, depot)));

    let surface = surface(&map);
    assert_eq!(surface.marker_count(), 2);
    assert_eq!(
        surface.last_camera(),
        Some(&CameraRequest::FlyTo {
            center: LatLng::new(52.37, 4.9),
            zoom: constants::SINGLE_POINT_ZOOM,
            duration_ms: constants::FIT_DURATION_MS,
        })
    );
}

#[test]
fn test_out_of_range_endpoints_still_reconcile() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(short_haul(("Nowhere", 120.0, 400.0), ("Depot", 52.37, 4.9))));

    let summary = map.last_summary().expect("pass ran");
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.markers_added, 2);

    let surface = surface(&map);
    assert!(surface.has_marker("origin"));
    assert!(surface.has_marker("destination"));
    assert_eq!(surface.marker("origin").unwrap().position(), LatLng::new(120.0, 400.0));

    assert!(matches!(
        surface.last_camera(),
        Some(CameraRequest::FitBounds { .. })
    ));
    let viewport = surface.viewport();
    assert!(viewport.center.is_finite());
    assert!(viewport.center.lat.abs() <= 90.0 && viewport.center.lng.abs() <= 180.0);
    assert!(viewport.zoom.is_finite());
}

#[test]
fn test_non_finite_coordinates_are_left_out_of_frame() {
    let (mut map, _provider) = ready_map();
    let mut response = (*new_york_london()).clone();
    response.origin_coordinates.longitude = f64::NAN;
    response.detailed_routes[0].waypoints[0].coordinates.latitude = f64::NAN;
    map.set_route(Some(Arc::new(response)));

    let summary = map.last_summary().expect("pass ran");
    assert_eq!(summary.failures, 0);

    let surface = surface(&map);
    assert_eq!(surface.marker_count(), 4);
    assert!(surface.has_marker("origin"));
    assert!(surface.has_marker("destination"));
    match surface.last_camera() {
        Some(CameraRequest::FitBounds { bounds, .. }) => {
            assert!(bounds.south_west.is_finite() && bounds.north_east.is_finite());
            assert!(bounds.contains(&LatLng::new(51.5, -0.1)));
            assert!(bounds.contains(&LatLng::new(50.9, -1.4)));
            assert!(!bounds.contains(&LatLng::new(40.7, -74.0)));
        }
        other => panic!("expected FitBounds, got {:?}", other),
    }
}

#[test]
fn test_nothing_finite_to_frame_skips_camera() {
    let (mut map, _provider) = ready_map();
    let mut response = (*short_haul(("Depot", 52.37, 4.9), ("Hub", 51.92, 4.48))).clone();
    response.origin_coordinates = Coordinates {
        latitude: f64::NAN,
        longitude: f64::NAN,
    };
    response.destination_coordinates = Coordinates {
        latitude: f64::INFINITY,
        longitude: 4.48,
    };
    let cameras_before = surface(&map).camera_history().len();
    map.set_route(Some(Arc::new(response)));

    let summary = map.last_summary().expect("pass ran");
    assert!(summary.camera.is_none());
    assert_eq!(summary.markers_added, 2);
    assert_eq!(summary.sources_added, 1);
    assert_eq!(surface(&map).camera_history().len(), cameras_before);
}

#[test]
fn test_triggers_before_load_are_deferred() {
    init_logging();
    let mut provider = HeadlessProvider::new();
    let mut map: RouteMap<HeadlessSurface> = RouteMap::new(config());
    map.set_route(Some(new_york_london()));
    assert!(map.mount(&mut provider));
    map.toggle_variant();

    let surface_before = surface(&map);
    assert_eq!(surface_before.source_count(), 0);
    assert!(surface_before.camera_history().is_empty());

    map.surface_loaded();
    let surface = surface(&map);
    // Both requests coalesce into one pass with the latest inputs
    assert_eq!(surface.camera_history().len(), 1);
    assert_eq!(surface.source_count(), 3);
    assert_eq!(surface.marker("waypoint-0").unwrap().kind(), MarkerKind::Airport);

    // A second load signal changes nothing
    map.surface_loaded();
    assert_eq!(surface_of(&map).camera_history().len(), 1);
}

fn surface_of(map: &RouteMap<HeadlessSurface>) -> &HeadlessSurface {
    surface(map)
}

#[test]
fn test_missing_token_leaves_map_inert() {
    init_logging();
    let mut provider = HeadlessProvider::new();
    let mut map: RouteMap<HeadlessSurface> = RouteMap::default();

    assert!(!map.mount(&mut provider));
    map.set_route(Some(new_york_london()));
    map.surface_loaded();
    map.toggle_variant();

    assert_eq!(map.state(), SessionState::Failed);
    assert!(map.surface().is_none());
    assert!(map.last_summary().is_none());
    assert_eq!(provider.created_count(), 0);

    let failures = map
        .process_events()
        .into_iter()
        .filter(|event| matches!(event, MapEvent::SessionFailed { .. }))
        .count();
    assert_eq!(failures, 1);
}

#[test]
fn test_nothing_runs_after_unmount() {
    let (mut map, provider) = ready_map();
    map.set_route(Some(new_york_london()));
    map.unmount();

    assert_eq!(map.state(), SessionState::Disposed);
    assert!(map.surface().is_none());
    assert!(map.route().is_none());
    assert_eq!(provider.destroy_count(), 1);

    let summary_before = map.last_summary().cloned();
    map.set_route(Some(new_york_london_sea_only()));
    map.surface_loaded();
    map.unmount();
    drop(map);

    assert_eq!(provider.destroy_count(), 1);
    assert!(summary_before.is_some());
}

#[test]
fn test_mount_cycles_release_every_surface() {
    init_logging();
    let mut provider = HeadlessProvider::new();
    for _ in 0..3 {
        let mut map: RouteMap<HeadlessSurface> = RouteMap::new(config());
        map.mount(&mut provider);
        map.surface_loaded();
        map.set_route(Some(new_york_london()));
        map.unmount();
    }
    // Dropped without unmount
    {
        let mut map: RouteMap<HeadlessSurface> = RouteMap::new(config());
        map.mount(&mut provider);
    }

    assert_eq!(provider.created_count(), 4);
    assert_eq!(provider.destroy_count(), 4);
}

#[test]
fn test_listeners_see_reconciled_passes() {
    let (mut map, _provider) = ready_map();
    let passes = Arc::new(AtomicUsize::new(0));
    let counter = passes.clone();
    map.on("reconciled", move |event| {
        if let MapEvent::Reconciled { summary } = event {
            assert!(summary.camera.is_some());
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    map.set_route(Some(new_york_london()));
    map.toggle_variant();
    map.set_route(None);
    map.process_events();

    assert_eq!(passes.load(Ordering::SeqCst), 3);
}

#[test]
fn test_overlay_follows_selection() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london()));

    let overlay = map.overlay_state();
    assert_eq!(overlay.legend.len(), 3);
    let toggle = overlay.toggle.unwrap();
    assert_eq!(toggle.active, RouteVariant::Efficient);

    map.select_variant(toggle.clicked());
    assert_eq!(map.overlay_state().toggle.unwrap().active, RouteVariant::Shortest);
}

#[test]
fn test_snapshot_is_json() {
    let (mut map, _provider) = ready_map();
    map.set_route(Some(new_york_london()));

    let json = serde_json::to_value(surface(&map).snapshot()).unwrap();
    assert_eq!(json["sources"].as_array().unwrap().len(), 3);
    assert_eq!(json["layers"].as_array().unwrap().len(), 6);
    assert_eq!(json["markers"].as_array().unwrap().len(), 4);
    assert_eq!(json["camera_requests"][0]["type"], "fit_bounds");
}
