#![allow(dead_code)]

use freightmap::prelude::*;
use serde_json::{json, Value};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config() -> RouteMapConfig {
    RouteMapConfig {
        surface: SurfaceOptions {
            access_token: Some("pk.test".to_string()),
            ..SurfaceOptions::default()
        },
        ..RouteMapConfig::default()
    }
}

/// A mounted, loaded map over a headless surface
pub fn ready_map() -> (RouteMap<HeadlessSurface>, HeadlessProvider) {
    init_logging();
    let mut provider = HeadlessProvider::new();
    let mut map = RouteMap::new(config());
    assert!(map.mount(&mut provider));
    map.surface_loaded();
    map.process_events();
    (map, provider)
}

pub fn surface(map: &RouteMap<HeadlessSurface>) -> &HeadlessSurface {
    map.surface().expect("map has a surface")
}

fn segment(mode: &str, from: (&str, f64, f64), to: (&str, f64, f64)) -> Value {
    json!({
        "mode": mode,
        "from_name": from.0,
        "from_coordinates": { "latitude": from.1, "longitude": from.2 },
        "to_name": to.0,
        "to_coordinates": { "latitude": to.1, "longitude": to.2 },
        "distance_km": 100.0,
        "duration_hours": 2.0,
        "emission_kg_co2": 10.0,
        "geometry": [[from.2, from.1], [to.2, to.1]]
    })
}

fn route_info(route_type: &str, mode: &str) -> Value {
    json!({
        "distance_km": 5570.0,
        "duration_hours": 200.0,
        "geometry": [],
        "emission_kg_co2": 100.0,
        "route_type": route_type,
        "transport_mode": mode
    })
}

const NEW_YORK: (&str, f64, f64) = ("New York", 40.7, -74.0);
const PORT_NEWARK: (&str, f64, f64) = ("Port Newark", 40.68, -74.15);
const SOUTHAMPTON: (&str, f64, f64) = ("Port of Southampton", 50.9, -1.4);
const JFK: (&str, f64, f64) = ("JFK International Airport", 40.64, -73.78);
const HEATHROW: (&str, f64, f64) = ("Heathrow Airport", 51.47, -0.45);
const LONDON: (&str, f64, f64) = ("London", 51.5, -0.1);

fn sea_route() -> Value {
    json!({
        "segments": [
            segment("land", NEW_YORK, PORT_NEWARK),
            segment("sea", PORT_NEWARK, SOUTHAMPTON),
            segment("land", SOUTHAMPTON, LONDON),
        ],
        "total_distance_km": 5750.0,
        "total_duration_hours": 210.0,
        "total_emission_kg_co2": 95.0,
        "transport_mode": "sea",
        "is_viable": true,
        "waypoints": [
            { "name": PORT_NEWARK.0, "type": "port", "coordinates": { "latitude": PORT_NEWARK.1, "longitude": PORT_NEWARK.2 } },
            { "name": SOUTHAMPTON.0, "type": "port", "coordinates": { "latitude": SOUTHAMPTON.1, "longitude": SOUTHAMPTON.2 } }
        ]
    })
}

fn air_route() -> Value {
    json!({
        "segments": [
            segment("land", NEW_YORK, JFK),
            segment("air", JFK, HEATHROW),
            segment("land", HEATHROW, LONDON),
        ],
        "total_distance_km": 5600.0,
        "total_duration_hours": 12.0,
        "total_emission_kg_co2": 3400.0,
        "transport_mode": "air",
        "is_viable": true,
        "waypoints": [
            { "name": JFK.0, "type": "airport", "coordinates": { "latitude": JFK.1, "longitude": JFK.2 } },
            { "name": HEATHROW.0, "type": "airport", "coordinates": { "latitude": HEATHROW.1, "longitude": HEATHROW.2 } }
        ]
    })
}

fn non_viable_land_route() -> Value {
    json!({
        "segments": [],
        "total_distance_km": 0.0,
        "total_duration_hours": 0.0,
        "total_emission_kg_co2": 0.0,
        "transport_mode": "land",
        "is_viable": false,
        "waypoints": [],
        "not_viable_reason": "No land connection across the Atlantic"
    })
}

fn response(efficient: &str, shortest: &str, detailed: Vec<Value>) -> RouteResponse {
    serde_json::from_value(json!({
        "origin_name": NEW_YORK.0,
        "origin_coordinates": { "latitude": NEW_YORK.1, "longitude": NEW_YORK.2 },
        "destination_name": LONDON.0,
        "destination_coordinates": { "latitude": LONDON.1, "longitude": LONDON.2 },
        "weight_kg": 1000.0,
        "shortest_route": route_info("shortest", shortest),
        "efficient_route": route_info("efficient", efficient),
        "mode_comparison": [],
        "detailed_routes": detailed
    }))
    .expect("fixture parses")
}

/// New York to London: efficient by sea, shortest by air
pub fn new_york_london() -> Arc<RouteResponse> {
    Arc::new(response("sea", "air", vec![sea_route(), air_route()]))
}

/// New York to London where both variants go by sea
pub fn new_york_london_sea_only() -> Arc<RouteResponse> {
    Arc::new(response("sea", "sea", vec![sea_route()]))
}

/// Efficient variant is land, which cannot cross the ocean
pub fn new_york_london_land() -> Arc<RouteResponse> {
    Arc::new(response("land", "air", vec![non_viable_land_route(), air_route()]))
}

/// A single-segment route between two arbitrary points
pub fn short_haul(from: (&str, f64, f64), to: (&str, f64, f64)) -> Arc<RouteResponse> {
    let value = json!({
        "origin_name": from.0,
        "origin_coordinates": { "latitude": from.1, "longitude": from.2 },
        "destination_name": to.0,
        "destination_coordinates": { "latitude": to.1, "longitude": to.2 },
        "weight_kg": 50.0,
        "shortest_route": route_info("shortest", "land"),
        "efficient_route": route_info("efficient", "land"),
        "detailed_routes": [{
            "segments": [segment("land", from, to)],
            "transport_mode": "land"
        }]
    });
    Arc::new(serde_json::from_value(value).expect("fixture parses"))
}

pub fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}
