//! Route data model
//!
//! Immutable value types describing one computed route set, exactly as the
//! route-computation service serializes them. Nothing in here mutates; a new
//! calculation produces a whole new [`RouteResponse`].

use crate::core::geo::LatLng;
use crate::route::variant::RouteVariant;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl From<Coordinates> for LatLng {
    fn from(coordinates: Coordinates) -> Self {
        coordinates.to_lat_lng()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Land,
    Sea,
    Air,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Land, TransportMode::Air, TransportMode::Sea];

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Land => "Land",
            TransportMode::Sea => "Sea",
            TransportMode::Air => "Air",
        }
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Land
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Land => write!(f, "land"),
            TransportMode::Sea => write!(f, "sea"),
            TransportMode::Air => write!(f, "air"),
        }
    }
}

/// One single-mode leg of a multi-modal route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub mode: TransportMode,
    pub from_name: String,
    pub from_coordinates: Coordinates,
    pub to_name: String,
    pub to_coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub emission_kg_co2: f64,
    /// `[longitude, latitude]` positions in traversal order
    #[serde(default)]
    pub geometry: Vec<Vec<f64>>,
}

impl RouteSegment {
    /// Drawable positions, skipping entries without two finite ordinates
    pub fn line_positions(&self) -> Vec<LatLng> {
        self.geometry
            .iter()
            .filter_map(|position| LatLng::from_position(position))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Airport,
    Port,
    #[serde(other)]
    Other,
}

impl WaypointKind {
    pub fn label(&self) -> &'static str {
        match self {
            WaypointKind::Airport => "Airport",
            WaypointKind::Port => "Port",
            WaypointKind::Other => "Transfer point",
        }
    }
}

/// An airport or port where cargo changes mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WaypointKind,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiModalRoute {
    pub segments: Vec<RouteSegment>,
    #[serde(default)]
    pub total_distance_km: f64,
    #[serde(default)]
    pub total_duration_hours: f64,
    #[serde(default)]
    pub total_emission_kg_co2: f64,
    pub transport_mode: TransportMode,
    #[serde(default = "default_true")]
    pub is_viable: bool,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub not_viable_reason: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Summary of one of the two route variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub distance_km: f64,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub geometry: Vec<Vec<f64>>,
    pub emission_kg_co2: f64,
    pub route_type: String,
    #[serde(default)]
    pub transport_mode: TransportMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeComparison {
    pub transport_mode: TransportMode,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub emission_kg_co2: f64,
    #[serde(default)]
    pub is_shortest: bool,
    #[serde(default)]
    pub is_most_efficient: bool,
    #[serde(default = "default_true")]
    pub is_viable: bool,
    #[serde(default)]
    pub not_viable_reason: Option<String>,
}

/// A complete route calculation, replaced wholesale on every new result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub origin_name: String,
    pub origin_coordinates: Coordinates,
    pub destination_name: String,
    pub destination_coordinates: Coordinates,
    pub weight_kg: f64,
    pub shortest_route: RouteInfo,
    pub efficient_route: RouteInfo,
    #[serde(default)]
    pub mode_comparison: Vec<ModeComparison>,
    #[serde(default)]
    pub detailed_routes: Vec<MultiModalRoute>,
}

impl RouteResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn route_info(&self, variant: RouteVariant) -> &RouteInfo {
        match variant {
            RouteVariant::Shortest => &self.shortest_route,
            RouteVariant::Efficient => &self.efficient_route,
        }
    }

    /// Whether the two variants use different modes, i.e. toggling shows
    /// something different
    pub fn variants_differ(&self) -> bool {
        self.shortest_route.transport_mode != self.efficient_route.transport_mode
    }

    pub fn mode_summary(&self, mode: TransportMode) -> Option<&ModeComparison> {
        self.mode_comparison
            .iter()
            .find(|comparison| comparison.transport_mode == mode)
    }

    pub fn origin(&self) -> LatLng {
        self.origin_coordinates.to_lat_lng()
    }

    pub fn destination(&self) -> LatLng {
        self.destination_coordinates.to_lat_lng()
    }

    /// Input-contract violations; none of them reject the snapshot
    pub fn contract_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.weight_kg.is_nan() || self.weight_kg <= 0.0 {
            violations.push(format!("weight_kg must be positive, got {}", self.weight_kg));
        }
        for (label, point) in [("origin", self.origin()), ("destination", self.destination())] {
            if !point.is_finite() {
                violations.push(format!("{} coordinates are not finite", label));
            }
        }

        for mode in TransportMode::ALL {
            let count = self
                .detailed_routes
                .iter()
                .filter(|route| route.transport_mode == mode)
                .count();
            if count > 1 {
                violations.push(format!(
                    "{} detailed routes share transport_mode {}; the first one wins",
                    count, mode
                ));
            }
        }

        for route in &self.detailed_routes {
            if route.is_viable && route.not_viable_reason.is_some() {
                violations.push(format!(
                    "viable {} route carries a not_viable_reason",
                    route.transport_mode
                ));
            }
        }

        violations
    }
}

/// The detailed route drawn for `variant`: the first `detailed_routes` entry
/// whose mode matches that variant's summary mode.
pub fn active_detailed_route(
    response: &RouteResponse,
    variant: RouteVariant,
) -> Option<&MultiModalRoute> {
    let mode = response.route_info(variant).transport_mode;
    response
        .detailed_routes
        .iter()
        .find(|route| route.transport_mode == mode)
}
