use crate::core::geo::LatLng;
use crate::route::model::RouteSegment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types a route source carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

impl GeoJsonGeometry {
    /// Builds a line from positions, in `[lng, lat]` order
    pub fn line(points: &[LatLng]) -> Self {
        GeoJsonGeometry::LineString {
            coordinates: points.iter().map(LatLng::to_position).collect(),
        }
    }

    /// Number of positions in the geometry
    pub fn len(&self) -> usize {
        match self {
            GeoJsonGeometry::Point { .. } => 1,
            GeoJsonGeometry::LineString { coordinates } => coordinates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct GeoJsonFeature {
    pub geometry: GeoJsonGeometry,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

/// A named GeoJSON data source, the thing line layers are bound to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonSource {
    pub id: String,
    pub data: GeoJsonFeature,
}

impl GeoJsonSource {
    pub fn new(id: impl Into<String>, geometry: GeoJsonGeometry) -> Self {
        Self {
            id: id.into(),
            data: GeoJsonFeature {
                geometry,
                properties: HashMap::new(),
            },
        }
    }

    /// Line source for one route segment.
    ///
    /// Returns `None` when the segment has fewer than two usable positions,
    /// since a line needs at least two.
    pub fn from_segment(id: impl Into<String>, segment: &RouteSegment) -> Option<Self> {
        let positions = segment.line_positions();
        if positions.len() < 2 {
            return None;
        }

        let mut source = Self::new(id, GeoJsonGeometry::line(&positions));
        let properties = &mut source.data.properties;
        properties.insert("mode".to_string(), serde_json::json!(segment.mode));
        properties.insert("from".to_string(), serde_json::json!(segment.from_name));
        properties.insert("to".to_string(), serde_json::json!(segment.to_name));
        Some(source)
    }

    pub fn geometry(&self) -> &GeoJsonGeometry {
        &self.data.geometry
    }

    /// Source description in the shape map libraries accept
    pub fn to_style_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "geojson",
            "data": self.data,
        })
    }
}
