pub mod geojson;

pub use geojson::{GeoJsonFeature, GeoJsonGeometry, GeoJsonSource};
