//! Shared trait abstractions
//!
//! The map-rendering library is consumed as a capability: [`SurfaceProvider`]
//! constructs a [`MapSurface`], and everything the reconciler draws goes
//! through that trait. [`LayerOperations`] is the common face of the layers a
//! surface holds.

use crate::{
    core::{config::SurfaceOptions, fitter::CameraRequest},
    data::geojson::GeoJsonSource,
    layers::{line::RouteLineLayer, marker::Marker},
    Result,
};

/// The mutable rendering surface owned by a map session.
///
/// Ids are unique per kind: adding an id that exists, or removing one that
/// does not, is an error. Implementations have no transactional semantics;
/// callers are expected to run one reconciliation pass at a time.
pub trait MapSurface {
    /// Registers a GeoJSON source
    fn add_source(&mut self, source: GeoJsonSource) -> Result<()>;

    /// Removes a source; its layers must be removed first
    fn remove_source(&mut self, source_id: &str) -> Result<()>;

    fn has_source(&self, source_id: &str) -> bool;

    /// Adds a line layer bound to an existing source
    fn add_line_layer(&mut self, layer: RouteLineLayer) -> Result<()>;

    fn remove_layer(&mut self, layer_id: &str) -> Result<()>;

    fn has_layer(&self, layer_id: &str) -> bool;

    /// Places a marker with its visual content and popup
    fn add_marker(&mut self, marker: Marker) -> Result<()>;

    fn remove_marker(&mut self, marker_id: &str) -> Result<()>;

    fn has_marker(&self, marker_id: &str) -> bool;

    /// Starts a camera transition; a later request supersedes this one
    fn apply_camera(&mut self, request: &CameraRequest) -> Result<()>;

    /// Releases the surface and everything on it
    fn destroy(&mut self);
}

/// Constructs map surfaces. Construction is where credentials are checked,
/// so a failure here is a configuration failure.
pub trait SurfaceProvider {
    type Surface: MapSurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<Self::Surface>;
}

/// Trait for layer-like objects held by a surface
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> crate::layers::base::LayerType;

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Style description in the shape map libraries accept
    fn options(&self) -> serde_json::Value;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
}
