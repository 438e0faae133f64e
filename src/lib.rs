//! # freightmap
//!
//! A map-state reconciliation engine for multi-modal cargo routes.
//!
//! The crate owns one long-lived map surface and keeps it synchronized with
//! an immutable [`RouteResponse`] snapshot and the selected route variant:
//! per-segment line layers and sources, waypoint and endpoint markers, and a
//! fitted camera. The rendering library itself is consumed through the
//! [`MapSurface`] capability trait.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod route;
pub mod surface;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{FitOptions, LineStyleOptions, MotionProfile, RouteMapConfig, SurfaceOptions},
    fitter::{CameraRequest, ViewportFitter},
    geo::{LatLng, LatLngBounds},
    map::{MapTrigger, RouteMap, TriggerHandle},
    reconciler::{ReconcileSummary, Reconciler},
    session::{MapSession, ReconcileGate, SessionState},
    viewport::Viewport,
};

pub use layers::{line::RouteLineLayer, marker::Marker};

pub use input::{events::MapEvent, handler::EventManager};

pub use route::{
    model::{
        active_detailed_route, Coordinates, ModeComparison, MultiModalRoute, RouteInfo,
        RouteResponse, RouteSegment, TransportMode, Waypoint, WaypointKind,
    },
    variant::{RouteVariant, VariantSelector},
};

pub use surface::headless::{HeadlessProvider, HeadlessSurface, SurfaceSnapshot};

pub use traits::{MapSurface, SurfaceProvider};

pub use ui::overlay::{LegendEntry, OverlayState, ToggleState};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
