//! Prelude module for common freightmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use freightmap::prelude::*;`

pub use crate::core::{
    config::{FitOptions, LineStyleOptions, MotionProfile, RouteMapConfig, SurfaceOptions},
    fitter::{CameraRequest, ViewportFitter},
    geo::{LatLng, LatLngBounds, Point},
    map::{MapTrigger, RouteMap, TriggerHandle},
    reconciler::{ReconcileSummary, Reconciler},
    session::{MapSession, ReconcileGate, SessionState},
    viewport::Viewport,
};

pub use crate::core::constants;

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    line::{LineRole, RouteLineLayer},
    manager::LayerManager,
    marker::{Marker, MarkerKind, Popup},
    style::{ModeStyle, Rgba},
};

pub use crate::data::geojson::{GeoJsonFeature, GeoJsonGeometry, GeoJsonSource};

pub use crate::input::{events::MapEvent, handler::EventManager};

pub use crate::route::{
    model::{
        active_detailed_route, Coordinates, ModeComparison, MultiModalRoute, RouteInfo,
        RouteResponse, RouteSegment, TransportMode, Waypoint, WaypointKind,
    },
    variant::{RouteVariant, VariantSelector},
};

pub use crate::surface::headless::{HeadlessProvider, HeadlessSurface, SurfaceSnapshot};

pub use crate::traits::{MapSurface, SurfaceProvider};

pub use crate::ui::overlay::{LegendEntry, OverlayState, ToggleState};

#[cfg(feature = "egui")]
pub use crate::ui::widget::RouteOverlay;

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
