use crate::{
    core::{fitter::CameraRequest, reconciler::ReconcileSummary},
    route::variant::RouteVariant,
};
use serde::{Deserialize, Serialize};

/// Map event types that can be emitted by the route map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    /// The surface finished loading and reconciliation is live
    SessionReady,
    /// The surface could not be constructed; the map stays inert
    SessionFailed { reason: String },
    /// The surface was released
    SessionDisposed,
    /// A new route snapshot (or none) replaced the previous one
    RouteChanged { present: bool },
    /// The active variant changed
    VariantChanged { variant: RouteVariant },
    /// A reconciliation pass finished
    Reconciled { summary: ReconcileSummary },
    /// A camera transition was requested from the surface
    CameraRequested { request: CameraRequest },
}

impl MapEvent {
    /// Listener key for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::SessionReady => "ready",
            MapEvent::SessionFailed { .. } => "failed",
            MapEvent::SessionDisposed => "disposed",
            MapEvent::RouteChanged { .. } => "routechange",
            MapEvent::VariantChanged { .. } => "variantchange",
            MapEvent::Reconciled { .. } => "reconciled",
            MapEvent::CameraRequested { .. } => "camera",
        }
    }
}
