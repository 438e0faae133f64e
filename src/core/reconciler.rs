//! Synchronizes a map surface with the current route snapshot and variant.
//!
//! Every pass rebuilds from scratch: it tears down everything the previous
//! pass added, then draws the active route again. Artifact ids are derived
//! from positions in the route (segment index, waypoint index), so the next
//! teardown can find exactly what this pass created without diffing.

use crate::{
    core::{
        config::LineStyleOptions,
        fitter::{CameraRequest, ViewportFitter},
        geo::LatLng,
    },
    data::geojson::GeoJsonSource,
    layers::{
        line::{LineRole, RouteLineLayer},
        marker::{Marker, MarkerKind, Popup},
    },
    route::{
        model::{active_detailed_route, MultiModalRoute, RouteResponse},
        variant::RouteVariant,
    },
    traits::MapSurface,
};
use serde::{Deserialize, Serialize};

pub const ORIGIN_MARKER_ID: &str = "origin";
pub const DESTINATION_MARKER_ID: &str = "destination";

pub fn segment_source_id(index: usize) -> String {
    format!("route-segment-{}", index)
}

pub fn segment_layer_id(index: usize, role: LineRole) -> String {
    format!("route-segment-{}-{}", index, role.suffix())
}

pub fn waypoint_marker_id(index: usize) -> String {
    format!("waypoint-{}", index)
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub removed: usize,
    pub sources_added: usize,
    pub layers_added: usize,
    pub markers_added: usize,
    /// Indices of segments whose geometry could not be drawn
    pub skipped_segments: Vec<usize>,
    /// Surface operations that returned an error
    pub failures: usize,
    pub camera: Option<CameraRequest>,
}

/// The only writer of route artifacts on a surface
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    lines: LineStyleOptions,
    sources: Vec<String>,
    layers: Vec<String>,
    markers: Vec<String>,
}

impl Reconciler {
    pub fn new(lines: LineStyleOptions) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Source ids currently on the surface: the last pass's, plus any whose
    /// removal failed
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Layer ids currently on the surface
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Marker ids currently on the surface
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.layers.is_empty() && self.markers.is_empty()
    }

    /// Runs one full pass: teardown, rebuild for the active route, camera.
    ///
    /// Surface errors are logged and counted; they never abort the pass.
    pub fn reconcile<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        response: Option<&RouteResponse>,
        variant: RouteVariant,
        fitter: &ViewportFitter,
    ) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        self.teardown(surface, &mut summary);

        let Some(response) = response else {
            log::debug!("no route; returning to the initial view");
            let request = fitter.reset();
            self.request_camera(surface, request, &mut summary);
            return summary;
        };

        let route = active_detailed_route(response, variant).filter(|route| route.is_viable);
        match route {
            Some(route) => {
                self.draw_segments(surface, route, &mut summary);
                self.draw_waypoints(surface, route, &mut summary);
            }
            None => log::debug!("no viable {} route to draw", variant),
        }

        self.draw_endpoints(surface, response, &mut summary);

        match fitter.fit(&frame_points(response, variant)) {
            Some(request) => self.request_camera(surface, request, &mut summary),
            None => log::warn!("route has no finite coordinates to frame"),
        }

        log::debug!(
            "reconciled {} route: {} sources, {} layers, {} markers, {} removed",
            variant,
            summary.sources_added,
            summary.layers_added,
            summary.markers_added,
            summary.removed
        );
        summary
    }

    /// Removes every artifact of the previous pass; layers before the
    /// sources they are bound to.
    ///
    /// Ids whose removal fails stay tracked and are retried on the next pass.
    fn teardown<S: MapSurface + ?Sized>(&mut self, surface: &mut S, summary: &mut ReconcileSummary) {
        self.layers
            .retain(|id| !removed(surface.remove_layer(id), "layer", id, summary));
        self.sources
            .retain(|id| !removed(surface.remove_source(id), "source", id, summary));
        self.markers
            .retain(|id| !removed(surface.remove_marker(id), "marker", id, summary));
    }

    fn draw_segments<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        route: &MultiModalRoute,
        summary: &mut ReconcileSummary,
    ) {
        for (index, segment) in route.segments.iter().enumerate() {
            let source_id = segment_source_id(index);
            let Some(source) = GeoJsonSource::from_segment(source_id.clone(), segment) else {
                log::warn!(
                    "skipping segment {} ({} -> {}): fewer than two usable positions",
                    index,
                    segment.from_name,
                    segment.to_name
                );
                summary.skipped_segments.push(index);
                continue;
            };

            if let Err(e) = surface.add_source(source) {
                log::warn!("failed to add source {}: {}", source_id, e);
                summary.failures += 1;
                continue;
            }
            track(&mut self.sources, &source_id);
            summary.sources_added += 1;

            for role in [LineRole::Glow, LineRole::Main] {
                let layer_id = segment_layer_id(index, role);
                let layer = RouteLineLayer::new(
                    layer_id.clone(),
                    source_id.clone(),
                    role,
                    segment.mode,
                    &self.lines,
                );
                match surface.add_line_layer(layer) {
                    Ok(()) => {
                        track(&mut self.layers, &layer_id);
                        summary.layers_added += 1;
                    }
                    Err(e) => {
                        log::warn!("failed to add layer {}: {}", layer_id, e);
                        summary.failures += 1;
                    }
                }
            }
        }
    }

    fn draw_waypoints<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        route: &MultiModalRoute,
        summary: &mut ReconcileSummary,
    ) {
        for (index, waypoint) in route.waypoints.iter().enumerate() {
            let popup = Popup::new(waypoint.name.clone()).with_subtitle(waypoint.kind.label());
            let marker = Marker::new(
                waypoint_marker_id(index),
                waypoint.coordinates.to_lat_lng(),
                MarkerKind::from(waypoint.kind),
            )
            .with_popup(popup);
            self.add_marker(surface, marker, summary);
        }
    }

    fn draw_endpoints<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        response: &RouteResponse,
        summary: &mut ReconcileSummary,
    ) {
        let endpoints = [
            (ORIGIN_MARKER_ID, response.origin(), MarkerKind::Origin, &response.origin_name, "Origin"),
            (
                DESTINATION_MARKER_ID,
                response.destination(),
                MarkerKind::Destination,
                &response.destination_name,
                "Destination",
            ),
        ];
        for (id, position, kind, name, role) in endpoints {
            let marker = Marker::new(id.to_string(), position, kind)
                .with_popup(Popup::new(name.clone()).with_subtitle(role));
            self.add_marker(surface, marker, summary);
        }
    }

    fn add_marker<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        marker: Marker,
        summary: &mut ReconcileSummary,
    ) {
        use crate::layers::base::LayerTrait;

        let id = marker.id().to_string();
        match surface.add_marker(marker) {
            Ok(()) => {
                track(&mut self.markers, &id);
                summary.markers_added += 1;
            }
            Err(e) => {
                log::warn!("failed to add marker {}: {}", id, e);
                summary.failures += 1;
            }
        }
    }

    fn request_camera<S: MapSurface + ?Sized>(
        &self,
        surface: &mut S,
        request: CameraRequest,
        summary: &mut ReconcileSummary,
    ) {
        if let Err(e) = surface.apply_camera(&request) {
            log::warn!("camera request failed: {}", e);
            summary.failures += 1;
        }
        summary.camera = Some(request);
    }
}

fn removed(result: crate::Result<()>, kind: &str, id: &str, summary: &mut ReconcileSummary) -> bool {
    match result {
        Ok(()) => {
            summary.removed += 1;
            true
        }
        Err(e) => {
            log::warn!("failed to remove {} {}; retrying next pass: {}", kind, id, e);
            summary.failures += 1;
            false
        }
    }
}

fn track(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|tracked| tracked == id) {
        ids.push(id.to_string());
    }
}

/// Positions a pass frames for `response`: both endpoints plus the active
/// route's waypoints when it is viable
pub fn frame_points(response: &RouteResponse, variant: RouteVariant) -> Vec<LatLng> {
    let mut points = vec![response.origin(), response.destination()];
    if let Some(route) = active_detailed_route(response, variant).filter(|r| r.is_viable) {
        points.extend(route.waypoints.iter().map(|w| w.coordinates.to_lat_lng()));
    }
    points
}
