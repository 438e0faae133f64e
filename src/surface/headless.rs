//! In-memory map surface.
//!
//! Keeps sources, line layers and markers the way a rendering library
//! would, enforces the same id and binding rules, and moves a [`Viewport`]
//! for every camera request. Used by tests and the viewer binary, and as a
//! reference for real surface bridges.

use crate::{
    core::{
        config::SurfaceOptions,
        fitter::CameraRequest,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    data::geojson::GeoJsonSource,
    layers::{
        base::{LayerTrait, LayerType},
        line::RouteLineLayer,
        manager::LayerManager,
        marker::Marker,
    },
    prelude::HashMap,
    traits::{MapSurface, SurfaceProvider},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Serializable picture of everything on a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub style_url: String,
    pub center: LatLng,
    pub zoom: f64,
    /// Source descriptions, sorted by id
    pub sources: Vec<serde_json::Value>,
    /// Line layer descriptions in draw order
    pub layers: Vec<serde_json::Value>,
    pub markers: Vec<serde_json::Value>,
    pub camera_requests: Vec<CameraRequest>,
}

pub struct HeadlessSurface {
    options: SurfaceOptions,
    sources: HashMap<String, GeoJsonSource>,
    layers: LayerManager,
    viewport: Viewport,
    camera_history: Vec<CameraRequest>,
    destroyed: bool,
    destroy_counter: Option<Arc<AtomicUsize>>,
}

impl HeadlessSurface {
    pub fn new(options: SurfaceOptions, size: Point) -> Self {
        let viewport = Viewport::new(options.initial_center, options.initial_zoom, size);
        Self {
            options,
            sources: HashMap::default(),
            layers: LayerManager::new(),
            viewport,
            camera_history: Vec::new(),
            destroyed: false,
            destroy_counter: None,
        }
    }

    fn with_destroy_counter(mut self, counter: Arc<AtomicUsize>) -> Self {
        self.destroy_counter = Some(counter);
        self
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(MapError::Surface("surface has been destroyed".to_string()));
        }
        Ok(())
    }

    fn has_layer_of_type(&self, id: &str, layer_type: LayerType) -> bool {
        self.layers
            .get_layer(id)
            .map(|layer| layer.layer_type() == layer_type)
            .unwrap_or(false)
    }

    fn remove_of_type(&mut self, id: &str, layer_type: LayerType) -> Result<()> {
        self.ensure_alive()?;
        if !self.has_layer_of_type(id, layer_type) {
            return Err(MapError::Layer(format!("no {} '{}' on the surface", layer_type, id)));
        }
        self.layers.remove_layer(id);
        Ok(())
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn source(&self, id: &str) -> Option<&GeoJsonSource> {
        self.sources.get(id)
    }

    pub fn line_layer(&self, id: &str) -> Option<&RouteLineLayer> {
        self.layers
            .get_layer(id)
            .and_then(|layer| layer.as_any().downcast_ref::<RouteLineLayer>())
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.layers
            .get_layer(id)
            .and_then(|layer| layer.as_any().downcast_ref::<Marker>())
    }

    /// Source ids, sorted
    pub fn source_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Line layer ids in draw order
    pub fn layer_ids(&self) -> Vec<String> {
        self.layers.ids_of_type(LayerType::Line)
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.layers.ids_of_type(LayerType::Marker)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn layer_count(&self) -> usize {
        self.layer_ids().len()
    }

    pub fn marker_count(&self) -> usize {
        self.marker_ids().len()
    }

    /// Every camera request applied so far, oldest first
    pub fn camera_history(&self) -> &[CameraRequest] {
        &self.camera_history
    }

    pub fn last_camera(&self) -> Option<&CameraRequest> {
        self.camera_history.last()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let sources = self
            .source_ids()
            .iter()
            .filter_map(|id| self.sources.get(id))
            .map(|source| {
                let mut json = source.to_style_json();
                json["id"] = serde_json::json!(source.id);
                json
            })
            .collect();
        let (markers, layers): (Vec<_>, Vec<_>) = self
            .layers
            .layers()
            .into_iter()
            .partition(|layer| layer.layer_type() == LayerType::Marker);

        SurfaceSnapshot {
            style_url: self.options.style_url.clone(),
            center: self.viewport.center,
            zoom: self.viewport.zoom,
            sources,
            layers: layers.iter().map(|layer| layer.options()).collect(),
            markers: markers.iter().map(|marker| marker.options()).collect(),
            camera_requests: self.camera_history.clone(),
        }
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(SurfaceOptions::default(), Point::new(1024.0, 768.0))
    }
}

impl MapSurface for HeadlessSurface {
    fn add_source(&mut self, source: GeoJsonSource) -> Result<()> {
        self.ensure_alive()?;
        if self.sources.contains_key(&source.id) {
            return Err(MapError::Surface(format!("source '{}' already exists", source.id)));
        }
        self.sources.insert(source.id.clone(), source);
        Ok(())
    }

    fn remove_source(&mut self, source_id: &str) -> Result<()> {
        self.ensure_alive()?;
        if !self.sources.contains_key(source_id) {
            return Err(MapError::Surface(format!("no source '{}' on the surface", source_id)));
        }
        let in_use = self
            .layers
            .layers()
            .iter()
            .filter_map(|layer| layer.as_any().downcast_ref::<RouteLineLayer>())
            .any(|layer| layer.source_id() == source_id);
        if in_use {
            return Err(MapError::Surface(format!(
                "source '{}' is still used by a layer",
                source_id
            )));
        }
        self.sources.remove(source_id);
        Ok(())
    }

    fn has_source(&self, source_id: &str) -> bool {
        self.sources.contains_key(source_id)
    }

    fn add_line_layer(&mut self, layer: RouteLineLayer) -> Result<()> {
        self.ensure_alive()?;
        if !self.sources.contains_key(layer.source_id()) {
            return Err(MapError::Layer(format!(
                "layer '{}' refers to missing source '{}'",
                layer.id(),
                layer.source_id()
            )));
        }
        self.layers.add_layer(Box::new(layer))
    }

    fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        self.remove_of_type(layer_id, LayerType::Line)
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.has_layer_of_type(layer_id, LayerType::Line)
    }

    fn add_marker(&mut self, marker: Marker) -> Result<()> {
        self.ensure_alive()?;
        self.layers.add_layer(Box::new(marker))
    }

    fn remove_marker(&mut self, marker_id: &str) -> Result<()> {
        self.remove_of_type(marker_id, LayerType::Marker)
    }

    fn has_marker(&self, marker_id: &str) -> bool {
        self.has_layer_of_type(marker_id, LayerType::Marker)
    }

    fn apply_camera(&mut self, request: &CameraRequest) -> Result<()> {
        self.ensure_alive()?;
        match request {
            CameraRequest::FitBounds {
                bounds, padding, ..
            } => self.viewport.fit_bounds(bounds, *padding),
            CameraRequest::FlyTo { center, zoom, .. } => self.viewport.set_view(*center, *zoom),
        }
        self.camera_history.push(request.clone());
        Ok(())
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.sources.clear();
        self.layers.clear();
        if let Some(counter) = &self.destroy_counter {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        log::debug!("headless surface destroyed");
    }
}

/// Builds [`HeadlessSurface`]s, refusing to when the access token is missing
pub struct HeadlessProvider {
    size: Point,
    require_token: bool,
    created: usize,
    destroyed: Arc<AtomicUsize>,
}

impl HeadlessProvider {
    pub fn new() -> Self {
        Self {
            size: Point::new(1024.0, 768.0),
            require_token: true,
            created: 0,
            destroyed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Accept surfaces without an access token
    pub fn without_token_check(mut self) -> Self {
        self.require_token = false;
        self
    }

    /// Surfaces this provider has constructed
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Surfaces constructed by this provider that have been destroyed
    pub fn destroy_count(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl Default for HeadlessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceProvider for HeadlessProvider {
    type Surface = HeadlessSurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<HeadlessSurface> {
        let has_token = options
            .access_token
            .as_deref()
            .map(|token| !token.trim().is_empty())
            .unwrap_or(false);
        if self.require_token && !has_token {
            return Err(MapError::Configuration(
                "map access token is not set".to_string(),
            ));
        }

        self.created += 1;
        Ok(HeadlessSurface::new(options.clone(), self.size)
            .with_destroy_counter(self.destroyed.clone()))
    }
}
