use crate::{
    core::{
        config::RouteMapConfig,
        fitter::ViewportFitter,
        reconciler::{ReconcileSummary, Reconciler},
        session::{MapSession, ReconcileGate, SessionState},
    },
    input::{EventManager, MapEvent},
    route::{
        model::RouteResponse,
        variant::{RouteVariant, VariantSelector},
    },
    traits::{MapSurface, SurfaceProvider},
    ui::overlay::OverlayState,
};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

/// Discrete inputs the route map reacts to
#[derive(Debug, Clone)]
pub enum MapTrigger {
    /// A new route snapshot, or `None` when the route is cleared
    RouteChanged(Option<Arc<RouteResponse>>),
    VariantSelected(RouteVariant),
    ToggleVariant,
    /// The surface's "finished loading" signal
    SurfaceLoaded,
    Unmount,
}

/// Posts triggers to a [`RouteMap`] from other threads or async callbacks.
///
/// Triggers are applied in order the next time the owner calls
/// [`RouteMap::pump`].
#[derive(Debug, Clone)]
pub struct TriggerHandle {
    sender: Sender<MapTrigger>,
}

impl TriggerHandle {
    /// Returns `false` once the map has been dropped
    pub fn post(&self, trigger: MapTrigger) -> bool {
        self.sender.send(trigger).is_ok()
    }

    /// Posts `trigger` after `delay` from a tokio task
    #[cfg(feature = "tokio-runtime")]
    pub fn post_after(
        &self,
        trigger: MapTrigger,
        delay: std::time::Duration,
    ) -> tokio::task::JoinHandle<bool> {
        let handle = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            handle.post(trigger)
        })
    }
}

/// Keeps one map surface synchronized with a route snapshot and the
/// selected variant.
///
/// Triggers are handled one at a time through `&mut self`, each to
/// completion; triggers from other tasks arrive over a [`TriggerHandle`] and
/// are applied in posting order by [`RouteMap::pump`].
pub struct RouteMap<S: MapSurface> {
    config: RouteMapConfig,
    session: MapSession<S>,
    reconciler: Reconciler,
    fitter: ViewportFitter,
    selector: VariantSelector,
    response: Option<Arc<RouteResponse>>,
    events: EventManager,
    trigger_tx: Sender<MapTrigger>,
    trigger_rx: Receiver<MapTrigger>,
    last_summary: Option<ReconcileSummary>,
}

impl<S: MapSurface> RouteMap<S> {
    pub fn new(config: RouteMapConfig) -> Self {
        let (trigger_tx, trigger_rx) = crossbeam_channel::unbounded();
        Self {
            reconciler: Reconciler::new(config.lines.clone()),
            fitter: ViewportFitter::new(config.fit.clone(), &config.surface),
            config,
            session: MapSession::new(),
            selector: VariantSelector::new(),
            response: None,
            events: EventManager::new(),
            trigger_tx,
            trigger_rx,
            last_summary: None,
        }
    }

    /// Constructs the surface. A configuration failure is logged once and
    /// leaves the map inert; returns whether a surface was created.
    pub fn mount<P>(&mut self, provider: &mut P) -> bool
    where
        P: SurfaceProvider<Surface = S>,
    {
        if self.session.state() != SessionState::Uninitialized {
            log::debug!("route map already mounted");
            return false;
        }
        match self.session.mount(provider, &self.config.surface) {
            Ok(()) => true,
            Err(e) => {
                self.events.emit(MapEvent::SessionFailed {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    pub fn trigger_handle(&self) -> TriggerHandle {
        TriggerHandle {
            sender: self.trigger_tx.clone(),
        }
    }

    /// Applies triggers posted through [`TriggerHandle`]s; returns how many
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(trigger) = self.trigger_rx.try_recv() {
            self.dispatch(trigger);
            applied += 1;
        }
        applied
    }

    /// Handles one trigger to completion
    pub fn dispatch(&mut self, trigger: MapTrigger) {
        self.handle(trigger);
    }

    pub fn set_route(&mut self, response: Option<Arc<RouteResponse>>) {
        self.dispatch(MapTrigger::RouteChanged(response));
    }

    pub fn select_variant(&mut self, variant: RouteVariant) {
        self.dispatch(MapTrigger::VariantSelected(variant));
    }

    pub fn toggle_variant(&mut self) {
        self.dispatch(MapTrigger::ToggleVariant);
    }

    pub fn surface_loaded(&mut self) {
        self.dispatch(MapTrigger::SurfaceLoaded);
    }

    pub fn unmount(&mut self) {
        self.dispatch(MapTrigger::Unmount);
    }

    fn handle(&mut self, trigger: MapTrigger) {
        match trigger {
            MapTrigger::RouteChanged(response) => {
                if let Some(response) = &response {
                    for violation in response.contract_violations() {
                        log::warn!("route input contract violated: {}", violation);
                    }
                }
                if self.session.state() == SessionState::Disposed {
                    log::debug!("route change after unmount ignored");
                    return;
                }
                self.events.emit(MapEvent::RouteChanged {
                    present: response.is_some(),
                });
                self.response = response;
                self.request_pass();
            }
            MapTrigger::VariantSelected(variant) => {
                if self.selector.select(variant) {
                    self.variant_changed();
                }
            }
            MapTrigger::ToggleVariant => {
                if self.selector.toggle(self.response.as_deref()) {
                    self.variant_changed();
                }
            }
            MapTrigger::SurfaceLoaded => {
                let was_ready = self.session.is_ready();
                let pending = self.session.mark_loaded();
                if !was_ready && self.session.is_ready() {
                    self.events.emit(MapEvent::SessionReady);
                }
                if pending {
                    self.run_pass();
                }
            }
            MapTrigger::Unmount => {
                if self.session.dispose() {
                    self.response = None;
                    self.events.emit(MapEvent::SessionDisposed);
                }
            }
        }
    }

    fn variant_changed(&mut self) {
        let variant = self.selector.active();
        log::debug!("variant changed to {}", variant);
        self.events.emit(MapEvent::VariantChanged { variant });
        self.request_pass();
    }

    fn request_pass(&mut self) {
        match self.session.request_reconcile() {
            ReconcileGate::Run => self.run_pass(),
            ReconcileGate::Deferred => log::debug!("surface not loaded; reconciliation deferred"),
            ReconcileGate::Inert => log::debug!(
                "reconciliation skipped in state {:?}",
                self.session.state()
            ),
        }
    }

    fn run_pass(&mut self) {
        let Some(surface) = self.session.surface_mut() else {
            return;
        };
        let summary = self.reconciler.reconcile(
            surface,
            self.response.as_deref(),
            self.selector.active(),
            &self.fitter,
        );

        if let Some(request) = &summary.camera {
            self.events.emit(MapEvent::CameraRequested {
                request: request.clone(),
            });
        }
        self.events.emit(MapEvent::Reconciled {
            summary: summary.clone(),
        });
        self.last_summary = Some(summary);
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn config(&self) -> &RouteMapConfig {
        &self.config
    }

    pub fn route(&self) -> Option<&RouteResponse> {
        self.response.as_deref()
    }

    pub fn active_variant(&self) -> RouteVariant {
        self.selector.active()
    }

    /// Whether the variant toggle should be shown
    pub fn toggle_available(&self) -> bool {
        VariantSelector::toggle_available(self.response.as_deref())
    }

    pub fn overlay_state(&self) -> OverlayState {
        OverlayState::derive(self.response.as_deref(), self.selector.active())
    }

    /// The surface, for inspection; `None` before mount and after unmount
    pub fn surface(&self) -> Option<&S> {
        self.session.surface()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn last_summary(&self) -> Option<&ReconcileSummary> {
        self.last_summary.as_ref()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }
}

impl<S: MapSurface> Default for RouteMap<S> {
    fn default() -> Self {
        Self::new(RouteMapConfig::default())
    }
}
