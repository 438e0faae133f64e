use crate::{
    core::config::SurfaceOptions,
    traits::{MapSurface, SurfaceProvider},
    Result,
};
use serde::{Deserialize, Serialize};

/// Lifecycle of the one surface a session owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Uninitialized,
    /// Surface constructed, waiting for its load signal
    Initializing,
    Ready,
    Disposed,
    /// Construction failed; terminal
    Failed,
}

/// What to do with a reconciliation request in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileGate {
    Run,
    /// Held until the surface loads; requests coalesce into one slot
    Deferred,
    /// The session is failed or disposed
    Inert,
}

/// Owns exactly one map surface from mount to dispose.
///
/// Nothing may touch the surface before `Ready`; requests made earlier are
/// held in a pending slot of size one and released by [`mark_loaded`].
///
/// [`mark_loaded`]: MapSession::mark_loaded
pub struct MapSession<S: MapSurface> {
    state: SessionState,
    surface: Option<S>,
    pending: bool,
}

impl<S: MapSurface> MapSession<S> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            surface: None,
            pending: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Constructs the surface. Runs once; later calls are ignored.
    pub fn mount<P>(&mut self, provider: &mut P, options: &SurfaceOptions) -> Result<()>
    where
        P: SurfaceProvider<Surface = S>,
    {
        if self.state != SessionState::Uninitialized {
            log::debug!("mount ignored in state {:?}", self.state);
            return Ok(());
        }

        self.state = SessionState::Initializing;
        match provider.create(options) {
            Ok(surface) => {
                log::info!("map surface created, waiting for load");
                self.surface = Some(surface);
                Ok(())
            }
            Err(e) => {
                log::error!("map surface could not be created: {}", e);
                self.state = SessionState::Failed;
                self.pending = false;
                Err(e)
            }
        }
    }

    /// The surface's "finished loading" signal. Returns whether a deferred
    /// reconciliation should now run.
    pub fn mark_loaded(&mut self) -> bool {
        if self.state != SessionState::Initializing {
            log::debug!("load signal ignored in state {:?}", self.state);
            return false;
        }
        self.state = SessionState::Ready;
        log::info!("map surface ready");
        std::mem::take(&mut self.pending)
    }

    pub fn request_reconcile(&mut self) -> ReconcileGate {
        match self.state {
            SessionState::Ready => ReconcileGate::Run,
            SessionState::Uninitialized | SessionState::Initializing => {
                self.pending = true;
                ReconcileGate::Deferred
            }
            SessionState::Disposed | SessionState::Failed => ReconcileGate::Inert,
        }
    }

    /// Mutable access for writers; only once the surface has loaded
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        if self.state != SessionState::Ready {
            return None;
        }
        self.surface.as_mut()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Releases the surface exactly once. Returns whether this call
    /// disposed the session.
    pub fn dispose(&mut self) -> bool {
        if self.state == SessionState::Disposed {
            return false;
        }
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
        }
        self.state = SessionState::Disposed;
        self.pending = false;
        log::info!("map session disposed");
        true
    }
}

impl<S: MapSurface> Default for MapSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MapSurface> Drop for MapSession<S> {
    fn drop(&mut self) {
        if self.surface.is_some() {
            self.dispose();
        }
    }
}
