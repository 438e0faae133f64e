pub mod overlay;

#[cfg(feature = "egui")]
pub mod widget;

pub use overlay::{legend, LegendEntry, OverlayState, ToggleState};

#[cfg(feature = "egui")]
pub use widget::RouteOverlay;
