//! Legend and variant toggle state, derived from the route and the selector

use crate::{
    layers::style::{ModeStyle, Rgba},
    route::{
        model::{RouteResponse, TransportMode},
        variant::RouteVariant,
    },
};
use serde::{Deserialize, Serialize};

/// One row of the mode legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub mode: TransportMode,
    pub label: String,
    pub color: Rgba,
    pub dashed: bool,
}

impl LegendEntry {
    pub fn for_mode(mode: TransportMode) -> Self {
        let style = ModeStyle::for_mode(mode);
        Self {
            mode,
            label: mode.label().to_string(),
            color: style.color,
            dashed: style.dashed,
        }
    }
}

/// The fixed three-mode legend
pub fn legend() -> Vec<LegendEntry> {
    TransportMode::ALL.iter().copied().map(LegendEntry::for_mode).collect()
}

/// The variant toggle, present only when the variants use different modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToggleState {
    pub active: RouteVariant,
    pub efficient_mode: TransportMode,
    pub shortest_mode: TransportMode,
}

impl ToggleState {
    pub fn mode_of(&self, variant: RouteVariant) -> TransportMode {
        match variant {
            RouteVariant::Efficient => self.efficient_mode,
            RouteVariant::Shortest => self.shortest_mode,
        }
    }

    /// Button caption, e.g. "Shortest (air)"
    pub fn caption(&self, variant: RouteVariant) -> String {
        format!("{} ({})", variant.label(), self.mode_of(variant))
    }

    /// Options in display order
    pub fn options(&self) -> [RouteVariant; 2] {
        [RouteVariant::Efficient, RouteVariant::Shortest]
    }

    /// The variant a click on the toggle switches to
    pub fn clicked(&self) -> RouteVariant {
        self.active.other()
    }
}

/// Everything the overlay draws
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    pub legend: Vec<LegendEntry>,
    pub toggle: Option<ToggleState>,
}

impl OverlayState {
    pub fn derive(response: Option<&RouteResponse>, active: RouteVariant) -> Self {
        let Some(response) = response else {
            return Self::default();
        };

        let toggle = response.variants_differ().then(|| ToggleState {
            active,
            efficient_mode: response.efficient_route.transport_mode,
            shortest_mode: response.shortest_route.transport_mode,
        });

        Self {
            legend: legend(),
            toggle,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.legend.is_empty() && self.toggle.is_none()
    }
}
