use crate::route::model::RouteResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two computed route alternatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteVariant {
    /// Emission-optimized
    Efficient,
    /// Distance-optimized
    Shortest,
}

impl RouteVariant {
    pub fn other(self) -> Self {
        match self {
            RouteVariant::Efficient => RouteVariant::Shortest,
            RouteVariant::Shortest => RouteVariant::Efficient,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteVariant::Efficient => "Eco-efficient",
            RouteVariant::Shortest => "Shortest",
        }
    }
}

impl Default for RouteVariant {
    fn default() -> Self {
        RouteVariant::Efficient
    }
}

impl fmt::Display for RouteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteVariant::Efficient => write!(f, "efficient"),
            RouteVariant::Shortest => write!(f, "shortest"),
        }
    }
}

impl FromStr for RouteVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efficient" | "eco" | "eco-efficient" => Ok(RouteVariant::Efficient),
            "shortest" => Ok(RouteVariant::Shortest),
            other => Err(format!("unknown route variant '{}'", other)),
        }
    }
}

/// Single-choice state deciding which detailed route is drawn.
///
/// Independent of map readiness; it never touches the route data.
#[derive(Debug, Clone, Default)]
pub struct VariantSelector {
    active: RouteVariant,
}

impl VariantSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> RouteVariant {
        self.active
    }

    /// Toggling only makes sense when the variants use different modes
    pub fn toggle_available(response: Option<&RouteResponse>) -> bool {
        response.map(RouteResponse::variants_differ).unwrap_or(false)
    }

    /// Sets the variant; returns whether it changed
    pub fn select(&mut self, variant: RouteVariant) -> bool {
        if self.active == variant {
            return false;
        }
        self.active = variant;
        true
    }

    /// Flips to the other variant when a toggle is available for `response`;
    /// returns whether it changed
    pub fn toggle(&mut self, response: Option<&RouteResponse>) -> bool {
        if !Self::toggle_available(response) {
            log::debug!("variant toggle ignored: both variants use the same mode");
            return false;
        }
        self.select(self.active.other())
    }
}
