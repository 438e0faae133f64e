//! Configuration for the map surface, camera fitting and route line paint
//!
//! Values come from three layers, lowest precedence first: built-in defaults,
//! an optional JSON file, then environment variables. Camera timing can also
//! be switched wholesale through a [`MotionProfile`] preset.

use crate::core::constants;
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum MotionProfile {
    Animated,
    Reduced,
    Custom(FitOptions),
}

impl MotionProfile {
    pub fn resolve(&self) -> FitOptions {
        match self {
            Self::Animated => FitOptions::default(),
            Self::Reduced => FitOptions {
                duration_ms: 0,
                reset_duration_ms: 0,
                ..FitOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::Animated
    }
}

/// Options handed to the surface provider when the map is constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOptions {
    /// Credential the rendering library needs; `None` fails construction
    pub access_token: Option<String>,
    pub style_url: String,
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub navigation_control: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        let (lat, lng) = constants::INITIAL_CENTER;
        Self {
            access_token: None,
            style_url: constants::DEFAULT_STYLE_URL.to_string(),
            initial_center: LatLng::new(lat, lng),
            initial_zoom: constants::INITIAL_ZOOM,
            navigation_control: true,
        }
    }
}

/// Camera framing behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub padding_px: f64,
    pub duration_ms: u64,
    pub single_point_zoom: f64,
    pub reset_duration_ms: u64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding_px: constants::FIT_PADDING_PX,
            duration_ms: constants::FIT_DURATION_MS,
            single_point_zoom: constants::SINGLE_POINT_ZOOM,
            reset_duration_ms: constants::RESET_DURATION_MS,
        }
    }
}

/// Paint parameters shared by every segment's glow and main line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyleOptions {
    pub glow_width: f32,
    pub glow_opacity: f32,
    pub main_width: f32,
    pub main_opacity: f32,
    pub dash_pattern: Vec<f32>,
}

impl Default for LineStyleOptions {
    fn default() -> Self {
        Self {
            glow_width: constants::GLOW_LINE_WIDTH,
            glow_opacity: constants::GLOW_LINE_OPACITY,
            main_width: constants::MAIN_LINE_WIDTH,
            main_opacity: constants::MAIN_LINE_OPACITY,
            dash_pattern: constants::DASH_PATTERN.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteMapConfig {
    pub surface: SurfaceOptions,
    pub fit: FitOptions,
    pub lines: LineStyleOptions,
}

impl RouteMapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Overrides values from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overrides values from an arbitrary key lookup
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(constants::ACCESS_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.surface.access_token = Some(token);
        }
        if let Some(style) = lookup(constants::STYLE_URL_ENV).filter(|s| !s.trim().is_empty()) {
            self.surface.style_url = style;
        }
        self
    }

    pub fn with_motion(mut self, profile: MotionProfile) -> Self {
        let padding = self.fit.padding_px;
        let single_point_zoom = self.fit.single_point_zoom;
        self.fit = profile.resolve();
        if !matches!(profile, MotionProfile::Custom(_)) {
            self.fit.padding_px = padding;
            self.fit.single_point_zoom = single_point_zoom;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fit.padding_px.is_finite() || self.fit.padding_px < 0.0 {
            return Err(MapError::Configuration(format!(
                "fit padding must be a non-negative number, got {}",
                self.fit.padding_px
            )));
        }
        if !self.surface.initial_center.is_finite() || !self.surface.initial_center.is_valid() {
            return Err(MapError::Configuration(
                "initial center must be a valid coordinate".to_string(),
            ));
        }
        let lines = &self.lines;
        for opacity in [lines.glow_opacity, lines.main_opacity] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(MapError::Configuration(format!(
                    "line opacity {} outside 0..=1",
                    opacity
                )));
            }
        }
        Ok(())
    }
}
