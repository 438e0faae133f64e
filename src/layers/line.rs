use crate::{
    core::config::LineStyleOptions,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    layers::style::ModeStyle,
    route::model::TransportMode,
};
use serde::{Deserialize, Serialize};

/// Which of the two stacked lines of a segment this layer is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    Glow,
    Main,
}

impl LineRole {
    pub fn suffix(&self) -> &'static str {
        match self {
            LineRole::Glow => "glow",
            LineRole::Main => "main",
        }
    }

    fn z_index(&self) -> i32 {
        match self {
            LineRole::Glow => 0,
            LineRole::Main => 1,
        }
    }
}

/// Paint of a line layer, in the units map libraries use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePaint {
    pub color: String,
    pub width: f32,
    pub opacity: f32,
    /// Empty for a solid line
    pub dash_array: Vec<f32>,
    pub blur: f32,
}

/// A named line layer drawn from one GeoJSON source
pub struct RouteLineLayer {
    properties: LayerProperties,
    source_id: String,
    role: LineRole,
    mode: TransportMode,
    paint: LinePaint,
}

impl RouteLineLayer {
    pub fn new(
        id: String,
        source_id: String,
        role: LineRole,
        mode: TransportMode,
        options: &LineStyleOptions,
    ) -> Self {
        let style = ModeStyle::for_mode(mode);
        let paint = match role {
            LineRole::Glow => LinePaint {
                color: style.color.to_hex(),
                width: options.glow_width,
                opacity: options.glow_opacity,
                dash_array: Vec::new(),
                blur: options.glow_width / 2.0,
            },
            LineRole::Main => LinePaint {
                color: style.color.to_hex(),
                width: options.main_width,
                opacity: options.main_opacity,
                dash_array: if style.dashed {
                    options.dash_pattern.clone()
                } else {
                    Vec::new()
                },
                blur: 0.0,
            },
        };
        let properties = LayerProperties::new(id, LayerType::Line)
            .with_z_index(role.z_index())
            .with_opacity(paint.opacity);

        Self {
            properties,
            source_id,
            role,
            mode,
            paint,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn role(&self) -> LineRole {
        self.role
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn paint(&self) -> &LinePaint {
        &self.paint
    }

    pub fn is_dashed(&self) -> bool {
        !self.paint.dash_array.is_empty()
    }
}

impl LayerTrait for RouteLineLayer {
    crate::impl_layer_trait!(RouteLineLayer, properties);

    fn options(&self) -> serde_json::Value {
        let mut paint = serde_json::json!({
            "line-color": self.paint.color,
            "line-width": self.paint.width,
            "line-opacity": self.opacity(),
        });
        if self.paint.blur > 0.0 {
            paint["line-blur"] = serde_json::json!(self.paint.blur);
        }
        if !self.paint.dash_array.is_empty() {
            paint["line-dasharray"] = serde_json::json!(self.paint.dash_array);
        }
        serde_json::json!({
            "id": self.properties.id,
            "type": "line",
            "source": self.source_id,
            "layout": { "line-join": "round", "line-cap": "round" },
            "paint": paint,
        })
    }
}
