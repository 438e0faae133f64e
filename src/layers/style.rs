use crate::route::model::TransportMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable RGBA color, written as `#rrggbb` for the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "egui")]
impl From<Rgba> for egui::Color32 {
    fn from(color: Rgba) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

pub const LAND_COLOR: Rgba = Rgba::rgb(0xf9, 0x73, 0x16);
pub const AIR_COLOR: Rgba = Rgba::rgb(0xa8, 0x55, 0xf7);
pub const SEA_COLOR: Rgba = Rgba::rgb(0x06, 0xb6, 0xd4);

pub const ORIGIN_COLOR: Rgba = Rgba::rgb(0x22, 0xc5, 0x5e);
pub const DESTINATION_COLOR: Rgba = Rgba::rgb(0xef, 0x44, 0x44);
pub const AIRPORT_COLOR: Rgba = Rgba::rgb(0x8b, 0x5c, 0xf6);
pub const PORT_COLOR: Rgba = Rgba::rgb(0x0e, 0xa5, 0xe9);
pub const TRANSFER_COLOR: Rgba = Rgba::rgb(0x9c, 0xa3, 0xaf);

/// Fixed paint of one transport mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeStyle {
    pub mode: TransportMode,
    pub color: Rgba,
    /// Main line is dashed (air, sea) or solid (land)
    pub dashed: bool,
}

impl ModeStyle {
    pub fn for_mode(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Land => Self {
                mode,
                color: LAND_COLOR,
                dashed: false,
            },
            TransportMode::Air => Self {
                mode,
                color: AIR_COLOR,
                dashed: true,
            },
            TransportMode::Sea => Self {
                mode,
                color: SEA_COLOR,
                dashed: true,
            },
        }
    }
}
