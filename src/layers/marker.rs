use crate::{
    core::geo::LatLng,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    layers::style::{
        Rgba, AIRPORT_COLOR, DESTINATION_COLOR, ORIGIN_COLOR, PORT_COLOR, TRANSFER_COLOR,
    },
    route::model::WaypointKind,
};
use serde::{Deserialize, Serialize};

/// What a marker stands for; decides its look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Origin,
    Destination,
    Airport,
    Port,
    Transfer,
}

impl MarkerKind {
    pub fn color(&self) -> Rgba {
        match self {
            MarkerKind::Origin => ORIGIN_COLOR,
            MarkerKind::Destination => DESTINATION_COLOR,
            MarkerKind::Airport => AIRPORT_COLOR,
            MarkerKind::Port => PORT_COLOR,
            MarkerKind::Transfer => TRANSFER_COLOR,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MarkerKind::Origin => "A",
            MarkerKind::Destination => "B",
            MarkerKind::Airport => "✈",
            MarkerKind::Port => "⚓",
            MarkerKind::Transfer => "•",
        }
    }

    /// Pixel diameter; endpoints are drawn larger than transfer points
    pub fn size(&self) -> f32 {
        match self {
            MarkerKind::Origin | MarkerKind::Destination => 32.0,
            _ => 26.0,
        }
    }
}

impl From<WaypointKind> for MarkerKind {
    fn from(kind: WaypointKind) -> Self {
        match kind {
            WaypointKind::Airport => MarkerKind::Airport,
            WaypointKind::Port => MarkerKind::Port,
            WaypointKind::Other => MarkerKind::Transfer,
        }
    }
}

/// Label shown when a marker is clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub title: String,
    pub subtitle: Option<String>,
    /// Pixel offset above the marker anchor
    pub offset: f32,
}

impl Popup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            offset: 25.0,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn text(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!("{}\n{}", self.title, subtitle),
            None => self.title.clone(),
        }
    }
}

pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    kind: MarkerKind,
    popup: Option<Popup>,
}

impl Marker {
    pub fn new(id: String, position: LatLng, kind: MarkerKind) -> Self {
        let properties = LayerProperties::new(id, LayerType::Marker).with_z_index(10);
        Self {
            properties,
            position,
            kind,
            popup: None,
        }
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.properties.id,
            "kind": self.kind,
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "color": self.kind.color().to_hex(),
            "icon": self.kind.icon(),
            "size": self.kind.size(),
            "popup": self.popup.as_ref().map(|popup| serde_json::json!({
                "text": popup.text(),
                "offset": popup.offset
            }))
        })
    }
}
