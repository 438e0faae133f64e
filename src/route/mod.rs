pub mod model;
pub mod variant;

pub use model::{active_detailed_route, RouteResponse, TransportMode};
pub use variant::{RouteVariant, VariantSelector};
