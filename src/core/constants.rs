//! Core constants for route rendering and camera behavior.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Initial camera center (latitude, longitude): a global view.
pub const INITIAL_CENTER: (f64, f64) = (20.0, 0.0);

/// Initial camera zoom: low enough to show every continent.
pub const INITIAL_ZOOM: f64 = 1.5;

/// Inset padding in pixels applied on every side when fitting a route.
pub const FIT_PADDING_PX: f64 = 80.0;

/// Camera animation duration for route fits.
pub const FIT_DURATION_MS: u64 = 1500;

/// Camera animation duration when returning to the global view.
pub const RESET_DURATION_MS: u64 = 1000;

/// Zoom used when every framed coordinate collapses to one point.
pub const SINGLE_POINT_ZOOM: f64 = 6.0;

/// Glow line paint: wide and faint.
pub const GLOW_LINE_WIDTH: f32 = 12.0;
pub const GLOW_LINE_OPACITY: f32 = 0.3;

/// Main line paint: narrow and nearly opaque.
pub const MAIN_LINE_WIDTH: f32 = 4.0;
pub const MAIN_LINE_OPACITY: f32 = 0.9;

/// Dash pattern (in line widths) for air and sea main lines.
pub const DASH_PATTERN: [f32; 2] = [2.0, 2.0];

/// Default base map style.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/dark-v11";

/// Environment variable holding the surface access credential.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Environment variable overriding the base map style.
pub const STYLE_URL_ENV: &str = "FREIGHTMAP_STYLE_URL";
