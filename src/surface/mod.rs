//! Map surface implementations

pub mod headless;

pub use headless::{HeadlessProvider, HeadlessSurface, SurfaceSnapshot};
