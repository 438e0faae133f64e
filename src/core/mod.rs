pub mod config;
pub mod constants;
pub mod fitter;
pub mod geo;
pub mod map;
pub mod reconciler;
pub mod session;
pub mod viewport;
