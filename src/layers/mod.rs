pub mod base;
pub mod line;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod style;
