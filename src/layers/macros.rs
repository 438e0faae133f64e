//! Macros to reduce boilerplate in layer implementations
//!
//! This module provides macros that generate common LayerTrait implementations
//! to avoid code duplication across the line and marker layers.

/// Macro to implement the standard LayerTrait boilerplate methods
///
/// Generates id(), layer_type(), opacity(), z_index(), set_z_index() and
/// as_any(); each layer writes its own options().
///
/// Usage:
/// ```ignore
/// impl LayerTrait for MyLayer {
///     impl_layer_trait!(MyLayer, properties);
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($layer_type:ty, $properties_field:ident) => {
        fn id(&self) -> &str {
            &self.$properties_field.id
        }

        fn layer_type(&self) -> $crate::layers::base::LayerType {
            self.$properties_field.layer_type
        }

        fn z_index(&self) -> i32 {
            self.$properties_field.z_index
        }

        fn set_z_index(&mut self, z_index: i32) {
            self.$properties_field.z_index = z_index;
        }

        fn opacity(&self) -> f32 {
            self.$properties_field.opacity
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}
