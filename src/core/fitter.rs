//! Camera framing for a set of coordinates

use crate::core::{
    config::{FitOptions, SurfaceOptions},
    geo::{LatLng, LatLngBounds},
};
use geo::BoundingRect;
use serde::{Deserialize, Serialize};

/// A camera transition handed to the surface. Fire-and-forget: a later
/// request supersedes an earlier one still animating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraRequest {
    /// Frame a rectangle with symmetric pixel padding
    FitBounds {
        bounds: LatLngBounds,
        padding: f64,
        duration_ms: u64,
    },
    /// Center on a point at a fixed zoom
    FlyTo {
        center: LatLng,
        zoom: f64,
        duration_ms: u64,
    },
}

impl CameraRequest {
    pub fn duration_ms(&self) -> u64 {
        match self {
            CameraRequest::FitBounds { duration_ms, .. } | CameraRequest::FlyTo { duration_ms, .. } => {
                *duration_ms
            }
        }
    }
}

/// Computes camera requests that frame coordinates or restore the initial
/// global view
#[derive(Debug, Clone)]
pub struct ViewportFitter {
    options: FitOptions,
    initial_center: LatLng,
    initial_zoom: f64,
}

impl ViewportFitter {
    pub fn new(options: FitOptions, surface: &SurfaceOptions) -> Self {
        Self {
            options,
            initial_center: surface.initial_center,
            initial_zoom: surface.initial_zoom,
        }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Frames the minimal rectangle enclosing `points`.
    ///
    /// Non-finite points are ignored. When a single distinct point remains
    /// the rectangle has no area, so the camera flies to it at the fallback
    /// zoom instead. Returns `None` only when nothing is left to frame.
    pub fn fit(&self, points: &[LatLng]) -> Option<CameraRequest> {
        let finite: Vec<geo::Point<f64>> = points
            .iter()
            .filter(|point| point.is_finite())
            .map(|point| geo::Point::from(*point))
            .collect();

        let rect = geo::MultiPoint::new(finite).bounding_rect()?;
        let bounds = LatLngBounds::from(rect);

        if bounds.is_degenerate() {
            return Some(CameraRequest::FlyTo {
                center: bounds.center(),
                zoom: self.options.single_point_zoom,
                duration_ms: self.options.duration_ms,
            });
        }

        Some(CameraRequest::FitBounds {
            bounds,
            padding: self.options.padding_px,
            duration_ms: self.options.duration_ms,
        })
    }

    /// Animated return to the initial global view
    pub fn reset(&self) -> CameraRequest {
        CameraRequest::FlyTo {
            center: self.initial_center,
            zoom: self.initial_zoom,
            duration_ms: self.options.reset_duration_ms,
        }
    }
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self::new(FitOptions::default(), &SurfaceOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants;

    #[test]
    fn test_fit_encloses_all_points() {
        let fitter = ViewportFitter::default();
        let points = [
            LatLng::new(40.7, -74.0),
            LatLng::new(51.5, -0.1),
            LatLng::new(40.68, -74.15),
        ];

        match fitter.fit(&points) {
            Some(CameraRequest::FitBounds {
                bounds,
                padding,
                duration_ms,
            }) => {
                assert_eq!(bounds.south_west, LatLng::new(40.68, -74.15));
                assert_eq!(bounds.north_east, LatLng::new(51.5, -0.1));
                assert!(points.iter().all(|p| bounds.contains(p)));
                assert_eq!(padding, constants::FIT_PADDING_PX);
                assert_eq!(duration_ms, constants::FIT_DURATION_MS);
            }
            other => panic!("expected FitBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_single_point_falls_back_to_fly_to() {
        let fitter = ViewportFitter::default();
        let point = LatLng::new(12.97, 77.59);

        let request = fitter.fit(&[point, point]).unwrap();
        assert_eq!(
            request,
            CameraRequest::FlyTo {
                center: point,
                zoom: constants::SINGLE_POINT_ZOOM,
                duration_ms: constants::FIT_DURATION_MS,
            }
        );
    }

    #[test]
    fn test_non_finite_points_ignored() {
        let fitter = ViewportFitter::default();
        assert!(fitter.fit(&[]).is_none());
        assert!(fitter.fit(&[LatLng::new(f64::NAN, 0.0)]).is_none());

        let request = fitter
            .fit(&[LatLng::new(f64::NAN, 1.0), LatLng::new(10.0, 20.0)])
            .unwrap();
        assert!(matches!(request, CameraRequest::FlyTo { .. }));
    }

    #[test]
    fn test_reset_targets_initial_view() {
        let fitter = ViewportFitter::default();
        match fitter.reset() {
            CameraRequest::FlyTo {
                center,
                zoom,
                duration_ms,
            } => {
                assert_eq!(center, LatLng::new(20.0, 0.0));
                assert_eq!(zoom, 1.5);
                assert_eq!(duration_ms, constants::RESET_DURATION_MS);
            }
            other => panic!("expected FlyTo, got {:?}", other),
        }
    }
}
