//! Camera framing
//!
//! The camera is placed in front of the stratum (towards -Y), centred on its
//! bounds and pulled back far enough for the larger of the X and Z extents
//! to fit the narrower field of view.

use crate::geometry::{BoundingBox, Vec3};
use serde::{Deserialize, Serialize};

/// Field of view of the camera lens, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    pub fov_horizontal: f32,
    pub fov_vertical: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_horizontal: 40.0,
            fov_vertical: 30.0,
        }
    }
}

/// Camera position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPlacement {
    pub position: Vec3,
    pub look_at: Vec3,
    pub lens: Lens,
}

/// Frames `bounds` with `lens`.
///
/// `distance_offset` moves the camera along +Y after framing, bringing it
/// closer to the network for positive values.
pub fn frame_camera(bounds: &BoundingBox, lens: Lens, distance_offset: f32) -> CameraPlacement {
    let center = bounds.center();
    let size = bounds.size();
    let fov = lens.fov_horizontal.min(lens.fov_vertical).to_radians();
    let distance = size.x.max(size.z) / fov.tan();

    CameraPlacement {
        position: Vec3::new(center.x, -distance + distance_offset, center.z),
        look_at: center,
        lens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_camera_uses_narrow_fov() {
        let bounds = BoundingBox::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 4.0));
        let lens = Lens {
            fov_horizontal: 40.0,
            fov_vertical: 45.0,
        };
        let camera = frame_camera(&bounds, lens, 0.0);

        let expected = 10.0 / 40.0f32.to_radians().tan();
        assert!((camera.position.y + expected).abs() < 1e-4);
        assert_eq!(camera.position.x, 5.0);
        assert_eq!(camera.position.z, 2.0);
        assert_eq!(camera.look_at, bounds.center());
    }

    #[test]
    fn test_distance_offset() {
        let bounds = BoundingBox::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        let near = frame_camera(&bounds, Lens::default(), 103.0);
        let far = frame_camera(&bounds, Lens::default(), 0.0);
        assert!((near.position.y - far.position.y - 103.0).abs() < 1e-4);
    }
}
