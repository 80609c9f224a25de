//! Sensor-space to screen-space mapping.

use glam::{Mat4, Vec3};
use stance_core::{Point2D, Position3D};

use crate::{RenderError, RenderResult};

/// Converts a sensor-space point to render-surface pixels
pub trait ScreenMapper {
    fn map_to_screen(&self, point: Position3D) -> Point2D;
}

/// Vertical field of view of the depth camera
const DEPTH_CAMERA_FOV_Y_DEGREES: f32 = 43.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 10.0;

/// Pinhole projection through a view-projection matrix
#[derive(Debug, Clone, Copy)]
pub struct CameraProjection {
    view_proj: Mat4,
    width: f32,
    height: f32,
}

impl CameraProjection {
    pub fn new(view_proj: Mat4, width: f64, height: f64) -> RenderResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderError::InvalidSurface { width, height });
        }

        Ok(Self {
            view_proj,
            width: width as f32,
            height: height as f32,
        })
    }

    /// Projection matching the depth camera's optics: sensor at the origin,
    /// looking down +Z with +Y up and +X to the right of the image.
    pub fn depth_camera(width: f64, height: f64) -> RenderResult<Self> {
        let aspect = (width / height) as f32;
        let proj = Mat4::perspective_lh(
            DEPTH_CAMERA_FOV_Y_DEGREES.to_radians(),
            aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
        Self::new(proj, width, height)
    }
}

impl ScreenMapper for CameraProjection {
    fn map_to_screen(&self, point: Position3D) -> Point2D {
        let ndc = self
            .view_proj
            .project_point3(Vec3::new(point.x as f32, point.y as f32, point.z as f32));

        Point2D::new(
            ((ndc.x + 1.0) * 0.5 * self.width) as f64,
            ((1.0 - ndc.y) * 0.5 * self.height) as f64,
        )
    }
}
