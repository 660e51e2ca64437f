use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.001,
            far: 1000.0,
            position: [0.0, 0.0, 3.0],
        }
    }
}

/// Perspective camera looking at a fixed target
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(params: &CameraParams, width: u32, height: u32) -> Self {
        Self {
            position: Vec3::from_array(params.position),
            target: Vec3::ZERO,
            fov_y: params.fov_degrees.to_radians(),
            aspect: aspect_ratio(width, height),
            near: params.near,
            far: params.far,
        }
    }

    /// Keep the projection undistorted after the surface changes size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_sees_origin_at_center() {
        let camera = Camera::new(&CameraParams::default(), 800, 600);
        let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_set_viewport_updates_aspect() {
        let mut camera = Camera::new(&CameraParams::default(), 800, 600);
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        let camera = Camera::new(&CameraParams::default(), 640, 0);
        assert!(camera.aspect.is_finite());
    }
}
