use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::material::{Material, SurfaceParams};
use crate::math::{hex_to_rgb, srgb_to_linear};
use crate::ribbon::{MaterialSlot, RibbonMesh};
use crate::types::SceneUniform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightParams {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_intensity: 0.86,
            directional_color: 0xffffff,
            directional_intensity: 1.5,
            directional_position: [0.0, 10.0, 10.0],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Light arriving from `position` toward the origin
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from the lit surface toward the light
    pub fn direction(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

/// The ribbon as placed in the scene
#[derive(Debug, Clone)]
pub struct RibbonObject {
    pub mesh: RibbonMesh,
    /// Euler XYZ angles: `x` = pitch, `y` = yaw
    pub rotation: Vec2,
    pub materials: [Material; 2],
}

impl RibbonObject {
    pub fn new(mesh: RibbonMesh, surface: SurfaceParams) -> Self {
        Self {
            mesh,
            rotation: Vec2::ZERO,
            materials: [
                Material::new(MaterialSlot::Front, surface),
                Material::new(MaterialSlot::Back, surface),
            ],
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            0.0,
        ))
    }

    pub fn material(&self, slot: MaterialSlot) -> &Material {
        &self.materials[slot as usize]
    }
}

/// Everything that gets drawn: one camera, two lights, at most one ribbon
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub ribbon: Option<RibbonObject>,
}

impl Scene {
    pub fn new(camera: Camera, lights: &LightParams) -> Self {
        Self {
            camera,
            ambient: AmbientLight {
                color: hex_to_rgb(lights.ambient_color),
                intensity: lights.ambient_intensity,
            },
            directional: DirectionalLight {
                color: hex_to_rgb(lights.directional_color),
                intensity: lights.directional_intensity,
                position: Vec3::from_array(lights.directional_position),
            },
            ribbon: None,
        }
    }

    pub fn add_ribbon(&mut self, ribbon: RibbonObject) {
        self.ribbon = Some(ribbon);
    }

    pub fn to_uniform(&self) -> SceneUniform {
        let model = self
            .ribbon
            .as_ref()
            .map(RibbonObject::model_matrix)
            .unwrap_or(Mat4::IDENTITY);

        SceneUniform {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_position: self.camera.position.to_array(),
            _pad0: 0.0,
            ambient: linear_scaled(self.ambient.color, self.ambient.intensity),
            _pad1: 0.0,
            light_direction: self.directional.direction().to_array(),
            _pad2: 0.0,
            light_color: linear_scaled(self.directional.color, self.directional.intensity),
            _pad3: 0.0,
        }
    }
}

fn linear_scaled(rgb: [f32; 3], intensity: f32) -> [f32; 3] {
    rgb.map(|c| srgb_to_linear(c) * intensity)
}
