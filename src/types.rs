use crate::ribbon::RibbonMesh;

/// Ribbon vertex as laid out in the GPU vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RibbonVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl RibbonVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn from_mesh(mesh: &RibbonMesh) -> Vec<Self> {
        mesh.positions
            .iter()
            .zip(&mesh.uvs)
            .map(|(position, uv)| Self {
                position: position.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// Per-frame scene data: camera, model transform, lights
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3], // Linear color premultiplied by intensity
    pub _pad1: f32,
    pub light_direction: [f32; 3], // Points from the surface toward the light
    pub _pad2: f32,
    pub light_color: [f32; 3],
    pub _pad3: f32,
}

/// Per-material texture transform and surface response
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub uv_repeat: [f32; 2],
    pub uv_offset: [f32; 2],
    pub roughness: f32,
    pub metalness: f32,
    pub alpha_cutoff: f32,
    pub _pad: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 192);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 32);
    }

    #[test]
    fn test_vertex_stride() {
        assert_eq!(std::mem::size_of::<RibbonVertex>(), 20);
        assert_eq!(RibbonVertex::layout().array_stride, 20);
    }
}
