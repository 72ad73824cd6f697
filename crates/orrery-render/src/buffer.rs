//! Vertex buffer management for the shared sphere mesh.

use bytemuck::{Pod, Zeroable};
use orrery_mesh::SphereMesh;

/// Standard vertex format with position, normal, and UV coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct VertexPositionNormalUv {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl VertexPositionNormalUv {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPositionNormalUv>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Non-indexed GPU vertex buffer holding a tessellated sphere.
///
/// Built once at startup and shared by every body; only the per-body uniform
/// changes between draws.
pub struct SphereBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl SphereBuffer {
    /// Upload a generated sphere mesh as an interleaved vertex buffer.
    pub fn from_mesh(device: &wgpu::Device, label: &str, mesh: &SphereMesh) -> Self {
        use wgpu::util::DeviceExt;

        let interleaved = mesh.interleaved();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&interleaved),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: mesh.vertex_count,
        }
    }

    /// Bind the vertex buffer to slot 0 of a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
    }

    /// Draw the full vertex range, non-indexed.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::create_test_device_queue;
    use orrery_mesh::generate_uv_sphere;

    #[test]
    fn test_vertex_layout_stride() {
        let layout = VertexPositionNormalUv::layout();
        // position (f32x3) + normal (f32x3) + uv (f32x2) = 32 bytes stride
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
    }

    #[test]
    fn test_vertex_layout_matches_interleave_stride() {
        // The mesh interleave helper emits 8 floats per vertex.
        let layout = VertexPositionNormalUv::layout();
        assert_eq!(layout.array_stride, 8 * std::mem::size_of::<f32>() as u64);
    }

    #[test]
    fn test_sphere_buffer_vertex_count() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let mesh = generate_uv_sphere(4, 8).unwrap();
        let buffer = SphereBuffer::from_mesh(&device, "test-sphere", &mesh);
        assert_eq!(buffer.vertex_count, 6 * 4 * 8);
    }

    #[test]
    fn test_sphere_buffer_size_matches_layout() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let mesh = generate_uv_sphere(3, 5).unwrap();
        let buffer = SphereBuffer::from_mesh(&device, "test-sphere", &mesh);
        let expected = mesh.vertex_count as u64 * VertexPositionNormalUv::layout().array_stride;
        assert_eq!(buffer.vertex_buffer.size(), expected);
    }
}
