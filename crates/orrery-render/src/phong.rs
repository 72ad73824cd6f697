//! Phong rendering pipeline for the celestial bodies.
//!
//! One pipeline draws every body: camera at group 0, the point light at
//! group 1, the body's surface texture at group 2, and the per-body uniform
//! (model matrix, base color, flags) at group 3. The flags select texturing
//! and the emissive path inside the shader, so texture arrival never requires
//! a pipeline swap.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

use crate::buffer::{SphereBuffer, VertexPositionNormalUv};
use crate::depth::DepthBuffer;

/// Per-body uniform, 144 bytes.
///
/// The normal matrix is stored as three vec4-padded columns to satisfy WGSL
/// `mat3x3<f32>` alignment.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BodyUniform {
    /// Model-to-world transform, column-major.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, column-major, padded.
    pub normal_mat: [[f32; 4]; 3],
    /// Fallback/base color (rgba).
    pub base_color: [f32; 4],
    /// x = sample the bound texture, y = emissive, z/w unused.
    pub flags: [u32; 4],
}

impl BodyUniform {
    /// Build the uniform for one body instance.
    pub fn new(model: Mat4, base_color: [f32; 4], textured: bool, emissive: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_mat: normal_matrix(model),
            base_color,
            flags: [u32::from(textured), u32::from(emissive), 0, 0],
        }
    }
}

/// Inverse-transpose of the model's upper 3x3, as padded columns.
///
/// Keeps normals unit-length-correct under non-uniform scale.
pub fn normal_matrix(model: Mat4) -> [[f32; 4]; 3] {
    let m = Mat3::from_mat4(model).inverse().transpose();
    [
        [m.x_axis.x, m.x_axis.y, m.x_axis.z, 0.0],
        [m.y_axis.x, m.y_axis.y, m.y_axis.z, 0.0],
        [m.z_axis.x, m.z_axis.y, m.z_axis.z, 0.0],
    ]
}

/// Phong pipeline: camera at group 0, light at group 1, texture at group 2,
/// body uniform at group 3.
pub struct PhongPipeline {
    /// The underlying wgpu render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Camera uniform bind group layout (group 0).
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    /// Point light uniform bind group layout (group 1).
    pub light_bind_group_layout: wgpu::BindGroupLayout,
    /// Texture + sampler bind group layout (group 2).
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
    /// Per-body uniform bind group layout (group 3).
    pub body_bind_group_layout: wgpu::BindGroupLayout,
}

impl PhongPipeline {
    /// Create the pipeline against a surface format, writing reverse-Z depth.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("phong-camera-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(80), // CameraUniform: mat4x4 + vec4
                    },
                    count: None,
                }],
            });

        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("phong-light-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(32), // LightUniform
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("phong-texture-bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let body_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("phong-body-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(144), // BodyUniform
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("phong-pipeline-layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &light_bind_group_layout,
                &texture_bind_group_layout,
                &body_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("phong-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_bind_group_layout,
            light_bind_group_layout,
            texture_bind_group_layout,
            body_bind_group_layout,
        }
    }
}

/// Draw one body with its texture and per-body uniform bound.
pub fn draw_body<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &PhongPipeline,
    camera_bind_group: &'a wgpu::BindGroup,
    light_bind_group: &'a wgpu::BindGroup,
    texture_bind_group: &'a wgpu::BindGroup,
    body_bind_group: &'a wgpu::BindGroup,
    sphere: &'a SphereBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(1, light_bind_group, &[]);
    render_pass.set_bind_group(2, texture_bind_group, &[]);
    render_pass.set_bind_group(3, body_bind_group, &[]);
    sphere.bind(render_pass);
    sphere.draw(render_pass);
}

/// WGSL shader for Phong-shaded celestial bodies.
///
/// The texture is sampled unconditionally to keep `textureSample` in uniform
/// control flow; `select` then picks between the texel and the base color.
/// The emissive path skips lighting, blends dark texels toward the base color,
/// and over-brightens by a fixed factor.
pub const PHONG_SHADER_SOURCE: &str = r#"
const AMBIENT_INTENSITY: f32 = 0.18;
const SPECULAR_STRENGTH: f32 = 0.6;
const SHININESS: f32 = 64.0;
const EMISSIVE_BOOST: f32 = 2.0;
const EMISSIVE_LUMA_THRESHOLD: f32 = 0.3;
const EMISSIVE_FALLBACK_BLEND: f32 = 0.7;

struct CameraUniform {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
};

struct LightUniform {
    position: vec4<f32>,
    color: vec4<f32>,
};

struct BodyUniform {
    model: mat4x4<f32>,
    normal_mat: mat3x3<f32>,
    base_color: vec4<f32>,
    flags: vec4<u32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> light: LightUniform;

@group(2) @binding(0)
var t_surface: texture_2d<f32>;
@group(2) @binding(1)
var s_surface: sampler;

@group(3) @binding(0)
var<uniform> body: BodyUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = body.model * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.world_normal = body.normal_mat * in.normal;
    out.uv = in.uv;
    return out;
}

fn luminance(color: vec3<f32>) -> f32 {
    return dot(color, vec3<f32>(0.299, 0.587, 0.114));
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(t_surface, s_surface, in.uv).rgb;
    let textured = body.flags.x == 1u;
    let base = select(body.base_color.rgb, texel, textured);

    if body.flags.y == 1u {
        // Emissive: no lighting, dark texels lean on the base color so the
        // body never reads as black.
        let dark = textured && luminance(base) < EMISSIVE_LUMA_THRESHOLD;
        let blended = select(
            base,
            body.base_color.rgb * EMISSIVE_FALLBACK_BLEND + base * (1.0 - EMISSIVE_FALLBACK_BLEND),
            dark,
        );
        return vec4<f32>(blended * EMISSIVE_BOOST, 1.0);
    }

    let normal = normalize(in.world_normal);
    let light_dir = normalize(light.position.xyz - in.world_position);
    let view_dir = normalize(camera.eye.xyz - in.world_position);

    let ambient = AMBIENT_INTENSITY * light.color.rgb;
    let diffuse = max(dot(normal, light_dir), 0.0) * light.color.rgb;

    let reflect_dir = reflect(-light_dir, normal);
    let specular = SPECULAR_STRENGTH
        * pow(max(dot(view_dir, reflect_dir), 0.0), SHININESS)
        * light.color.rgb;

    let color = (ambient + diffuse + specular) * base;
    return vec4<f32>(color, 1.0);
}
"#;
