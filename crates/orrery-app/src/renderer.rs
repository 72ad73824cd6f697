//! Owns every GPU resource and turns composed frames into draw calls.

use glam::Vec3;
use tracing::info;

use orrery_config::Config;
use orrery_mesh::{MeshError, generate_uv_sphere};
use orrery_render::{
    BodyTexture, BodyUniform, DepthBuffer, PHONG_SHADER_SOURCE, PhongPipeline, PointLight,
    RenderContext, SphereBuffer, SurfaceError, TextureLoader, ViewCamera, draw_body,
};
use orrery_scene::{Body, FrameCommands, Scene};

/// Deep-space clear color.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.004,
    g: 0.005,
    b: 0.012,
    a: 1.0,
};

/// All GPU state for drawing the three bodies.
pub struct FrameRenderer {
    pipeline: PhongPipeline,
    sphere: SphereBuffer,
    depth_buffer: DepthBuffer,
    camera: ViewCamera,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_bind_group: wgpu::BindGroup,
    body_buffers: [wgpu::Buffer; 3],
    body_bind_groups: [wgpu::BindGroup; 3],
    textures: [BodyTexture; 3],
    sampler: wgpu::Sampler,
    loader: TextureLoader,
}

/// Loader key for a body, and back.
fn body_key(body: Body) -> &'static str {
    match body {
        Body::Sun => "sun",
        Body::Planet => "planet",
        Body::Moon => "moon",
    }
}

fn body_for_key(key: &str) -> Option<Body> {
    match key {
        "sun" => Some(Body::Sun),
        "planet" => Some(Body::Planet),
        "moon" => Some(Body::Moon),
        _ => None,
    }
}

impl FrameRenderer {
    /// Build the pipeline, shared sphere mesh, placeholder textures, and all
    /// uniform buffers, then kick off the background texture loads.
    pub fn new(gpu: &RenderContext, config: &Config) -> Result<Self, MeshError> {
        use wgpu::util::DeviceExt;

        let mesh = generate_uv_sphere(config.render.lat_bands, config.render.lon_bands)?;
        info!(
            "Sphere mesh: {}x{} bands, {} vertices",
            config.render.lat_bands, config.render.lon_bands, mesh.vertex_count
        );
        let sphere = SphereBuffer::from_mesh(&gpu.device, "body-sphere", &mesh);

        let shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("phong-shader"),
            source: wgpu::ShaderSource::Wgsl(PHONG_SHADER_SOURCE.into()),
        });
        let pipeline = PhongPipeline::new(&gpu.device, &shader, gpu.surface_format);

        let depth_buffer = DepthBuffer::new(
            &gpu.device,
            gpu.surface_config.width,
            gpu.surface_config.height,
        );

        let mut camera = ViewCamera::default();
        camera.set_aspect_ratio(
            gpu.surface_config.width as f32,
            gpu.surface_config.height as f32,
        );

        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("camera-uniform"),
                contents: bytemuck::cast_slice(&[camera.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // The sun sits at the origin and never moves, so the light is static.
        let light = PointLight {
            position: Vec3::ZERO,
            color: Vec3::ONE,
        };
        let light_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("light-uniform"),
                contents: bytemuck::cast_slice(&[light.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let light_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light-bind-group"),
            layout: &pipeline.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        let initial_uniform =
            BodyUniform::new(glam::Mat4::IDENTITY, [1.0, 1.0, 1.0, 1.0], false, false);
        let body_buffers = Body::ALL.map(|body| {
            gpu.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{}-uniform", body_key(body))),
                    contents: bytemuck::cast_slice(&[initial_uniform]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                })
        });
        let body_bind_groups = [0, 1, 2].map(|i| {
            gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{}-bind-group", body_key(Body::ALL[i]))),
                layout: &pipeline.body_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: body_buffers[i].as_entire_binding(),
                }],
            })
        });

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("body-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let textures = Body::ALL.map(|body| {
            BodyTexture::placeholder(
                &gpu.device,
                &gpu.queue,
                &pipeline.texture_bind_group_layout,
                &sampler,
                body_key(body),
            )
        });

        let loader = TextureLoader::new();
        let scene_cfg = &config.scene;
        loader.request("sun", scene_cfg.texture_path(&scene_cfg.sun_texture));
        loader.request("planet", scene_cfg.texture_path(&scene_cfg.planet_texture));
        loader.request("moon", scene_cfg.texture_path(&scene_cfg.moon_texture));

        Ok(Self {
            pipeline,
            sphere,
            depth_buffer,
            camera,
            camera_buffer,
            camera_bind_group,
            light_bind_group,
            body_buffers,
            body_bind_groups,
            textures,
            sampler,
            loader,
        })
    }

    /// Resize the depth buffer and camera aspect after the surface changed.
    /// Dimensions are clamped to at least 1; a minimized window must not
    /// produce a zero-size depth buffer or a degenerate aspect ratio.
    pub fn resize(&mut self, gpu: &RenderContext, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        self.depth_buffer.resize(&gpu.device, width, height);
        self.camera.set_aspect_ratio(width as f32, height as f32);
    }

    /// Swap in any textures whose decode finished, flipping the scene's
    /// textured flags so the very next frame samples them.
    pub fn poll_textures(&mut self, gpu: &RenderContext, scene: &mut Scene) {
        for decoded in self.loader.poll() {
            let Some(body) = body_for_key(&decoded.name) else {
                continue;
            };
            self.textures[body.index()] = BodyTexture::from_image(
                &gpu.device,
                &gpu.queue,
                &self.pipeline.texture_bind_group_layout,
                &self.sampler,
                &decoded,
            );
            scene.set_textured(body, true);
            info!(
                "Texture ready for {} ({}x{})",
                decoded.name, decoded.width, decoded.height
            );
        }
    }

    /// Render one composed frame.
    pub fn render(&mut self, gpu: &RenderContext, frame: &FrameCommands) -> Result<(), SurfaceError> {
        self.camera.eye = frame.camera.eye;
        self.camera.center = frame.camera.center;
        self.camera.up = frame.camera.up;
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.to_uniform()]),
        );

        for instance in &frame.bodies {
            let [r, g, b] = instance.base_color;
            let uniform = BodyUniform::new(
                instance.transform,
                [r, g, b, 1.0],
                instance.textured,
                instance.emissive,
            );
            gpu.queue.write_buffer(
                &self.body_buffers[instance.body.index()],
                0,
                bytemuck::cast_slice(&[uniform]),
            );
        }

        let surface_texture = gpu.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("body-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_buffer.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for instance in &frame.bodies {
                let idx = instance.body.index();
                draw_body(
                    &mut pass,
                    &self.pipeline,
                    &self.camera_bind_group,
                    &self.light_bind_group,
                    &self.textures[idx].bind_group,
                    &self.body_bind_groups[idx],
                    &self.sphere,
                );
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_keys_round_trip() {
        for body in Body::ALL {
            assert_eq!(body_for_key(body_key(body)), Some(body));
        }
        assert_eq!(body_for_key("comet"), None);
    }
}
