//! wgpu rendering stack for the orrery: GPU context, sphere buffers, the
//! Phong pipeline, and asynchronous texture loading with placeholder swap.

mod buffer;
mod camera;
mod depth;
mod gpu;
mod light;
mod phong;
mod texture;

pub use buffer::{SphereBuffer, VertexPositionNormalUv};
pub use camera::{CameraUniform, ViewCamera};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use light::{
    AMBIENT_INTENSITY, EMISSIVE_BOOST, EMISSIVE_FALLBACK_BLEND, EMISSIVE_LUMA_THRESHOLD,
    LightUniform, PointLight, SHININESS, SPECULAR_STRENGTH, luminance, shade_emissive, shade_lit,
};
pub use phong::{BodyUniform, PHONG_SHADER_SOURCE, PhongPipeline, draw_body, normal_matrix};
pub use texture::{BodyTexture, DecodedImage, TextureLoader};
