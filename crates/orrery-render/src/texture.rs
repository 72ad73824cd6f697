//! Body surface textures with asynchronous loading.
//!
//! Each body starts with a 1x1 placeholder so the first frame renders
//! immediately. [`TextureLoader`] decodes image files on background threads
//! and hands finished pixels back over a channel; the renderer polls it once
//! per frame and swaps the placeholder for the real texture when it arrives.
//! A failed load logs a warning and the placeholder simply stays.

use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender, unbounded};

/// A decoded RGBA8 image ready for GPU upload, tagged with the body it is for.
pub struct DecodedImage {
    /// Body name the renderer keyed the request with.
    pub name: String,
    /// Tightly packed RGBA8 pixels.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// GPU texture plus bind group for one body's surface.
pub struct BodyTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub dimensions: (u32, u32),
}

impl BodyTexture {
    /// Create a 1x1 white placeholder. The shader ignores the texel until the
    /// body's textured flag is set, so the color is irrelevant.
    pub fn placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: &str,
    ) -> Self {
        Self::from_pixels(device, queue, layout, sampler, label, &[255, 255, 255, 255], 1, 1)
    }

    /// Create a texture from a decoded image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &DecodedImage,
    ) -> Self {
        Self::from_pixels(
            device,
            queue,
            layout,
            sampler,
            &image.name,
            &image.pixels,
            image.width,
            image.height,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn from_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: &str,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-bind-group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            bind_group,
            dimensions: (width, height),
        }
    }
}

/// Decodes texture files on background threads.
///
/// Requests are fire-and-forget; completed decodes arrive on an unbounded
/// channel and are drained with [`TextureLoader::poll`]. Failures are logged
/// and produce no message, leaving the caller's placeholder in place.
pub struct TextureLoader {
    sender: Sender<DecodedImage>,
    receiver: Receiver<DecodedImage>,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Start decoding `path` on a background thread, keyed by `name`.
    pub fn request(&self, name: &str, path: PathBuf) {
        let sender = self.sender.clone();
        let name = name.to_string();
        std::thread::spawn(move || match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                log::info!("Decoded texture '{name}' ({width}x{height}) from {}", path.display());
                // Send fails only if the loader was dropped; nothing to do then.
                let _ = sender.send(DecodedImage {
                    name,
                    pixels: rgba.into_raw(),
                    width,
                    height,
                });
            }
            Err(err) => {
                log::warn!(
                    "Failed to load texture '{name}' from {}: {err}; keeping placeholder",
                    path.display()
                );
            }
        });
    }

    /// Drain every decode that has finished since the last poll.
    pub fn poll(&self) -> Vec<DecodedImage> {
        self.receiver.try_iter().collect()
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}
