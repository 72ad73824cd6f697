//! Single point light and the Phong shading contract.
//!
//! The functions here mirror the fragment shader in `phong.rs` exactly, using
//! the same constants, so the illumination model is testable on the CPU.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Ambient contribution as a fraction of the light color.
pub const AMBIENT_INTENSITY: f32 = 0.18;
/// Specular strength multiplier.
pub const SPECULAR_STRENGTH: f32 = 0.6;
/// Specular exponent.
pub const SHININESS: f32 = 64.0;
/// Emissive over-brighten factor, deliberately unclamped.
pub const EMISSIVE_BOOST: f32 = 2.0;
/// Luminance below which an emissive texel is blended toward the fallback
/// color. Tuning constant with no physical derivation.
pub const EMISSIVE_LUMA_THRESHOLD: f32 = 0.3;
/// Fallback share of the emissive dark-texel blend.
pub const EMISSIVE_FALLBACK_BLEND: f32 = 0.7;

/// CPU-side point light descriptor.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
}

impl PointLight {
    /// Convert to the GPU uniform representation.
    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: [self.position.x, self.position.y, self.position.z, 0.0],
            color: [self.color.x, self.color.y, self.color.z, 0.0],
        }
    }
}

/// GPU uniform for the point light, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniform {
    /// xyz = world position, w unused.
    pub position: [f32; 4],
    /// xyz = linear RGB color, w unused.
    pub color: [f32; 4],
}

/// Perceptual luminance (Rec. 601 weights).
pub fn luminance(color: Vec3) -> f32 {
    color.dot(Vec3::new(0.299, 0.587, 0.114))
}

/// Emissive output color: bypasses lighting entirely.
///
/// With a texture sample, dark texels are blended 70/30 toward the fallback
/// color before the over-brighten; without one the fallback is used directly.
pub fn shade_emissive(sample: Option<Vec3>, fallback: Vec3) -> Vec3 {
    let base = match sample {
        Some(texel) if luminance(texel) < EMISSIVE_LUMA_THRESHOLD => {
            fallback * EMISSIVE_FALLBACK_BLEND + texel * (1.0 - EMISSIVE_FALLBACK_BLEND)
        }
        Some(texel) => texel,
        None => fallback,
    };
    base * EMISSIVE_BOOST
}

/// Phong point-light shading of a fragment.
///
/// `position` and `normal` are world-space (normal unit length), `eye` is the
/// view origin, `base` the fragment's base color. One light, no shadows.
pub fn shade_lit(
    position: Vec3,
    normal: Vec3,
    eye: Vec3,
    light: &PointLight,
    base: Vec3,
) -> Vec3 {
    let light_dir = (light.position - position).normalize();
    let ambient = AMBIENT_INTENSITY * light.color;
    let diffuse = normal.dot(light_dir).max(0.0) * light.color;

    let view_dir = (eye - position).normalize();
    let reflect_dir = reflect(-light_dir, normal);
    let specular = SPECULAR_STRENGTH
        * view_dir.dot(reflect_dir).max(0.0).powf(SHININESS)
        * light.color;

    (ambient + diffuse + specular) * base
}

/// Reflect `incident` about `normal` (matches WGSL `reflect`).
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}
