//! Celestial body motion and per-frame draw descriptors.
//!
//! Orbital rates and radii are demo tuning values, not physical constants.

use glam::{Mat4, Quat, Vec3};

use crate::camera::{CameraPose, OrbitCamera};

/// Sun spin rate about +Y in radians per second.
pub const SUN_SPIN_RATE: f32 = 0.2;
/// Sun uniform scale.
pub const SUN_SCALE: f32 = 4.0;

/// Planet orbit radius around the sun.
pub const PLANET_ORBIT_RADIUS: f32 = 12.0;
/// Planet orbital angular rate in radians per second.
pub const PLANET_ORBIT_RATE: f32 = 0.4;
/// Planet axial spin rate in radians per second.
pub const PLANET_SPIN_RATE: f32 = 1.0;
/// Planet uniform scale.
pub const PLANET_SCALE: f32 = 1.6;

/// Moon orbit radius around the planet.
pub const MOON_ORBIT_RADIUS: f32 = 3.5;
/// Moon orbital angular rate in radians per second.
pub const MOON_ORBIT_RATE: f32 = 1.2;
/// Vertical bob amplitude of the moon's orbit.
pub const MOON_BOB_AMPLITUDE: f32 = 0.6;
/// Moon axial spin rate in radians per second.
pub const MOON_SPIN_RATE: f32 = 0.8;
/// Moon uniform scale.
pub const MOON_SCALE: f32 = 0.6;

/// Fallback flat colors, used when a body has no texture and blended into
/// dark emissive texels.
pub const SUN_COLOR: [f32; 3] = [1.0, 0.8, 0.25];
/// Planet fallback color.
pub const PLANET_COLOR: [f32; 3] = [0.25, 0.45, 0.85];
/// Moon fallback color.
pub const MOON_COLOR: [f32; 3] = [0.62, 0.62, 0.62];

/// The three bodies of the system. Doubles as the camera focus selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Body {
    /// Emissive star at the origin.
    Sun,
    /// Planet orbiting the sun.
    Planet,
    /// Moon orbiting the planet.
    Moon,
}

impl Body {
    /// All bodies in draw order.
    pub const ALL: [Body; 3] = [Body::Sun, Body::Planet, Body::Moon];

    /// Stable index for per-body resource arrays.
    pub fn index(self) -> usize {
        match self {
            Body::Sun => 0,
            Body::Planet => 1,
            Body::Moon => 2,
        }
    }

    /// Fallback flat color for this body.
    pub fn fallback_color(self) -> [f32; 3] {
        match self {
            Body::Sun => SUN_COLOR,
            Body::Planet => PLANET_COLOR,
            Body::Moon => MOON_COLOR,
        }
    }

    /// Whether this body bypasses the lighting model.
    pub fn is_emissive(self) -> bool {
        matches!(self, Body::Sun)
    }
}

/// World-space center of a body at elapsed time `t` (seconds).
///
/// Pure in `t`: equal inputs always yield equal positions.
pub fn body_position(body: Body, t: f32) -> Vec3 {
    match body {
        Body::Sun => Vec3::ZERO,
        Body::Planet => {
            let phase = t * PLANET_ORBIT_RATE;
            Vec3::new(
                PLANET_ORBIT_RADIUS * phase.cos(),
                0.0,
                PLANET_ORBIT_RADIUS * phase.sin(),
            )
        }
        Body::Moon => {
            let phase = t * MOON_ORBIT_RATE;
            // Gentle vertical bob at one third of the orbital rate.
            let bob = MOON_BOB_AMPLITUDE * (t * MOON_ORBIT_RATE / 3.0).sin();
            body_position(Body::Planet, t)
                + Vec3::new(
                    MOON_ORBIT_RADIUS * phase.cos(),
                    bob,
                    MOON_ORBIT_RADIUS * phase.sin(),
                )
        }
    }
}

/// Axial spin angle of a body at elapsed time `t`.
fn spin_angle(body: Body, t: f32) -> f32 {
    match body {
        Body::Sun => t * SUN_SPIN_RATE,
        Body::Planet => t * PLANET_SPIN_RATE,
        Body::Moon => t * MOON_SPIN_RATE,
    }
}

/// Uniform scale of a body.
fn scale(body: Body) -> f32 {
    match body {
        Body::Sun => SUN_SCALE,
        Body::Planet => PLANET_SCALE,
        Body::Moon => MOON_SCALE,
    }
}

/// Model matrix for a body at elapsed time `t`: translation x spin x scale.
pub fn body_transform(body: Body, t: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale(body)),
        Quat::from_rotation_y(spin_angle(body, t)),
        body_position(body, t),
    )
}

/// Per-frame draw descriptor for one body. Rebuilt every frame, never stored.
#[derive(Clone, Copy, Debug)]
pub struct BodyInstance {
    /// Which body this describes.
    pub body: Body,
    /// Model matrix (local unit sphere into world space).
    pub transform: Mat4,
    /// Flat fallback color.
    pub base_color: [f32; 3],
    /// Whether the fragment shader samples this body's texture.
    pub textured: bool,
    /// Whether the body bypasses lighting.
    pub emissive: bool,
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug)]
pub struct FrameCommands {
    /// Camera eye/center/up for this frame.
    pub camera: CameraPose,
    /// One descriptor per body, in draw order.
    pub bodies: Vec<BodyInstance>,
}

/// Scene composer: holds the only piece of non-derived state, the per-body
/// texture availability flags.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    textured: [bool; 3],
}

impl Scene {
    /// Create a scene with no textures bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a body as textured (or not). Called when an asset decode lands.
    pub fn set_textured(&mut self, body: Body, textured: bool) {
        self.textured[body.index()] = textured;
    }

    /// Whether a body currently samples a texture.
    pub fn is_textured(&self, body: Body) -> bool {
        self.textured[body.index()]
    }

    /// Compose one frame at elapsed time `t` with the given camera state.
    pub fn compose(&self, t: f32, camera: &OrbitCamera) -> FrameCommands {
        let focus_pos = body_position(camera.focus, t);
        let bodies = Body::ALL
            .iter()
            .map(|&body| BodyInstance {
                body,
                transform: body_transform(body, t),
                base_color: body.fallback_color(),
                textured: self.textured[body.index()],
                emissive: body.is_emissive(),
            })
            .collect();

        FrameCommands {
            camera: camera.pose(focus_pos),
            bodies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_planet_starts_on_positive_x() {
        let pos = body_position(Body::Planet, 0.0);
        assert!((pos - Vec3::new(PLANET_ORBIT_RADIUS, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_planet_quarter_orbit_on_positive_z() {
        // Phase pi/2 at t = (pi/2) / rate.
        let t = FRAC_PI_2 / PLANET_ORBIT_RATE;
        let pos = body_position(Body::Planet, t);
        assert!(
            (pos - Vec3::new(0.0, 0.0, PLANET_ORBIT_RADIUS)).length() < 1e-4,
            "planet at {pos}"
        );
    }

    #[test]
    fn test_sun_stays_at_origin() {
        for t in [0.0, 1.5, 100.0] {
            assert_eq!(body_position(Body::Sun, t), Vec3::ZERO);
        }
    }

    #[test]
    fn test_moon_orbits_planet() {
        for i in 0..32 {
            let t = i as f32 * 0.37;
            let moon = body_position(Body::Moon, t);
            let planet = body_position(Body::Planet, t);
            let horizontal = Vec3::new(moon.x - planet.x, 0.0, moon.z - planet.z);
            assert!(
                (horizontal.length() - MOON_ORBIT_RADIUS).abs() < 1e-4,
                "moon-planet horizontal distance at t={t}: {}",
                horizontal.length()
            );
            assert!((moon.y - planet.y).abs() <= MOON_BOB_AMPLITUDE + 1e-5);
        }
    }

    #[test]
    fn test_positions_deterministic_in_time() {
        for body in Body::ALL {
            let a = body_position(body, 7.25);
            let b = body_position(body, 7.25);
            assert_eq!(a, b);
            let ta = body_transform(body, 7.25);
            let tb = body_transform(body, 7.25);
            assert_eq!(ta.to_cols_array(), tb.to_cols_array());
        }
    }

    #[test]
    fn test_transform_translation_matches_position() {
        for body in Body::ALL {
            let m = body_transform(body, 3.3);
            let translation = m.col(3).truncate();
            assert!((translation - body_position(body, 3.3)).length() < 1e-5);
        }
    }

    #[test]
    fn test_transform_applies_uniform_scale() {
        let m = body_transform(Body::Sun, 0.0);
        // A unit-sphere surface point lands at radius SUN_SCALE.
        let p = m.transform_point3(Vec3::X);
        assert!((p.length() - SUN_SCALE).abs() < 1e-5);
    }

    #[test]
    fn test_only_sun_is_emissive() {
        assert!(Body::Sun.is_emissive());
        assert!(!Body::Planet.is_emissive());
        assert!(!Body::Moon.is_emissive());
    }

    #[test]
    fn test_compose_emits_all_bodies_in_order() {
        let scene = Scene::new();
        let camera = OrbitCamera::default();
        let frame = scene.compose(0.0, &camera);
        assert_eq!(frame.bodies.len(), 3);
        assert_eq!(frame.bodies[0].body, Body::Sun);
        assert_eq!(frame.bodies[1].body, Body::Planet);
        assert_eq!(frame.bodies[2].body, Body::Moon);
    }

    #[test]
    fn test_compose_reflects_texture_flags() {
        let mut scene = Scene::new();
        scene.set_textured(Body::Planet, true);
        let frame = scene.compose(1.0, &OrbitCamera::default());
        assert!(!frame.bodies[0].textured);
        assert!(frame.bodies[1].textured);
        assert!(!frame.bodies[2].textured);
    }

    #[test]
    fn test_compose_centers_camera_on_focus() {
        let scene = Scene::new();
        let camera = OrbitCamera {
            focus: Body::Moon,
            radius: 10.0,
            yaw: 0.0,
            pitch: 0.0,
            ..OrbitCamera::default()
        };
        let t = 4.2;
        let frame = scene.compose(t, &camera);
        let moon = body_position(Body::Moon, t);
        assert!((frame.camera.center - moon).length() < 1e-5);
        assert!((frame.camera.eye - (moon + Vec3::new(0.0, 0.0, 10.0))).length() < 1e-5);
    }
}
