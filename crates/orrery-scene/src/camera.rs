//! Orbit camera: spherical offset around a selectable focus body.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::bodies::Body;

/// Pitch is kept this far away from straight up/down to avoid gimbal flip.
pub const PITCH_LIMIT_MARGIN: f32 = 0.1;
/// Allowed orbit radius range.
pub const RADIUS_RANGE: (f32, f32) = (8.0, 60.0);

/// Mutable camera state. Input callbacks mutate it; the scene composer reads
/// it once per frame to derive an eye/center/up pose.
#[derive(Clone, Copy, Debug)]
pub struct OrbitCamera {
    /// Distance from the focus body.
    pub radius: f32,
    /// Azimuth angle in radians.
    pub yaw: f32,
    /// Elevation angle in radians, always within the pitch limits.
    pub pitch: f32,
    /// The body the orbit is centered on.
    pub focus: Body,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 30.0,
            yaw: 0.6,
            pitch: 0.35,
            focus: Body::Sun,
        }
    }
}

/// Derived per-frame camera pose.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    /// World-space eye position.
    pub eye: Vec3,
    /// Look-at point (the focus body's center).
    pub center: Vec3,
    /// Up vector, always +Y.
    pub up: Vec3,
}

impl OrbitCamera {
    /// Apply a pointer drag delta, in radians per input unit already scaled
    /// by the caller's sensitivity. Pitch is clamped away from the poles.
    pub fn apply_drag(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(
            -FRAC_PI_2 + PITCH_LIMIT_MARGIN,
            FRAC_PI_2 - PITCH_LIMIT_MARGIN,
        );
    }

    /// Apply a zoom delta (positive moves the camera outward). Radius is
    /// clamped to [`RADIUS_RANGE`].
    pub fn apply_zoom(&mut self, radius_delta: f32) {
        self.radius = (self.radius + radius_delta).clamp(RADIUS_RANGE.0, RADIUS_RANGE.1);
    }

    /// Select a new focus body. Takes effect on the next composed frame.
    pub fn set_focus(&mut self, focus: Body) {
        self.focus = focus;
    }

    /// Spherical offset from the focus center to the eye.
    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.pitch.cos() * self.yaw.sin(),
            self.radius * self.pitch.sin(),
            self.radius * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Derive the camera pose for a given focus position.
    pub fn pose(&self, focus_pos: Vec3) -> CameraPose {
        CameraPose {
            eye: focus_pos + self.offset(),
            center: focus_pos,
            up: Vec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped_after_any_drag_sequence() {
        let mut cam = OrbitCamera::default();
        let deltas = [5.0, -20.0, 0.01, 3.2, -0.4, 100.0, -100.0];
        for &d in &deltas {
            cam.apply_drag(d * 0.5, d);
            assert!(cam.pitch > -FRAC_PI_2 + PITCH_LIMIT_MARGIN - 1e-6);
            assert!(cam.pitch < FRAC_PI_2 - PITCH_LIMIT_MARGIN + 1e-6);
        }
    }

    #[test]
    fn test_radius_clamped_after_any_zoom_sequence() {
        let mut cam = OrbitCamera::default();
        for &d in &[-100.0, 5.0, 300.0, -2.0, -500.0, 1.0] {
            cam.apply_zoom(d);
            assert!(cam.radius >= RADIUS_RANGE.0);
            assert!(cam.radius <= RADIUS_RANGE.1);
        }
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut cam = OrbitCamera::default();
        cam.yaw = 0.0;
        for _ in 0..100 {
            cam.apply_drag(1.0, 0.0);
        }
        assert!((cam.yaw - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_offset_at_zero_angles_points_along_z() {
        let cam = OrbitCamera {
            radius: 10.0,
            yaw: 0.0,
            pitch: 0.0,
            focus: Body::Moon,
        };
        assert!((cam.offset() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-6);
    }

    #[test]
    fn test_offset_length_equals_radius() {
        let cam = OrbitCamera {
            radius: 25.0,
            yaw: 1.1,
            pitch: 0.7,
            focus: Body::Sun,
        };
        assert!((cam.offset().length() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_pose_centers_on_focus_position() {
        let cam = OrbitCamera::default();
        let focus = Vec3::new(3.0, 1.0, -4.0);
        let pose = cam.pose(focus);
        assert_eq!(pose.center, focus);
        assert_eq!(pose.up, Vec3::Y);
        assert!((pose.eye - focus - cam.offset()).length() < 1e-6);
    }

    #[test]
    fn test_focus_selection_is_immediate() {
        let mut cam = OrbitCamera::default();
        assert_eq!(cam.focus, Body::Sun);
        cam.set_focus(Body::Planet);
        assert_eq!(cam.focus, Body::Planet);
        cam.set_focus(Body::Moon);
        assert_eq!(cam.focus, Body::Moon);
    }
}
