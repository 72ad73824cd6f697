//! Look-at camera producing view and projection matrices for rendering.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera uniform uploaded once per frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// World-space eye position (w unused).
    pub eye: [f32; 4],
}

/// A perspective camera defined by an eye/center/up pose.
#[derive(Debug, Clone)]
pub struct ViewCamera {
    /// World-space eye position.
    pub eye: Vec3,
    /// Look-at point.
    pub center: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl ViewCamera {
    /// Compute the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    /// Compute the projection matrix with reverse-Z.
    pub fn projection_matrix(&self) -> Mat4 {
        // Reverse-Z: near plane maps to z=1, far plane maps to z=0, handled
        // by swapping near/far in the projection matrix.
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a resize. Zero dimensions (minimized
    /// window) are clamped so the projection matrix stays invertible.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width.max(1.0) / height.max(1.0);
    }

    /// Convert the camera to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            eye: [self.eye.x, self.eye.y, self.eye.z, 0.0],
        }
    }
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 30.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_view_matrix_maps_center_to_negative_z() {
        let camera = ViewCamera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            center: Vec3::ZERO,
            ..ViewCamera::default()
        };
        let view = camera.view_matrix();
        let center_view = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        // The look-at point sits straight ahead, 10 units down -Z.
        assert!(center_view.x.abs() < 1e-5);
        assert!(center_view.y.abs() < 1e-5);
        assert!((center_view.z + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let camera = ViewCamera {
            eye: Vec3::new(3.0, -2.0, 7.0),
            center: Vec3::new(1.0, 1.0, 1.0),
            ..ViewCamera::default()
        };
        let view = camera.view_matrix();
        let eye_view = view * camera.eye.extend(1.0);
        assert!(eye_view.truncate().length() < 1e-4);
    }

    #[test]
    fn test_reverse_z_near_maps_to_one() {
        let camera = ViewCamera::default();
        let proj = camera.projection_matrix();
        // A point on the near plane projects to NDC z=1 under reverse-Z.
        let near_point = proj * Vec4::new(0.0, 0.0, -camera.near, 1.0);
        assert!((near_point.z / near_point.w - 1.0).abs() < 1e-4);
        // A point on the far plane projects to NDC z=0.
        let far_point = proj * Vec4::new(0.0, 0.0, -camera.far, 1.0);
        assert!((far_point.z / far_point.w).abs() < 1e-4);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = ViewCamera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_minimized_window_keeps_aspect_ratio_positive() {
        let mut camera = ViewCamera::default();
        camera.set_aspect_ratio(0.0, 0.0);
        assert_eq!(camera.aspect_ratio, 1.0);
        let proj = camera.projection_matrix();
        assert!(proj.determinant().abs() > 1e-9);
    }

    #[test]
    fn test_uniform_carries_eye_position() {
        let camera = ViewCamera {
            eye: Vec3::new(1.0, 2.0, 3.0),
            ..ViewCamera::default()
        };
        let uniform = camera.to_uniform();
        assert_eq!(uniform.eye, [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_view_projection_combines_correctly() {
        let camera = ViewCamera::default();
        let vp = camera.view_projection_matrix();
        let expected = camera.projection_matrix() * camera.view_matrix();
        assert_eq!(vp.to_cols_array(), expected.to_cols_array());
    }
}
