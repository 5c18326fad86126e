use glam::{Mat4, Vec3};

/// A snapshot of where the eye is and where it looks.
///
/// Produced by [`FreelookCamera::camera`](crate::FreelookCamera::camera) once per
/// frame and handed to the renderer to build the view and projection matrices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32, // radians
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Compute the right vector from forward and up.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or_zero()
    }

    /// Recompute up to be orthogonal to forward and right.
    pub fn orthogonal_up(&self) -> Vec3 {
        self.right().cross(self.forward).normalize_or_zero()
    }

    /// Right-handed look-at transform from the eye toward `position + forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Right-handed perspective projection with OpenGL clip-space depth.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, self.near, self.far)
    }

    /// `projection * view`, ready to transform world points to clip space.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_basis_is_orthonormal() {
        let camera = Camera::default();
        assert!((camera.right() - Vec3::X).length() < 1e-6);
        assert!((camera.orthogonal_up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(eye.length() < 1e-5);
    }

    #[test]
    fn view_matrix_puts_forward_on_negative_z() {
        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            forward: Vec3::NEG_Z,
            ..Default::default()
        };
        let target = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(target.x.abs() < 1e-5);
        assert!(target.y.abs() < 1e-5);
        assert!((target.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn view_projection_keeps_the_look_target_centred() {
        let camera = Camera {
            position: Vec3::new(3.0, 1.0, 0.0),
            forward: Vec3::NEG_X,
            ..Default::default()
        };
        let clip = camera.view_projection(1.5).project_point3(Vec3::new(-2.0, 1.0, 0.0));
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
        assert!(clip.z > -1.0 && clip.z < 1.0);
    }
}
