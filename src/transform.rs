use glam::{Mat4, Quat, Vec3};

/// Placement of one cube instance in the world.
///
/// Rotation is applied in the object's local frame, so successive
/// [`rotate_local`](Transform::rotate_local) calls compose the same way
/// chained model-matrix rotations do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space position (translation).
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform positioned at the given location.
    ///
    /// ```
    /// use trailcam::{Transform, Vec3};
    ///
    /// let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Moves the transform by `offset` in world space.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotates about a local axis by `angle` radians.
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// Multiplies every axis of the scale by `factor`.
    pub fn rescale(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Converts this transform to a 4×4 matrix, applied as scale, then rotation, then translation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_matches_translate_rotate_scale_chain() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        transform.rotate_local(Vec3::Y, 0.5);
        transform.rescale(2.0);

        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_rotation_y(0.5)
            * Mat4::from_scale(Vec3::splat(2.0));
        assert!(transform.matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn local_rotations_compose_in_call_order() {
        let mut transform = Transform::new();
        transform.rotate_local(Vec3::X, 0.3);
        transform.rotate_local(Vec3::Y, 0.7);

        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(0.7);
        assert!(transform.matrix().abs_diff_eq(expected, 1e-5));
    }
}
