//! Phong point-light parameters handed to renderers each frame.
//!
//! [`Lighting::shade`] evaluates the same ambient + diffuse + specular sum a
//! fragment shader would, so CPU-side renderers and tests can use it directly.

use glam::Vec3;

use crate::config::LightingOptions;

/// A single point light with Phong material colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// World-space light position.
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

impl Lighting {
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            position: options.position.into(),
            ambient: options.ambient.into(),
            diffuse: options.diffuse.into(),
            specular: options.specular.into(),
            shininess: options.shininess,
        }
    }

    /// Colour of a surface point with base colour `albedo`, seen from `eye`.
    ///
    /// The specular term is not tinted by `albedo`.
    pub fn shade(&self, point: Vec3, normal: Vec3, eye: Vec3, albedo: Vec3) -> Vec3 {
        let normal = normal.normalize_or_zero();
        let to_light = (self.position - point).normalize_or_zero();
        let to_eye = (eye - point).normalize_or_zero();
        let reflected = (-to_light).reflect(normal);

        let diffuse = normal.dot(to_light).max(0.0);
        let specular = to_eye.dot(reflected).max(0.0).powf(self.shininess);

        self.ambient * albedo + self.diffuse * diffuse * albedo + self.specular * specular
    }
}
