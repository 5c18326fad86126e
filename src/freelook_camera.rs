//! A first-person freelook camera driven by yaw/pitch angles.
//!
//! [`FreelookCamera`] keeps an orthonormal `front`/`right`/`up` basis derived
//! from two Euler angles (in degrees) and a fixed world-up reference, so the
//! camera never rolls. Mouse motion turns it, movement keys translate it
//! along `front` and `right`.
//!
//! # Example
//!
//! ```
//! use trailcam::{FreelookCamera, Movement, Vec3};
//!
//! let mut camera = FreelookCamera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0)
//!     .speed(3.0)
//!     .sensitivity(0.1);
//!
//! // In frame loop:
//! camera.process_mouse_movement(12.0, -4.0, true);
//! camera.process_keyboard(Movement::Forward, 0.016);
//! let view = camera.view_matrix();
//! # let _ = view;
//! ```

use glam::{Mat4, Vec3};

use crate::bindings::{KeyAction, KeyBindings};
use crate::camera::Camera;
use crate::config::CameraOptions;
use crate::input::Input;

/// Pitch is kept within ±this many degrees when constrained.
pub const PITCH_LIMIT: f32 = 89.0;

/// Below this length `front × world_up` is treated as degenerate.
const DEGENERATE_CROSS: f32 = 1e-6;

/// A translation along the camera's own axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl Movement {
    pub const ALL: [Movement; 4] = [
        Movement::Forward,
        Movement::Backward,
        Movement::StrafeLeft,
        Movement::StrafeRight,
    ];

    /// The key action that drives this movement.
    pub fn action(self) -> KeyAction {
        match self {
            Movement::Forward => KeyAction::MoveForward,
            Movement::Backward => KeyAction::MoveBackward,
            Movement::StrafeLeft => KeyAction::StrafeLeft,
            Movement::StrafeRight => KeyAction::StrafeRight,
        }
    }
}

/// A first-person camera with yaw/pitch mouse look and planar strafing.
///
/// # Controls (via [`update`](FreelookCamera::update) and the default bindings)
///
/// - **W/S**: Move forward/backward along the view direction
/// - **A/D**: Strafe left/right
/// - **Mouse**: Look around; pitch is clamped to ±89°
///
/// The basis vectors are private so they can only change together with the
/// angles they are derived from.
#[derive(Clone, Debug)]
pub struct FreelookCamera {
    /// Eye position in world space.
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    /// Horizontal angle in degrees. -90 looks toward -Z.
    yaw: f32,
    /// Vertical angle in degrees. 0 = horizontal, positive = up.
    pitch: f32,
    /// Movement speed in units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per unit of mouse offset.
    pub mouse_sensitivity: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for FreelookCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0)
    }
}

impl FreelookCamera {
    /// Create a camera at `position` looking along the direction given by
    /// `yaw` and `pitch` (degrees), with `world_up` as the no-roll reference.
    ///
    /// `pitch` is clamped to ±[`PITCH_LIMIT`].
    pub fn new(position: impl Into<Vec3>, world_up: impl Into<Vec3>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position: position.into(),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: world_up.into().normalize_or(Vec3::Y),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            movement_speed: 3.0,
            mouse_sensitivity: 0.1,
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        };
        camera.update_vectors();
        camera
    }

    /// Build a camera from an options preset.
    pub fn from_options(options: &CameraOptions) -> Self {
        Self::new(options.position, options.world_up, options.yaw, options.pitch)
            .speed(options.movement_speed)
            .sensitivity(options.mouse_sensitivity)
            .fov(options.fov)
            .clip_planes(options.near, options.far)
    }

    /// Set movement speed in units per second.
    pub fn speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Set mouse sensitivity in degrees per unit of offset.
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Set the field of view in degrees.
    pub fn fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Set near and far clipping planes.
    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Heading in degrees; -90 looks toward -Z.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Normalized no-roll reference direction.
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Replace both angles at once. No clamping is applied.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_vectors();
    }

    /// Replace the no-roll reference direction.
    pub fn set_world_up(&mut self, world_up: impl Into<Vec3>) {
        self.world_up = world_up.into().normalize_or(Vec3::Y);
        self.update_vectors();
    }

    /// Recompute `front`, `right` and `up` from the current angles.
    ///
    /// When `front` is (nearly) parallel to world up the cross product carries
    /// no direction, so the previous `right` is kept, re-orthogonalised
    /// against the new `front`.
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();

        let right = self.front.cross(self.world_up);
        if right.length() >= DEGENERATE_CROSS {
            self.right = right.normalize();
        } else {
            log::trace!(
                "view direction parallel to world up (yaw {}, pitch {}); keeping previous right",
                self.yaw,
                self.pitch
            );
            let projected = self.right - self.front * self.right.dot(self.front);
            self.right = projected.normalize_or(self.front.any_orthonormal_vector());
        }
        self.up = self.right.cross(self.front).normalize();
    }

    /// Translate along the camera's own axes by `movement_speed * dt`.
    pub fn process_keyboard(&mut self, movement: Movement, dt: f32) {
        let velocity = self.movement_speed * dt;
        match movement {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::StrafeLeft => self.position -= self.right * velocity,
            Movement::StrafeRight => self.position += self.right * velocity,
        }
    }

    /// Turn the camera by mouse offsets (+x turns right, +y looks up).
    ///
    /// With `constrain_pitch` the pitch saturates at ±[`PITCH_LIMIT`].
    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Apply one frame of mouse look and held movement keys.
    pub fn update(&mut self, input: &Input, keys: &KeyBindings, dt: f32) {
        let look = input.look_delta();
        if look != glam::Vec2::ZERO {
            self.process_mouse_movement(look.x, look.y, true);
        }

        for movement in Movement::ALL {
            if keys.held(input, movement.action()) {
                self.process_keyboard(movement, dt);
            }
        }
    }

    /// Look-at transform from the eye toward `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Get the current camera state.
    pub fn camera(&self) -> Camera {
        Camera {
            position: self.position,
            forward: self.front,
            up: self.up,
            fov: self.fov,
            near: self.near,
            far: self.far,
        }
    }
}
