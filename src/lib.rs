//! # trailcam
//!
//! **A first-person camera and looping waypoint trajectories for small 3D scenes.**
//!
//! Fly around with WASD and the mouse, press a key to drop a waypoint at the
//! camera's position, and watch a cube travel the recorded loop forever.
//!
//! ```no_run
//! use trailcam::*;
//!
//! fn main() -> trailcam::Result<()> {
//!     run(AppConfig::new().title("Cube trail"), Options::default())
//! }
//! ```
//!
//! The two pieces with real math in them are usable on their own:
//!
//! - [`FreelookCamera`]: yaw/pitch (degrees) → orthonormal `front`/`right`/`up`
//!   basis and a view matrix, with pitch clamped short of gimbal lock.
//! - [`TrajectoryFollower`]: constant-speed travel around a closed loop of
//!   waypoints that never overshoots a point.
//!
//! Everything else ([`Session`], [`Scene`], [`Input`], [`KeyBindings`]) wires
//! them to winit input and hands matrices to a [`Renderer`].

mod app;
mod bindings;
mod camera;
mod config;
mod error;
mod freelook_camera;
mod input;
mod lighting;
mod scene;
mod session;
mod trajectory;
mod transform;

pub use app::{AppConfig, TitleRenderer, run, run_with_renderer};
pub use bindings::{KeyAction, KeyBindings};
pub use camera::Camera;
pub use config::{CameraOptions, LightingOptions, Options, SceneOptions, TrajectoryOptions};
pub use error::{Error, Result};
pub use freelook_camera::{FreelookCamera, Movement, PITCH_LIMIT};
pub use input::Input;
pub use lighting::Lighting;
pub use scene::{Axis, Manual, Scene};
pub use session::{FrameMatrices, Renderer, Session, SessionControl};
pub use trajectory::{ARRIVAL_EPSILON, ArrivalPolicy, TrajectoryFollower};
pub use transform::Transform;

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::keyboard::KeyCode;

// ECS handles for inspecting the scene world
pub use hecs::{Entity, World};
