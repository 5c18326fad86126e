//! Per-frame glue between input, the camera and the scene.
//!
//! A [`Session`] owns everything that changes while the app runs. The event
//! loop calls [`Session::update`] once per frame with that frame's input and
//! elapsed time, then hands [`Session::frame`] to a [`Renderer`].

use glam::{Mat4, Vec3};

use crate::bindings::{KeyAction, KeyBindings};
use crate::camera::Camera;
use crate::config::{Options, SceneOptions};
use crate::freelook_camera::FreelookCamera;
use crate::input::Input;
use crate::lighting::Lighting;
use crate::scene::{Axis, Scene};

/// Whether the app should keep running after this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug)]
pub struct FrameMatrices {
    pub camera: Camera,
    /// Eye position for specular highlights.
    pub view_position: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// One model matrix per cube.
    pub models: Vec<Mat4>,
    /// Where the first path cube currently is, if there is one.
    pub path_cube: Option<Vec3>,
    pub lighting: Lighting,
}

/// Draws a prepared frame. Mesh, shaders and the graphics API are up to the implementor.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameMatrices);

    /// Called when the drawable area changes size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

pub struct Session {
    camera: FreelookCamera,
    scene: Scene,
    keys: KeyBindings,
    steps: SceneOptions,
    lighting: Lighting,
}

impl Session {
    pub fn new(options: &Options) -> Self {
        Self {
            camera: FreelookCamera::from_options(&options.camera),
            scene: Scene::new(&options.scene, &options.trajectory),
            keys: options.keybindings.clone(),
            steps: options.scene.clone(),
            lighting: Lighting::from_options(&options.lighting),
        }
    }

    pub fn camera(&self) -> &FreelookCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FreelookCamera {
        &mut self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut Lighting {
        &mut self.lighting
    }

    /// Run one frame: camera look and movement, discrete key actions, then path cubes.
    pub fn update(&mut self, input: &Input, dt: f32) -> SessionControl {
        self.camera.update(input, &self.keys, dt);

        let actions: Vec<KeyAction> = self.keys.pressed(input).collect();
        let mut control = SessionControl::Continue;
        for action in actions {
            if self.apply(action) == SessionControl::Quit {
                control = SessionControl::Quit;
            }
        }

        self.scene.update(dt);
        control
    }

    /// Perform a single discrete action, as if its key had just been pressed.
    ///
    /// Movement actions are continuous and handled by the camera; they do nothing here.
    pub fn apply(&mut self, action: KeyAction) -> SessionControl {
        let step = self.steps.nudge_step;
        match action {
            KeyAction::MoveForward
            | KeyAction::MoveBackward
            | KeyAction::StrafeLeft
            | KeyAction::StrafeRight => {}
            KeyAction::RecordWaypoint => self.record_waypoint(),
            KeyAction::SpawnCube => {
                self.scene.spawn_cube(Vec3::ZERO);
            }
            KeyAction::NudgeForward => self.scene.nudge(Vec3::new(0.0, 0.0, -step)),
            KeyAction::NudgeBackward => self.scene.nudge(Vec3::new(0.0, 0.0, step)),
            KeyAction::NudgeLeft => self.scene.nudge(Vec3::new(-step, 0.0, 0.0)),
            KeyAction::NudgeRight => self.scene.nudge(Vec3::new(step, 0.0, 0.0)),
            KeyAction::NudgeUp => self.scene.nudge(Vec3::new(0.0, step, 0.0)),
            KeyAction::NudgeDown => self.scene.nudge(Vec3::new(0.0, -step, 0.0)),
            KeyAction::ScaleDown => self.scene.rescale(self.steps.scale_down),
            KeyAction::ScaleUp => self.scene.rescale(self.steps.scale_up),
            KeyAction::SpinX => self.scene.select_spin(Axis::X),
            KeyAction::SpinY => self.scene.select_spin(Axis::Y),
            KeyAction::SpinZ => self.scene.select_spin(Axis::Z),
            KeyAction::RotateX => self.scene.rotate_by(Axis::X, self.steps.rotate_step),
            KeyAction::RotateY => self.scene.rotate_by(Axis::Y, self.steps.rotate_step),
            KeyAction::RotateZ => self.scene.rotate_by(Axis::Z, self.steps.rotate_step),
            KeyAction::Quit => return SessionControl::Quit,
        }
        SessionControl::Continue
    }

    fn record_waypoint(&mut self) {
        let point = self.camera.position;
        match self.scene.record_waypoint(point) {
            0 => log::warn!("no path cube to receive waypoint {point:?}"),
            _ => log::info!(
                "waypoint added: ({:.2}, {:.2}, {:.2})",
                point.x,
                point.y,
                point.z
            ),
        }
    }

    /// Matrices for the current state, for a viewport of the given aspect ratio.
    pub fn frame(&self, aspect: f32) -> FrameMatrices {
        let camera = self.camera.camera();
        FrameMatrices {
            camera,
            view_position: camera.position,
            view: self.camera.view_matrix(),
            projection: camera.projection_matrix(aspect),
            models: self.scene.model_matrices(),
            path_cube: self.scene.path_cube_position(),
            lighting: self.lighting,
        }
    }

    /// Prepare the current frame and hand it to `renderer`.
    pub fn render(&self, renderer: &mut impl Renderer, aspect: f32) {
        renderer.draw(&self.frame(aspect));
    }
}
