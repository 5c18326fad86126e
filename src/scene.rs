//! The cube instances of a session, stored in a `hecs` world.
//!
//! Every cube has a [`Transform`]. Cubes steered by keyboard nudges carry the
//! [`Manual`] marker; cubes travelling along recorded waypoints carry a
//! [`TrajectoryFollower`] that owns their translation.
//!
//! ```
//! use trailcam::{Scene, SceneOptions, TrajectoryOptions, Vec3};
//!
//! let mut scene = Scene::new(&SceneOptions::default(), &TrajectoryOptions::default());
//! scene.spawn_cube(Vec3::new(2.0, 0.0, 0.0));
//! scene.record_waypoint(Vec3::new(0.0, 0.0, -4.0));
//! scene.update(0.5);
//! assert_eq!(scene.model_matrices().len(), 2);
//! ```

use glam::{Mat4, Quat, Vec3};
use hecs::{Entity, World};

use crate::config::{SceneOptions, TrajectoryOptions};
use crate::trajectory::TrajectoryFollower;
use crate::transform::Transform;

/// Marks a cube that nudge keys translate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manual;

/// A model-space rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn vector(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

pub struct Scene {
    world: World,
    /// Axis every cube spins about, if any. Selecting one replaces the previous.
    spin_axis: Option<Axis>,
    /// Seconds since the scene started; spin angles derive from it.
    elapsed: f32,
    spin_speed: f32,
    trajectory: TrajectoryOptions,
}

impl Scene {
    /// Build a scene with the startup cubes described by `options`.
    pub fn new(options: &SceneOptions, trajectory: &TrajectoryOptions) -> Self {
        let mut scene = Self {
            world: World::new(),
            spin_axis: None,
            elapsed: 0.0,
            spin_speed: options.spin_speed,
            trajectory: trajectory.clone(),
        };
        if options.path_cube {
            scene.spawn_path_cube(Vec3::ZERO);
        }
        for &position in &options.cubes {
            scene.spawn_cube(position.into());
        }
        scene
    }

    /// Add a manually controlled cube.
    pub fn spawn_cube(&mut self, position: Vec3) -> Entity {
        log::debug!("spawned cube at {position:?}");
        self.world.spawn((Transform::from_position(position), Manual))
    }

    /// Add a cube that follows waypoints recorded with [`record_waypoint`](Self::record_waypoint).
    pub fn spawn_path_cube(&mut self, start: Vec3) -> Entity {
        let follower = TrajectoryFollower::from_options(&self.trajectory).at(start);
        log::debug!("spawned path cube at {start:?}");
        self.world.spawn((Transform::from_position(start), follower))
    }

    /// Append `point` to the loop of every path cube. Returns how many cubes received it.
    pub fn record_waypoint(&mut self, point: Vec3) -> usize {
        let mut count = 0;
        for (_, follower) in self.world.query_mut::<&mut TrajectoryFollower>() {
            follower.add_waypoint(point);
            count += 1;
        }
        count
    }

    /// Translate every manual cube.
    pub fn nudge(&mut self, offset: Vec3) {
        for (_, (transform, _)) in self.world.query_mut::<(&mut Transform, &Manual)>() {
            transform.translate(offset);
        }
    }

    /// Rotate every cube about one of its local axes.
    pub fn rotate_by(&mut self, axis: Axis, angle: f32) {
        for (_, transform) in self.world.query_mut::<&mut Transform>() {
            transform.rotate_local(axis.vector(), angle);
        }
    }

    /// Multiply the scale of every cube.
    pub fn rescale(&mut self, factor: f32) {
        for (_, transform) in self.world.query_mut::<&mut Transform>() {
            transform.rescale(factor);
        }
    }

    /// Spin all cubes about `axis`, replacing any previous selection.
    pub fn select_spin(&mut self, axis: Axis) {
        self.spin_axis = Some(axis);
    }

    pub fn stop_spin(&mut self) {
        self.spin_axis = None;
    }

    pub fn spin_axis(&self) -> Option<Axis> {
        self.spin_axis
    }

    /// Advance path cubes and the spin clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        for (_, (transform, follower)) in self
            .world
            .query_mut::<(&mut Transform, &mut TrajectoryFollower)>()
        {
            follower.update(dt);
            transform.position = follower.position();
        }
    }

    /// Model matrices of every cube, spin included.
    pub fn model_matrices(&self) -> Vec<Mat4> {
        let spin = self.spin_rotation();
        self.world
            .query::<&Transform>()
            .iter()
            .map(|(_, transform)| {
                Transform {
                    rotation: transform.rotation * spin,
                    ..*transform
                }
                .matrix()
            })
            .collect()
    }

    /// Position of the first path cube, if there is one.
    pub fn path_cube_position(&self) -> Option<Vec3> {
        self.world
            .query::<&TrajectoryFollower>()
            .iter()
            .next()
            .map(|(_, follower)| follower.position())
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn spin_rotation(&self) -> Quat {
        match self.spin_axis {
            Some(axis) => Quat::from_axis_angle(axis.vector(), self.elapsed * self.spin_speed),
            None => Quat::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_scene() -> Scene {
        let options = SceneOptions {
            path_cube: false,
            ..Default::default()
        };
        Scene::new(&options, &TrajectoryOptions::default())
    }

    #[test]
    fn default_scene_has_one_path_cube() {
        let scene = Scene::new(&SceneOptions::default(), &TrajectoryOptions::default());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.path_cube_position(), Some(Vec3::ZERO));
    }

    #[test]
    fn nudge_moves_only_manual_cubes() {
        let mut scene = empty_scene();
        let manual = scene.spawn_cube(Vec3::ZERO);
        let path = scene.spawn_path_cube(Vec3::ZERO);

        scene.nudge(Vec3::new(0.0, 0.1, 0.0));

        let manual_pos = scene.world().get::<&Transform>(manual).unwrap().position;
        let path_pos = scene.world().get::<&Transform>(path).unwrap().position;
        assert_eq!(manual_pos, Vec3::new(0.0, 0.1, 0.0));
        assert_eq!(path_pos, Vec3::ZERO);
    }

    #[test]
    fn record_waypoint_reaches_every_path_cube() {
        let mut scene = empty_scene();
        scene.spawn_cube(Vec3::ZERO);
        scene.spawn_path_cube(Vec3::ZERO);
        scene.spawn_path_cube(Vec3::X);

        assert_eq!(scene.record_waypoint(Vec3::new(0.0, 0.0, 4.0)), 2);
    }

    #[test]
    fn update_drives_path_cube_transform() {
        let mut scene = empty_scene();
        let cube = scene.spawn_path_cube(Vec3::ZERO);
        scene.record_waypoint(Vec3::new(10.0, 0.0, 0.0));

        scene.update(1.0);

        let position = scene.world().get::<&Transform>(cube).unwrap().position;
        assert_eq!(position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(scene.path_cube_position(), Some(position));
    }

    #[test]
    fn rescale_compounds() {
        let mut scene = empty_scene();
        let cube = scene.spawn_cube(Vec3::ZERO);
        scene.rescale(2.0);
        scene.rescale(0.5);
        let scale = scene.world().get::<&Transform>(cube).unwrap().scale;
        assert_eq!(scale, Vec3::ONE);
    }

    #[test]
    fn spin_rotates_with_elapsed_time() {
        let mut scene = empty_scene();
        scene.spawn_cube(Vec3::ZERO);
        scene.select_spin(Axis::Z);
        scene.update(std::f32::consts::FRAC_PI_2);

        let model = scene.model_matrices()[0];
        let rotated = model.transform_vector3(Vec3::X);
        assert!((rotated - Vec3::Y).length() < 1e-5);

        scene.select_spin(Axis::Y);
        assert_eq!(scene.spin_axis(), Some(Axis::Y));
        scene.stop_spin();
        let model = scene.model_matrices()[0];
        assert!(model.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
