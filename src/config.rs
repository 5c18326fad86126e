//! Session options with TOML preset support.
//!
//! Every section uses `#[serde(default)]`, so a preset only needs the values
//! it overrides:
//!
//! ```toml
//! [camera]
//! movement_speed = 6.0
//!
//! [trajectory]
//! arrival = "single_pass"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bindings::KeyBindings;
use crate::error::{Error, Result};
use crate::trajectory::ArrivalPolicy;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    pub camera: CameraOptions,
    pub trajectory: TrajectoryOptions,
    pub scene: SceneOptions,
    pub lighting: LightingOptions,
    pub keybindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Starting pose and control parameters of the freelook camera.
pub struct CameraOptions {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    /// Degrees; -90 looks toward -Z.
    pub yaw: f32,
    /// Degrees, clamped to ±89.
    pub pitch: f32,
    /// Units per second.
    pub movement_speed: f32,
    /// Degrees per unit of mouse offset.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 3.0,
            mouse_sensitivity: 0.1,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Parameters shared by every trajectory follower in the scene.
pub struct TrajectoryOptions {
    /// Units per second.
    pub speed: f32,
    /// Distance at which a waypoint counts as reached.
    pub arrival_epsilon: f32,
    pub arrival: ArrivalPolicy,
}

impl TrajectoryOptions {
    /// Reject values that would stall or corrupt a follower.
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(Error::InvalidOption {
                name: "trajectory.speed",
                value: self.speed,
                reason: "must be finite and not negative",
            });
        }
        if !self.arrival_epsilon.is_finite() || self.arrival_epsilon <= 0.0 {
            return Err(Error::InvalidOption {
                name: "trajectory.arrival_epsilon",
                value: self.arrival_epsilon,
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}

impl Default for TrajectoryOptions {
    fn default() -> Self {
        Self {
            speed: 2.0,
            arrival_epsilon: 0.01,
            arrival: ArrivalPolicy::Dwell,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Initial cube layout and the step sizes of manual manipulation keys.
pub struct SceneOptions {
    /// Spawn one cube that follows recorded waypoints.
    pub path_cube: bool,
    /// Positions of manually controlled cubes present at startup.
    pub cubes: Vec<[f32; 3]>,
    /// World units per nudge key press.
    pub nudge_step: f32,
    /// Radians per rotate key press.
    pub rotate_step: f32,
    /// Scale multiplier for the shrink key.
    pub scale_down: f32,
    /// Scale multiplier for the grow key.
    pub scale_up: f32,
    /// Radians per second for cubes with a selected spin axis.
    pub spin_speed: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            path_cube: true,
            cubes: Vec::new(),
            nudge_step: 0.1,
            rotate_step: 0.1,
            scale_down: 0.95,
            scale_up: 1.05,
            spin_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Point light and Phong material colours passed to renderers.
pub struct LightingOptions {
    /// World-space light position.
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            position: [1.2, 1.0, 2.0],
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.5, 0.5, 0.5],
            specular: [1.0, 1.0, 1.0],
            shininess: 32.0,
        }
    }
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut options: Options = toml::from_str(content)?;
        options.trajectory.validate()?;
        options.keybindings.rebuild_reverse_map()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::KeyAction;
    use crate::error::Error;

    #[test]
    fn default_survives_toml() {
        let options = Options::default();
        let text = toml::to_string_pretty(&options).unwrap();
        let parsed = Options::from_toml_str(&text).unwrap();
        assert_eq!(options, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let text = r#"
[camera]
movement_speed = 6.0

[trajectory]
arrival = "single_pass"
"#;
        let options = Options::from_toml_str(text).unwrap();
        assert_eq!(options.camera.movement_speed, 6.0);
        assert_eq!(options.camera.yaw, -90.0);
        assert_eq!(options.trajectory.arrival, ArrivalPolicy::SinglePass);
        assert_eq!(options.trajectory.speed, 2.0);
        assert!(options.scene.path_cube);
    }

    #[test]
    fn loaded_bindings_are_searchable() {
        let text = r#"
[keybindings.bindings]
record_waypoint = "Enter"
"#;
        let options = Options::from_toml_str(text).unwrap();
        assert_eq!(
            options.keybindings.lookup("Enter"),
            Some(KeyAction::RecordWaypoint)
        );
        // A preset's table replaces the default map wholesale.
        assert_eq!(options.keybindings.lookup("KeyW"), None);
    }

    #[test]
    fn conflicting_bindings_fail_to_load() {
        let text = r#"
[keybindings.bindings]
move_forward = "KeyW"
quit = "KeyW"
"#;
        let err = Options::from_toml_str(text).unwrap_err();
        assert!(matches!(err, Error::DuplicateBinding { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[camera\nyaw = ").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn non_positive_arrival_epsilon_is_rejected() {
        for value in ["0.0", "-0.5", "nan"] {
            let text = format!("[trajectory]\narrival_epsilon = {value}\n");
            let err = Options::from_toml_str(&text).unwrap_err();
            assert!(
                matches!(err, Error::InvalidOption { name: "trajectory.arrival_epsilon", .. }),
                "accepted arrival_epsilon = {value}"
            );
        }
    }

    #[test]
    fn negative_speed_is_rejected() {
        let err = Options::from_toml_str("[trajectory]\nspeed = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidOption { name: "trajectory.speed", .. }));

        let options = Options::from_toml_str("[trajectory]\nspeed = 0.0\n").unwrap();
        assert_eq!(options.trajectory.speed, 0.0);
    }

    #[test]
    fn lighting_section_overrides_defaults() {
        let text = r#"
[lighting]
position = [0.0, 4.0, 0.0]
shininess = 8.0
"#;
        let options = Options::from_toml_str(text).unwrap();
        assert_eq!(options.lighting.position, [0.0, 4.0, 0.0]);
        assert_eq!(options.lighting.shininess, 8.0);
        assert_eq!(options.lighting.ambient, [0.2, 0.2, 0.2]);
    }

    #[test]
    fn saving_is_deterministic() {
        let options = Options::default();
        let first = toml::to_string_pretty(&options).unwrap();
        for _ in 0..5 {
            assert_eq!(toml::to_string_pretty(&options.clone()).unwrap(), first);
        }
        let forward = first.find("move_forward").unwrap();
        let quit = first.find("quit").unwrap();
        assert!(forward < quit);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("trailcam-config-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut options = Options::default();
        options.scene.cubes.push([1.0, 2.0, 3.0]);

        options.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded, options);
    }
}
