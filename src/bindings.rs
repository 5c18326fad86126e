//! Named actions and the keys that trigger them.
//!
//! Keys are stored as the `Debug` name of a winit [`KeyCode`] (`"KeyW"`,
//! `"BracketLeft"`, `"Escape"`) so presets stay readable:
//!
//! ```toml
//! [keybindings.bindings]
//! move_forward = "KeyW"
//! record_waypoint = "KeyP"
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::error::{Error, Result};
use crate::input::Input;

/// Everything a key can do in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Append the camera position to every path cube.
    RecordWaypoint,
    SpawnCube,
    NudgeForward,
    NudgeBackward,
    NudgeLeft,
    NudgeRight,
    NudgeUp,
    NudgeDown,
    ScaleDown,
    ScaleUp,
    SpinX,
    SpinY,
    SpinZ,
    RotateX,
    RotateY,
    RotateZ,
    Quit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key names.
pub struct KeyBindings {
    /// Maps action → key name (e.g. `MoveForward` → `"KeyW"`).
    pub bindings: BTreeMap<KeyAction, String>,
    /// Reverse lookup cache (key name → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings: BTreeMap<KeyAction, String> = BTreeMap::from([
            (KeyAction::MoveForward, "KeyW".into()),
            (KeyAction::MoveBackward, "KeyS".into()),
            (KeyAction::StrafeLeft, "KeyA".into()),
            (KeyAction::StrafeRight, "KeyD".into()),
            (KeyAction::RecordWaypoint, "KeyP".into()),
            (KeyAction::SpawnCube, "KeyC".into()),
            (KeyAction::NudgeForward, "ArrowUp".into()),
            (KeyAction::NudgeBackward, "ArrowDown".into()),
            (KeyAction::NudgeLeft, "ArrowLeft".into()),
            (KeyAction::NudgeRight, "ArrowRight".into()),
            (KeyAction::NudgeUp, "KeyI".into()),
            (KeyAction::NudgeDown, "KeyJ".into()),
            (KeyAction::ScaleDown, "BracketLeft".into()),
            (KeyAction::ScaleUp, "BracketRight".into()),
            (KeyAction::SpinX, "KeyX".into()),
            (KeyAction::SpinY, "KeyY".into()),
            (KeyAction::SpinZ, "KeyZ".into()),
            (KeyAction::RotateX, "Digit1".into()),
            (KeyAction::RotateY, "Digit2".into()),
            (KeyAction::RotateZ, "Digit3".into()),
            (KeyAction::Quit, "Escape".into()),
        ]);

        let key_to_action = bindings
            .iter()
            .map(|(action, key)| (key.clone(), *action))
            .collect();
        Self {
            bindings,
            key_to_action,
        }
    }
}

impl KeyBindings {
    /// Rebuild the reverse lookup map (key name → action).
    ///
    /// Fails if two actions share a key; the map is left holding whichever
    /// bindings were inserted before the collision.
    pub fn rebuild_reverse_map(&mut self) -> Result<()> {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            if let Some(existing) = self.key_to_action.insert(key.clone(), *action) {
                if existing != *action {
                    return Err(Error::DuplicateBinding {
                        key: key.clone(),
                        first: existing,
                        second: *action,
                    });
                }
            }
        }
        Ok(())
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) -> Result<()> {
        self.bindings.insert(action, key.into());
        self.rebuild_reverse_map()
    }

    /// Look up the action for a key name.
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Look up the action for a physical key.
    pub fn action_for(&self, code: KeyCode) -> Option<KeyAction> {
        self.lookup(&format!("{code:?}"))
    }

    /// The key name bound to `action`, if any.
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }

    /// True while the key bound to `action` is held.
    pub fn held(&self, input: &Input, action: KeyAction) -> bool {
        input
            .held_keys()
            .any(|code| self.action_for(code) == Some(action))
    }

    /// Actions whose key went down this frame.
    pub fn pressed<'a>(&'a self, input: &'a Input) -> impl Iterator<Item = KeyAction> + 'a {
        input.pressed_keys().filter_map(|code| self.action_for(code))
    }
}
