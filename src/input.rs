use std::collections::HashSet;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard state and mouse motion between frames.
#[derive(Debug, Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    /// `None` until the first cursor sample arrives.
    mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
    motion_delta: Vec2,
    /// Set once the platform delivers raw device motion; cursor deltas are ignored from then on.
    raw_motion: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.motion_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(key),
                        ElementState::Released => self.release(key),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never report back.
                self.keys_down.clear();
                self.mouse_position = None;
            }
            _ => {}
        }
    }

    /// Process a raw device event. Only relative mouse motion is used.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.raw_motion = true;
            self.motion_delta += Vec2::new(*dx as f32, *dy as f32);
        }
    }

    /// Mark a key as held. Repeats while already held do not count as a new press.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_released.insert(key);
    }

    /// Feed an absolute cursor position in window coordinates.
    ///
    /// The first sample only latches the position so the camera does not jump
    /// by the cursor's distance from the window origin.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if let Some(last) = self.mouse_position {
            self.mouse_delta += position - last;
        }
        self.mouse_position = Some(position);
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Keys currently held, in no particular order.
    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }

    /// Keys pressed this frame, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_pressed.iter().copied()
    }

    /// Last cursor position in window coordinates, if any was seen.
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    /// Mouse movement this frame in window coordinates (+y is down).
    pub fn mouse_delta(&self) -> Vec2 {
        if self.raw_motion {
            self.motion_delta
        } else {
            self.mouse_delta
        }
    }

    /// Mouse movement this frame as look offsets: +x turns right, +y looks up.
    pub fn look_delta(&self) -> Vec2 {
        let delta = self.mouse_delta();
        Vec2::new(delta.x, -delta.y)
    }
}
