//! Per-tick input snapshot built from queued events.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::queue::{Axis, InputEvent};

/// Key codes (DOM `keyCode` values) used by the default bindings.
pub mod keys {
    pub const SHIFT: u32 = 16;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

/// Gameplay actions the controller asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Sprint,
}

/// What the movement controller needs from an input device.
pub trait InputSource {
    /// Horizontal axis in [-1, 1], positive to the right.
    fn horizontal_axis(&self) -> f32;
    /// Vertical axis in [-1, 1], positive up.
    fn vertical_axis(&self) -> f32;
    /// Whether any key bound to `action` is down.
    fn held(&self, action: Action) -> bool;
    /// Whether a key bound to `action` went down since the last tick.
    fn pressed(&self, action: Action) -> bool;
}

/// Which key codes trigger which action. Several keys may share an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub up: Vec<u32>,
    pub down: Vec<u32>,
    pub jump: Vec<u32>,
    pub sprint: Vec<u32>,
}

impl KeyBindings {
    pub fn keys(&self, action: Action) -> &[u32] {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Jump => &self.jump,
            Action::Sprint => &self.sprint,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![keys::LEFT, keys::A],
            right: vec![keys::RIGHT, keys::D],
            up: vec![keys::UP, keys::W],
            down: vec![keys::DOWN, keys::S],
            jump: vec![keys::SPACE],
            sprint: vec![keys::SHIFT],
        }
    }
}

/// Held keys, press edges and analog axes.
///
/// Press edges survive until [`InputState::end_tick`], so a key tapped during
/// a frame that ran no fixed step is still seen by the next step.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: HashSet<u32>,
    pressed: HashSet<u32>,
    analog: Vec2,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    pub fn ingest(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                // Auto-repeat sends KeyDown for a key that is already held.
                if self.held.insert(key_code) {
                    self.pressed.insert(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
            }
            InputEvent::AxisMoved { axis, value } => {
                let value = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
                match axis {
                    Axis::Horizontal => self.analog.x = value,
                    Axis::Vertical => self.analog.y = value,
                }
            }
        }
    }

    pub fn ingest_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.ingest(event);
        }
    }

    /// Consume press edges. Call after each fixed step.
    pub fn end_tick(&mut self) {
        self.pressed.clear();
    }

    fn digital(&self, negative: Action, positive: Action) -> f32 {
        let mut value = 0.0;
        if self.held(negative) {
            value -= 1.0;
        }
        if self.held(positive) {
            value += 1.0;
        }
        value
    }
}

impl InputSource for InputState {
    fn horizontal_axis(&self) -> f32 {
        (self.digital(Action::Left, Action::Right) + self.analog.x).clamp(-1.0, 1.0)
    }

    fn vertical_axis(&self) -> f32 {
        (self.digital(Action::Down, Action::Up) + self.analog.y).clamp(-1.0, 1.0)
    }

    fn held(&self, action: Action) -> bool {
        self.bindings.keys(action).iter().any(|k| self.held.contains(k))
    }

    fn pressed(&self, action: Action) -> bool {
        self.bindings.keys(action).iter().any(|k| self.pressed.contains(k))
    }
}
