// scene_core/src/scene/input_event.rs
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;
use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to one input event. Every receiver gets the same object,
/// so marking it handled is visible to the host.
pub type InputEventRef = Rc<InputEvent>;

#[derive(Clone, Debug, PartialEq, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    Key { key: String, pressed: bool, echo: bool },
    MouseButton { button: u8, pressed: bool, x: f32, y: f32 },
    MouseMotion { x: f32, y: f32, dx: f32, dy: f32 },
    Action { action: String, pressed: bool },
}

#[derive(Debug, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    handled: Cell<bool>,
}

impl InputEvent {
    pub fn new(kind: InputKind) -> InputEventRef {
        Rc::new(Self { kind, handled: Cell::new(false) })
    }

    pub fn key(key: &str, pressed: bool) -> InputEventRef {
        Self::new(InputKind::Key { key: key.to_string(), pressed, echo: false })
    }

    pub fn action(action: &str, pressed: bool) -> InputEventRef {
        Self::new(InputKind::Action { action: action.to_string(), pressed })
    }

    /// Short name of the event kind, e.g. `"key"` or `"mouse_motion"`.
    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }

    /// Key events also go through the shortcut and unhandled-key phases.
    pub fn is_key(&self) -> bool {
        matches!(self.kind, InputKind::Key { .. })
    }

    pub fn is_pressed(&self) -> bool {
        match self.kind {
            InputKind::Key { pressed, .. }
            | InputKind::MouseButton { pressed, .. }
            | InputKind::Action { pressed, .. } => pressed,
            InputKind::MouseMotion { .. } => false,
        }
    }

    pub fn is_handled(&self) -> bool {
        self.handled.get()
    }

    /// Stops further propagation of this event.
    pub fn set_handled(&self) {
        self.handled.set(true);
    }
}
