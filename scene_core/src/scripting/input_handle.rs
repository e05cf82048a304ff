// scene_core/src/scripting/input_handle.rs
use crate::scene::input_event::{InputEventRef, InputKind};
use crate::scripting::lua_constants::*;
use mlua::UserDataFields;
use mlua::UserDataMethods;
use mlua::UserData;

/// Lua view of an input event. Shares the host's event, so
/// `event:setHandled()` stops propagation on the host side too.
#[derive(Clone)]
pub struct InputEventHandle(pub InputEventRef);

impl UserData for InputEventHandle {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get(KIND, |_, this| Ok(this.0.kind_name()));
        fields.add_field_method_get(PRESSED, |_, this| Ok(this.0.is_pressed()));
        fields.add_field_method_get(HANDLED, |_, this| Ok(this.0.is_handled()));

        fields.add_field_method_get(KEY, |_, this| Ok(match &this.0.kind {
            InputKind::Key { key, .. } => Some(key.clone()),
            _ => None,
        }));
        fields.add_field_method_get(ECHO, |_, this| Ok(match this.0.kind {
            InputKind::Key { echo, .. } => echo,
            _ => false,
        }));
        fields.add_field_method_get(ACTION, |_, this| Ok(match &this.0.kind {
            InputKind::Action { action, .. } => Some(action.clone()),
            _ => None,
        }));
        fields.add_field_method_get(BUTTON, |_, this| Ok(match this.0.kind {
            InputKind::MouseButton { button, .. } => Some(button),
            _ => None,
        }));
        fields.add_field_method_get(X, |_, this| Ok(match this.0.kind {
            InputKind::MouseButton { x, .. } | InputKind::MouseMotion { x, .. } => Some(x),
            _ => None,
        }));
        fields.add_field_method_get(Y, |_, this| Ok(match this.0.kind {
            InputKind::MouseButton { y, .. } | InputKind::MouseMotion { y, .. } => Some(y),
            _ => None,
        }));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method(SET_HANDLED, |_, this, ()| {
            this.0.set_handled();
            Ok(())
        });
    }
}
