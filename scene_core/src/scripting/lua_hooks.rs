// scene_core/src/scripting/lua_hooks.rs
use crate::scripting::input_handle::InputEventHandle;
use crate::scene::input_event::InputEventRef;
use crate::scene::lifecycle::*;
use crate::*;
use mlua::IntoLuaMulti;
use mlua::Function;
use mlua::Table;

/// Element hooks backed by a Lua table. Each lifecycle call looks up the
/// same-named function on the table and calls it as a method.
/// Missing functions are skipped; errors are logged and swallowed.
pub struct LuaHooks {
    table: Table,
}

impl LuaHooks {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    fn call(&self, hook: LifecycleHook, args: impl IntoLuaMulti) {
        let name = hook.script_name();
        let func = match self.table.get::<Option<Function>>(name) {
            Ok(Some(func)) => func,
            Ok(None) => return,
            Err(e) => {
                host_error!("Lua hook '{}' is not callable: {}", name, e);
                return;
            }
        };

        if let Err(e) = func.call::<()>(args) {
            host_error!("Lua hook '{}' failed: {}", name, e);
        }
    }

    fn call_event(&self, hook: LifecycleHook, event: &InputEventRef) {
        self.call(hook, (self.table.clone(), InputEventHandle(event.clone())));
    }
}

impl ElementHooks for LuaHooks {
    fn enter_tree(&mut self) {
        self.call(LifecycleHook::EnterTree, self.table.clone());
    }

    fn exit_tree(&mut self) {
        self.call(LifecycleHook::ExitTree, self.table.clone());
    }

    fn ready(&mut self) {
        self.call(LifecycleHook::Ready, self.table.clone());
    }

    fn process(&mut self, delta: f64) {
        self.call(LifecycleHook::Process, (self.table.clone(), delta));
    }

    fn physics_process(&mut self, delta: f64) {
        self.call(LifecycleHook::PhysicsProcess, (self.table.clone(), delta));
    }

    fn input(&mut self, event: &InputEventRef) {
        self.call_event(LifecycleHook::Input, event);
    }

    fn unhandled_input(&mut self, event: &InputEventRef) {
        self.call_event(LifecycleHook::UnhandledInput, event);
    }

    fn unhandled_key_input(&mut self, event: &InputEventRef) {
        self.call_event(LifecycleHook::UnhandledKeyInput, event);
    }

    fn shortcut_input(&mut self, event: &InputEventRef) {
        self.call_event(LifecycleHook::ShortcutInput, event);
    }
}
