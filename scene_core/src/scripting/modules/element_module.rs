// scene_core/src/scripting/modules/element_module.rs
use crate::scripting::modules::lua_module::*;
use crate::scripting::element_handle::ElementHandle;
use crate::scripting::lua_hooks::LuaHooks;
use crate::scripting::lua_constants::*;
use crate::scene::dispatch::SharedScene;
use crate::scene::lifecycle::*;
use crate::{register_lua_api, register_lua_module};
use strum::IntoEnumIterator;
use std::rc::Rc;
use mlua::Table;
use mlua::Lua;

/// Lua module that exposes the `Element` constructor table.
#[derive(Default)]
pub struct ElementModule;
register_lua_module!(ElementModule);
register_lua_api!(ElementModule, "element.lua");

impl LuaModule for ElementModule {
    fn register(&self, lua: &Lua) -> mlua::Result<()> {
        let scene: SharedScene = lua
            .app_data_ref::<SharedScene>()
            .map(|scene| Rc::clone(&scene))
            .ok_or_else(|| mlua::Error::RuntimeError("No scene installed in the Lua state".into()))?;

        let element_tbl = lua.create_table()?;

        // Element.new(name [, hooks])
        let new_scene = scene.clone();
        let new_fn = lua.create_function(move |_, (name, hooks): (String, Option<Table>)| {
            let element = match &hooks {
                Some(table) => {
                    let hooks = shared_hooks(LuaHooks::new(table.clone()));
                    new_scene.borrow_mut().spawn_element(&name, hooks)
                }
                None => new_scene.borrow_mut().spawn_element(&name, shared_hooks(NoHooks)),
            };

            let handle = ElementHandle::new(element, new_scene.clone());
            if let Some(table) = hooks {
                table.set(HOOKS_ELEMENT, handle.clone())?;
            }
            Ok(handle)
        })?;
        element_tbl.set(NEW, new_fn)?;

        // Element.root()
        let root_scene = scene.clone();
        let root_fn = lua.create_function(move |_, ()| {
            let root = root_scene.borrow().root_element();
            Ok(ElementHandle::new(root, root_scene.clone()))
        })?;
        element_tbl.set(ROOT, root_fn)?;

        lua.globals().set(ELEMENT, element_tbl)?;
        Ok(())
    }
}

impl LuaApi for ElementModule {
    fn emit_api(&self, out: &mut LuaApiWriter) {
        out.line("---@class ElementHooks");
        out.line("---@field element Element");
        for hook in LifecycleHook::iter() {
            let params = match hook {
                LifecycleHook::Process | LifecycleHook::PhysicsProcess => "self: ElementHooks, delta: number",
                LifecycleHook::Input
                | LifecycleHook::UnhandledInput
                | LifecycleHook::UnhandledKeyInput
                | LifecycleHook::ShortcutInput => "self: ElementHooks, event: InputEvent",
                _ => "self: ElementHooks",
            };
            out.write(format_args!("---@field {} fun({})|nil\n", hook, params));
        }
        out.line("");

        out.line("---@class InputEvent");
        out.line("---@field kind \"key\"|\"mouse_button\"|\"mouse_motion\"|\"action\"");
        out.line("---@field key string|nil");
        out.line("---@field action string|nil");
        out.line("---@field button integer|nil");
        out.line("---@field pressed boolean");
        out.line("---@field echo boolean");
        out.line("---@field x number|nil");
        out.line("---@field y number|nil");
        out.line("---@field handled boolean");
        out.line("local InputEvent = {}");
        out.line("function InputEvent:setHandled() end");
        out.line("");

        out.line("---@class Element");
        out.line("---@field name string");
        out.line("---@field id integer");
        out.write(format_args!("{} = {{}}\n", ELEMENT));
        out.line("");
        out.line("---@param name string");
        out.line("---@param hooks ElementHooks|nil");
        out.line("---@return Element");
        out.line("function Element.new(name, hooks) end");
        out.line("");
        out.line("---@return Element");
        out.line("function Element.root() end");
        out.line("");
        out.line("---@param pattern string");
        out.line("---@return Element|nil");
        out.line("function Element:find(pattern) end");
        out.line("---@return Element|nil");
        out.line("function Element:getParent() end");
        out.line("---@param child Element");
        out.line("function Element:addChild(child) end");
        out.line("---@param child Element");
        out.line("function Element:removeChild(child) end");
        out.line("---@return Element[]");
        out.line("function Element:getChildren() end");
        out.line("---@return boolean");
        out.line("function Element:isInsideTree() end");
        out.line("function Element:free() end");
        out.line("");
    }
}
