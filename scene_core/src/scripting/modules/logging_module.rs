// scene_core/src/scripting/modules/logging_module.rs
use crate::scripting::modules::lua_module::*;
use crate::scripting::lua_constants::*;
use crate::logging::logging::last_log;
use crate::*;
use mlua::Variadic;
use mlua::Function;
use mlua::Value;
use mlua::Table;
use mlua::Lua;

/// Log‑level strings that are exposed to Lua.
pub const LOG_INFO: &str = "info";
pub const LOG_WARN: &str = "warn";
pub const LOG_ERROR: &str = "error";
pub const LOG_DEBUG: &str = "debug";

/// Lua module that exposes `engine.log`.
#[derive(Default)]
pub struct LoggingModule;
register_lua_module!(LoggingModule);
register_lua_api!(LoggingModule, "engine.lua");

impl LuaModule for LoggingModule {
    fn register(&self, lua: &Lua) -> mlua::Result<()> {
        fn level_wrapper(lua: &Lua, level_name: &'static str) -> mlua::Result<Function> {
            lua.create_function(move |_, args: Variadic<Value>| {
                let msg = match args.iter().next() {
                    Some(Value::String(s)) => s.to_str()?.to_owned(),
                    Some(other) => other.to_string()?,
                    None => {
                        return Err(mlua::Error::RuntimeError(
                            format!("log.{level_name} expects a message"),
                        ))
                    }
                };

                match level_name {
                    LOG_INFO => host_info!("[Lua] {}", msg),
                    LOG_WARN => host_warn!("[Lua] {}", msg),
                    LOG_ERROR => host_error!("[Lua] {}", msg),
                    LOG_DEBUG => host_debug!("[Lua] {}", msg),
                    _ => host_error!("[Lua] Log level '{}' was not recognised.", level_name),
                }

                Ok(())
            })
        }

        let log_tbl = lua.create_table()?;
        for level in [LOG_INFO, LOG_WARN, LOG_ERROR, LOG_DEBUG] {
            log_tbl.set(level, level_wrapper(lua, level)?)?;
        }
        log_tbl.set(LAST, lua.create_function(|_, ()| Ok(last_log()))?)?;

        let engine_mod: Table = lua.globals().get(ENGINE)?;
        engine_mod.set(LOG, log_tbl)?;

        Ok(())
    }
}

impl LuaApi for LoggingModule {
    fn emit_api(&self, out: &mut LuaApiWriter) {
        out.line("---@class EngineLog");
        out.line("local EngineLog = {}");
        for level in [LOG_INFO, LOG_WARN, LOG_ERROR, LOG_DEBUG] {
            out.line("---@param msg any");
            out.write(format_args!("function EngineLog.{}(msg) end\n", level));
        }
        out.line("---@return string");
        out.write(format_args!("function EngineLog.{}() end\n", LAST));
        out.line("");
        out.line("---@class Engine");
        out.line("---@field log EngineLog");
        out.write(format_args!("{} = {{}}\n", ENGINE));
        out.line("");
        out.line("--- Ask the host loop to stop after the current frame.");
        out.write(format_args!("function {}.{}() end\n", ENGINE, QUIT));
    }
}
