// scene_core/src/scripting/modules/io_module.rs
use crate::scripting::modules::lua_module::*;
use crate::io::io_interface::*;
use crate::scripting::lua_constants::*;
use crate::{host_warn, register_lua_api, register_lua_module};
use mlua::UserDataFields;
use mlua::UserDataMethods;
use mlua::UserData;
use mlua::Lua;

/// Lua module that installs the `ioInterface` global.
#[derive(Default)]
pub struct IoModule;
register_lua_module!(IoModule);
register_lua_api!(IoModule, "io_interface.lua");

impl LuaModule for IoModule {
    fn register(&self, lua: &Lua) -> mlua::Result<()> {
        let io = lua
            .app_data_ref::<IoInterface>()
            .map(|io| io.clone())
            .ok_or_else(|| mlua::Error::RuntimeError("No io interface installed in the Lua state".into()))?;

        lua.globals().set(IO_INTERFACE, io)?;
        Ok(())
    }
}

/// `value` on success, `nil, message` on failure.
fn value_or_message<T>(result: Result<T, IoError>) -> (Option<T>, Option<String>) {
    match result {
        Ok(value) => (Some(value), None),
        Err(e) => {
            host_warn!("{}: {}", IO_INTERFACE, e);
            (None, Some(e.to_string()))
        }
    }
}

/// `true` on success, `false, message` on failure.
fn ok_or_message(result: Result<(), IoError>) -> (bool, Option<String>) {
    match result {
        Ok(()) => (true, None),
        Err(e) => {
            host_warn!("{}: {}", IO_INTERFACE, e);
            (false, Some(e.to_string()))
        }
    }
}

impl UserData for IoInterface {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get(FILE_URL, |_, this| Ok(this.file_url.clone()));
        fields.add_field_method_set(FILE_URL, |_, this, value: String| {
            this.file_url = value;
            Ok(())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method(GET_FILE_PATH, |_, this, path: String| {
            let resolved = this.get_file_path(&path).map(|p| p.display().to_string());
            Ok(value_or_message(resolved))
        });

        methods.add_method(LOAD_TEXT, |_, this, path: String| {
            Ok(value_or_message(this.load_text(&path)))
        });

        methods.add_method(SAVE_TEXT, |_, this, (path, text): (String, String)| {
            Ok(ok_or_message(this.save_text(&path, &text)))
        });

        // Binary data travels as a Lua string.
        methods.add_method(LOAD_BINARY, |lua, this, path: String| {
            let (bytes, err) = value_or_message(this.load_binary(&path));
            let data = match bytes {
                Some(bytes) => Some(lua.create_string(&bytes)?),
                None => None,
            };
            Ok((data, err))
        });

        methods.add_method(SAVE_BINARY, |_, this, (path, data): (String, mlua::String)| {
            Ok(ok_or_message(this.save_binary(&path, &data.as_bytes())))
        });

        methods.add_method(GET_FILE_LIST_ALL, |_, this, (path, ext): (String, Option<String>)| {
            Ok(value_or_message(this.get_file_list_all(&path, ext.as_deref())))
        });

        methods.add_method(GET_FILE_LIST, |_, this, (path, ext): (String, Option<String>)| {
            Ok(value_or_message(this.get_file_list(&path, ext.as_deref())))
        });

        methods.add_method(FILE_EXISTS, |_, this, path: String| Ok(this.file_exists(&path)));

        methods.add_method(DELETE_FILE, |_, this, path: String| {
            Ok(ok_or_message(this.delete_file(&path)))
        });

        methods.add_method(MOVE_FILE, |_, this, (from, to): (String, String)| {
            Ok(ok_or_message(this.move_file(&from, &to)))
        });

        methods.add_method(CREATE_DIRECTORY, |_, this, path: String| {
            Ok(ok_or_message(this.create_directory(&path)))
        });

        methods.add_method(DELETE_DIRECTORY, |_, this, path: String| {
            Ok(ok_or_message(this.delete_directory(&path)))
        });

        methods.add_method(DIRECTORY_EXISTS, |_, this, path: String| Ok(this.directory_exists(&path)));
    }
}

impl LuaApi for IoModule {
    fn emit_api(&self, out: &mut LuaApiWriter) {
        out.line("---@class IoInterface");
        out.line("---@field fileUrl string");
        out.line("local IoInterface = {}");
        out.line("");

        let signatures: [(&str, &str, &str); 13] = [
            (GET_FILE_PATH, "path", "string|nil, string|nil"),
            (LOAD_TEXT, "path", "string|nil, string|nil"),
            (SAVE_TEXT, "path, text", "boolean, string|nil"),
            (LOAD_BINARY, "path", "string|nil, string|nil"),
            (SAVE_BINARY, "path, data", "boolean, string|nil"),
            (GET_FILE_LIST_ALL, "path, extension", "string[]|nil, string|nil"),
            (GET_FILE_LIST, "path, extension", "string[]|nil, string|nil"),
            (FILE_EXISTS, "path", "boolean"),
            (DELETE_FILE, "path", "boolean, string|nil"),
            (MOVE_FILE, "from, to", "boolean, string|nil"),
            (CREATE_DIRECTORY, "path", "boolean, string|nil"),
            (DELETE_DIRECTORY, "path", "boolean, string|nil"),
            (DIRECTORY_EXISTS, "path", "boolean"),
        ];
        for (name, params, returns) in signatures {
            out.write(format_args!("---@return {}\n", returns));
            out.write(format_args!("function IoInterface:{}({}) end\n", name, params));
        }
        out.line("");
        out.write(format_args!("---@type IoInterface\n{} = nil\n", IO_INTERFACE));
    }
}
