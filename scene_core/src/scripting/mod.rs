pub mod element_handle;
pub mod input_handle;
pub mod lua_constants;
pub mod lua_hooks;
pub mod modules;
pub mod script_runtime;
