pub mod element_module;
pub mod io_module;
pub mod logging_module;
pub mod lua_module;
