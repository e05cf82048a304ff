// scene_core/src/scripting/script_runtime.rs
use crate::scripting::modules::lua_module::LuaModuleRegistry;
use crate::scripting::lua_constants::*;
use crate::scene::input_event::InputEventRef;
use crate::scene::dispatch::{self, SharedScene};
use crate::io::io_interface::IoInterface;
use crate::storage::host_config::HostConfig;
use crate::scene::scene::Scene;
use crate::constants::*;
use crate::*;
use mlua::prelude::LuaResult;
use std::path::Path;
use std::cell::Cell;
use std::sync::Arc;
use std::rc::Rc;
use mlua::Table;
use mlua::Lua;
use std::fs;

/// One Lua VM bound to one scene, plus the frame clock that drives it.
pub struct ScriptRuntime {
    /// Single Lua VM.
    pub lua: Lua,
    pub scene: SharedScene,
    quit: Rc<Cell<bool>>,
    physics_delta: f64,
    accumulator: f64,
}

impl ScriptRuntime {
    /// Builds a scene rooted at `root_name` and a Lua state with every
    /// registered module installed. Module failures are logged, not fatal.
    pub fn new(root_name: &str, io: IoInterface) -> LuaResult<Self> {
        let lua = Lua::new();
        let scene = dispatch::shared(Scene::new(root_name));
        let quit = Rc::new(Cell::new(false));

        lua.set_app_data::<SharedScene>(scene.clone());
        lua.set_app_data(io);

        Self::register_engine_module(&lua, quit.clone())?;

        for descriptor in inventory::iter::<LuaModuleRegistry> {
            let module = (descriptor.ctor)();
            if let Err(e) = module.register(&lua) {
                host_error!("Lua module registration failed: {e}");
            }
        }

        Ok(Self {
            lua,
            scene,
            quit,
            physics_delta: 1.0 / f64::from(DEFAULT_PHYSICS_TICKS),
            accumulator: 0.0,
        })
    }

    pub fn from_config(config: &HostConfig) -> LuaResult<Self> {
        let io = IoInterface::with_url(config.data_root(), &config.file_url);
        let mut runtime = Self::new(&config.root_name, io)?;
        runtime.set_physics_ticks(config.physics_ticks_per_second);
        Ok(runtime)
    }

    /// The `engine` table other modules hang their functions on.
    fn register_engine_module(lua: &Lua, quit: Rc<Cell<bool>>) -> LuaResult<()> {
        let engine_mod = lua.create_table()?;

        // engine.quit()
        let quit_fn = lua.create_function(move |_, ()| {
            quit.set(true);
            Ok(())
        })?;
        engine_mod.set(QUIT, quit_fn)?;

        lua.globals().set(ENGINE, engine_mod.clone())?;
        lua.register_module(ENGINE, &engine_mod)?;
        Ok(())
    }

    pub fn set_physics_ticks(&mut self, ticks_per_second: u32) {
        self.physics_delta = 1.0 / f64::from(ticks_per_second.max(1));
    }

    pub fn physics_delta(&self) -> f64 {
        self.physics_delta
    }

    /// Lets `require` find modules next to `dir`.
    pub fn add_package_path(&self, dir: &Path) -> LuaResult<()> {
        let package: Table = self.lua.globals().get("package")?;
        let current: String = package.get("path")?;
        let dir = dir.display().to_string().replace('\\', "/");
        package.set("path", format!("{dir}/?.lua;{dir}/?/init.lua;{current}"))?;
        Ok(())
    }

    /// Runs a script file. Its folder is added to the package path first.
    pub fn run_file(&self, path: &Path) -> LuaResult<()> {
        let src = fs::read_to_string(path)
            .map_err(|e| mlua::Error::ExternalError(Arc::new(e)))?;

        if let Some(dir) = path.parent() {
            self.add_package_path(dir)?;
        }

        let chunk_name = path.display().to_string();
        self.lua.load(&src).set_name(chunk_name).exec()
    }

    pub fn run_chunk(&self, name: &str, src: &str) -> LuaResult<()> {
        self.lua.load(src).set_name(name).exec()
    }

    pub fn start(&self) {
        dispatch::start(&self.scene);
    }

    /// Advances one frame: as many fixed physics steps as the accumulated
    /// time allows, then one `process(frame_delta)`.
    pub fn step(&mut self, frame_delta: f64) {
        let cap = MAX_ACCUM.max(self.physics_delta);
        self.accumulator = (self.accumulator + frame_delta).min(cap);

        while self.accumulator >= self.physics_delta {
            dispatch::physics_frame(&self.scene, self.physics_delta);
            self.accumulator -= self.physics_delta;
        }

        dispatch::process_frame(&self.scene, frame_delta);
    }

    pub fn push_input(&self, event: &InputEventRef) {
        dispatch::push_input(&self.scene, event);
    }

    /// True once a script has called `engine.quit()`.
    pub fn quit_requested(&self) -> bool {
        self.quit.get()
    }
}
