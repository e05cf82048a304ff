// lua_api_gen/src/main.rs
use scene_core::scripting::modules::lua_module::generate_lua_api;
use std::process::ExitCode;
use std::path::PathBuf;
use std::env;

fn main() -> ExitCode {
    // Optional first argument overrides the output folder.
    let out_dir = match env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../scene_runner/scripts/_api"),
    };

    match generate_lua_api(&out_dir) {
        Ok(written) => {
            for path in written {
                println!("Written to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Could not write Lua api to {}: {e}", out_dir.display());
            ExitCode::FAILURE
        }
    }
}
