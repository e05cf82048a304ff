// scene_runner/src/runner.rs
use scene_core::scripting::script_runtime::ScriptRuntime;
use scene_core::scene::input_event::{InputEvent, InputKind};
use scene_core::storage::host_config::HostConfig;
use scene_core::*;
use serde::Deserialize;
use std::collections::VecDeque;
use std::time::Duration;
use std::path::Path;
use thiserror::Error;
use std::thread;
use std::fs;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("lua: {0}")]
    Lua(#[from] mlua::Error),
    #[error("could not read inputs: {0}")]
    InputsIo(#[from] std::io::Error),
    #[error("could not parse inputs: {0}")]
    InputsParse(#[from] ron::error::SpannedError),
}

/// One input event fed to the scene at the start of `frame`.
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptedInput {
    pub frame: u64,
    pub kind: InputKind,
}

/// Reads a RON list of scripted inputs.
pub fn load_inputs(path: &Path) -> Result<Vec<ScriptedInput>, RunError> {
    let txt = fs::read_to_string(path)?;
    Ok(ron::from_str(&txt)?)
}

/// Headless frame loop around one `ScriptRuntime`.
pub struct Runner {
    pub runtime: ScriptRuntime,
    config: HostConfig,
    inputs: VecDeque<ScriptedInput>,
}

impl Runner {
    pub fn new(config: HostConfig, mut inputs: Vec<ScriptedInput>) -> Result<Self, RunError> {
        let data_root = config.data_root();
        if let Err(e) = fs::create_dir_all(&data_root) {
            host_warn!("Could not create data root {}: {e}", data_root.display());
        }

        inputs.sort_by_key(|input| input.frame);
        let runtime = ScriptRuntime::from_config(&config)?;

        Ok(Self {
            runtime,
            config,
            inputs: inputs.into(),
        })
    }

    /// Runs `entry`, starts the tree and loops frames until `max_frames`
    /// is reached or a script asks to quit. Returns the frames stepped.
    pub fn run(&mut self, entry: &Path) -> Result<u64, RunError> {
        self.runtime.run_file(entry)?;
        self.runtime.start();
        host_info!("Started {}.", entry.display());

        let mut frame: u64 = 0;
        loop {
            if self.runtime.quit_requested() {
                host_info!("Quit requested after {frame} frames.");
                break;
            }
            if self.config.max_frames.is_some_and(|max| frame >= max) {
                break;
            }

            self.frame(frame);
            frame += 1;

            if self.config.realtime {
                thread::sleep(Duration::from_secs_f64(self.config.frame_delta.max(0.0)));
            }
        }
        Ok(frame)
    }

    fn frame(&mut self, frame: u64) {
        while self.inputs.front().is_some_and(|input| input.frame <= frame) {
            let Some(input) = self.inputs.pop_front() else {
                break;
            };
            let event = InputEvent::new(input.kind);
            self.runtime.push_input(&event);
            if !event.is_handled() {
                host_debug!("Frame {frame}: {} input was not handled.", event.kind_name());
            }
        }

        self.runtime.step(self.config.frame_delta);
    }
}
