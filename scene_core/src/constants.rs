// scene_core/src/constants.rs

/// Name given to the tree root when no config overrides it.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// URL prefix answered by the io interface by default.
pub const DEFAULT_FILE_URL: &str = "user://";

/// 60Hz physics.
pub const DEFAULT_PHYSICS_TICKS: u32 = 60;
pub const DEFAULT_FRAME_DELTA: f64 = 1.0 / 60.0;
/// Protects against long freezes.
pub const MAX_ACCUM: f64 = 0.5;

/// Name of the host config file inside the app dir.
pub const CONFIG_RON: &str = "host_config.ron";

/// Basename of the rotated log files.
pub const LOG_BASENAME: &str = "scene_bridge";
pub const LOG_ROTATE_BYTES: u64 = 5_000_000;
pub const LOG_KEEP_FILES: usize = 5;
