pub mod constants;
pub mod io;
pub mod logging;
pub mod scene;
pub mod scripting;
pub mod storage;

// Re-exported so the logging macros resolve from downstream crates.
pub use log;
