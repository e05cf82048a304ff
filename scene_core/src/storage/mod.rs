pub mod host_config;
pub mod path_utils;
