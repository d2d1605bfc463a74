//! Ambient plumbing shared by the VRS SDK crates
//!
//! # Modules
//!
//! - `config`: environment file loading and typed lookups
//! - `logging`: tracing subscriber setup for binaries and tests embedding the SDK

pub mod config;
pub mod logging;

pub use config::{get_config, get_config_bool, get_config_int, get_config_opt, load_environment};
pub use logging::{init_tracing, LogFormat};
