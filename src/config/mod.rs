//! Engine Configuration Module
//!
//! Loads every tunable threshold from TOML, replacing constants embedded in
//! the recommendation and analytics logic.
//!
//! ## Loading Order
//!
//! 1. `WARDROBE_CONFIG` environment variable (path to TOML file)
//! 2. `wardrobe_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Library functions take the config section they need by reference. The
//! binary installs one process-wide copy at startup:
//!
//! ```ignore
//! let cfg = config::init(EngineConfig::load());
//! let days = config::get().analytics.rarely_worn_days;
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;

use std::sync::OnceLock;

/// Global engine configuration, initialized once at startup.
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Install the process-wide configuration and return it.
///
/// Only the first call (or first `get()`) wins; later calls are ignored with
/// a warning.
pub fn init(config: EngineConfig) -> &'static EngineConfig {
    if ENGINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called after the config was fixed, ignoring");
    }
    get()
}

/// The process-wide configuration, built-in defaults if `init()` never ran.
pub fn get() -> &'static EngineConfig {
    ENGINE_CONFIG.get_or_init(EngineConfig::default)
}
