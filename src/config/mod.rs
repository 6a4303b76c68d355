//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! nimbus.toml (optional) + OPENWEATHERMAP_API_KEY
//!     → loader.rs (parse, env override)
//!     → validation.rs (semantic checks)
//!     → NimbusConfig (validated, immutable)
//!     → UpstreamConfig handed to the gateway at startup
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps in a gateway built from the new upstream settings
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_startup_config, ConfigError};
pub use schema::{
    CorsConfig, ListenerConfig, NimbusConfig, ObservabilityConfig, TimeoutConfig, Units,
    UpstreamConfig,
};
pub use watcher::ConfigWatcher;
