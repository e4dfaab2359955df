//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EngineConfig (validated, immutable)
//!     → handed to the engine and observability setup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are fixed at startup anyway
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_overrides, load_config, parse_config, ConfigError};
pub use schema::{
    EngineConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
