//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overlay: HTTP_TIMEOUT)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → fetch settings handed to the Fetcher at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; nothing reads the environment per request
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config_file, resolve_config, ConfigError};
pub use schema::{
    FetchConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RaceConfig, ServiceConfig,
    TimeoutConfig,
};
