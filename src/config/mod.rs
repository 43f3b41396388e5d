//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → passed into subsystems at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no process-wide mutable singletons
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CriticalEndpointConfig, ListenerConfig, MonitorConfig, PersistenceConfig, PortalConfig,
    ProbeConfig, ServiceConfig,
};
