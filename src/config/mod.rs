//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! application code
//!     → Configuration::new() (logger resolved once)
//!     → setters / builders / configure(|c| ...)
//!     → Arc<Configuration> handed to MemoryMiddleware
//!
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Configuration::from_settings
//!
//! global.rs
//!     → optional process-wide default, swapped atomically
//! ```
//!
//! # Design Decisions
//! - Configuration is a plain value; many instances may coexist
//! - Mutation is expected at start-up only
//! - All settings fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks

pub mod configuration;
pub mod global;
pub mod loader;
pub mod schema;
pub mod validation;

pub use configuration::Configuration;
pub use loader::{load_settings, parse_settings, ConfigError};
pub use schema::{MemoryLoggerSettings, SinkKind};
pub use validation::ValidationError;
