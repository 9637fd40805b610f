//! Shared foundation for the Agora action engine.
//!
//! Defines the top-level error type, common value objects, and the
//! TOML-backed application configuration used across the workspace.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ActionsConfig, AgoraConfig, GeneralConfig};
pub use error::{AgoraError, Result};
pub use types::Timestamp;
