//! Beat Player CLI Library
//!
//! Headless front end for the playback core: configuration loading, a
//! silent audio backend and an interactive session loop.
//!
//! This library exposes the components for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod headless;
pub mod session;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use headless::HeadlessBackend;
pub use session::SessionCommand;
