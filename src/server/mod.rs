//! Server module for Forefront
//!
//! Contains configuration, bootstrap and the HTTP run loop.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures for all server components
//! - `loader`: Configuration loading from files and environment
//! - `logging`: Subscriber setup (console, JSON, rolling files)
//! - `providers`: LLM provider resolution and orchestrator assembly
//! - `init`: HTTP server run loop

pub mod config;
mod init;
mod loader;
mod logging;
mod providers;

// Re-export public API
pub use init::run;
pub use loader::load_config;
pub use logging::init_logging;
pub use providers::build_orchestrator;
