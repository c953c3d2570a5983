//! Interpreter discovery, configuration, and the launch runtime.
pub mod config;
pub mod discovery;
pub mod runtime;
