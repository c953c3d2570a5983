//! Shared library modules providing error types, path layout, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod telemetry;
