//! Infrastructure layer - configuration, logging and retry policy
//!
//! Wires the geocoding client into an application: loads layered
//! configuration, installs the tracing subscriber, and provides the
//! caller-side retry helper for transient failures.

pub mod config;
pub mod retry;
pub mod telemetry;

pub use config::AppConfig;
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
