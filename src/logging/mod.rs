//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! Library components never install a subscriber themselves. They receive a
//! [`tracing::Span`] and record their events under it, so an ingestion run can
//! be followed by its `run_id` whatever subscriber the caller installed.
//!
//! # Example
//!
//! ```no_run
//! use harvest::logging::init_logging;
//! use harvest::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
