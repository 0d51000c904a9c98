//! CLI command implementations
//!
//! Every command returns the process exit code: 0 success, 2 configuration
//! error, 4 document store error, 5 any other failure.

pub mod ingest;
pub mod init;
pub mod validate;
