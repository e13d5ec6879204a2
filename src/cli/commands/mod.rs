//! CLI command implementations
//!
//! Exit codes: 0 success, 1 pipeline or labelling failure, 2 configuration
//! error, 5 fatal error, 130 interrupted.

pub mod init;
pub mod label;
pub mod redact;
pub mod serve;
pub mod validate;
