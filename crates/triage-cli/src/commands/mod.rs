//! CLI command implementations.

pub mod export;
pub mod ingest;
pub mod reset;
pub mod serve;
pub mod status;
