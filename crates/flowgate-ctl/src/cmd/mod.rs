//! CLI command modules.

pub mod complete;
