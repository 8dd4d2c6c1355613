//! skygaze library
//!
//! This module exposes the CLI, domain and unit-conversion modules for use
//! in integration tests.

pub mod cli;
pub mod data;
pub mod units;
