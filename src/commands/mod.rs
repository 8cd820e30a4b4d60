//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - serve: Start the price page server
//! - render: Write the HTML page once
//! - calculate: Print prices for a number of minutes
//! - check: Check configuration validity

pub mod calculate;
pub mod check;
pub mod render;
pub mod serve;
