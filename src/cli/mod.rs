//! CLI utilities for snmp-mibs.
//!
//! This module provides command-line argument parsing and output formatting
//! for the `snmp-mibs` tool.
//!
//! This module is only available with the `cli` feature.

pub mod args;
pub mod output;
