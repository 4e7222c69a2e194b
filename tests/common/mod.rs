//! Shared test utilities for snmp-mibs integration tests.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;

pub use fixtures::*;

use snmp_mibs::VarBind;
use snmp_mibs::transport::MockAgent;

/// Agent serving `varbinds`.
pub fn agent(varbinds: impl IntoIterator<Item = VarBind>) -> MockAgent {
    MockAgent::new().with_varbinds(varbinds)
}
