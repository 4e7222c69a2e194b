//! Built-in MIB definitions.
//!
//! Each submodule builds one [`Mib`]. [`builtin`] returns them in the order
//! [`Registry::builtin`](crate::registry::Registry::builtin) registers them.

pub mod bridge;
pub mod if_mib;
pub mod snmpv2;

use crate::error::Result;
use crate::registry::Mib;

/// All built-in MIBs, in registration order.
pub fn builtin() -> Vec<Result<Mib>> {
    vec![snmpv2::mib(), if_mib::mib(), bridge::mib()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mibs_validate() {
        for mib in builtin() {
            let mib = mib.unwrap();
            assert!(mib.members().count() > 0, "{} is empty", mib);
        }
    }
}
