//! SNMPv2-MIB (RFC 3418), `system` group.

use crate::error::Result;
use crate::oid;
use crate::oid::Oid;
use crate::registry::Mib;
use crate::syntax::Syntax;

/// MIB name.
pub const NAME: &str = "SNMPv2-MIB";

/// `system` subtree.
pub const SYSTEM: [u32; 7] = [1, 3, 6, 1, 2, 1, 1];

fn system(arcs: &[u32]) -> Oid {
    Oid::from_slice(&SYSTEM).extend(arcs)
}

/// Build the MIB.
pub fn mib() -> Result<Mib> {
    Mib::builder(NAME, oid!(1, 3, 6, 1, 2, 1, 1))
        .object("sysDescr", system(&[1]), Syntax::DisplayString)
        .object("sysObjectID", system(&[2]), Syntax::ObjectIdentifier)
        .object("sysUpTime", system(&[3]), Syntax::TimeTicks)
        .object("sysContact", system(&[4]), Syntax::DisplayString)
        .object("sysName", system(&[5]), Syntax::DisplayString)
        .object("sysLocation", system(&[6]), Syntax::DisplayString)
        .object("sysServices", system(&[7]), Syntax::Integer)
        .object("sysORLastChange", system(&[8]), Syntax::TimeTicks)
        .table(
            "sysORTable",
            system(&[9]),
            ["sysORIndex"],
            ["sysORID", "sysORDescr", "sysORUpTime"],
        )
        .object("sysORIndex", system(&[9, 1, 1]), Syntax::Integer)
        .object("sysORID", system(&[9, 1, 2]), Syntax::ObjectIdentifier)
        .object("sysORDescr", system(&[9, 1, 3]), Syntax::DisplayString)
        .object("sysORUpTime", system(&[9, 1, 4]), Syntax::TimeTicks)
        .build()
}
