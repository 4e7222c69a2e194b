//! IF-MIB (RFC 2863), `interfaces` group.

use crate::error::Result;
use crate::oid::Oid;
use crate::registry::Mib;
use crate::syntax::{EnumMembers, Syntax};

/// MIB name.
pub const NAME: &str = "IF-MIB";

/// `interfaces` subtree.
pub const INTERFACES: [u32; 7] = [1, 3, 6, 1, 2, 1, 2];

/// Common `IANAifType` values.
pub const IF_TYPE: EnumMembers = &[
    (1, "other"),
    (6, "ethernetCsmacd"),
    (23, "ppp"),
    (24, "softwareLoopback"),
    (53, "propVirtual"),
    (71, "ieee80211"),
    (131, "tunnel"),
    (135, "l2vlan"),
    (136, "l3ipvlan"),
    (161, "ieee8023adLag"),
];

/// `ifAdminStatus`.
pub const IF_ADMIN_STATUS: EnumMembers = &[(1, "up"), (2, "down"), (3, "testing")];

/// `ifOperStatus`.
pub const IF_OPER_STATUS: EnumMembers = &[
    (1, "up"),
    (2, "down"),
    (3, "testing"),
    (4, "unknown"),
    (5, "dormant"),
    (6, "notPresent"),
    (7, "lowerLayerDown"),
];

fn if_entry(column: u32) -> Oid {
    Oid::from_slice(&INTERFACES).extend(&[2, 1, column])
}

/// Build the MIB.
pub fn mib() -> Result<Mib> {
    let interfaces = Oid::from_slice(&INTERFACES);

    Mib::builder(NAME, interfaces.clone())
        .object("ifNumber", interfaces.child(1), Syntax::Integer)
        .table(
            "ifTable",
            interfaces.child(2),
            ["ifIndex"],
            [
                "ifIndex",
                "ifDescr",
                "ifType",
                "ifMtu",
                "ifSpeed",
                "ifPhysAddress",
                "ifAdminStatus",
                "ifOperStatus",
                "ifLastChange",
                "ifInOctets",
                "ifInUcastPkts",
                "ifInDiscards",
                "ifInErrors",
                "ifOutOctets",
                "ifOutUcastPkts",
                "ifOutDiscards",
                "ifOutErrors",
            ],
        )
        .object("ifIndex", if_entry(1), Syntax::Integer)
        .object("ifDescr", if_entry(2), Syntax::DisplayString)
        .object("ifType", if_entry(3), Syntax::Enum(IF_TYPE))
        .object("ifMtu", if_entry(4), Syntax::Integer)
        .object("ifSpeed", if_entry(5), Syntax::Gauge32)
        // PhysAddress may be empty (loopback) or longer than 6 octets
        .object("ifPhysAddress", if_entry(6), Syntax::OctetString)
        .object("ifAdminStatus", if_entry(7), Syntax::Enum(IF_ADMIN_STATUS))
        .object("ifOperStatus", if_entry(8), Syntax::Enum(IF_OPER_STATUS))
        .object("ifLastChange", if_entry(9), Syntax::TimeTicks)
        .object("ifInOctets", if_entry(10), Syntax::Counter32)
        .object("ifInUcastPkts", if_entry(11), Syntax::Counter32)
        .object("ifInDiscards", if_entry(13), Syntax::Counter32)
        .object("ifInErrors", if_entry(14), Syntax::Counter32)
        .object("ifOutOctets", if_entry(16), Syntax::Counter32)
        .object("ifOutUcastPkts", if_entry(17), Syntax::Counter32)
        .object("ifOutDiscards", if_entry(19), Syntax::Counter32)
        .object("ifOutErrors", if_entry(20), Syntax::Counter32)
        .build()
}
