//! BRIDGE-MIB (RFC 4188): base bridge and forwarding database.

use crate::error::Result;
use crate::oid::Oid;
use crate::registry::Mib;
use crate::syntax::{EnumMembers, Syntax};

/// MIB name.
pub const NAME: &str = "BRIDGE-MIB";

/// `dot1dBridge` subtree.
pub const DOT1D_BRIDGE: [u32; 7] = [1, 3, 6, 1, 2, 1, 17];

/// `dot1dBaseType`.
pub const DOT1D_BASE_TYPE: EnumMembers = &[
    (1, "unknown"),
    (2, "transparent-only"),
    (3, "sourceroute-only"),
    (4, "srt"),
];

/// `dot1dTpFdbStatus`.
pub const DOT1D_TP_FDB_STATUS: EnumMembers = &[
    (1, "other"),
    (2, "invalid"),
    (3, "learned"),
    (4, "self"),
    (5, "mgmt"),
];

/// Build the MIB.
pub fn mib() -> Result<Mib> {
    let bridge = Oid::from_slice(&DOT1D_BRIDGE);
    let base = bridge.child(1);
    let tp = bridge.child(4);
    let fdb_entry = tp.extend(&[3, 1]);

    Mib::builder(NAME, bridge)
        .object("dot1dBaseBridgeAddress", base.child(1), Syntax::MacAddress)
        .object("dot1dBaseNumPorts", base.child(2), Syntax::Integer)
        .object("dot1dBaseType", base.child(3), Syntax::Enum(DOT1D_BASE_TYPE))
        .object("dot1dTpAgingTime", tp.child(2), Syntax::Integer)
        .table(
            "dot1dTpFdbTable",
            tp.child(3),
            ["dot1dTpFdbAddress"],
            ["dot1dTpFdbAddress", "dot1dTpFdbPort", "dot1dTpFdbStatus"],
        )
        .object("dot1dTpFdbAddress", fdb_entry.child(1), Syntax::MacAddress)
        .object("dot1dTpFdbPort", fdb_entry.child(2), Syntax::Integer)
        .object("dot1dTpFdbStatus", fdb_entry.child(3), Syntax::Enum(DOT1D_TP_FDB_STATUS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{MacAddress, Value};
    use crate::varbind::VarBind;

    #[test]
    fn test_fdb_rows_keyed_by_mac() {
        let mib = mib().unwrap();
        let table = mib.resolve_table("dot1dTpFdbTable").unwrap();
        let port = mib.resolve_object("dot1dTpFdbPort").unwrap();
        let address = mib.resolve_object("dot1dTpFdbAddress").unwrap();

        let row = port.oid().extend(&[0, 17, 34, 51, 68, 85]);
        let rows = table.map(&[VarBind::new(row, 3)]).unwrap();

        let mac = MacAddress([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index[&address.key()], Value::MacAddress(mac));
        assert_eq!(rows[0].entry[&port.key()], Value::Integer(3));
    }
}
