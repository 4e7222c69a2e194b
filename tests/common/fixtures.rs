//! Common test fixtures and constants.

use bytes::Bytes;
use snmp_mibs::{Oid, RawValue, VarBind, oid};

// =============================================================================
// Subtree roots
// =============================================================================

/// ifEntry: 1.3.6.1.2.1.2.2.1
pub fn if_entry() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1)
}

/// dot1dTpFdbEntry: 1.3.6.1.2.1.17.4.3.1
pub fn fdb_entry() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 17, 4, 3, 1)
}

// =============================================================================
// Agent contents
// =============================================================================

/// System group scalars.
pub fn system_varbinds() -> Vec<VarBind> {
    vec![
        VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), "Linux switch 5.10"),
        VarBind::new(
            oid!(1, 3, 6, 1, 2, 1, 1, 2, 0),
            oid!(1, 3, 6, 1, 4, 1, 8072, 3, 2, 10),
        ),
        VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), RawValue::TimeTicks(360_000)),
        VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), "switch1"),
    ]
}

/// ifTable with `count` interfaces, each with ifIndex, ifDescr and ifOperStatus.
pub fn if_table_varbinds(count: u32) -> Vec<VarBind> {
    let mut varbinds = vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 1, 0), count as i32)];
    for i in 1..=count {
        varbinds.push(VarBind::new(if_entry().extend(&[1, i]), i as i32));
        varbinds.push(VarBind::new(
            if_entry().extend(&[2, i]),
            RawValue::OctetString(Bytes::from(format!("eth{}", i - 1))),
        ));
        varbinds.push(VarBind::new(
            if_entry().extend(&[8, i]),
            if i % 2 == 0 { 2 } else { 1 },
        ));
    }
    varbinds
}

/// Forwarding database rows as (MAC, port).
pub const FDB: [([u8; 6], i32); 3] = [
    ([0x00, 0x11, 0x22, 0x33, 0x44, 0x55], 1),
    ([0x00, 0x11, 0x22, 0x33, 0x44, 0x66], 2),
    ([0x02, 0x00, 0x00, 0x00, 0x00, 0x01], 24),
];

/// dot1dTpFdbTable rows for [`FDB`], plus the bridge address scalar.
pub fn fdb_varbinds() -> Vec<VarBind> {
    let mut varbinds = vec![VarBind::new(
        oid!(1, 3, 6, 1, 2, 1, 17, 1, 1, 0),
        RawValue::OctetString(Bytes::from_static(&[0x00, 0x11, 0x22, 0x00, 0x00, 0x01])),
    )];
    for (mac, port) in FDB {
        let index: Vec<u32> = mac.iter().map(|&b| u32::from(b)).collect();
        varbinds.push(VarBind::new(
            fdb_entry().child(1).extend(&index),
            RawValue::OctetString(Bytes::copy_from_slice(&mac)),
        ));
        varbinds.push(VarBind::new(fdb_entry().child(2).extend(&index), port));
        varbinds.push(VarBind::new(fdb_entry().child(3).extend(&index), 3));
    }
    varbinds
}

/// Everything above in one agent tree.
pub fn switch_varbinds() -> Vec<VarBind> {
    let mut varbinds = system_varbinds();
    varbinds.extend(if_table_varbinds(3));
    varbinds.extend(fdb_varbinds());
    varbinds
}
