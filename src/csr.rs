//! CSR address to register-name lookup.
//!
//! The table is built on first use from a fixed list plus the generated
//! hardware performance monitor families, and is read-only afterwards.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;

const NAMED: &[(u16, &str)] = &[
    // User trap setup / handling
    (0x000, "ustatus"),
    (0x004, "uie"),
    (0x005, "utvec"),
    (0x040, "uscratch"),
    (0x041, "uepc"),
    (0x042, "ucause"),
    (0x043, "ubadaddr"),
    (0x044, "uip"),
    // User floating point
    (0x001, "fflags"),
    (0x002, "frm"),
    (0x003, "fcsr"),
    // User counters / timers
    (0xc00, "cycle"),
    (0xc01, "time"),
    (0xc02, "instret"),
    (0xc80, "cycleh"),
    (0xc81, "timeh"),
    (0xc82, "instreth"),
    // Supervisor
    (0x100, "sstatus"),
    (0x102, "sedeleg"),
    (0x103, "sideleg"),
    (0x104, "sie"),
    (0x105, "stvec"),
    (0x140, "sscratch"),
    (0x141, "sepc"),
    (0x142, "scause"),
    (0x143, "sbadaddr"),
    (0x144, "sip"),
    (0x180, "sptbr"),
    // Hypervisor
    (0x200, "hstatus"),
    (0x202, "hedeleg"),
    (0x203, "hideleg"),
    (0x204, "hie"),
    (0x205, "htvec"),
    (0x240, "hscratch"),
    (0x241, "hepc"),
    (0x242, "hcause"),
    (0x243, "hbadaddr"),
    (0x244, "hip"),
    // Machine information
    (0xf11, "mvendorid"),
    (0xf12, "marchid"),
    (0xf13, "mimpid"),
    (0xf14, "mhartid"),
    // Machine trap setup / handling
    (0x300, "mstatus"),
    (0x301, "misa"),
    (0x302, "medeleg"),
    (0x303, "mideleg"),
    (0x304, "mie"),
    (0x305, "mtvec"),
    (0x340, "mscratch"),
    (0x341, "mepc"),
    (0x342, "mcause"),
    (0x343, "mbadaddr"),
    (0x344, "mip"),
    // Machine protection and translation
    (0x380, "mbase"),
    (0x381, "mbound"),
    (0x382, "mibase"),
    (0x383, "mibound"),
    (0x384, "mdbase"),
    (0x385, "mdbound"),
    // Machine counters
    (0xb00, "mcycle"),
    (0xb02, "minstret"),
    (0xb80, "mcycleh"),
    (0xb82, "minstreth"),
    (0x320, "mucounteren"),
    (0x321, "mscounteren"),
    (0x322, "mhcounteren"),
    // Debug / trace
    (0x7a0, "tselect"),
    (0x7a1, "tdata1"),
    (0x7a2, "tdata2"),
    (0x7a3, "tdata3"),
    (0x7b0, "dcsr"),
    (0x7b1, "dpc"),
    (0x7b2, "dscratch"),
];

static CSR_TABLE: Lazy<HashMap<u16, String>> = Lazy::new(|| {
    let mut table: HashMap<u16, String> =
        NAMED.iter().map(|&(addr, name)| (addr, name.to_string())).collect();
    for i in 3u16..32 {
        table.insert(0x320 + i, format!("mhpmevent{i}"));
        table.insert(0xb00 + i, format!("mhpmcounter{i}"));
        table.insert(0xb80 + i, format!("mhpmcounter{i}h"));
        table.insert(0xc00 + i, format!("hpmcounter{i}"));
        table.insert(0xc80 + i, format!("hpmcounter{i}h"));
    }
    table
});

/// Name of the CSR at `addr`, if the table knows it.
pub fn lookup(addr: u16) -> Option<&'static str> {
    CSR_TABLE.get(&addr).map(String::as_str)
}

/// Name of the CSR at `addr`, or `$0x<addr>` for unlisted addresses.
///
/// Negative addresses never match and render as their 32-bit two's
/// complement, e.g. `$0xfffffc00`.
pub fn resolve(addr: i32) -> Cow<'static, str> {
    match u16::try_from(addr).ok().and_then(lookup) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(numeric(addr)),
    }
}

pub fn numeric(addr: i32) -> String {
    format!("$0x{addr:03x}")
}

/// Number of named registers, fixed and generated.
pub fn len() -> usize {
    CSR_TABLE.len()
}
