//! Command table: a fixed, mostly-immutable lookup keyed by command
//! character, yielding `{scan_fn | None, exec_fn | None, opts_bitset}`.
//! Three tables exist: primary, `E`-prefixed, `F`-prefixed.
//!
//! Grounded in `original_source/include/exec.h`'s `struct cmd_table` and
//! `src/e_cmd.c`'s literal table initializer (`{ scan_done, exec_EB, _A |
//! _C | _T1 }`-style entries): an array of structs indexed by byte, with
//! option bits parsed once at table-construction time rather than on every
//! invocation.

use crate::cmd::CmdBlock;
use crate::interpreter::errors::TecoResult;
use crate::interpreter::interpreter::Interpreter;

/// Option bits drawn from a closed set, one per modifier/argument shape a
/// command can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionBits(u16);

impl OptionBits {
    pub const NONE: OptionBits = OptionBits(0);
    pub const A: OptionBits = OptionBits(1 << 0); // @ modifier permitted
    pub const C: OptionBits = OptionBits(1 << 1); // : modifier permitted
    pub const D: OptionBits = OptionBits(1 << 2); // :: modifier permitted
    pub const M: OptionBits = OptionBits(1 << 3); // m,n argument form
    pub const N: OptionBits = OptionBits(1 << 4); // n argument
    pub const Q: OptionBits = OptionBits(1 << 5); // requires Q-register name
    pub const T1: OptionBits = OptionBits(1 << 6); // one text argument
    pub const T2: OptionBits = OptionBits((1 << 7) | (1 << 6)); // two text args (implies T1)
    pub const W: OptionBits = OptionBits(1 << 8); // W suffix permitted
    pub const F: OptionBits = OptionBits(1 << 9); // flag command
    pub const O: OptionBits = OptionBits(1 << 10); // operand/operator
    pub const E: OptionBits = OptionBits(1 << 11); // ignores m/n

    pub const fn or(self, other: OptionBits) -> OptionBits {
        OptionBits(self.0 | other.0)
    }

    pub fn contains(self, bit: OptionBits) -> bool {
        (self.0 & bit.0) == bit.0
    }
}

impl std::ops::BitOr for OptionBits {
    type Output = OptionBits;
    fn bitor(self, rhs: OptionBits) -> OptionBits {
        self.or(rhs)
    }
}

pub type ScanFn = fn(&mut Interpreter, &mut CmdBlock) -> TecoResult<()>;
pub type ExecFn = fn(&mut Interpreter, &mut CmdBlock) -> TecoResult<()>;

/// One entry: an optional scan-time lookahead hook (for the handful of
/// commands that need one: `"`, `=`, `P`), an optional exec hook, and the
/// option bits controlling modifier/argument validation.
#[derive(Clone, Copy)]
pub struct CmdEntry {
    pub scan: Option<ScanFn>,
    pub exec: Option<ExecFn>,
    pub opts: OptionBits,
}

impl CmdEntry {
    pub const fn new(exec: ExecFn, opts: OptionBits) -> Self {
        Self { scan: None, exec: Some(exec), opts }
    }

    pub const fn with_scan(scan: ScanFn, exec: ExecFn, opts: OptionBits) -> Self {
        Self { scan: Some(scan), exec: Some(exec), opts }
    }
}

/// 128-entry primary table plus the `E`/`F` subtables, each indexed
/// directly by byte the way `original_source`'s `cmd_table[c]` is.
pub struct CmdTable {
    pub primary: [Option<CmdEntry>; 128],
    pub e_table: [Option<CmdEntry>; 128],
    pub f_table: [Option<CmdEntry>; 128],
}

impl CmdTable {
    pub fn lookup_primary(&self, c: u8) -> Option<CmdEntry> {
        self.primary.get(c as usize).copied().flatten()
    }

    pub fn lookup_e(&self, c2: u8) -> Option<CmdEntry> {
        self.e_table.get(c2.to_ascii_uppercase() as usize).copied().flatten()
    }

    pub fn lookup_f(&self, c2: u8) -> Option<CmdEntry> {
        self.f_table.get(c2.to_ascii_uppercase() as usize).copied().flatten()
    }
}

lazy_static::lazy_static! {
    pub static ref CMD_TABLE: CmdTable = crate::commands::build_cmd_table();
}
