//! Command implementations and the table that wires them to their
//! characters. Each submodule groups one command family the way the
//! teacher's `commands/` groups one shell builtin per file; `build_cmd_table`
//! is the single place that assembles them into the `CmdTable` the scanner
//! and dispatcher share.

pub mod arith;
pub mod file_io;
pub mod flow;
pub mod insert;
pub mod macro_cmd;
pub mod output;
pub mod qreg;
pub mod search;

use crate::parser::cmd_table::{CmdEntry, CmdTable, OptionBits};

/// `^A`, the paired-delimiter text-argument command code.
const CTRL_A: u8 = 0x01;
/// `^_`, one's-complement, reached only through the `^X` control-code path.
const CTRL_UNDERSCORE: u8 = 0x1F;
const TAB: u8 = 0x09;

fn set_both_cases(table: &mut [Option<CmdEntry>; 128], letter: u8, entry: CmdEntry) {
    table[letter.to_ascii_uppercase() as usize] = Some(entry);
    table[letter.to_ascii_lowercase() as usize] = Some(entry);
}

pub fn build_cmd_table() -> CmdTable {
    let mut primary: [Option<CmdEntry>; 128] = [None; 128];
    let mut e_table: [Option<CmdEntry>; 128] = [None; 128];
    let mut f_table: [Option<CmdEntry>; 128] = [None; 128];

    // Arithmetic operators and punctuation (§4.4): pushed straight onto
    // the expression stack as they're scanned.
    primary[b'+' as usize] = Some(CmdEntry::new(arith::exec_plus, OptionBits::O));
    primary[b'-' as usize] = Some(CmdEntry::new(arith::exec_minus, OptionBits::O));
    primary[b'*' as usize] = Some(CmdEntry::new(arith::exec_star, OptionBits::O));
    primary[b'/' as usize] = Some(CmdEntry::new(arith::exec_slash, OptionBits::O));
    primary[b'&' as usize] = Some(CmdEntry::new(arith::exec_amp, OptionBits::O));
    primary[b'#' as usize] = Some(CmdEntry::new(arith::exec_hash, OptionBits::O));
    primary[b'(' as usize] = Some(CmdEntry::new(arith::exec_lparen, OptionBits::O));
    primary[b')' as usize] = Some(CmdEntry::new(arith::exec_rparen, OptionBits::O));
    primary[b',' as usize] = Some(CmdEntry::new(arith::exec_comma, OptionBits::O));
    primary[CTRL_UNDERSCORE as usize] = Some(CmdEntry::new(arith::exec_complement, OptionBits::O));

    // Output.
    primary[b'=' as usize] =
        Some(CmdEntry::with_scan(output::scan_equals, output::exec_equals, OptionBits::N));
    primary[CTRL_A as usize] = Some(CmdEntry::new(output::exec_ctrl_a, OptionBits::T1 | OptionBits::A));

    // Q-register commands.
    set_both_cases(&mut primary, b'U', CmdEntry::new(qreg::exec_u, OptionBits::Q | OptionBits::M | OptionBits::N));
    set_both_cases(&mut primary, b'Q', CmdEntry::new(qreg::exec_q, OptionBits::Q | OptionBits::O | OptionBits::C));
    primary[b'%' as usize] = Some(CmdEntry::new(qreg::exec_pct, OptionBits::Q | OptionBits::O | OptionBits::N));
    primary[b'[' as usize] = Some(CmdEntry::new(qreg::exec_lbracket, OptionBits::Q | OptionBits::M | OptionBits::N));
    primary[b']' as usize] = Some(CmdEntry::new(qreg::exec_rbracket, OptionBits::Q | OptionBits::M | OptionBits::N));
    set_both_cases(&mut primary, b'G', CmdEntry::new(qreg::exec_g, OptionBits::Q));

    // Control flow.
    primary[b'"' as usize] = Some(CmdEntry::with_scan(flow::scan_quote, flow::exec_quote, OptionBits::N));
    primary[b'|' as usize] = Some(CmdEntry::new(flow::exec_bar, OptionBits::NONE));
    primary[b'\'' as usize] = Some(CmdEntry::new(flow::exec_endif, OptionBits::NONE));
    primary[b'<' as usize] = Some(CmdEntry::new(flow::exec_loop_start, OptionBits::N));
    primary[b'>' as usize] = Some(CmdEntry::new(flow::exec_loop_end, OptionBits::NONE));
    primary[b';' as usize] = Some(CmdEntry::new(flow::exec_semi, OptionBits::N | OptionBits::C));
    primary[b'!' as usize] =
        Some(CmdEntry::new(flow::exec_bang, OptionBits::T1 | OptionBits::M | OptionBits::N));
    set_both_cases(&mut primary, b'O', CmdEntry::new(flow::exec_o, OptionBits::T1 | OptionBits::N));

    f_table[b'<' as usize] = Some(CmdEntry::new(flow::exec_f_restart, OptionBits::NONE));
    f_table[b'>' as usize] = Some(CmdEntry::new(flow::exec_f_break, OptionBits::NONE));

    // Macro driver.
    set_both_cases(&mut primary, b'M', CmdEntry::new(macro_cmd::exec_m, OptionBits::Q | OptionBits::C | OptionBits::N));

    // Text insertion.
    set_both_cases(&mut primary, b'I', CmdEntry::new(insert::exec_i, OptionBits::T1));
    primary[TAB as usize] = Some(CmdEntry::new(insert::exec_tab, OptionBits::NONE));

    // E-subtable: file open/close wiring.
    e_table[b'R' as usize] = Some(CmdEntry::new(file_io::exec_er, OptionBits::T1));
    e_table[b'W' as usize] = Some(CmdEntry::new(file_io::exec_ew, OptionBits::T1));
    e_table[b'B' as usize] = Some(CmdEntry::new(file_io::exec_eb, OptionBits::T1));
    e_table[b'I' as usize] = Some(CmdEntry::new(file_io::exec_ei, OptionBits::T1 | OptionBits::C));

    // Search and search-and-replace.
    set_both_cases(&mut primary, b'S', CmdEntry::new(search::exec_s, OptionBits::T1 | OptionBits::N | OptionBits::C));
    set_both_cases(&mut primary, b'N', CmdEntry::new(search::exec_n, OptionBits::T1 | OptionBits::N | OptionBits::C));
    f_table[b'N' as usize] = Some(CmdEntry::new(search::exec_fn, OptionBits::T2 | OptionBits::N | OptionBits::C));
    f_table[b'B' as usize] = Some(CmdEntry::new(search::exec_fb, OptionBits::T1 | OptionBits::N | OptionBits::C));
    f_table[b'S' as usize] = Some(CmdEntry::new(search::exec_fs, OptionBits::T2 | OptionBits::N | OptionBits::C));
    f_table[b'C' as usize] = Some(CmdEntry::new(search::exec_fc, OptionBits::T2 | OptionBits::N | OptionBits::C));

    CmdTable { primary, e_table, f_table }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_table_registers_both_letter_cases() {
        let table = build_cmd_table();
        assert!(table.lookup_primary(b'U').is_some());
        assert!(table.lookup_primary(b'u').is_some());
    }

    #[test]
    fn e_and_f_subtables_are_populated() {
        let table = build_cmd_table();
        assert!(table.lookup_e(b'R').is_some());
        assert!(table.lookup_e(b'B').is_some());
        assert!(table.lookup_e(b'I').is_some());
        assert!(table.lookup_f(b'<').is_some());
        assert!(table.lookup_f(b'N').is_some());
        assert!(table.lookup_f(b'C').is_some());
    }

    #[test]
    fn search_commands_registered_both_letter_cases() {
        let table = build_cmd_table();
        assert!(table.lookup_primary(b'S').is_some());
        assert!(table.lookup_primary(b's').is_some());
        assert!(table.lookup_primary(b'N').is_some());
    }
}
