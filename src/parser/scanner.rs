//! The scanner: consumes from `CBuf`, accumulates a `CmdBlock`, performs
//! modifier and text-argument extraction, maintains `nparens` (via
//! `EStack`), and decides when a complete command is ready.
//!
//! Single-pass with lookahead: no "scan expression, then re-scan" pass,
//! just one forward scan with a `scan` hook on the handful of table
//! entries that need extra lookahead (`"`, `=`, `P`).

use crate::cmd::{CmdBlock, TextArg, DEFAULT_DELIM};
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::Interpreter;
use crate::parser::cmd_table::{CmdEntry, ExecFn, OptionBits, CMD_TABLE};

/// `^A` command code (paired-delimiter text argument).
const CTRL_A: u8 = 0x01;
/// Literal-character push prefix, parallel to `^^`.
const LITERAL_PREFIX: u8 = 0x1E;

pub enum ScanOutcome {
    /// An operand, operator, or pure modifier was fully processed inline;
    /// the caller should loop and fetch the next command.
    Handled,
    /// A consuming command is ready for dispatch: its `CmdBlock`, exec
    /// hook, and option bits (needed by the dispatcher's `end_cmd`). The
    /// dry-run callers (`skip_to`, `find_tag`) inspect the `CmdBlock`
    /// without invoking the exec hook.
    Consuming(CmdBlock, ExecFn, OptionBits),
}

fn is_ws(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// `^X` maps a following letter to its control code (`^A` = 1, …, `^Z` =
/// 26). `^_` (underscore) is the one documented non-letter exception,
/// used as the one's-complement operator; its code falls out of the same
/// `letter - '@'` arithmetic TECO-64 uses for every other `^X` pairing.
fn control_code(letter: u8, pos: usize) -> TecoResult<u8> {
    if letter.is_ascii_alphabetic() || letter == b'_' {
        Ok(letter.to_ascii_uppercase() - b'@')
    } else {
        Err(TecoError::with_arg(ErrorKind::Iuc, pos, (letter as char).to_string()))
    }
}

/// One full command's worth of lexing: modifiers, prefix resolution
/// (`E`/`F`/`^`/literal), per-entry scan hook, Q-register name, and text
/// arguments. Returns `Ok(None)` at end of buffer.
pub fn scan_one(interp: &mut Interpreter, level: usize) -> TecoResult<Option<ScanOutcome>> {
    let mut cmd = CmdBlock::new(level);

    // Modifier loop: consume any run of '@'/':'/'::' before the command head.
    loop {
        interp.cbuf.skip_while(is_ws);
        let Some(c) = interp.cbuf.peek() else { return Ok(None) };
        match c {
            b'@' => {
                interp.cbuf.fetch()?;
                if cmd.atsign_set && interp.options.strict_mode {
                    return Err(TecoError::new(ErrorKind::Mod, interp.cbuf.pos()));
                }
                cmd.atsign_set = true;
            }
            b':' => {
                interp.cbuf.fetch()?;
                if interp.cbuf.peek() == Some(b':') {
                    interp.cbuf.fetch()?;
                    if cmd.dcolon_set && interp.options.strict_mode {
                        return Err(TecoError::new(ErrorKind::Mod, interp.cbuf.pos()));
                    }
                    cmd.dcolon_set = true;
                } else {
                    if cmd.colon_set && interp.options.strict_mode {
                        return Err(TecoError::new(ErrorKind::Mod, interp.cbuf.pos()));
                    }
                    cmd.colon_set = true;
                }
            }
            _ => break,
        }
    }

    // A bare ESC reaching here is the command-string terminator/separator
    // (spec.md's "$" notation), not a table command: consume it as a
    // no-op rather than falling through to `resolve_entry` and raising
    // `E_ILL`. Two in a row (the classic double-ESC) just means this
    // branch runs twice in succession, with the same effect.
    if interp.cbuf.peek() == Some(DEFAULT_DELIM) {
        interp.cbuf.fetch()?;
        return Ok(Some(ScanOutcome::Handled));
    }

    // Digits (and hex letters under radix 16) are operands, scanned before
    // any table lookup, exactly as `scan_pass1` checks `isdigit` first.
    if let Some(c) = interp.cbuf.peek() {
        if crate::interpreter::arithmetic::is_digit_char(c, interp.radix) {
            return scan_digits(interp, level).map(Some);
        }
    }

    let start_pos = interp.cbuf.pos();
    let mut c = interp.cbuf.fetch()?;

    // `^X` / literal-character prefixes.
    if c == b'^' {
        let next = interp.cbuf.fetch()?;
        if next == b'^' {
            let literal = interp.cbuf.fetch()?;
            if !interp.dryrun {
                interp.estack.push_value(literal as i64, interp.cbuf.pos())?;
            }
            return Ok(Some(ScanOutcome::Handled));
        }
        c = control_code(next, interp.cbuf.pos())?;
    } else if c == LITERAL_PREFIX {
        let literal = interp.cbuf.fetch()?;
        if !interp.dryrun {
            interp.estack.push_value(literal as i64, interp.cbuf.pos())?;
        }
        return Ok(Some(ScanOutcome::Handled));
    }

    let (entry, table_kind) = resolve_entry(interp, c, start_pos)?;
    cmd.c1 = table_kind.c1(c);
    cmd.c2 = table_kind.c2();

    if let Some(scan) = entry.scan {
        scan(interp, &mut cmd)?;
    }

    validate_modifiers(interp, &cmd, entry.opts)?;

    if entry.opts.contains(OptionBits::Q) {
        scan_qreg(interp, &mut cmd)?;
    }

    if entry.opts.contains(OptionBits::T1) {
        scan_text_args(interp, &mut cmd, entry.opts.contains(OptionBits::T2))?;
    }

    let is_operand = entry.opts.contains(OptionBits::O)
        || (entry.opts.contains(OptionBits::F) && interp.estack.is_empty());

    if is_operand {
        if let Some(exec) = entry.exec {
            if !interp.dryrun {
                exec(interp, &mut cmd)?;
            }
        }
        return Ok(Some(ScanOutcome::Handled));
    }

    let exec = entry.exec.ok_or_else(|| TecoError::new(ErrorKind::Nyi, interp.cbuf.pos()))?;
    Ok(Some(ScanOutcome::Consuming(cmd, exec, entry.opts)))
}

/// Drive `scan_one` until a consuming command is ready, the way the
/// normal (non-dry-run) driver loop does.
pub fn next_command(interp: &mut Interpreter, level: usize) -> TecoResult<Option<(CmdBlock, ExecFn, OptionBits)>> {
    loop {
        match scan_one(interp, level)? {
            None => return Ok(None),
            Some(ScanOutcome::Handled) => continue,
            Some(ScanOutcome::Consuming(cmd, exec, opts)) => return Ok(Some((cmd, exec, opts))),
        }
    }
}

enum TableKind {
    Primary,
    E(u8),
    F(u8),
}

impl TableKind {
    fn c1(&self, primary_char: u8) -> u8 {
        match self {
            TableKind::Primary => primary_char.to_ascii_uppercase(),
            TableKind::E(_) => b'E',
            TableKind::F(_) => b'F',
        }
    }
    fn c2(&self) -> u8 {
        match self {
            TableKind::Primary => 0,
            TableKind::E(c2) | TableKind::F(c2) => *c2,
        }
    }
}

fn resolve_entry(interp: &mut Interpreter, c: u8, pos: usize) -> TecoResult<(CmdEntry, TableKind)> {
    if c == b'E' || c == b'e' {
        let c2 = interp.cbuf.fetch()?;
        let entry = CMD_TABLE.lookup_e(c2).ok_or_else(|| TecoError::new(ErrorKind::Iec, pos))?;
        return Ok((entry, TableKind::E(c2.to_ascii_uppercase())));
    }
    if c == b'F' || c == b'f' {
        let c2 = interp.cbuf.fetch()?;
        let entry = CMD_TABLE.lookup_f(c2).ok_or_else(|| TecoError::new(ErrorKind::Ifc, pos))?;
        return Ok((entry, TableKind::F(c2.to_ascii_uppercase())));
    }
    let entry = CMD_TABLE.lookup_primary(c).ok_or_else(|| TecoError::new(ErrorKind::Ill, pos))?;
    Ok((entry, TableKind::Primary))
}

fn validate_modifiers(interp: &Interpreter, cmd: &CmdBlock, opts: OptionBits) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if cmd.atsign_set && !opts.contains(OptionBits::A) && interp.options.atsign_strict {
        return Err(TecoError::new(ErrorKind::Ats, pos));
    }
    if cmd.dcolon_set && !opts.contains(OptionBits::D) && interp.options.colon_strict {
        return Err(TecoError::new(ErrorKind::Col, pos));
    }
    if cmd.colon_set && !cmd.dcolon_set && !opts.contains(OptionBits::C) && interp.options.colon_strict {
        return Err(TecoError::new(ErrorKind::Col, pos));
    }
    Ok(())
}

fn scan_digits(interp: &mut Interpreter, level: usize) -> TecoResult<ScanOutcome> {
    let pos = interp.cbuf.pos();
    let mut sum: i64 = 0;
    while let Some(c) = interp.cbuf.peek() {
        if !crate::interpreter::arithmetic::is_digit_char(c, interp.radix) {
            break;
        }
        sum = crate::interpreter::arithmetic::accumulate_digit(sum, c, interp.radix, interp.cbuf.pos())?;
        interp.cbuf.fetch()?;
    }
    if !interp.dryrun {
        interp.estack.push_value(sum, pos)?;
    }
    let _ = level;
    Ok(ScanOutcome::Handled)
}

fn scan_qreg(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if interp.cbuf.peek() == Some(b'.') {
        interp.cbuf.fetch()?;
        cmd.qlocal = true;
    }
    let name = interp.cbuf.fetch()?;
    let is_special = matches!(name, b'*' | b'_' | b'+');
    if is_special && cmd.c1 != b'G' {
        return Err(TecoError::with_arg(ErrorKind::Iqn, pos, (name as char).to_string()));
    }
    if !is_special && !name.is_ascii_alphanumeric() {
        return Err(TecoError::with_arg(ErrorKind::Iqn, pos, (name as char).to_string()));
    }
    cmd.qname = Some(name as char);
    Ok(())
}

/// Resolve the text-argument delimiter, then scan one or two text
/// arguments.
fn scan_text_args(interp: &mut Interpreter, cmd: &mut CmdBlock, two: bool) -> TecoResult<()> {
    let delim = resolve_delim(interp, cmd)?;
    cmd.delim = delim;
    let brace_mode = interp.options.brace_text && delim == b'{';

    cmd.text1 = scan_one_text(interp, delim, brace_mode)?;
    if two {
        if brace_mode {
            interp.cbuf.skip_while(is_ws);
        }
        cmd.text2 = scan_one_text(interp, delim, brace_mode)?;
    }
    Ok(())
}

fn resolve_delim(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<u8> {
    if cmd.atsign_set {
        interp.cbuf.skip_while(|c| c == b' ');
        let d = interp.cbuf.peek().ok_or_else(|| TecoError::new(ErrorKind::Utc, interp.cbuf.pos()))?;
        if !d.is_ascii_graphic() {
            return Err(TecoError::new(ErrorKind::Ats, interp.cbuf.pos()));
        }
        interp.cbuf.fetch()?;
        return Ok(d);
    }
    if cmd.c1 == CTRL_A {
        return Ok(CTRL_A);
    }
    if cmd.c1 == b'!' {
        if interp.options.bang_comment && interp.cbuf.peek() == Some(b'!') {
            interp.cbuf.fetch()?;
            return Ok(b'\n');
        }
        return Ok(b'!');
    }
    Ok(DEFAULT_DELIM)
}

fn scan_one_text(interp: &mut Interpreter, delim: u8, brace_mode: bool) -> TecoResult<TextArg> {
    let start = interp.cbuf.pos();
    if brace_mode {
        let mut depth = 1usize;
        loop {
            let c = interp.cbuf.peek().ok_or_else(|| unterminated(interp))?;
            if c == b'{' {
                depth += 1;
            } else if c == b'}' {
                depth -= 1;
                if depth == 0 {
                    let len = interp.cbuf.pos() - start;
                    interp.cbuf.fetch()?; // consume closing brace
                    return Ok(TextArg { start, len });
                }
            }
            interp.cbuf.fetch()?;
        }
    }
    match interp.cbuf.find(delim) {
        Some(end) => {
            let len = end - start;
            interp.cbuf.set_pos(end + 1);
            Ok(TextArg { start, len })
        }
        None => Err(unterminated(interp)),
    }
}

fn unterminated(interp: &Interpreter) -> TecoError {
    let kind = if interp.macro_stack.is_empty() { ErrorKind::Utc } else { ErrorKind::Utm };
    TecoError::new(kind, interp.cbuf.pos())
}

/// Skip forward over a conditional's false branch (or true branch's else
/// half), counting nested `"` depth, stopping at `|` (then continue) or
/// `'` (then stop). Runs the scanner in dry-run mode so nested text
/// arguments and loops are parsed but never executed.
pub fn skip_to(interp: &mut Interpreter, stop_on_bar: bool) -> TecoResult<u8> {
    with_dryrun(interp, |interp| {
        let mut depth: usize = 0;
        loop {
            match scan_one(interp, 0)? {
                None => return Err(TecoError::new(ErrorKind::Utc, interp.cbuf.pos())),
                Some(ScanOutcome::Handled) => continue,
                Some(ScanOutcome::Consuming(cmd, _, _)) => match cmd.c1 {
                    b'"' => depth += 1,
                    b'\'' => {
                        if depth == 0 {
                            return Ok(b'\'');
                        }
                        depth -= 1;
                    }
                    b'|' => {
                        if depth == 0 && stop_on_bar {
                            return Ok(b'|');
                        }
                    }
                    _ => {}
                },
            }
        }
    })
}

/// Skip forward over a loop body, counting nested `<`/`>` depth, stopping
/// just past the matching `>`. Used by `<0` (zero-iteration loop), `;`/
/// `:;` exit, and `F>` break.
pub fn skip_loop_body(interp: &mut Interpreter) -> TecoResult<()> {
    with_dryrun(interp, |interp| {
        let mut depth: usize = 0;
        loop {
            match scan_one(interp, 0)? {
                None => return Err(TecoError::new(ErrorKind::Utc, interp.cbuf.pos())),
                Some(ScanOutcome::Handled) => continue,
                Some(ScanOutcome::Consuming(cmd, _, _)) => match cmd.c1 {
                    b'<' => depth += 1,
                    b'>' => {
                        if depth == 0 {
                            return Ok(());
                        }
                        depth -= 1;
                    }
                    _ => {}
                },
            }
        }
    })
}

/// Run `f` with `interp.dryrun` forced true, restoring the previous value
/// afterward regardless of outcome (mirrors `f.e0.dryrun` save/restore in
/// `goto_cmd.c::find_tag`, reused here for conditional skipping too).
pub fn with_dryrun<R>(interp: &mut Interpreter, f: impl FnOnce(&mut Interpreter) -> TecoResult<R>) -> TecoResult<R> {
    let saved = interp.dryrun;
    interp.dryrun = true;
    let result = f(interp);
    interp.dryrun = saved;
    result
}
