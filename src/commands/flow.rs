//! Control-flow overlay commands (§4.8): conditionals (`"`/`|`/`'`), loops
//! (`<`/`>`/`;`/`F<`/`F>`), and tags/goto (`!`/`O`). The skip-forward
//! mechanics live in `parser::scanner` since they share the scanner's
//! lexing primitives; these exec hooks just drive them.

use crate::cmd::CmdBlock;
use crate::interpreter::control_flow::{CondKind, LoopFrame};
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::goto::find_tag;
use crate::interpreter::interpreter::Interpreter;
use crate::parser::{skip_loop_body, skip_to};

/// Scan hook for `"`: the next character is the comparison kind.
pub fn scan_quote(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    cmd.c2 = interp.cbuf.fetch()?;
    Ok(())
}

/// `n"X`: if the comparison holds, fall through into the true branch. If
/// not, skip forward (still fully parsing, to respect nesting and text
/// delimiters) to the matching `|` (continue) or `'` (stop).
pub fn exec_quote(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if !cmd.n_set {
        return Err(TecoError::new(ErrorKind::Ina, pos));
    }
    let kind = CondKind::from_char(cmd.c2, pos)?;
    if !kind.test(cmd.n_arg) {
        skip_to(interp, true)?;
    }
    Ok(())
}

/// `|`: reached only while executing a true branch; skip to the matching
/// `'`.
pub fn exec_bar(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    skip_to(interp, false)?;
    Ok(())
}

/// `'`: end of a conditional. No effect of its own — reaching it by
/// falling off the end of a true branch (no `|`) is a no-op.
pub fn exec_endif(_interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    Ok(())
}

/// `<` (or `n<`): push a loop frame. `n == 0` skips the body entirely
/// without ever pushing a frame.
pub fn exec_loop_start(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    if cmd.n_set && cmd.n_arg == 0 {
        return skip_loop_body(interp);
    }
    let start = interp.cbuf.pos();
    let n = cmd.n_set.then_some(cmd.n_arg);
    interp.loop_stack.push(LoopFrame::new(start, n));
    Ok(())
}

/// `>`: decrement the innermost loop's counter; jump back to just after
/// the matching `<` if iterations remain, else pop the frame and fall
/// through.
pub fn exec_loop_end(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let frame = interp.loop_stack.last_mut().ok_or_else(|| TecoError::new(ErrorKind::Arg, pos))?;
    if frame.tick() {
        let start = frame.start_pos;
        interp.cbuf.set_pos(start);
    } else {
        interp.loop_stack.pop();
    }
    Ok(())
}

/// `;`/`n;`/`:;`: conditional loop exit. Exits when the popped `n` (or 0,
/// if none given) is negative; `:` inverts the test. On exit, the current
/// iteration's loop frame is discarded and control skips to just past the
/// matching `>`.
pub fn exec_semi(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if interp.loop_stack.is_empty() {
        return Err(TecoError::new(ErrorKind::Arg, pos));
    }
    let n = if cmd.n_set { cmd.n_arg } else { 0 };
    let mut exit = n < 0;
    if cmd.colon_set {
        exit = !exit;
    }
    if exit {
        interp.loop_stack.pop();
        skip_loop_body(interp)?;
    }
    Ok(())
}

/// `F<`: restart the innermost loop from the top without consuming an
/// iteration.
pub fn exec_f_restart(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let frame = interp.loop_stack.last().ok_or_else(|| TecoError::new(ErrorKind::Arg, pos))?;
    interp.cbuf.set_pos(frame.start_pos);
    Ok(())
}

/// `F>`: unconditional loop break, equivalent to an always-taken `;`.
pub fn exec_f_break(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if interp.loop_stack.is_empty() {
        return Err(TecoError::new(ErrorKind::Arg, pos));
    }
    interp.loop_stack.pop();
    skip_loop_body(interp)
}

/// `!tag!`: a declaration with no effect beyond passing through whatever
/// `m`/`n` preceded it, so a comment can sit between two commands that
/// share arguments (`goto_cmd.c::exec_bang`).
pub fn exec_bang(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if cmd.n_set {
        if cmd.m_set {
            interp.estack.push_value(cmd.m_arg, pos)?;
        }
        interp.estack.push_value(cmd.n_arg, pos)?;
    }
    Ok(())
}

/// `Otag` / `nOtag1,tag2,tag3`: jump to a tag, or to the `n`-th element of
/// a comma-separated tag list (1-based).
pub fn exec_o(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if cmd.text1.is_empty() {
        return Err(TecoError::new(ErrorKind::Not, pos));
    }
    let text = interp.cbuf.slice(cmd.text1.start, cmd.text1.end()).to_vec();

    if !cmd.n_set {
        let target = find_tag(interp, &text)?;
        interp.cbuf.set_pos(target);
        return Ok(());
    }

    if cmd.n_arg <= 0 {
        return Err(TecoError::new(ErrorKind::Noa, pos));
    }
    let parts: Vec<&[u8]> = text.split(|&b| b == b',').collect();
    match parts.get((cmd.n_arg - 1) as usize) {
        Some(part) if !part.is_empty() => {
            let part = part.to_vec();
            let target = find_tag(interp, &part)?;
            interp.cbuf.set_pos(target);
            Ok(())
        }
        Some(_) => Ok(()),
        None => Err(TecoError::new(ErrorKind::Boa, pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::dispatch::run;
    use crate::interpreter::interpreter::tests::test_interpreter;

    #[test]
    fn true_branch_runs_through_to_endif() {
        let mut interp = test_interpreter();
        interp.load("1\"N 7UA | 8UA '");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 7);
    }

    #[test]
    fn false_branch_skips_to_else() {
        let mut interp = test_interpreter();
        interp.load("0\"N 7UA | 8UA '");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 8);
    }

    #[test]
    fn false_branch_with_no_else_is_a_no_op() {
        let mut interp = test_interpreter();
        interp.load("0\"N 7UA '9UB");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 0);
        assert_eq!(interp.qregs.get_num('B', false, 0).unwrap(), 9);
    }

    #[test]
    fn loop_runs_n_times() {
        let mut interp = test_interpreter();
        interp.load("0UA 5<1UA %B>");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('B', false, 0).unwrap(), 5);
        assert!(interp.loop_stack.is_empty());
    }

    #[test]
    fn zero_iteration_loop_skips_body_entirely() {
        let mut interp = test_interpreter();
        interp.load("0<99UA>1UB");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 0);
        assert_eq!(interp.qregs.get_num('B', false, 0).unwrap(), 1);
    }

    #[test]
    fn semi_exits_loop_early_on_negative_n() {
        let mut interp = test_interpreter();
        interp.load("0UA 10<%A 5UB -1;>");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('B', false, 0).unwrap(), 5);
        assert!(interp.loop_stack.is_empty());
    }

    #[test]
    fn goto_jumps_to_named_tag() {
        let mut interp = test_interpreter();
        interp.load("1UA Ostart\x1B 99UA ! !start! 2UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 2);
    }

    #[test]
    fn computed_goto_picks_nth_tag() {
        let mut interp = test_interpreter();
        interp.load("2Oa,start\x1B 9UA ! !start! 8UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 8);
    }
}
