//! The `E`-prefixed file commands: `ER`/`EW` (open input/output), `EB`
//! (backup edit — open the same name for both), and `EI` (indirect
//! command file — read a file's contents and run them as a nested
//! command string, the disk-backed counterpart to `M`'s Q-register-backed
//! macro). The `e1`/`e2` flag-setting commands stay out of scope —
//! those are configuration surface `TecoOptions` already covers directly.

use crate::cmd::CmdBlock;
use crate::interpreter::dispatch::run;
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::{Interpreter, MacroFrame};
use crate::parser::cbuf::CBuf;

fn filename(interp: &Interpreter, cmd: &CmdBlock) -> String {
    String::from_utf8_lossy(interp.cbuf.slice(cmd.text1.start, cmd.text1.end())).into_owned()
}

/// `ERfile$`: open `file` for input.
pub fn exec_er(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = filename(interp, cmd);
    interp.file_io.open_input(&name).map_err(|_| TecoError::with_arg(ErrorKind::Sys, pos, name))
}

/// `EWfile$`: open `file` for output.
pub fn exec_ew(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = filename(interp, cmd);
    interp.memory.set_last_filename(name.clone());
    interp.file_io.open_output(&name).map_err(|_| TecoError::with_arg(ErrorKind::Sys, pos, name))
}

/// `EBfile$`: backup edit — open `file` for both reading and writing
/// (the narrow `FileIo` collaborator has no rename/backup-rotation of its
/// own, so this is `ER` followed by `EW` of the same name) and remember
/// it as the last-edited filename for `G*`.
pub fn exec_eb(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = filename(interp, cmd);
    interp.file_io.open_input(&name).map_err(|_| TecoError::with_arg(ErrorKind::Sys, pos, name.clone()))?;
    interp.memory.set_last_filename(name.clone());
    interp.file_io.open_output(&name).map_err(|_| TecoError::with_arg(ErrorKind::Sys, pos, name))
}

/// `EIfile$` / `:EIfile$`: read `file`'s full contents and execute them as
/// a nested command string, the way `M` runs a Q-register's text — same
/// save/restore-`CBuf` shape as `exec_m`, reusing `macro_stack` so a
/// pathological chain of indirect files is bounded by the same
/// `max_macro_depth`. `:`-modified, a missing file pushes `0` instead of
/// raising `E_SYS` (mirrors the local-recovery pattern spec.md §7
/// documents for search).
pub fn exec_ei(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = filename(interp, cmd);

    if interp.file_io.open_input(&name).is_err() {
        return if cmd.colon_set {
            interp.estack.push_value(0, pos)
        } else {
            Err(TecoError::with_arg(ErrorKind::Sys, pos, name))
        };
    }

    let mut contents = Vec::new();
    while let Ok(Some(mut line)) = interp.file_io.read_line() {
        contents.append(&mut line);
    }
    interp.file_io.close();

    if interp.macro_stack.len() >= interp.limits.max_macro_depth {
        return Err(TecoError::new(ErrorKind::Mem, pos));
    }

    let caller_cbuf = std::mem::replace(&mut interp.cbuf, CBuf::new(contents));
    interp.macro_stack.push(MacroFrame { caller_cbuf, pushed_local_scope: false });

    let result = run(interp);

    let frame = interp.macro_stack.pop().expect("exec_ei pushed a frame above");
    interp.cbuf = frame.caller_cbuf;
    result?;

    if cmd.colon_set {
        interp.estack.push_value(-1, pos)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::dispatch::run;
    use crate::interpreter::interpreter::tests::test_interpreter;

    #[test]
    fn ew_then_er_round_trips_through_the_same_name() {
        let mut interp = test_interpreter();
        interp.load("EWout.txt\x1B");
        run(&mut interp).unwrap();
        assert_eq!(interp.memory.last_filename().as_deref(), Some("out.txt"));
        interp.file_io.write(b"hi").unwrap();
        interp.file_io.close();
        interp.load("ERout.txt\x1B");
        run(&mut interp).unwrap();
        assert_eq!(interp.file_io.read_line().unwrap(), Some(b"hi".to_vec()));
    }

    #[test]
    fn er_on_missing_file_is_a_sys_error() {
        let mut interp = test_interpreter();
        interp.load("ERmissing.txt\x1B");
        let err = run(&mut interp).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Sys);
    }

    #[test]
    fn eb_opens_the_same_name_for_input_and_output() {
        let mut interp = test_interpreter();
        interp.file_io.open_output("doc.txt").unwrap();
        interp.file_io.write(b"body").unwrap();
        interp.file_io.close();

        interp.load("EBdoc.txt\x1B");
        run(&mut interp).unwrap();
        assert_eq!(interp.memory.last_filename().as_deref(), Some("doc.txt"));
        assert_eq!(interp.file_io.read_line().unwrap(), Some(b"body".to_vec()));
        interp.file_io.write(b"!").unwrap();
    }

    #[test]
    fn ei_runs_the_files_contents_as_a_command_string() {
        let mut interp = test_interpreter();
        interp.file_io.open_output("init.tec").unwrap();
        interp.file_io.write(b"7UA").unwrap();
        interp.file_io.close();

        interp.load("EIinit.tec\x1B QA UB");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('B', false, 0).unwrap(), 7);
        assert!(interp.macro_stack.is_empty());
    }

    #[test]
    fn colon_ei_recovers_missing_file_as_zero() {
        let mut interp = test_interpreter();
        interp.load(":EImissing.tec\x1B UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 0);
    }
}
