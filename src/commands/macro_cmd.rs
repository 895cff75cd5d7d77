//! The macro driver: `M` invokes a Q-register's text as a nested command
//! string, recursively re-entering the dispatcher loop on a fresh `CBuf`.
//! `original_source/include/exec.h` declares `exec_M` but the pack carries
//! no body for it; the swap-in/run-to-completion/always-restore shape here
//! (pop the pushed frame and restore `CBuf` and namespace even on error,
//! only then propagate the macro's result) is this crate's own design.

use crate::cmd::CmdBlock;
use crate::interpreter::dispatch::run;
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::{Interpreter, MacroFrame};
use crate::parser::cbuf::CBuf;

fn qname(cmd: &CmdBlock, pos: usize) -> TecoResult<char> {
    cmd.qname.ok_or_else(|| TecoError::new(ErrorKind::Iqn, pos))
}

/// `Mq` / `:Mq`: run register `q`'s text as a command string. Plain `M`
/// gets a fresh local Q-register namespace; `:M` inherits the caller's.
pub fn exec_m(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if interp.macro_stack.len() >= interp.limits.max_macro_depth {
        return Err(TecoError::new(ErrorKind::Mem, pos));
    }

    let name = qname(cmd, pos)?;
    let text = interp.qregs.get_text(name, cmd.qlocal, pos)?;

    let pushed_local_scope = !cmd.colon_set;
    if pushed_local_scope {
        interp.qregs.enter_local_scope();
    }

    let caller_cbuf = std::mem::replace(&mut interp.cbuf, CBuf::new(text));
    interp.macro_stack.push(MacroFrame { caller_cbuf, pushed_local_scope });

    let result = run(interp);

    let frame = interp.macro_stack.pop().expect("exec_m pushed a frame above");
    interp.cbuf = frame.caller_cbuf;
    if frame.pushed_local_scope {
        interp.qregs.exit_local_scope();
    }

    result?;

    if cmd.n_set {
        interp.estack.push_value(cmd.n_arg, pos)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::interpreter::tests::test_interpreter;

    #[test]
    fn macro_runs_registers_text_and_returns() {
        let mut interp = test_interpreter();
        interp.qregs.set_text('A', false, b"3UB".to_vec(), 0).unwrap();
        interp.load("MA 1UC");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('B', false, 0).unwrap(), 3);
        assert_eq!(interp.qregs.get_num('C', false, 0).unwrap(), 1);
        assert!(interp.macro_stack.is_empty());
    }

    #[test]
    fn plain_macro_gets_isolated_local_namespace() {
        let mut interp = test_interpreter();
        interp.qregs.enter_local_scope();
        interp.qregs.set_num('X', true, 1, 0).unwrap();
        interp.qregs.set_text('A', false, b"Q.XUY".to_vec(), 0).unwrap();
        interp.load("MA");
        run(&mut interp).unwrap();
        // the macro's own local .X is a fresh namespace, so it reads 0,
        // not the caller's local X (1).
        assert_eq!(interp.qregs.get_num('Y', false, 0).unwrap(), 0);
        interp.qregs.exit_local_scope();
    }

    #[test]
    fn colon_modified_macro_shares_callers_local_namespace() {
        let mut interp = test_interpreter();
        interp.qregs.enter_local_scope();
        interp.qregs.set_text('A', false, b"9U.X".to_vec(), 0).unwrap();
        interp.load(":MA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('X', true, 0).unwrap(), 9);
        interp.qregs.exit_local_scope();
    }

    #[test]
    fn macro_restores_caller_cbuf_on_error() {
        let mut interp = test_interpreter();
        interp.qregs.set_text('A', false, b"1/0UB".to_vec(), 0).unwrap();
        interp.load("MA");
        let err = run(&mut interp).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Div);
        assert!(interp.macro_stack.is_empty());
    }

    #[test]
    fn exceeding_max_depth_is_a_memory_error() {
        let mut interp = test_interpreter();
        interp.limits.max_macro_depth = 1;
        interp.qregs.set_text('A', false, b"MA".to_vec(), 0).unwrap();
        interp.load("MA");
        let err = run(&mut interp).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Mem);
    }
}
