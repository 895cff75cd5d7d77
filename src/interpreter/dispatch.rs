//! The dispatcher (§4.7 `Exec`): reduces the expression stack into `m`/`n`
//! arguments, validates option bits, invokes the command's exec hook, and
//! drives the outer read-eval loop that both the top-level caller and the
//! macro driver (`M`) re-enter.

use crate::cmd::CmdBlock;
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::Interpreter;
use crate::parser::{next_command, OptionBits};

/// §4.7 step 1-2: pop `n` (then `m` if a comma precedes it), clear both if
/// the command has the `E` option, enforce the presence/absence rules the
/// option bits encode, and reject `m > n` (`E_NCA`) except for the `W`
/// exception.
pub fn end_cmd(interp: &mut Interpreter, cmd: &mut CmdBlock, opts: OptionBits) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let (m, n) = interp.estack.pop_args(pos)?;
    let (m, n) = if opts.contains(OptionBits::E) { (None, None) } else { (m, n) };

    if m.is_some() && !opts.contains(OptionBits::M) && interp.options.m_arg_strict {
        return Err(TecoError::new(ErrorKind::Ima, pos));
    }
    if n.is_some()
        && !opts.contains(OptionBits::N)
        && !opts.contains(OptionBits::M)
        && interp.options.n_arg_strict
    {
        return Err(TecoError::new(ErrorKind::Ina, pos));
    }
    if m.is_some() && n.is_none() {
        return Err(TecoError::new(ErrorKind::Non, pos));
    }
    if let (Some(mv), Some(nv)) = (m, n) {
        if mv > nv && !opts.contains(OptionBits::W) {
            return Err(TecoError::new(ErrorKind::Nca, pos));
        }
    }

    cmd.m_set = m.is_some();
    cmd.m_arg = m.unwrap_or(0);
    cmd.n_set = n.is_some();
    cmd.n_arg = n.unwrap_or(0);
    Ok(())
}

/// The outer read-eval loop (§2 item 6, §4.9). Also what `M` re-enters
/// for a nested macro's `CBuf` (§4.8 Macros): each call owns exactly one
/// `CBuf`'s worth of command string, start to finish.
pub fn run(interp: &mut Interpreter) -> TecoResult<()> {
    loop {
        interp.check_ctrl_c()?;
        let Some((mut cmd, exec, opts)) = next_command(interp, 0)? else { break };
        end_cmd(interp, &mut cmd, opts)?;
        exec(interp, &mut cmd)?;
    }
    if interp.options.args_strict && !interp.estack.is_empty() {
        return Err(TecoError::new(ErrorKind::Arg, interp.cbuf.pos()));
    }
    if interp.estack.nparens() != 0 {
        return Err(TecoError::new(ErrorKind::Mlp, interp.cbuf.pos()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::interpreter::tests::test_interpreter;

    #[test]
    fn end_cmd_splits_m_and_n() {
        let mut interp = test_interpreter();
        interp.estack.push_value(3, 0).unwrap();
        interp.estack.push_comma(0).unwrap();
        interp.estack.push_value(5, 0).unwrap();
        let mut cmd = CmdBlock::new(0);
        end_cmd(&mut interp, &mut cmd, OptionBits::M | OptionBits::N).unwrap();
        assert_eq!((cmd.m_arg, cmd.m_set), (3, true));
        assert_eq!((cmd.n_arg, cmd.n_set), (5, true));
    }

    #[test]
    fn end_cmd_rejects_m_without_m_bit() {
        let mut interp = test_interpreter();
        interp.estack.push_value(3, 0).unwrap();
        interp.estack.push_comma(0).unwrap();
        interp.estack.push_value(5, 0).unwrap();
        let mut cmd = CmdBlock::new(0);
        let err = end_cmd(&mut interp, &mut cmd, OptionBits::N).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Ima);
    }

    #[test]
    fn end_cmd_accepts_m_without_m_bit_when_not_strict() {
        let mut interp = test_interpreter();
        interp.options.m_arg_strict = false;
        interp.estack.push_value(3, 0).unwrap();
        interp.estack.push_comma(0).unwrap();
        interp.estack.push_value(5, 0).unwrap();
        let mut cmd = CmdBlock::new(0);
        end_cmd(&mut interp, &mut cmd, OptionBits::N).unwrap();
        assert_eq!((cmd.m_arg, cmd.m_set), (3, true));
    }

    #[test]
    fn end_cmd_rejects_negative_m_n_pair() {
        let mut interp = test_interpreter();
        interp.estack.push_value(9, 0).unwrap();
        interp.estack.push_comma(0).unwrap();
        interp.estack.push_value(2, 0).unwrap();
        let mut cmd = CmdBlock::new(0);
        let err = end_cmd(&mut interp, &mut cmd, OptionBits::M | OptionBits::N).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Nca);
    }

    #[test]
    fn run_drains_a_complete_arithmetic_command_string() {
        let mut interp = test_interpreter();
        interp.load("1+2UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 3);
    }

    #[test]
    fn run_rejects_leftover_expression_stack() {
        let mut interp = test_interpreter();
        interp.load("1+2");
        let err = run(&mut interp).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arg);
    }
}
