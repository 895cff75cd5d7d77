//! Q-register commands: `U` (store), `Q` (load), `%` (increment), `[`/`]`
//! (scope push/pop), `G` (insert text). `U` and `%` follow `original_source/
//! src/u_cmd.c::exec_U` and `pct_cmd.c::exec_pct`; `include/exec.h` declares
//! `exec_G`/`exec_lbracket`/`exec_rbracket` but the pack carries no bodies
//! for them, so the scope-stack shape here is this crate's own design.

use crate::cmd::CmdBlock;
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::Interpreter;

fn qname(cmd: &CmdBlock, pos: usize) -> TecoResult<char> {
    cmd.qname.ok_or_else(|| TecoError::new(ErrorKind::Iqn, pos))
}

/// `U`: store `n` (required — `E_NAU` if absent) in the named Q-register.
/// Passes `m` through as the next command's `n`, per `u_cmd.c::exec_U`.
pub fn exec_u(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if !cmd.n_set {
        return Err(TecoError::new(ErrorKind::Nau, pos));
    }
    let name = qname(cmd, pos)?;
    interp.qregs.set_num(name, cmd.qlocal, cmd.n_arg, pos)?;
    if cmd.m_set {
        interp.estack.push_value(cmd.m_arg, pos)?;
    }
    Ok(())
}

/// `Qq` pushes the register's number; `:Qq` pushes the length of its text
/// instead. Operand-class: it's a value, not a statement.
pub fn exec_q(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = qname(cmd, pos)?;
    let value = if cmd.colon_set {
        interp.qregs.get_text(name, cmd.qlocal, pos)?.len() as i64
    } else {
        interp.qregs.get_num(name, cmd.qlocal, pos)?
    };
    interp.estack.push_value(value, pos)
}

/// `%q` (or `n%q`, default `n = 1`): add to the register and push the
/// result, per `pct_cmd.c::exec_pct`.
pub fn exec_pct(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = qname(cmd, pos)?;
    let delta = if cmd.n_set { cmd.n_arg } else { 1 };
    let value = interp.qregs.increment(name, cmd.qlocal, delta, pos)?;
    interp.estack.push_value(value, pos)
}

fn repush_passthrough(interp: &mut Interpreter, cmd: &CmdBlock, pos: usize) -> TecoResult<()> {
    let m = cmd.m_set.then_some(cmd.m_arg);
    let n = cmd.n_set.then_some(cmd.n_arg);
    interp.estack.repush_args(m, n, pos)
}

/// `[q`: push the register's current value onto the `[`/`]` scope stack.
pub fn exec_lbracket(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = qname(cmd, pos)?;
    interp.qregs.push_scope(name, cmd.qlocal, pos)?;
    repush_passthrough(interp, cmd, pos)
}

/// `]q`: restore the register's value from the scope stack.
pub fn exec_rbracket(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = qname(cmd, pos)?;
    interp.qregs.pop_scope(name, cmd.qlocal, pos)?;
    repush_passthrough(interp, cmd, pos)
}

/// `Gq`: insert the register's text at dot. `G*`/`G_`/`G+` read the
/// special `G`-only names (last filespec, last search string, build
/// info) instead of a named register.
pub fn exec_g(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    let name = qname(cmd, pos)?;
    let text = match name {
        '*' => interp.memory.last_filename().unwrap_or_default().into_bytes(),
        '_' => interp.last_search.clone(),
        '+' => b"teco-core".to_vec(),
        _ => interp.qregs.get_text(name, cmd.qlocal, pos)?,
    };
    let dot = interp.edit.dot();
    interp.edit.insert(dot, &text);
    Ok(())
}
