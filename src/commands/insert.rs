//! Text-insertion command: `I text$` inserts its text argument at `dot`.
//! A bare TAB byte (0x09) is the one documented special case — it behaves
//! as `I` with an implicit one-character text argument, grounded in
//! `original_source/src/ins_cmd.c::exec_tab`.

use crate::cmd::CmdBlock;
use crate::interpreter::errors::TecoResult;
use crate::interpreter::interpreter::Interpreter;

/// `Itext$` (or `n,mItext$` for the rare numeric-insert form: insert the
/// character with that code `m` times — unused here since `spec.md`
/// scopes `I` to its text-argument form only).
pub fn exec_i(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let bytes = interp.cbuf.slice(cmd.text1.start, cmd.text1.end()).to_vec();
    let dot = interp.edit.dot();
    interp.edit.insert(dot, &bytes);
    Ok(())
}

/// A literal TAB in the command stream inserts itself at `dot`.
pub fn exec_tab(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let dot = interp.edit.dot();
    interp.edit.insert(dot, b"\t");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::stubs::InMemoryBuffer;
    use crate::interpreter::dispatch::run;
    use crate::interpreter::interpreter::tests::test_interpreter;

    fn text(interp: &Interpreter) -> &[u8] {
        interp.edit.as_any().downcast_ref::<InMemoryBuffer>().unwrap().as_bytes()
    }

    #[test]
    fn i_inserts_text_at_dot() {
        let mut interp = test_interpreter();
        interp.load("Ihello\x1B");
        run(&mut interp).unwrap();
        assert_eq!(text(&interp), b"hello");
    }

    #[test]
    fn bare_tab_inserts_a_tab_character() {
        let mut interp = test_interpreter();
        interp.load("\tIx\x1B");
        run(&mut interp).unwrap();
        assert_eq!(text(&interp), b"\tx");
    }
}
