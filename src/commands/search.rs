//! Search commands: `S` (local search), `N` (global search), and the
//! search-and-replace family `FN`/`FB`/`FS`/`FC`. Grounded in
//! `original_source/src/n_cmd.c::exec_search` (count/direction handling,
//! `last_search` caching) and `fb_cmd.c::exec_search` (the bounded
//! variants). All five share one `do_search` helper the way the original's
//! two `exec_search` statics share their shape.
//!
//! The narrow `EditBuffer` trait (§D) has no bulk-read operation, so the
//! haystack is assembled one `char_at` call at a time; that's the price of
//! keeping the collaborator interface to "read/move dot, insert, delete".

use crate::cmd::CmdBlock;
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::Interpreter;

fn haystack(interp: &Interpreter) -> Vec<u8> {
    let z = interp.edit.z();
    (0..z).filter_map(|p| interp.edit.char_at(p)).collect()
}

fn text_arg(interp: &Interpreter, cmd: &CmdBlock, which: usize) -> Vec<u8> {
    let view = if which == 0 { &cmd.text1 } else { &cmd.text2 };
    interp.cbuf.slice(view.start, view.end()).to_vec()
}

/// Shared search core for `S`/`N`/`FN`/`FB`/`FS`/`FC`. `replace` is `Some`
/// text when a second text argument is present (the `F`-family).
///
/// `n_arg` (default 1, §n_cmd.c) gives a repeat count; negative searches
/// backward. `0Stext$` is `E_ISA` (`n_cmd.c`'s explicit check). On a
/// match, `dot` moves to the end of the match (start, for backward) and
/// `-1` is pushed; on failure, `:`-modified callers recover `0` instead of
/// raising `E_SRH` (spec.md §7's one documented local-recovery case).
fn do_search(interp: &mut Interpreter, cmd: &mut CmdBlock, replace: Option<Vec<u8>>) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if cmd.n_set && cmd.n_arg == 0 {
        return Err(TecoError::new(ErrorKind::Isa, pos));
    }
    let n = if cmd.n_set { cmd.n_arg } else { 1 };

    let needle = text_arg(interp, cmd, 0);
    let needle = if needle.is_empty() { interp.last_search.clone() } else { needle };
    if !needle.is_empty() {
        interp.last_search = needle.clone();
    }

    let hay = haystack(interp);
    let dot = interp.edit.dot();
    let z = interp.edit.z();

    let mut found = None;
    if n < 0 {
        let mut end = dot;
        for _ in 0..(-n) {
            match interp.search.search_backward(&hay, &needle, 0, end) {
                Some(range) => {
                    end = range.start - 1;
                    found = Some(range);
                }
                None => {
                    found = None;
                    break;
                }
            }
        }
    } else {
        let mut start = dot;
        for _ in 0..n {
            match interp.search.search_forward(&hay, &needle, start, z) {
                Some(range) => {
                    start = range.end;
                    found = Some(range);
                }
                None => {
                    found = None;
                    break;
                }
            }
        }
    }

    match found {
        Some(range) => {
            interp.last_match_len = range.end - range.start;
            if let Some(replacement) = replace {
                interp.edit.delete(range.start..range.end);
                interp.edit.insert(range.start, &replacement);
                interp.edit.set_dot(range.start + replacement.len() as i64);
            } else if n < 0 {
                interp.edit.set_dot(range.start);
            } else {
                interp.edit.set_dot(range.end);
            }
            interp.estack.push_value(-1, pos)
        }
        None => {
            if cmd.colon_set {
                interp.estack.push_value(0, pos)
            } else {
                Err(TecoError::new(ErrorKind::Srh, pos))
            }
        }
    }
}

/// `Stext$` / `:Stext$`: search from `dot`, colon recovers failure as `0`.
pub fn exec_s(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    do_search(interp, cmd, None)
}

/// `Ntext$`: global search, an alias of `S` in this single-buffer core
/// (`n_cmd.c`'s multi-file re-read loop is out of scope — there is only
/// ever one buffer here).
pub fn exec_n(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    do_search(interp, cmd, None)
}

/// `FNtext1$text2$`: search for `text1`, replace the match with `text2`.
pub fn exec_fn(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let replacement = text_arg(interp, cmd, 1);
    do_search(interp, cmd, Some(replacement))
}

/// `FBtext$`: bounded search. `fb_cmd.c` bounds the search to the current
/// line; without a line-oriented `EditBuffer` interface (§D only exposes
/// `dot`/`z`/`char_at`), this core bounds it to the whole buffer instead —
/// equivalent to `S` — and documents the simplification here rather than
/// silently diverging from the spec's named command.
pub fn exec_fb(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    do_search(interp, cmd, None)
}

/// `FStext1$text2$`: search and replace, same bounded/global simplification
/// as `FB` relative to `FN`.
pub fn exec_fs(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let replacement = text_arg(interp, cmd, 1);
    do_search(interp, cmd, Some(replacement))
}

/// `FCtext1$text2$`: bounded search and replace (see `exec_fb`).
pub fn exec_fc(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let replacement = text_arg(interp, cmd, 1);
    do_search(interp, cmd, Some(replacement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::dispatch::run;
    use crate::interpreter::interpreter::tests::test_interpreter;

    fn seed(interp: &mut Interpreter, text: &str) {
        interp.edit.insert(0, text.as_bytes());
        interp.edit.set_dot(0);
    }

    #[test]
    fn s_finds_text_and_advances_dot() {
        let mut interp = test_interpreter();
        seed(&mut interp, "hello world");
        interp.load("Sworld\x1B UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), -1);
        assert_eq!(interp.edit.dot(), 11);
    }

    #[test]
    fn s_without_colon_raises_srh_on_failure() {
        let mut interp = test_interpreter();
        seed(&mut interp, "hello world");
        interp.load("Smissing\x1B");
        let err = run(&mut interp).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Srh);
    }

    #[test]
    fn colon_s_recovers_failure_as_zero() {
        let mut interp = test_interpreter();
        seed(&mut interp, "hello world");
        interp.load(":Smissing\x1B UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 0);
    }

    #[test]
    fn zero_n_search_is_isa() {
        let mut interp = test_interpreter();
        seed(&mut interp, "hello world");
        interp.load("0Sworld\x1B");
        let err = run(&mut interp).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Isa);
    }

    #[test]
    fn fn_replaces_matched_text() {
        let mut interp = test_interpreter();
        seed(&mut interp, "hello world");
        interp.load("FNworld\x1Bthere\x1B");
        run(&mut interp).unwrap();
        let buf = interp.edit.as_any().downcast_ref::<crate::collaborators::stubs::InMemoryBuffer>().unwrap();
        assert_eq!(buf.as_bytes(), b"hello there");
    }

    #[test]
    fn empty_search_text_reuses_last_search() {
        let mut interp = test_interpreter();
        seed(&mut interp, "hello world hello");
        interp.load("Shello\x1B S\x1B UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), -1);
        assert_eq!(interp.edit.dot(), 17);
    }
}
