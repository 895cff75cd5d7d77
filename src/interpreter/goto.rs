//! Tag resolution for `O`/`nO`, grounded in
//! `original_source/src/goto_cmd.c::find_tag`: a side-effect-free scan of
//! the *entire* current `CBuf` from position 0, in dry-run mode, looking
//! for a `!` command whose text matches. Duplicate tags are `E_DUP`,
//! absence is `E_TAG`.

use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::Interpreter;
use crate::parser::{scan_one, with_dryrun, ScanOutcome};

/// Scan the whole buffer for `!name!`, returning the position just past
/// its closing delimiter. Restores the caller's cursor position on every
/// path, including errors.
pub fn find_tag(interp: &mut Interpreter, name: &[u8]) -> TecoResult<usize> {
    let saved_pos = interp.cbuf.pos();
    let result = with_dryrun(interp, |interp| {
        interp.cbuf.set_pos(0);
        let mut tag_pos: Option<usize> = None;
        loop {
            match scan_one(interp, 0)? {
                None => break,
                Some(ScanOutcome::Handled) => continue,
                Some(ScanOutcome::Consuming(cmd, _, _)) => {
                    if cmd.c1 != b'!' {
                        continue;
                    }
                    let text = interp.cbuf.slice(cmd.text1.start, cmd.text1.end());
                    if text == name {
                        if tag_pos.is_some() {
                            return Err(TecoError::with_arg(
                                ErrorKind::Dup,
                                interp.cbuf.pos(),
                                String::from_utf8_lossy(name).into_owned(),
                            ));
                        }
                        tag_pos = Some(interp.cbuf.pos());
                    }
                }
            }
        }
        tag_pos.ok_or_else(|| {
            TecoError::with_arg(ErrorKind::Tag, saved_pos, String::from_utf8_lossy(name).into_owned())
        })
    });
    interp.cbuf.set_pos(saved_pos);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::interpreter::tests::test_interpreter;

    #[test]
    fn finds_forward_tag() {
        let mut interp = test_interpreter();
        interp.load("!skip! A !start! B");
        let pos = find_tag(&mut interp, b"start").unwrap();
        assert_eq!(interp.cbuf.slice(pos, pos + 2), b" B");
    }

    #[test]
    fn missing_tag_is_an_error() {
        let mut interp = test_interpreter();
        interp.load("!start!");
        let err = find_tag(&mut interp, b"nope").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Tag);
    }

    #[test]
    fn duplicate_tag_is_an_error() {
        let mut interp = test_interpreter();
        interp.load("!dup! !dup!");
        let err = find_tag(&mut interp, b"dup").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Dup);
    }

    #[test]
    fn restores_cursor_position_on_success() {
        let mut interp = test_interpreter();
        interp.load("!start! X");
        interp.cbuf.set_pos(3);
        find_tag(&mut interp, b"start").unwrap();
        assert_eq!(interp.cbuf.pos(), 3);
    }
}
