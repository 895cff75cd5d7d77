//! Output commands: `=`/`==`/`===` (print `n` in decimal/octal/hex) and
//! `^A` (print a text argument literally). Grounded in `original_source/
//! src/term_out.c` for the radix formatting and `ctrl_s_cmd.c`-style
//! paired-delimiter text argument handling for `^A`.

use crate::cmd::CmdBlock;
use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::interpreter::Interpreter;

/// Scan hook for `=`: greedily match up to two more `=` characters,
/// recording the total count (1/2/3) in `c2`. §4.5/§9: `@` is consumed
/// first by the modifier loop, then `=` repetition is determined here.
pub fn scan_equals(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let mut count: u8 = 1;
    while count < 3 && interp.cbuf.peek() == Some(b'=') {
        interp.cbuf.fetch()?;
        count += 1;
    }
    cmd.c2 = count;
    Ok(())
}

/// `=`/`==`/`===`: print `n` in decimal, octal, or hex per the count the
/// scan hook recorded.
pub fn exec_equals(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if !cmd.n_set {
        return Err(TecoError::new(ErrorKind::Arg, pos));
    }
    let n = cmd.n_arg;
    let text = match cmd.c2 {
        1 => format!("{n}"),
        2 => format!("{:o}", n),
        3 => format!("{:X}", n),
        _ => unreachable!("scan_equals only ever records 1..=3"),
    };
    let mut out = text.into_bytes();
    out.push(b'\n');
    interp.terminal.print(&out);
    Ok(())
}

/// `^A text text`: print the text argument exactly as written, with no
/// interpretation of escapes.
pub fn exec_ctrl_a(interp: &mut Interpreter, cmd: &mut CmdBlock) -> TecoResult<()> {
    let bytes = interp.cbuf.slice(cmd.text1.start, cmd.text1.end()).to_vec();
    interp.terminal.print(&bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::stubs::CapturingTerminal;
    use crate::interpreter::dispatch::run;
    use crate::interpreter::interpreter::tests::test_interpreter;

    fn captured(interp: &crate::interpreter::interpreter::Interpreter) -> &[u8] {
        &interp.terminal.as_any().downcast_ref::<CapturingTerminal>().unwrap().output
    }

    #[test]
    fn equals_prints_decimal() {
        let mut interp = test_interpreter();
        interp.load("1+2=");
        run(&mut interp).unwrap();
        assert_eq!(captured(&interp), b"3\n");
    }

    #[test]
    fn double_equals_prints_octal() {
        let mut interp = test_interpreter();
        interp.load("8==");
        run(&mut interp).unwrap();
        assert_eq!(captured(&interp), b"10\n");
    }

    #[test]
    fn triple_equals_prints_hex() {
        let mut interp = test_interpreter();
        interp.load("255===");
        run(&mut interp).unwrap();
        assert_eq!(captured(&interp), b"FF\n");
    }

    #[test]
    fn ctrl_a_prints_paired_delimiter_text() {
        let mut interp = test_interpreter();
        interp.load("@^A/hello/\x1B");
        run(&mut interp).unwrap();
        assert_eq!(captured(&interp), b"hello");
    }
}
