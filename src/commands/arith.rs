//! Arithmetic operand/operator commands: each is `OptionBits::O` (§4.4),
//! meaning the scanner executes it immediately, on push, rather than
//! handing it to the dispatcher. Grounded in `original_source/cmd_scan.c`'s
//! `scan_cmd` default case, which pushes directly onto the expression
//! stack for every operator character.

use crate::cmd::CmdBlock;
use crate::interpreter::errors::TecoResult;
use crate::interpreter::estack::BinOp;
use crate::interpreter::interpreter::Interpreter;

pub fn exec_plus(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.push_binary(BinOp::Add, pos)
}

/// `-` is binary subtraction between two operands, but unary negation in
/// operand position (right after `(`, `,`, another operator, or at the
/// very start of the expression) — §4.2's "lone unary minus" case.
pub fn exec_minus(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    if interp.estack.at_operand_position() {
        interp.estack.push_unary_minus();
        Ok(())
    } else {
        interp.estack.push_binary(BinOp::Sub, pos)
    }
}

pub fn exec_star(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.push_binary(BinOp::Mul, pos)
}

pub fn exec_slash(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.push_binary(BinOp::Div, pos)
}

pub fn exec_amp(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.push_binary(BinOp::And, pos)
}

pub fn exec_hash(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.push_binary(BinOp::Or, pos)
}

pub fn exec_lparen(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    interp.estack.push_lparen();
    Ok(())
}

pub fn exec_rparen(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.pop_rparen(pos)
}

pub fn exec_comma(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    let pos = interp.cbuf.pos();
    interp.estack.push_comma(pos)
}

/// `^_`: one's complement of whatever is pushed next, the same prefix
/// shape as unary minus.
pub fn exec_complement(interp: &mut Interpreter, _cmd: &mut CmdBlock) -> TecoResult<()> {
    interp.estack.push_unary_not();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::interpreter::tests::test_interpreter;
    use crate::interpreter::dispatch::run;

    #[test]
    fn leading_minus_is_unary() {
        let mut interp = test_interpreter();
        interp.load("-5UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), -5);
    }

    #[test]
    fn parenthesized_expression_groups_left_to_right() {
        let mut interp = test_interpreter();
        interp.load("(1+2)*3UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), 9);
    }

    #[test]
    fn complement_flips_bits() {
        let mut interp = test_interpreter();
        interp.load("^_0UA");
        run(&mut interp).unwrap();
        assert_eq!(interp.qregs.get_num('A', false, 0).unwrap(), -1);
    }
}
