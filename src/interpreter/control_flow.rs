//! Control-flow overlay types: conditional comparison kinds and the loop
//! stack entry shape. The skip-forward mechanics that use these live in
//! `parser::scanner`, since skipping to `|`/`'`/`>` has to share the
//! scanner's lexing primitives (it must still respect nested text-argument
//! delimiters).

use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};

/// The comparison kind following `"` in a conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondKind {
    Eq,
    Lt,
    Gt,
    Alpha,
    SymConstituent,
    Digit,
    NonZero,
    Alnum,
    Success,
    Unsuccess,
    Lower,
    Upper,
    Failure,
}

impl CondKind {
    pub fn from_char(c: u8, pos: usize) -> TecoResult<CondKind> {
        Ok(match c.to_ascii_uppercase() {
            b'=' => CondKind::Eq,
            b'<' => CondKind::Lt,
            b'>' => CondKind::Gt,
            b'A' => CondKind::Alpha,
            b'C' => CondKind::SymConstituent,
            b'D' => CondKind::Digit,
            b'N' => CondKind::NonZero,
            b'R' => CondKind::Alnum,
            b'S' | b'T' => CondKind::Success,
            b'U' => CondKind::Unsuccess,
            b'V' => CondKind::Lower,
            b'W' => CondKind::Upper,
            b'F' => CondKind::Failure,
            _ => return Err(TecoError::with_arg(ErrorKind::Ill, pos, (c as char).to_string())),
        })
    }

    /// Evaluate the comparison against the popped `n` value.
    pub fn test(self, n: i64) -> bool {
        match self {
            CondKind::Eq => n == 0,
            CondKind::Lt => n < 0,
            CondKind::Gt => n > 0,
            CondKind::Alpha => (0..=255).contains(&n) && (n as u8 as char).is_ascii_alphabetic(),
            CondKind::SymConstituent => {
                (0..=255).contains(&n)
                    && ((n as u8 as char).is_ascii_alphanumeric() || n == b'.' as i64 || n == b'$' as i64 || n == b'_' as i64)
            }
            CondKind::Digit => (0..=255).contains(&n) && (n as u8 as char).is_ascii_digit(),
            CondKind::NonZero => n != 0,
            CondKind::Alnum => (0..=255).contains(&n) && (n as u8 as char).is_ascii_alphanumeric(),
            CondKind::Success => n != 0,
            CondKind::Unsuccess => n == 0,
            CondKind::Lower => (0..=255).contains(&n) && (n as u8 as char).is_ascii_lowercase(),
            CondKind::Upper => (0..=255).contains(&n) && (n as u8 as char).is_ascii_uppercase(),
            CondKind::Failure => n == 0,
        }
    }
}

/// One entry on the loop stack, pushed by `<`. `remaining == None` means
/// infinite (no `n` before `<`).
#[derive(Debug, Clone, Copy)]
pub struct LoopFrame {
    pub start_pos: usize,
    pub remaining: Option<i64>,
}

impl LoopFrame {
    pub fn new(start_pos: usize, n: Option<i64>) -> Self {
        Self { start_pos, remaining: n }
    }

    /// Decrement the counter; returns `true` if the loop should continue.
    pub fn tick(&mut self) -> bool {
        match &mut self.remaining {
            None => true,
            Some(r) => {
                *r -= 1;
                *r > 0
            }
        }
    }
}
