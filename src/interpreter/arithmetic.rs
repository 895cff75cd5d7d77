//! Radix-aware digit accumulation, grounded in
//! `original_source/src/cmd_scan.c`'s `scan_digits`/`valid_radix`.
//!
//! The single-pass scanner only ever reads digits live from the buffer, so
//! the two-pass distinction in the original (`pass1` reread from the live
//! buffer, `pass2` re-read from a captured expression) does not apply here;
//! only the accumulation and validity rules survive.

use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};
use crate::interpreter::types::Radix;

/// Is `c` a valid digit in `radix`? Mirrors `valid_radix`: in octal, `8`
/// and `9` are syntactically digit characters but illegal, so callers
/// that need to emit `E_ILN` should check that case themselves — this
/// function alone just reports validity.
pub fn is_valid_digit(c: u8, radix: Radix) -> bool {
    match radix {
        Radix::Hex => c.is_ascii_hexdigit(),
        Radix::Decimal => c.is_ascii_digit(),
        Radix::Octal => c.is_ascii_digit() && c <= b'7',
    }
}

/// `true` if `c` is a digit character at all, regardless of radix — used
/// to distinguish "not a digit" (stop scanning) from "digit out of range
/// for radix" (`E_ILN`).
pub fn is_digit_char(c: u8, radix: Radix) -> bool {
    match radix {
        Radix::Hex => c.is_ascii_hexdigit(),
        Radix::Decimal | Radix::Octal => c.is_ascii_digit(),
    }
}

fn digit_value(c: u8) -> i64 {
    match c.to_ascii_uppercase() {
        b'0'..=b'9' => (c - b'0') as i64,
        b'A'..=b'F' => (c.to_ascii_uppercase() - b'A' + 10) as i64,
        _ => 0,
    }
}

/// Accumulate one more digit character onto `sum`, per `scan_digits`'s
/// `sum = sum * radix + digit` step. Callers are responsible for stopping
/// once a non-digit character is seen.
pub fn accumulate_digit(sum: i64, c: u8, radix: Radix, pos: usize) -> TecoResult<i64> {
    if !is_digit_char(c, radix) {
        return Err(TecoError::with_arg(ErrorKind::Chr, pos, (c as char).to_string()));
    }
    if !is_valid_digit(c, radix) {
        return Err(TecoError::new(ErrorKind::Iln, pos));
    }
    Ok(sum.wrapping_mul(radix.value()).wrapping_add(digit_value(c)))
}
