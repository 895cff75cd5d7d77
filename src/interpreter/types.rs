//! `TecoOptions`: the scanner/dispatcher feature flags recovered from
//! `original_source/`'s `e1`/`e2` flags struct, plus the small result/limits
//! types that round out the ambient configuration surface the way the
//! teacher's `BashOptions`/`ExecResult`/`ExecutionLimits` do.

/// Feature flags gating scanner/dispatcher behavior. Constructed directly
/// by a caller (CLI or embedder) — no config-file parsing belongs here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TecoOptions {
    /// `f.ei.strict`: reject a second `@`, `:::`, or a modifier on a
    /// command whose option bits don't permit it.
    pub strict_mode: bool,
    /// `f.e1.xoper`: C-like extended operator precedence, consulted only
    /// when `nparens != 0` (only inside parentheses). Default off.
    pub xoper: bool,
    /// `f.e1.bang`: `!!` starts a same-line comment delimited by LF
    /// instead of `!`. Default on.
    pub bang_comment: bool,
    /// `f.e1.text`: `{`-delimited text arguments run to the matching `}`.
    /// Default off.
    pub brace_text: bool,
    /// `f.e2.m_arg`: an `m` argument on a command without the `M` option
    /// bit is `E_IMA` (true) or silently accepted (false). Default true.
    pub m_arg_strict: bool,
    /// `f.e2.n_arg`: as above for `n` / `N`. Default true.
    pub n_arg_strict: bool,
    /// `f.e2.atsign`: an extra `@` is `E_ATS` (true) or ignored. Default true.
    pub atsign_strict: bool,
    /// `f.e2.colon`: an extra `:`/`::` is `E_COL` (true) or ignored. Default true.
    pub colon_strict: bool,
    /// `f.e2.args`: leftover expression-stack values at end of an outer
    /// command string raise `E_ARG`. Default true.
    pub args_strict: bool,
    /// `f.ed.keepdot`: on search failure, leave `dot` where it was instead
    /// of resetting to the buffer start.
    pub keep_dot: bool,
}

impl Default for TecoOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            xoper: false,
            bang_comment: true,
            brace_text: false,
            m_arg_strict: true,
            n_arg_strict: true,
            atsign_strict: true,
            colon_strict: true,
            args_strict: true,
            keep_dot: false,
        }
    }
}

/// Radix for numeric input/output (`^D`, `^O`, `^R`). Three values are
/// valid per `original_source/src/radix_cmd.c`'s `scan_ctrl_r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Octal = 8,
    Decimal = 10,
    Hex = 16,
}

impl Radix {
    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn from_i64(n: i64) -> Option<Radix> {
        match n {
            8 => Some(Radix::Octal),
            10 => Some(Radix::Decimal),
            16 => Some(Radix::Hex),
            _ => None,
        }
    }
}

impl Default for Radix {
    fn default() -> Self {
        Radix::Decimal
    }
}

/// Resource limits, mirroring the teacher's `ExecutionLimits` shape:
/// bounds that keep a pathological script from hanging the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    pub max_macro_depth: usize,
    pub max_loop_iterations: u64,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self { max_macro_depth: 256, max_loop_iterations: 10_000_000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_spec_defaults() {
        let opts = TecoOptions::default();
        assert!(!opts.xoper);
        assert!(opts.bang_comment);
        assert!(!opts.brace_text);
        assert!(opts.args_strict);
    }

    #[test]
    fn radix_rejects_unsupported_values() {
        assert_eq!(Radix::from_i64(2), None);
        assert_eq!(Radix::from_i64(16), Some(Radix::Hex));
    }
}
