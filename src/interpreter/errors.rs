//! Error taxonomy for the command interpreter.
//!
//! Every error raised anywhere in the scanner, dispatcher, or control-flow
//! overlay funnels through a single [`TecoError`], the same way the
//! original source calls one `throw()` site from both `cmd_scan.c` and
//! `cmd_exec.c`. There is no separate "parse error" type: the scanner and
//! the dispatcher share state too tightly for that split to mean anything.

use std::fmt;
use thiserror::Error;

/// A single error kind, named after its three-letter TECO mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Ill,
    Iec,
    Ifc,
    Iuc,
    Iqn,
    Ats,
    Col,
    Mod,
    Arg,
    Ima,
    Ina,
    Non,
    Nca,
    Nau,
    Nap,
    Mlp,
    Mrp,
    Utc,
    Utm,
    Srh,
    Tag,
    Dup,
    Not,
    Noa,
    Boa,
    Div,
    Ira,
    Chr,
    Iln,
    Xab,
    Mem,
    Sys,
    Err,
    T10,
    Nyi,
    Isa,
}

impl ErrorKind {
    /// The three-letter mnemonic printed as `?XXX`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            ErrorKind::Ill => "ILL",
            ErrorKind::Iec => "IEC",
            ErrorKind::Ifc => "IFC",
            ErrorKind::Iuc => "IUC",
            ErrorKind::Iqn => "IQN",
            ErrorKind::Ats => "ATS",
            ErrorKind::Col => "COL",
            ErrorKind::Mod => "MOD",
            ErrorKind::Arg => "ARG",
            ErrorKind::Ima => "IMA",
            ErrorKind::Ina => "INA",
            ErrorKind::Non => "NON",
            ErrorKind::Nca => "NCA",
            ErrorKind::Nau => "NAU",
            ErrorKind::Nap => "NAP",
            ErrorKind::Mlp => "MLP",
            ErrorKind::Mrp => "MRP",
            ErrorKind::Utc => "UTC",
            ErrorKind::Utm => "UTM",
            ErrorKind::Srh => "SRH",
            ErrorKind::Tag => "TAG",
            ErrorKind::Dup => "DUP",
            ErrorKind::Not => "NOT",
            ErrorKind::Noa => "NOA",
            ErrorKind::Boa => "BOA",
            ErrorKind::Div => "DIV",
            ErrorKind::Ira => "IRA",
            ErrorKind::Chr => "CHR",
            ErrorKind::Iln => "ILN",
            ErrorKind::Xab => "XAB",
            ErrorKind::Mem => "MEM",
            ErrorKind::Sys => "SYS",
            ErrorKind::Err => "ERR",
            ErrorKind::T10 => "T10",
            ErrorKind::Nyi => "NYI",
            ErrorKind::Isa => "ISA",
        }
    }

    /// Long-form help text, paired with the mnemonic the way TECO-64's
    /// error tables pair a code with a message.
    pub fn help(self) -> &'static str {
        match self {
            ErrorKind::Ill => "Invalid command",
            ErrorKind::Iec => "Invalid E character",
            ErrorKind::Ifc => "Invalid F character",
            ErrorKind::Iuc => "Invalid character following ^",
            ErrorKind::Iqn => "Invalid Q-register name",
            ErrorKind::Ats => "Invalid or extraneous @ modifier",
            ErrorKind::Col => "Invalid or extraneous : modifier",
            ErrorKind::Mod => "Invalid combination of modifiers",
            ErrorKind::Arg => "Improper arguments",
            ErrorKind::Ima => "Invalid m argument",
            ErrorKind::Ina => "Invalid n argument",
            ErrorKind::Non => "No n argument after m argument",
            ErrorKind::Nca => "Invalid negative argument",
            ErrorKind::Nau => "No argument before U",
            ErrorKind::Nap => "No argument before P",
            ErrorKind::Mlp => "Missing left parenthesis",
            ErrorKind::Mrp => "Missing right parenthesis",
            ErrorKind::Utc => "Unterminated command",
            ErrorKind::Utm => "Unterminated macro",
            ErrorKind::Srh => "Search failure",
            ErrorKind::Tag => "Missing tag",
            ErrorKind::Dup => "Duplicate tag",
            ErrorKind::Not => "No tag found in O command",
            ErrorKind::Noa => "No argument before O",
            ErrorKind::Boa => "Bad argument to O",
            ErrorKind::Div => "Division by zero",
            ErrorKind::Ira => "Invalid radix argument",
            ErrorKind::Chr => "Invalid character for radix",
            ErrorKind::Iln => "Invalid number",
            ErrorKind::Xab => "Execution aborted",
            ErrorKind::Mem => "Memory overflow",
            ErrorKind::Sys => "System error",
            ErrorKind::Err => "Unspecified error",
            ErrorKind::T10 => "Not implemented",
            ErrorKind::Nyi => "Not yet implemented",
            ErrorKind::Isa => "Invalid search argument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// The single error type raised anywhere in the core: scanner, dispatcher,
/// control-flow overlay, or macro driver.
///
/// `pos` is the `CBuf` offset at which the error was raised, carried so a
/// caller can render a caret under the offending character the way
/// `prints_err` is always called with the command-string position implicit
/// in `cbuf->pos`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct TecoError {
    pub kind: ErrorKind,
    pub arg: Option<String>,
    pub pos: usize,
}

impl fmt::Display for TecoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{} {}", self.kind.mnemonic(), self.kind.help())?;
        if let Some(arg) = &self.arg {
            write!(f, " ({arg})")?;
        }
        write!(f, " at position {}", self.pos)
    }
}

impl TecoError {
    pub fn new(kind: ErrorKind, pos: usize) -> Self {
        Self { kind, arg: None, pos }
    }

    pub fn with_arg(kind: ErrorKind, pos: usize, arg: impl Into<String>) -> Self {
        Self { kind, arg: Some(arg.into()), pos }
    }
}

pub type TecoResult<T> = Result<T, TecoError>;
