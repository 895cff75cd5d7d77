//! teco-core - a character-stream command interpreter core in the style
//! of TECO: expression stack, Q-registers, command dispatch, and the
//! conditional/loop/macro control-flow overlay. The edit buffer, search
//! engine, file I/O, terminal, and memory-file are mediated entirely
//! through the `collaborators` traits; this crate performs none of that
//! work itself.

pub mod cmd;
pub mod collaborators;
pub mod commands;
pub mod interpreter;
pub mod parser;
pub mod teco;

pub use cmd::{CmdBlock, TextArg};
pub use collaborators::{EditBuffer, FileIo, MemoryFile, SearchEngine, Terminal};
pub use interpreter::errors::{ErrorKind, TecoError, TecoResult};
pub use interpreter::interpreter::Interpreter;
pub use interpreter::types::{Radix, TecoOptions};
pub use teco::{Teco, TecoOutcome};
