//! Per-command parse record. Stands in for the tree-shaped AST a more
//! conventional language front end would have: TECO has no tree, just one
//! `CmdBlock` assembled per command and reset between commands.

pub mod types;

pub use types::*;
