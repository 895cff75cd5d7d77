//! Parser module: the character source, the command table, and the
//! scanner that ties them together into one command at a time.

pub mod cbuf;
pub mod cmd_table;
pub mod scanner;

pub use cbuf::CBuf;
pub use cmd_table::{CmdEntry, CmdTable, ExecFn, OptionBits, ScanFn, CMD_TABLE};
pub use scanner::{next_command, scan_one, skip_loop_body, skip_to, with_dryrun, ScanOutcome};
