//! Narrow traits standing in for the host environment: the edit buffer,
//! search, file I/O, terminal/display, and the memory-file. The core only
//! ever calls through these interfaces; it never touches a filesystem, a
//! terminal, or a real text buffer.
//!
//! Grounded in the teacher's `interpreter/interpreter.rs::FileSystem` /
//! `CommandExecutor` pattern: small, `Send + Sync`, returning owned data
//! rather than borrowing across the trait boundary.

pub mod stubs;

use std::ops::Range;

/// The gap-buffer text being edited. The core only needs to read and move
/// `dot`, read characters, and request inserts/deletes — it never owns the
/// buffer itself.
pub trait EditBuffer: Send + Sync {
    fn dot(&self) -> i64;
    fn z(&self) -> i64;
    fn set_dot(&mut self, pos: i64);
    fn char_at(&self, pos: i64) -> Option<u8>;
    fn insert(&mut self, pos: i64, bytes: &[u8]);
    fn delete(&mut self, range: Range<i64>);
    /// Downcast escape hatch so tests can inspect a concrete stub's text
    /// through the trait object.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// A half-open range in the edit buffer, as returned by a search.
pub type FoundRange = Range<i64>;

/// Regex-or-literal search, matching the narrow needs read out of
/// `n_cmd.c` / `fb_cmd.c`: a search only ever needs a found/not-found
/// range and the length of the last match (for in-place replacement).
/// `haystack` is the edit buffer's current text, supplied by the caller
/// since the search engine itself owns no buffer.
pub trait SearchEngine: Send + Sync {
    fn search_forward(&mut self, haystack: &[u8], text: &[u8], start: i64, end: i64) -> Option<FoundRange>;
    fn search_backward(&mut self, haystack: &[u8], text: &[u8], start: i64, end: i64) -> Option<FoundRange>;
}

/// File open/read/write, enough to wire `ER`/`EW`/`EB`/`EI` without this
/// crate performing any real file I/O.
pub trait FileIo: Send + Sync {
    fn open_input(&mut self, name: &str) -> std::io::Result<()>;
    fn open_output(&mut self, name: &str) -> std::io::Result<()>;
    fn read_line(&mut self) -> std::io::Result<Option<Vec<u8>>>;
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()>;
    fn close(&mut self);
}

/// Output and the asynchronous inputs (SIGINT, SIGWINCH) polled at least
/// once per dispatcher iteration.
pub trait Terminal: Send + Sync {
    fn print(&mut self, bytes: &[u8]);
    fn ctrl_c_pending(&mut self) -> bool;
    fn window_size(&self) -> (u16, u16);
    /// Downcast escape hatch so tests can inspect a concrete stub's
    /// captured output through the trait object.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// The filename remembered across commands, backing Q-register `G*`.
pub trait MemoryFile: Send + Sync {
    fn last_filename(&self) -> Option<String>;
    fn set_last_filename(&mut self, name: String);
}
