//! Trivial in-memory implementations of the collaborator traits, analogous
//! to the teacher's `fs::InMemoryFs`. Used by the CLI's default
//! configuration and by the end-to-end scenario tests.

use std::collections::HashMap;

use super::{EditBuffer, FileIo, FoundRange, MemoryFile, SearchEngine, Terminal};

/// A plain `Vec<u8>` edit buffer with a cursor, good enough to exercise
/// `.`/`B`/`Z`-relative commands without a real gap buffer.
#[derive(Debug, Default)]
pub struct InMemoryBuffer {
    text: Vec<u8>,
    dot: i64,
}

impl InMemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        let dot = text.len() as i64;
        Self { text, dot }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }
}

impl EditBuffer for InMemoryBuffer {
    fn dot(&self) -> i64 {
        self.dot
    }

    fn z(&self) -> i64 {
        self.text.len() as i64
    }

    fn set_dot(&mut self, pos: i64) {
        self.dot = pos.clamp(0, self.text.len() as i64);
    }

    fn char_at(&self, pos: i64) -> Option<u8> {
        if pos < 0 {
            return None;
        }
        self.text.get(pos as usize).copied()
    }

    fn insert(&mut self, pos: i64, bytes: &[u8]) {
        let at = pos.clamp(0, self.text.len() as i64) as usize;
        self.text.splice(at..at, bytes.iter().copied());
        if self.dot >= at as i64 {
            self.dot += bytes.len() as i64;
        }
    }

    fn delete(&mut self, range: std::ops::Range<i64>) {
        let start = range.start.clamp(0, self.text.len() as i64) as usize;
        let end = range.end.clamp(0, self.text.len() as i64) as usize;
        if start >= end {
            return;
        }
        self.text.drain(start..end);
        if self.dot > start as i64 {
            self.dot = start as i64;
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Naive literal substring search (no regex), sufficient for the search
/// commands' narrow contract.
#[derive(Debug, Default)]
pub struct LiteralSearchEngine;

impl SearchEngine for LiteralSearchEngine {
    fn search_forward(&mut self, haystack: &[u8], text: &[u8], start: i64, end: i64) -> Option<FoundRange> {
        if text.is_empty() || start < 0 || end < start {
            return None;
        }
        let lo = start as usize;
        let hi = (end as usize).min(haystack.len());
        if lo > hi {
            return None;
        }
        let window = &haystack[lo..hi];
        window
            .windows(text.len())
            .position(|w| w == text)
            .map(|i| (lo + i) as i64..(lo + i + text.len()) as i64)
    }

    fn search_backward(&mut self, haystack: &[u8], text: &[u8], start: i64, end: i64) -> Option<FoundRange> {
        if text.is_empty() || end < 0 {
            return None;
        }
        let lo = start.max(0) as usize;
        let hi = (end as usize + 1).min(haystack.len());
        if lo > hi || hi < lo {
            return None;
        }
        let window = &haystack[lo..hi];
        window
            .windows(text.len())
            .rposition(|w| w == text)
            .map(|i| (lo + i) as i64..(lo + i + text.len()) as i64)
    }
}

/// In-memory file store keyed by name; `open_input`/`open_output` select
/// the active stream.
#[derive(Debug, Default)]
pub struct InMemoryFileIo {
    pub files: HashMap<String, Vec<u8>>,
    input: Option<(Vec<u8>, usize)>,
    output: Option<String>,
}

impl FileIo for InMemoryFileIo {
    fn open_input(&mut self, name: &str) -> std::io::Result<()> {
        let data = self
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, name))?;
        self.input = Some((data, 0));
        Ok(())
    }

    fn open_output(&mut self, name: &str) -> std::io::Result<()> {
        self.files.entry(name.to_string()).or_default();
        self.output = Some(name.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let (data, pos) = match &mut self.input {
            Some(s) => s,
            None => return Ok(None),
        };
        if *pos >= data.len() {
            return Ok(None);
        }
        let start = *pos;
        let nl = data[start..].iter().position(|&b| b == b'\n').map(|i| start + i + 1).unwrap_or(data.len());
        let line = data[start..nl].to_vec();
        *pos = nl;
        Ok(Some(line))
    }

    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match &self.output {
            Some(name) => {
                self.files.entry(name.clone()).or_default().extend_from_slice(bytes);
                Ok(())
            }
            None => Err(std::io::Error::new(std::io::ErrorKind::NotConnected, "no output file open")),
        }
    }

    fn close(&mut self) {
        self.input = None;
        self.output = None;
    }
}

/// Captures everything printed, for assertions in tests.
#[derive(Debug, Default)]
pub struct CapturingTerminal {
    pub output: Vec<u8>,
    pub ctrl_c: bool,
}

impl Terminal for CapturingTerminal {
    fn print(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    fn ctrl_c_pending(&mut self) -> bool {
        std::mem::take(&mut self.ctrl_c)
    }

    fn window_size(&self) -> (u16, u16) {
        (80, 24)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMemoryFile {
    pub name: Option<String>,
}

impl MemoryFile for InMemoryMemoryFile {
    fn last_filename(&self) -> Option<String> {
        self.name.clone()
    }

    fn set_last_filename(&mut self, name: String) {
        self.name = Some(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_moves_dot_forward() {
        let mut buf = InMemoryBuffer::with_text("hello");
        buf.set_dot(0);
        buf.insert(0, b"XY");
        assert_eq!(buf.as_bytes(), b"XYhello");
        assert_eq!(buf.dot(), 2);
    }

    #[test]
    fn delete_clamps_dot_to_start_of_range() {
        let mut buf = InMemoryBuffer::with_text("hello world");
        buf.set_dot(11);
        buf.delete(5..11);
        assert_eq!(buf.as_bytes(), b"hello");
        assert_eq!(buf.dot(), 5);
    }

    #[test]
    fn file_io_round_trips_through_store() {
        let mut fio = InMemoryFileIo::default();
        fio.open_output("a.txt").unwrap();
        fio.write(b"hi\n").unwrap();
        fio.close();
        fio.open_input("a.txt").unwrap();
        assert_eq!(fio.read_line().unwrap(), Some(b"hi\n".to_vec()));
        assert_eq!(fio.read_line().unwrap(), None);
    }

    #[test]
    fn literal_search_finds_forward_match() {
        let mut engine = LiteralSearchEngine;
        let found = engine.search_forward(b"hello world", b"world", 0, 11);
        assert_eq!(found, Some(6..11));
    }

    #[test]
    fn literal_search_backward_finds_last_match() {
        let mut engine = LiteralSearchEngine;
        let found = engine.search_backward(b"abcabc", b"abc", 0, 5);
        assert_eq!(found, Some(3..6));
    }

    #[test]
    fn terminal_captures_output_and_consumes_ctrl_c_once() {
        let mut term = CapturingTerminal::default();
        term.print(b"hello");
        assert_eq!(term.output, b"hello");
        term.ctrl_c = true;
        assert!(term.ctrl_c_pending());
        assert!(!term.ctrl_c_pending());
    }
}
