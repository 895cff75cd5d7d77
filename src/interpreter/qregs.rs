//! Q-register store: `{integer, text}` cells in two namespaces (global and
//! per-macro local), plus the `[`/`]` scope LIFO.
//!
//! `original_source/include/exec.h` declares `exec_lbracket`/`exec_rbracket`/
//! `exec_G` but the pack carries no bodies for them; the namespace split and
//! save/restore LIFO here are this crate's own design against that declared
//! contract, shaped like the load/store pairing in `src/u_cmd.c::exec_U`.

use std::collections::HashMap;

use crate::interpreter::errors::{ErrorKind, TecoError, TecoResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QReg {
    pub number: i64,
    pub text: Vec<u8>,
}

/// `G`-only special names: `*` (last filespec), `_` (last search string),
/// `+` (build info). Only valid as the argument to a `G` command.
pub fn is_g_special(name: char) -> bool {
    matches!(name, '*' | '_' | '+')
}

pub fn is_valid_qname(name: char) -> bool {
    name.is_ascii_alphanumeric()
}

#[derive(Debug)]
pub struct QRegs {
    global: HashMap<char, QReg>,
    /// Stack of local namespaces; the top is the currently active scope's
    /// local registers. Always has at least one frame — a base namespace
    /// seeded in `new()` backs `.`-prefixed access at top level (the
    /// grammar's `qreg := '.'? [A-Za-z0-9]` permits a local name outside
    /// any macro, so there's always somewhere for it to land) — and a
    /// macro's `enter_local_scope`/`exit_local_scope` push/pop above it in
    /// strict pairs, so the base frame is never popped.
    locals: Vec<HashMap<char, QReg>>,
    /// `[`/`]` snapshot LIFO, keyed by the name pushed.
    scopes: Vec<(char, bool, QReg)>,
}

impl QRegs {
    pub fn new() -> Self {
        Self { global: HashMap::new(), locals: vec![HashMap::new()], scopes: Vec::new() }
    }

    pub fn enter_local_scope(&mut self) {
        self.locals.push(HashMap::new());
    }

    pub fn exit_local_scope(&mut self) {
        self.locals.pop();
    }

    fn table(&self, local: bool) -> Option<&HashMap<char, QReg>> {
        if local {
            self.locals.last()
        } else {
            Some(&self.global)
        }
    }

    fn table_mut(&mut self, local: bool) -> &mut HashMap<char, QReg> {
        if local {
            if self.locals.is_empty() {
                // Can only happen on an `exit_local_scope` outnumbering its
                // `enter_local_scope`, not on any sequence of valid commands;
                // self-heal rather than carry a panic into user-reachable code.
                self.locals.push(HashMap::new());
            }
            self.locals.last_mut().expect("just ensured locals is non-empty")
        } else {
            &mut self.global
        }
    }

    fn validate(name: char, pos: usize) -> TecoResult<()> {
        if is_valid_qname(name) {
            Ok(())
        } else {
            Err(TecoError::with_arg(ErrorKind::Iqn, pos, name.to_string()))
        }
    }

    pub fn get_num(&self, name: char, local: bool, pos: usize) -> TecoResult<i64> {
        Self::validate(name, pos)?;
        Ok(self.table(local).and_then(|t| t.get(&name)).map(|q| q.number).unwrap_or(0))
    }

    pub fn set_num(&mut self, name: char, local: bool, value: i64, pos: usize) -> TecoResult<()> {
        Self::validate(name, pos)?;
        self.table_mut(local).entry(name).or_default().number = value;
        Ok(())
    }

    pub fn get_text(&self, name: char, local: bool, pos: usize) -> TecoResult<Vec<u8>> {
        Self::validate(name, pos)?;
        Ok(self.table(local).and_then(|t| t.get(&name)).map(|q| q.text.clone()).unwrap_or_default())
    }

    pub fn set_text(&mut self, name: char, local: bool, text: Vec<u8>, pos: usize) -> TecoResult<()> {
        Self::validate(name, pos)?;
        self.table_mut(local).entry(name).or_default().text = text;
        Ok(())
    }

    pub fn increment(&mut self, name: char, local: bool, delta: i64, pos: usize) -> TecoResult<i64> {
        Self::validate(name, pos)?;
        let entry = self.table_mut(local).entry(name).or_default();
        entry.number = entry.number.wrapping_add(delta);
        Ok(entry.number)
    }

    pub fn push_scope(&mut self, name: char, local: bool, pos: usize) -> TecoResult<()> {
        Self::validate(name, pos)?;
        let snapshot = self.table(local).and_then(|t| t.get(&name)).cloned().unwrap_or_default();
        self.scopes.push((name, local, snapshot));
        Ok(())
    }

    pub fn pop_scope(&mut self, name: char, local: bool, pos: usize) -> TecoResult<()> {
        Self::validate(name, pos)?;
        match self.scopes.pop() {
            Some((saved_name, saved_local, saved)) => {
                self.table_mut(saved_local).insert(saved_name, saved);
                let _ = (name, local);
                Ok(())
            }
            None => Err(TecoError::new(ErrorKind::Arg, pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut q = QRegs::new();
        q.set_num('A', false, 42, 0).unwrap();
        assert_eq!(q.get_num('A', false, 0).unwrap(), 42);
    }

    #[test]
    fn invalid_name_errors() {
        let q = QRegs::new();
        assert_eq!(q.get_num('$', false, 0).unwrap_err().kind, ErrorKind::Iqn);
    }

    #[test]
    fn unset_register_reads_as_zero() {
        let q = QRegs::new();
        assert_eq!(q.get_num('Z', false, 0).unwrap(), 0);
    }

    #[test]
    fn local_scope_is_isolated_from_global() {
        let mut q = QRegs::new();
        q.set_num('A', false, 1, 0).unwrap();
        q.enter_local_scope();
        q.set_num('A', true, 2, 0).unwrap();
        assert_eq!(q.get_num('A', true, 0).unwrap(), 2);
        assert_eq!(q.get_num('A', false, 0).unwrap(), 1);
        q.exit_local_scope();
    }

    #[test]
    fn push_pop_scope_restores_prior_value() {
        let mut q = QRegs::new();
        q.set_num('A', false, 1, 0).unwrap();
        q.push_scope('A', false, 0).unwrap();
        q.set_num('A', false, 99, 0).unwrap();
        q.pop_scope('A', false, 0).unwrap();
        assert_eq!(q.get_num('A', false, 0).unwrap(), 1);
    }

    #[test]
    fn increment_wraps_and_returns_new_value() {
        let mut q = QRegs::new();
        q.set_num('A', false, 5, 0).unwrap();
        assert_eq!(q.increment('A', false, 1, 0).unwrap(), 6);
    }

    #[test]
    fn local_qregister_write_at_top_level_does_not_panic() {
        // `U.A`/`%.A`/`].A`: the `.`-prefixed grammar is legal outside any
        // macro, so this must land in the base local namespace rather than
        // panicking on an empty `locals` stack.
        let mut q = QRegs::new();
        q.set_num('A', true, 7, 0).unwrap();
        assert_eq!(q.get_num('A', true, 0).unwrap(), 7);
        assert_eq!(q.increment('A', true, 1, 0).unwrap(), 8);
        q.push_scope('A', true, 0).unwrap();
        q.set_num('A', true, 0, 0).unwrap();
        q.pop_scope('A', true, 0).unwrap();
        assert_eq!(q.get_num('A', true, 0).unwrap(), 8);
    }
}
