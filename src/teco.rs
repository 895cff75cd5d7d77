//! The top-level `Teco` environment: ties the interpreter to a set of
//! collaborators the way `bash.rs::Bash` ties `parser::parse` together
//! with an `ExecutionEngine`. Owns nothing the interpreter doesn't already
//! own — it's a thin, convenient entry point for embedders and the CLI.

use crate::collaborators::{EditBuffer, FileIo, MemoryFile, SearchEngine, Terminal};
use crate::interpreter::dispatch::run;
use crate::interpreter::errors::TecoError;
use crate::interpreter::interpreter::Interpreter;
use crate::interpreter::types::TecoOptions;

/// Result of running one command string: the final cursor position, for
/// error reporting even on success (mirrors `spec.md` §7's "every error
/// carries the offset it was raised at").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TecoOutcome {
    pub pos: usize,
}

pub struct Teco {
    interp: Interpreter,
}

impl Teco {
    pub fn new(
        options: TecoOptions,
        edit: Box<dyn EditBuffer>,
        search: Box<dyn SearchEngine>,
        file_io: Box<dyn FileIo>,
        terminal: Box<dyn Terminal>,
        memory: Box<dyn MemoryFile>,
    ) -> Self {
        Self { interp: Interpreter::new(options, edit, search, file_io, terminal, memory) }
    }

    /// Build a `Teco` wired to the in-memory stub collaborators, suitable
    /// for the CLI's default configuration and for embedders that don't
    /// need a real editor/filesystem/terminal behind it.
    pub fn with_stubs(options: TecoOptions) -> Self {
        use crate::collaborators::stubs::{
            CapturingTerminal, InMemoryBuffer, InMemoryFileIo, InMemoryMemoryFile, LiteralSearchEngine,
        };
        Self::new(
            options,
            Box::new(InMemoryBuffer::new()),
            Box::new(LiteralSearchEngine),
            Box::new(InMemoryFileIo::default()),
            Box::new(CapturingTerminal::default()),
            Box::new(InMemoryMemoryFile::default()),
        )
    }

    /// Run one command string to completion.
    pub fn exec(&mut self, command_string: impl Into<Vec<u8>>) -> Result<TecoOutcome, TecoError> {
        self.interp.load(command_string);
        run(&mut self.interp)?;
        Ok(TecoOutcome { pos: self.interp.cbuf.pos() })
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interp
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::stubs::CapturingTerminal;

    #[test]
    fn exec_runs_a_command_string_and_reports_final_position() {
        let mut teco = Teco::with_stubs(TecoOptions::default());
        let outcome = teco.exec("1+2UA QA=\x1B").unwrap();
        assert_eq!(outcome.pos, "1+2UA QA=\x1B".len());
    }

    #[test]
    fn exec_surfaces_errors_with_position() {
        let mut teco = Teco::with_stubs(TecoOptions::default());
        let err = teco.exec("UA").unwrap_err();
        assert_eq!(err.kind, crate::interpreter::errors::ErrorKind::Nau);
    }

    #[test]
    fn scenario_loop_sums_five_increments() {
        let mut teco = Teco::with_stubs(TecoOptions::default());
        teco.exec("0UA 5<1UA %B>").unwrap();
        assert_eq!(teco.interpreter().qregs.get_num('B', false, 0).unwrap(), 5);
    }

    #[test]
    fn scenario_conditional_prints_true_branch() {
        let mut teco = Teco::with_stubs(TecoOptions::default());
        teco.exec("0\"= 7UA | 8UA '\x1B").unwrap();
        assert_eq!(teco.interpreter().qregs.get_num('A', false, 0).unwrap(), 7);
    }

    #[test]
    fn scenario_percent_increments_q_register_in_a_loop() {
        let mut teco = Teco::with_stubs(TecoOptions::default());
        teco.exec("1UA 5<%A>QA=\x1B").unwrap();
        let output = teco
            .interpreter()
            .terminal
            .as_any()
            .downcast_ref::<CapturingTerminal>()
            .unwrap();
        assert_eq!(output.output, b"6\n");
    }
}
