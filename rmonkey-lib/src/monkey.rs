//! This module acts as a top-level entrypoint to evaluating Monkey code.

use crate::{
    environment::Environment, interpreter::Interpreter, lexer::Lexer, parser::Parser,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{
    cell::RefCell,
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};
use thiserror::Error;
use tracing::{debug, instrument};

/// The prompt shown before every REPL line.
const PROMPT: &str = ">> ";

/// The ornamental banner shown above parse errors.
const MONKEY_FACE: &str = r#"
            __,__
    .--.  .-"   "-.  .--.
   / .. \/ .-. .-. \/ .. \
  | |  '| /  Y  \ |'   | |
  | \   \ \ 0 | 0 / /  / |
   \ '- ,\.-"""""""-./,-' /
    ''-' /_  ^  ^  _\ '-''
        |  \._ _./  |
        \   \ '~' /  /
         '._ '-=-' _.'
            '-----'
"#;

/// The Monkey interpreter.
pub struct MonkeyInterpreter {
    /// The global environment, shared by everything this interpreter runs.
    ///
    /// In the REPL this is what makes a binding from one line visible on
    /// the next.
    environment: Rc<RefCell<Environment>>,
}

/// An error that can be returned from [`MonkeyInterpreter::run_file`].
#[derive(Debug, Error)]
pub enum RunFileError {
    /// The given path does not name a Monkey source file.
    #[error("invalid file extension (expected `.mky`): `{0}`")]
    InvalidExtension(PathBuf),

    /// A standard I/O error.
    #[error("I/O error: `{0:?}`")]
    Io(#[from] io::Error),
}

/// An error that can be returned from [`MonkeyInterpreter::run_prompt`].
#[derive(Debug, Error)]
pub enum PromptError {
    /// An error from `rustyline`.
    #[error("rustyline error: `{0:?}`")]
    Readline(#[from] ReadlineError),

    /// A standard I/O error.
    #[error("I/O error: `{0:?}`")]
    Io(#[from] io::Error),
}

impl Default for MonkeyInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl MonkeyInterpreter {
    /// Create a new interpreter with an empty global environment.
    pub fn new() -> Self {
        Self {
            environment: Rc::new(RefCell::new(Environment::default())),
        }
    }

    /// Read the file and run its contents as one program.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<(), RunFileError> {
        let path = path.as_ref();
        if path.extension() != Some(OsStr::new("mky")) {
            return Err(RunFileError::InvalidExtension(path.to_path_buf()));
        }

        self.run_code(&fs::read_to_string(path)?);
        Ok(())
    }

    /// Read code from an interactive prompt and run it, one line at a time.
    ///
    /// Typing `exit` or closing the input ends the session.
    pub fn run_prompt(&mut self) -> Result<(), PromptError> {
        let mut prompt = DefaultEditor::new()?;

        loop {
            match prompt.readline(PROMPT) {
                Ok(line) => {
                    prompt.add_history_entry(&line)?;
                    if line == "exit" {
                        return Ok(());
                    }
                    self.run_code(&line);
                }
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
                Err(ReadlineError::Io(e)) => return Err(e)?,
                Err(error) => panic!("Unknown error: `{error:?}`"),
            }
        }
    }

    /// Run the given Monkey code and print its result.
    ///
    /// If there were parse errors the program is not evaluated; the errors
    /// are reported instead. A runtime error is a language-level result,
    /// printed in its textual form like any other value.
    #[instrument(skip_all)]
    fn run_code(&mut self, code: &str) {
        debug!(?code);

        let mut parser = Parser::new(Lexer::new(code));
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            print_parse_errors(parser.errors());
            return;
        }

        debug!(ast = %program);

        match Interpreter::interpret(&program, &self.environment) {
            Ok(value) => println!("{value}"),
            Err(error) => println!("{error}"),
        }
    }
}

/// Print the parse-error banner and each error indented below it.
fn print_parse_errors(errors: &[String]) {
    use crossterm::{
        execute,
        style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    };
    use std::io::stderr;

    execute!(
        stderr(),
        Print(MONKEY_FACE),
        SetForegroundColor(Color::Red),
        SetAttribute(Attribute::Bold),
        Print("whoops! we ran into some monkey business!\n"),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print("parse errors:\n"),
    )
    .unwrap();

    for error in errors {
        execute!(stderr(), Print(format!("\t{error}\n"))).unwrap();
    }
}
