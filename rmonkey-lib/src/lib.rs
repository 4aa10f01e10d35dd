//! This crate contains a tree-walking interpreter for Monkey, a small
//! C-like, dynamically-typed scripting language with first-class functions
//! and closures.
//!
//! Source text flows through [`lexer::Lexer`] into [`parser::Parser`],
//! which builds the [`ast`]; [`interpreter::Interpreter`] then walks the
//! tree against an [`environment::Environment`] chain and produces an
//! [`object::Object`] or a runtime error.

pub mod ast;
pub mod builtins;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod monkey;
pub mod object;
pub mod parser;
pub mod tokens;

use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};

pub use self::interpreter::Interpreter;

/// The command-line arguments of the interpreter.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of a `.mky` script to run; starts the REPL when omitted.
    script: Option<PathBuf>,
}

/// Run the interpreter, taking a source file as the only CLI argument, or
/// running the REPL if no file was given.
pub fn run_interpreter() -> Result<()> {
    color_eyre::install()?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(
            Layer::new().with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            ),
        ),
    )?;

    let args = <Args as clap::Parser>::parse();

    let mut interpreter = monkey::MonkeyInterpreter::new();

    match args.script {
        Some(path) => interpreter.run_file(path)?,
        None => interpreter.run_prompt()?,
    }

    Ok(())
}
