//! tribc-drv - Command-line driver for the Tribhasha compiler.
//!
//! Orchestrates the pipeline: read source, lex, parse, lower, and either
//! dump an intermediate form or hand the module to the JIT. With no file
//! argument the interactive shell starts instead.
//!
//! Exit codes: 0 on success, 1 when any diagnostic was reported or
//! execution failed.

pub mod repl;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser as ClapParser;
use inkwell::context::Context;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tribc_gen::CodeGen;
use tribc_lex::Lexer;
use tribc_par::Parser;
use tribc_util::Handler;

/// त्रिभाषा (Tribhasha) - a trilingual programming language
///
/// Keywords may be written in English, Hindi, or Assamese and mixed
/// freely within one source file. With no file argument the interactive
/// shell starts.
#[derive(ClapParser, Debug)]
#[command(name = "tribhasha")]
#[command(about = "त्रिभाषा (Tribhasha) programming language", long_about = None)]
pub struct Cli {
    /// Source file to compile and execute
    pub file: Option<std::path::PathBuf>,

    /// Print the token stream, one token per line
    #[arg(short = 't', long = "tokens")]
    pub tokens: bool,

    /// Print a structural rendering of the syntax tree
    #[arg(short = 'a', long = "ast")]
    pub ast: bool,

    /// Print version information
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

/// Runs the driver and returns the process exit code.
pub fn run(cli: Cli) -> ExitCode {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let Some(file) = cli.file.as_deref() else {
        if cli.tokens || cli.ast {
            eprintln!("Error: File required for --tokens or --ast options");
            return ExitCode::FAILURE;
        }
        return repl::run();
    };

    let result = if cli.tokens {
        print_tokens(file)
    } else if cli.ast {
        print_ast(file)
    } else {
        execute_file(file)
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_version() {
    println!("त्रिभाषा (Tribhasha) Programming Language");
    println!("Version {}", env!("CARGO_PKG_VERSION"));
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Could not open file {}", path.display()))
}

/// Dumps the token stream: `<KIND> <lexeme> (line N)`, one per line.
fn print_tokens(path: &Path) -> Result<bool> {
    let source = read_source(path)?;

    let mut handler = Handler::new();
    debug!(file = %path.display(), "lexing");
    let tokens = Lexer::new(&source, &mut handler).scan_tokens();

    for token in &tokens {
        println!("{token}");
    }

    Ok(!handler.has_errors())
}

/// Dumps a structural rendering of the parsed program.
fn print_ast(path: &Path) -> Result<bool> {
    let source = read_source(path)?;

    let mut handler = Handler::new();
    debug!(file = %path.display(), "lexing");
    let tokens = Lexer::new(&source, &mut handler).scan_tokens();
    debug!(file = %path.display(), "parsing");
    let statements = Parser::new(tokens, &mut handler).parse();

    print!("{}", tribc_par::print_program(&statements));

    Ok(!handler.has_errors())
}

/// Compiles and executes a source file.
///
/// Any diagnostic from lexing, parsing, or lowering skips execution and
/// fails the run; a JIT or execution failure is surfaced as a single
/// diagnostic.
fn execute_file(path: &Path) -> Result<bool> {
    let source = read_source(path)?;

    let mut handler = Handler::new();
    debug!(file = %path.display(), "lexing");
    let tokens = Lexer::new(&source, &mut handler).scan_tokens();

    debug!(file = %path.display(), "parsing");
    let statements = Parser::new(tokens, &mut handler).parse();

    debug!(file = %path.display(), "lowering");
    let context = Context::create();
    let module = CodeGen::new(&context, &mut handler).generate(&statements);

    if handler.has_errors() {
        return Ok(false);
    }

    debug!(file = %path.display(), "executing");
    match tribc_gen::execute(module) {
        Ok(()) => Ok(true),
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(false)
        }
    }
}
