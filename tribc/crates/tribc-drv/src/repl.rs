//! The interactive shell.
//!
//! Each line compiles with fresh state: its own handler, LLVM context,
//! module, and execution engine. Before executing, the line is echoed
//! with token-class syntax coloring; English keywords print blue, Hindi
//! magenta, Assamese cyan, booleans yellow, numbers green, and strings
//! red.

use std::fs;
use std::process::ExitCode;

use colored::Colorize;
use inkwell::context::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use tribc_gen::CodeGen;
use tribc_lex::{KeywordRole, Lang, Lexer, Token, TokenKind};
use tribc_par::Parser;
use tribc_util::Handler;

/// Runs the shell until `exit`, `quit`, or end of input.
pub fn run() -> ExitCode {
    println!("त्रिभाषा (Tribhasha) Programming Language");
    println!("Version {} - REPL Mode", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit, 'help' for assistance.");

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut history: Vec<String> = Vec::new();

    loop {
        let line = match editor.readline("tribhasha> ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        };

        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&line);

        match line.as_str() {
            "exit" | "quit" => break,
            "help" => print_help(),
            "clear" => print!("\x1B[2J\x1B[1;1H"),
            "history" => {
                for (i, entry) in history.iter().enumerate() {
                    println!("{i}: {entry}");
                }
            }
            _ => {
                if let Some(filename) = line.strip_prefix("load ") {
                    match fs::read_to_string(filename.trim()) {
                        Ok(source) => execute_source(&source),
                        Err(_) => eprintln!("Error: Could not open file {}", filename.trim()),
                    }
                } else if let Some(code) = line.strip_prefix("tokens ") {
                    print_tokens(code);
                } else if let Some(code) = line.strip_prefix("ast ") {
                    print_ast(code);
                } else {
                    println!("{}", highlight(&line));
                    execute_source(&line);
                    history.push(line.clone());
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!("Available commands:");
    println!("  help - Show this help message");
    println!("  exit/quit - Exit the REPL");
    println!("  clear - Clear the screen");
    println!("  history - Show command history");
    println!("  load <filename> - Load and execute a file");
    println!("  tokens <code> - Show tokens for code");
    println!("  ast <code> - Show AST for code");
}

/// Compiles and runs one source fragment with fresh state.
fn execute_source(source: &str) {
    let mut handler = Handler::new();
    let tokens = Lexer::new(source, &mut handler).scan_tokens();
    let statements = Parser::new(tokens, &mut handler).parse();

    let context = Context::create();
    let module = CodeGen::new(&context, &mut handler).generate(&statements);

    if handler.has_errors() {
        return;
    }

    if let Err(e) = tribc_gen::execute(module) {
        eprintln!("Error: {e}");
    }
}

fn print_tokens(source: &str) {
    let mut handler = Handler::new();
    for token in Lexer::new(source, &mut handler).scan_tokens() {
        println!("{token}");
    }
}

fn print_ast(source: &str) {
    let mut handler = Handler::new();
    let tokens = Lexer::new(source, &mut handler).scan_tokens();
    let statements = Parser::new(tokens, &mut handler).parse();
    print!("{}", tribc_par::print_program(&statements));
}

/// Re-renders a source line with token-class coloring.
///
/// Tokens carry lexemes but not byte offsets, so each lexeme is located
/// by searching forward from the previous one; surrounding whitespace
/// passes through uncolored.
fn highlight(source: &str) -> String {
    let mut handler = Handler::new();
    let tokens = Lexer::new(source, &mut handler).scan_tokens();

    let mut result = String::new();
    let mut last_pos = 0;

    for token in &tokens {
        if token.kind == TokenKind::Eof || token.lexeme.is_empty() {
            continue;
        }

        if let Some(found) = source[last_pos..].find(&token.lexeme) {
            let start = last_pos + found;
            result.push_str(&source[last_pos..start]);
            result.push_str(&colorize(token));
            last_pos = start + token.lexeme.len();
        }
    }

    result.push_str(&source[last_pos..]);
    result
}

fn colorize(token: &Token) -> String {
    match token.kind {
        TokenKind::Keyword(KeywordRole::True | KeywordRole::False, _) => {
            token.lexeme.yellow().to_string()
        }
        TokenKind::Keyword(
            KeywordRole::Var
            | KeywordRole::Function
            | KeywordRole::If
            | KeywordRole::Else
            | KeywordRole::While
            | KeywordRole::For
            | KeywordRole::Return,
            lang,
        ) => match lang {
            Lang::En => token.lexeme.blue().to_string(),
            Lang::Hi => token.lexeme.magenta().to_string(),
            Lang::As => token.lexeme.cyan().to_string(),
        },
        TokenKind::IntLiteral | TokenKind::FloatLiteral => token.lexeme.green().to_string(),
        TokenKind::StringLiteral => token.lexeme.red().to_string(),
        TokenKind::Ident => token.lexeme.white().to_string(),
        _ => token.lexeme.clone(),
    }
}
