//! Structural AST rendering for `--ast` and the shell's `ast` command.
//!
//! Statements print one per line in a parenthesized form; nested blocks
//! and branches indent by two spaces.

use crate::ast::{Expr, LiteralKind, Stmt};

/// Renders a whole program, one top-level statement per line.
pub fn print_program(statements: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in statements {
        print_stmt(stmt, 0, &mut out);
    }
    out
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn print_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    indent(depth, out);
    match stmt {
        Stmt::Expression(expr) => {
            out.push_str("(expr ");
            print_expr(expr, out);
            out.push_str(")\n");
        }
        Stmt::Var { name, initializer } => {
            out.push_str("(var ");
            out.push_str(&name.lexeme);
            if let Some(init) = initializer {
                out.push(' ');
                print_expr(init, out);
            }
            out.push_str(")\n");
        }
        Stmt::Block(statements) => {
            out.push_str("(block\n");
            for inner in statements {
                print_stmt(inner, depth + 1, out);
            }
            indent(depth, out);
            out.push_str(")\n");
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            out.push_str("(if ");
            print_expr(condition, out);
            out.push('\n');
            print_stmt(then_branch, depth + 1, out);
            if let Some(else_branch) = else_branch {
                indent(depth, out);
                out.push_str(" else\n");
                print_stmt(else_branch, depth + 1, out);
            }
            indent(depth, out);
            out.push_str(")\n");
        }
        Stmt::While { condition, body } => {
            out.push_str("(while ");
            print_expr(condition, out);
            out.push('\n');
            print_stmt(body, depth + 1, out);
            indent(depth, out);
            out.push_str(")\n");
        }
        Stmt::Function { name, params, body } => {
            out.push_str("(function ");
            out.push_str(&name.lexeme);
            out.push_str(" (");
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&param.lexeme);
            }
            out.push_str(")\n");
            for inner in body {
                print_stmt(inner, depth + 1, out);
            }
            indent(depth, out);
            out.push_str(")\n");
        }
        Stmt::Return { value, .. } => {
            out.push_str("(return");
            if let Some(value) = value {
                out.push(' ');
                print_expr(value, out);
            }
            out.push_str(")\n");
        }
    }
}

fn print_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Binary { left, op, right } => {
            out.push('(');
            out.push_str(&op.lexeme);
            out.push(' ');
            print_expr(left, out);
            out.push(' ');
            print_expr(right, out);
            out.push(')');
        }
        Expr::Unary { op, right } => {
            out.push('(');
            out.push_str(&op.lexeme);
            out.push(' ');
            print_expr(right, out);
            out.push(')');
        }
        Expr::Grouping(inner) => {
            out.push_str("(group ");
            print_expr(inner, out);
            out.push(')');
        }
        Expr::Literal { value, kind } => match kind {
            LiteralKind::Str => {
                out.push('"');
                out.push_str(value);
                out.push('"');
            }
            _ => out.push_str(value),
        },
        Expr::Variable { name } => out.push_str(&name.lexeme),
        Expr::Assign { name, value } => {
            out.push_str("(= ");
            out.push_str(&name.lexeme);
            out.push(' ');
            print_expr(value, out);
            out.push(')');
        }
        Expr::Call { callee, args, .. } => {
            out.push_str("(call ");
            print_expr(callee, out);
            for arg in args {
                out.push(' ');
                print_expr(arg, out);
            }
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use tribc_lex::Lexer;
    use tribc_util::Handler;

    fn render(source: &str) -> String {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).scan_tokens();
        let statements = Parser::new(tokens, &mut handler).parse();
        assert!(!handler.has_errors(), "{source} should parse cleanly");
        print_program(&statements)
    }

    #[test]
    fn test_var_and_expression() {
        let out = render("var x = 1 + 2 * 3;");
        assert_eq!(out, "(var x (+ 1 (* 2 3)))\n");
    }

    #[test]
    fn test_string_literal_is_quoted() {
        let out = render("var s = \"hi\";");
        assert_eq!(out, "(var s \"hi\")\n");
    }

    #[test]
    fn test_function_rendering() {
        let out = render("function add(a, b) { return a + b; }");
        assert_eq!(out, "(function add (a b)\n  (return (+ a b))\n)\n");
    }

    #[test]
    fn test_assignment_and_call() {
        let out = render("x = f(1, y);");
        assert_eq!(out, "(expr (= x (call f 1 y)))\n");
    }

    #[test]
    fn test_if_without_else() {
        let out = render("if (x < 1) y = 2;");
        assert!(out.starts_with("(if (< x 1)\n"));
        assert!(out.contains("(expr (= y 2))"));
    }

    #[test]
    fn test_desugared_for_renders_as_while() {
        let out = render("for (;;) x = 1;");
        assert!(out.starts_with("(while true\n"));
        assert!(!out.contains("for"));
    }
}
