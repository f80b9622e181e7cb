//! Declaration and statement productions, including the counted-loop
//! desugaring.

use tribc_lex::{KeywordRole, TokenKind};

use crate::ast::{Expr, LiteralKind, Stmt};
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// `declaration := varDecl | funDecl | statement`
    pub(crate) fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.match_role(KeywordRole::Var) {
            return self.var_declaration();
        }

        if self.match_role(KeywordRole::Function) {
            return self.function_declaration();
        }

        self.statement()
    }

    /// `varDecl := VAR IDENT ('=' expression)? ';'`
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Ident, "Expected variable name.")?;

        let initializer = if self.matches(TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration.",
        )?;
        Ok(Stmt::Var { name, initializer })
    }

    /// `funDecl := FUNCTION IDENT '(' params? ')' block`
    ///
    /// Parameter names must be pairwise distinct; a repeated name is a
    /// parse error at the repeated token.
    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Ident, "Expected function name.")?;

        self.consume(TokenKind::LParen, "Expected '(' after function name.")?;
        let mut params: Vec<tribc_lex::Token> = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                let param = self.consume(TokenKind::Ident, "Expected parameter name.")?;
                if params.iter().any(|p| p.lexeme == param.lexeme) {
                    return Err(self.report(&param, "Duplicate parameter name."));
                }
                params.push(param);

                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "Expected ')' after parameters.")?;

        self.consume(TokenKind::LBrace, "Expected '{' before function body.")?;
        let body = self.block_statements()?;

        Ok(Stmt::Function { name, params, body })
    }

    /// `statement := ifStmt | whileStmt | forStmt | returnStmt | block | exprStmt`
    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_role(KeywordRole::If) {
            return self.if_statement();
        }

        if self.match_role(KeywordRole::While) {
            return self.while_statement();
        }

        if self.match_role(KeywordRole::For) {
            return self.for_statement();
        }

        if self.match_role(KeywordRole::Return) {
            return self.return_statement();
        }

        if self.matches(TokenKind::LBrace) {
            return Ok(Stmt::Block(self.block_statements()?));
        }

        self.expression_statement()
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expected ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    /// Statements of a brace-delimited block; the `{` is already consumed.
    fn block_statements(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        self.consume(TokenKind::RBrace, "Expected '}' after block.")?;
        Ok(statements)
    }

    /// `ifStmt := IF '(' expression ')' statement (ELSE statement)?`
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LParen, "Expected '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RParen, "Expected ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_role(KeywordRole::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `whileStmt := WHILE '(' expression ')' statement`
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LParen, "Expected '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RParen, "Expected ')' after while condition.")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    /// `forStmt := FOR '(' (varDecl | exprStmt | ';') expression? ';' expression? ')' statement`
    ///
    /// Desugared in place to `{ init; while (cond') { { body; incr; } } }`:
    /// the increment wrapper is dropped when there is no increment, the
    /// outer block degenerates to the while when there is no initializer,
    /// and a missing condition becomes a synthesized `true` literal. No
    /// for-node exists in the tree.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LParen, "Expected '(' after 'for'.")?;

        // Initializer
        let initializer = if self.matches(TokenKind::Semicolon) {
            None
        } else if self.match_role(KeywordRole::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        // Condition
        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expected ';' after loop condition.")?;

        // Increment
        let increment = if !self.check(TokenKind::RParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RParen, "Expected ')' after for clauses.")?;

        // Body
        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition = condition.unwrap_or(Expr::Literal {
            value: "true".to_string(),
            kind: LiteralKind::Bool,
        });
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    /// `returnStmt := RETURN expression? ';'`
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expected ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }
}
