//! Expression productions.
//!
//! Precedence, low to high: assignment, equality, comparison, term,
//! factor, unary, call, primary. Assignment is right-associative; the
//! binary levels are left-associative loops.

use tribc_lex::{KeywordRole, TokenKind};

use crate::ast::{Expr, LiteralKind};
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// `assignment := equality ('=' assignment)?`
    ///
    /// The `=` token is consumed before the target is inspected, so an
    /// invalid target reports a diagnostic but does not unwind: the left
    /// expression is returned unchanged and parsing continues. This
    /// lookahead order keeps equality chains containing `=` from
    /// re-matching spuriously.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.equality()?;

        if self.matches(TokenKind::Eq) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable { name } => Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                }),
                other => {
                    self.report(&equals, "Invalid assignment target.");
                    Ok(other)
                }
            };
        }

        Ok(expr)
    }

    /// `equality := comparison (('==' | '!=') comparison)*`
    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while self.match_any(&[TokenKind::EqEq, TokenKind::NotEq]) {
            let op = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// `comparison := term (('<' | '<=' | '>' | '>=') term)*`
    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while self.match_any(&[
            TokenKind::Less,
            TokenKind::LessEq,
            TokenKind::Greater,
            TokenKind::GreaterEq,
        ]) {
            let op = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// `term := factor (('+' | '-') factor)*`
    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while self.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// `factor := unary (('*' | '/' | '%') unary)*`
    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while self.match_any(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent]) {
            let op = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// `unary := ('-' | '!' | NOT) unary | call`
    ///
    /// The `not` keyword matches in any language; `!` is equivalent.
    fn unary(&mut self) -> ParseResult<Expr> {
        if self.matches(TokenKind::Minus) || self.match_not() {
            let op = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary {
                op,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn match_not(&mut self) -> bool {
        if self.peek().kind.is_not() {
            self.advance();
            true
        } else {
            false
        }
    }

    /// `call := primary ('(' arguments? ')')*`
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        while self.matches(TokenKind::LParen) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut args = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RParen, "Expected ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            args,
        })
    }

    /// `primary := TRUE | FALSE | INT | FLOAT | STRING | '(' expression ')' | IDENT`
    ///
    /// Boolean literals in any language collapse to canonical
    /// `true`/`false` text.
    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_role(KeywordRole::True) {
            return Ok(Expr::Literal {
                value: "true".to_string(),
                kind: LiteralKind::Bool,
            });
        }

        if self.match_role(KeywordRole::False) {
            return Ok(Expr::Literal {
                value: "false".to_string(),
                kind: LiteralKind::Bool,
            });
        }

        if self.matches(TokenKind::IntLiteral) {
            return Ok(Expr::Literal {
                value: self.previous().lexeme.clone(),
                kind: LiteralKind::Int,
            });
        }

        if self.matches(TokenKind::FloatLiteral) {
            return Ok(Expr::Literal {
                value: self.previous().lexeme.clone(),
                kind: LiteralKind::Float,
            });
        }

        if self.matches(TokenKind::StringLiteral) {
            return Ok(Expr::Literal {
                value: self.previous().lexeme.clone(),
                kind: LiteralKind::Str,
            });
        }

        if self.matches(TokenKind::LParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RParen, "Expected ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        if self.matches(TokenKind::Ident) {
            return Ok(Expr::Variable {
                name: self.previous().clone(),
            });
        }

        Err(self.error_at_peek("Expected expression."))
    }
}
