//! AST lowering to LLVM IR.
//!
//! The front-end is dynamically typed in surface syntax; lowering uses a
//! uniform `f64` scalar for every non-string value. Integer and boolean
//! literals widen to `f64`, comparisons produce `i1` results that widen
//! straight back, and branch conditions test non-equality against `0.0`.
//! String literals become pointers to private global byte arrays.
//!
//! Lowering errors are reported through the diagnostic handler; the
//! offending expression yields `None`, callers propagate it, and the
//! enclosing statement's emission is abandoned while the rest of the
//! program continues. LLVM builder failures are reported the same way.

use inkwell::builder::{Builder, BuilderError};
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::BasicMetadataTypeEnum;
use inkwell::values::{
    BasicMetadataValueEnum, BasicValueEnum, FloatValue, FunctionValue, IntValue, PointerValue,
};
use inkwell::{AddressSpace, FloatPredicate};
use rustc_hash::FxHashMap;

use tribc_lex::{Token, TokenKind};
use tribc_par::{Expr, LiteralKind, Stmt};
use tribc_util::Handler;

/// Lowers a parsed program into an LLVM module.
///
/// One instance per compilation. The lowering walks the tree once; the
/// finished module is handed back by value from [`CodeGen::generate`] and
/// the instance is consumed.
pub struct CodeGen<'ctx, 'h> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    handler: &'h mut Handler,

    /// Named locals of the function currently being lowered: identifier
    /// text to entry-block stack slot. Blocks snapshot and restore this
    /// map, so inner bindings shadow and then vanish at block exit.
    named_values: FxHashMap<String, PointerValue<'ctx>>,

    /// Declared functions, globally visible within the module.
    functions: FxHashMap<String, FunctionValue<'ctx>>,

    /// The function whose entry block receives new stack slots.
    current_fn: Option<FunctionValue<'ctx>>,

    /// False while lowering the synthesized top-level `main`; a `return`
    /// there is a lowering error.
    in_function: bool,
}

impl<'ctx, 'h> CodeGen<'ctx, 'h> {
    /// Creates a fresh module named `tribhasha` with the `printf`
    /// prototype declared for the runtime.
    pub fn new(context: &'ctx Context, handler: &'h mut Handler) -> Self {
        let module = context.create_module("tribhasha");
        let builder = context.create_builder();

        // printf(fmt, ...) -> i32, external varargs
        let ptr_type = context.i8_type().ptr_type(AddressSpace::default());
        let printf_type = context.i32_type().fn_type(&[ptr_type.into()], true);
        module.add_function("printf", printf_type, Some(Linkage::External));

        Self {
            context,
            module,
            builder,
            handler,
            named_values: FxHashMap::default(),
            functions: FxHashMap::default(),
            current_fn: None,
            in_function: false,
        }
    }

    /// Lowers the top-level statements into a synthesized `main` that
    /// returns `i32 0`, then hands back the finished module.
    ///
    /// Function declarations encountered at top level install themselves
    /// at module scope; they are never nested inside `main`.
    pub fn generate(mut self, statements: &[Stmt]) -> Module<'ctx> {
        let i32_type = self.context.i32_type();
        let main_type = i32_type.fn_type(&[], false);
        let main_fn = self.module.add_function("main", main_type, None);

        let entry = self.context.append_basic_block(main_fn, "entry");
        self.builder.position_at_end(entry);
        self.current_fn = Some(main_fn);

        for stmt in statements {
            self.lower_stmt(stmt);
        }

        if !self.current_block_terminated() {
            let zero = i32_type.const_int(0, false);
            let _ = self.check(self.builder.build_return(Some(&zero)));
        }

        if !main_fn.verify(true) {
            self.handler
                .error_without_line("Function verification failed: main");
        }

        self.module
    }

    // Helpers

    /// Reports a lowering error and yields the null value for the caller
    /// to propagate.
    fn lower_error(&mut self, message: impl Into<String>) -> Option<BasicValueEnum<'ctx>> {
        self.handler.error_without_line(message);
        None
    }

    /// Unwraps a builder result, converting a failure into a reported
    /// lowering error.
    fn check<T>(&mut self, result: Result<T, BuilderError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.handler
                    .error_without_line(format!("LLVM builder error: {e}"));
                None
            }
        }
    }

    fn current_block_terminated(&self) -> bool {
        self.builder
            .get_insert_block()
            .map_or(true, |block| block.get_terminator().is_some())
    }

    /// Allocates an `f64` stack slot in the entry block of `function`, so
    /// the allocation dominates every use regardless of where the
    /// declaration appears in the source.
    fn create_entry_block_alloca(
        &mut self,
        function: FunctionValue<'ctx>,
        name: &str,
    ) -> Option<PointerValue<'ctx>> {
        let builder = self.context.create_builder();
        let entry = function.get_first_basic_block()?;

        match entry.get_first_instruction() {
            Some(first) => builder.position_before(&first),
            None => builder.position_at_end(entry),
        }

        self.check(builder.build_alloca(self.context.f64_type(), name))
    }

    /// Resolves a callee name: the module first, then the function table.
    fn get_function(&self, name: &str) -> Option<FunctionValue<'ctx>> {
        self.module
            .get_function(name)
            .or_else(|| self.functions.get(name).copied())
    }

    fn expect_float(
        &mut self,
        value: BasicValueEnum<'ctx>,
        message: &str,
    ) -> Option<FloatValue<'ctx>> {
        match value {
            BasicValueEnum::FloatValue(v) => Some(v),
            _ => {
                self.handler.error_without_line(message);
                None
            }
        }
    }

    /// Coerces a scalar to a branch condition: non-equal to `0.0`.
    fn to_bool(&mut self, value: FloatValue<'ctx>, name: &str) -> Option<IntValue<'ctx>> {
        let zero = self.context.f64_type().const_float(0.0);
        self.check(
            self.builder
                .build_float_compare(FloatPredicate::ONE, value, zero, name),
        )
    }

    /// Widens an `i1` comparison result back to the uniform scalar.
    fn bool_to_float(&mut self, value: IntValue<'ctx>) -> Option<BasicValueEnum<'ctx>> {
        let widened = self.check(self.builder.build_unsigned_int_to_float(
            value,
            self.context.f64_type(),
            "booltmp",
        ))?;
        Some(widened.into())
    }

    // Expressions

    /// Lowers an expression, yielding its IR value.
    ///
    /// `None` means the error is already reported; the caller abandons
    /// the enclosing statement's emission.
    fn lower_expr(&mut self, expr: &Expr) -> Option<BasicValueEnum<'ctx>> {
        match expr {
            Expr::Literal { value, kind } => self.lower_literal(value, *kind),
            Expr::Grouping(inner) => self.lower_expr(inner),
            Expr::Variable { name } => self.lower_variable(name),
            Expr::Assign { name, value } => self.lower_assign(name, value),
            Expr::Unary { op, right } => self.lower_unary(op, right),
            Expr::Binary { left, op, right } => self.lower_binary(left, op, right),
            Expr::Call { callee, paren, args } => self.lower_call(callee, paren, args),
        }
    }

    fn lower_literal(&mut self, value: &str, kind: LiteralKind) -> Option<BasicValueEnum<'ctx>> {
        let f64_type = self.context.f64_type();

        match kind {
            // Integer literals widen to the uniform scalar
            LiteralKind::Int | LiteralKind::Float => match value.parse::<f64>() {
                Ok(number) => Some(f64_type.const_float(number).into()),
                Err(_) => self.lower_error(format!("Invalid numeric literal: {value}")),
            },
            LiteralKind::Bool => {
                let number = if value == "true" { 1.0 } else { 0.0 };
                Some(f64_type.const_float(number).into())
            }
            LiteralKind::Str => {
                let global = self.check(self.builder.build_global_string_ptr(value, ".str"))?;
                Some(global.as_pointer_value().into())
            }
        }
    }

    fn lower_variable(&mut self, name: &Token) -> Option<BasicValueEnum<'ctx>> {
        let Some(&slot) = self.named_values.get(&name.lexeme) else {
            return self.lower_error(format!("Unknown variable name: {}", name.lexeme));
        };

        self.check(
            self.builder
                .build_load(slot, &name.lexeme),
        )
    }

    fn lower_assign(&mut self, name: &Token, value: &Expr) -> Option<BasicValueEnum<'ctx>> {
        let value = self.lower_expr(value)?;
        let value = self.expect_float(value, "Invalid assignment value")?;

        let Some(&slot) = self.named_values.get(&name.lexeme) else {
            return self.lower_error(format!("Unknown variable name: {}", name.lexeme));
        };

        self.check(self.builder.build_store(slot, value))?;

        // The assignment yields the stored value
        Some(value.into())
    }

    fn lower_unary(&mut self, op: &Token, right: &Expr) -> Option<BasicValueEnum<'ctx>> {
        let operand = self.lower_expr(right)?;
        let operand = self.expect_float(operand, "Invalid unary operand")?;

        match op.kind {
            TokenKind::Minus => {
                let negated = self.check(self.builder.build_float_neg(operand, "negtmp"))?;
                Some(negated.into())
            }
            kind if kind.is_not() => {
                // Logical not on the uniform scalar: x == 0.0, widened
                let zero = self.context.f64_type().const_float(0.0);
                let cmp = self.check(self.builder.build_float_compare(
                    FloatPredicate::OEQ,
                    operand,
                    zero,
                    "nottmp",
                ))?;
                self.bool_to_float(cmp)
            }
            _ => self.lower_error("Unknown unary operator"),
        }
    }

    fn lower_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Option<BasicValueEnum<'ctx>> {
        let left = self.lower_expr(left)?;
        let right = self.lower_expr(right)?;

        let (BasicValueEnum::FloatValue(l), BasicValueEnum::FloatValue(r)) = (left, right) else {
            return self.lower_error("Invalid binary operands");
        };

        match op.kind {
            TokenKind::Plus => {
                let v = self.check(self.builder.build_float_add(l, r, "addtmp"))?;
                Some(v.into())
            }
            TokenKind::Minus => {
                let v = self.check(self.builder.build_float_sub(l, r, "subtmp"))?;
                Some(v.into())
            }
            TokenKind::Star => {
                let v = self.check(self.builder.build_float_mul(l, r, "multmp"))?;
                Some(v.into())
            }
            TokenKind::Slash => {
                let v = self.check(self.builder.build_float_div(l, r, "divtmp"))?;
                Some(v.into())
            }
            TokenKind::Percent => {
                let v = self.check(self.builder.build_float_rem(l, r, "modtmp"))?;
                Some(v.into())
            }
            TokenKind::Less => self.float_compare(FloatPredicate::OLT, l, r),
            TokenKind::LessEq => self.float_compare(FloatPredicate::OLE, l, r),
            TokenKind::Greater => self.float_compare(FloatPredicate::OGT, l, r),
            TokenKind::GreaterEq => self.float_compare(FloatPredicate::OGE, l, r),
            TokenKind::EqEq => self.float_compare(FloatPredicate::OEQ, l, r),
            TokenKind::NotEq => self.float_compare(FloatPredicate::UNE, l, r),
            _ => self.lower_error("Unknown binary operator"),
        }
    }

    fn float_compare(
        &mut self,
        predicate: FloatPredicate,
        left: FloatValue<'ctx>,
        right: FloatValue<'ctx>,
    ) -> Option<BasicValueEnum<'ctx>> {
        let cmp = self.check(
            self.builder
                .build_float_compare(predicate, left, right, "cmptmp"),
        )?;
        self.bool_to_float(cmp)
    }

    fn lower_call(
        &mut self,
        callee: &Expr,
        paren: &Token,
        args: &[Expr],
    ) -> Option<BasicValueEnum<'ctx>> {
        let Expr::Variable { name } = callee else {
            return self.lower_error("Unknown function referenced");
        };

        let Some(function) = self.get_function(&name.lexeme) else {
            return self.lower_error("Unknown function referenced");
        };

        if function.count_params() as usize != args.len() {
            self.handler
                .error(paren.line, "Incorrect number of arguments passed.");
            return None;
        }

        // Arguments evaluate left to right and pass positionally
        let mut lowered: Vec<BasicMetadataValueEnum> = Vec::with_capacity(args.len());
        for arg in args {
            lowered.push(self.lower_expr(arg)?.into());
        }

        let call = self.check(self.builder.build_call(function, &lowered, "calltmp"))?;
        Some(call.try_as_basic_value().unwrap_basic())
    }

    // Statements

    fn lower_stmt(&mut self, stmt: &Stmt) {
        // Statements after a terminator are unreachable; emitting into a
        // terminated block is a no-op. Function declarations create their
        // own blocks and still install at module scope.
        if self.current_block_terminated() && !matches!(stmt, Stmt::Function { .. }) {
            return;
        }

        match stmt {
            Stmt::Expression(expr) => {
                // Value computed and discarded
                self.lower_expr(expr);
            }
            Stmt::Var { name, initializer } => self.lower_var(name, initializer.as_ref()),
            Stmt::Block(statements) => self.lower_block(statements),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => self.lower_if(condition, then_branch, else_branch.as_deref()),
            Stmt::While { condition, body } => self.lower_while(condition, body),
            Stmt::Function { name, params, body } => self.lower_function(name, params, body),
            Stmt::Return { keyword, value } => self.lower_return(keyword, value.as_ref()),
        }
    }

    fn lower_var(&mut self, name: &Token, initializer: Option<&Expr>) {
        let init_value = match initializer {
            Some(expr) => {
                let Some(value) = self.lower_expr(expr) else {
                    return;
                };
                let Some(value) = self.expect_float(value, "Invalid initializer value") else {
                    return;
                };
                value
            }
            None => self.context.f64_type().const_float(0.0),
        };

        let Some(function) = self.current_fn else {
            return;
        };
        let Some(slot) = self.create_entry_block_alloca(function, &name.lexeme) else {
            return;
        };

        if self.check(self.builder.build_store(slot, init_value)).is_none() {
            return;
        }

        self.named_values.insert(name.lexeme.clone(), slot);
    }

    fn lower_block(&mut self, statements: &[Stmt]) {
        // Inner bindings shadow and vanish at block exit
        let saved = self.named_values.clone();

        for stmt in statements {
            self.lower_stmt(stmt);
        }

        self.named_values = saved;
    }

    fn lower_if(&mut self, condition: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>) {
        let Some(cond) = self.lower_expr(condition) else {
            return;
        };
        let Some(cond) = self.expect_float(cond, "Invalid condition value") else {
            return;
        };
        let Some(cond) = self.to_bool(cond, "ifcond") else {
            return;
        };

        let Some(function) = self.builder.get_insert_block().and_then(|b| b.get_parent()) else {
            return;
        };

        let then_block = self.context.append_basic_block(function, "then");
        let else_block = else_branch.map(|_| self.context.append_basic_block(function, "else"));
        let merge_block = self.context.append_basic_block(function, "ifcont");

        let false_target = else_block.unwrap_or(merge_block);
        if self
            .check(
                self.builder
                    .build_conditional_branch(cond, then_block, false_target),
            )
            .is_none()
        {
            return;
        }

        self.builder.position_at_end(then_block);
        self.lower_stmt(then_branch);
        if !self.current_block_terminated() {
            let _ = self.check(self.builder.build_unconditional_branch(merge_block));
        }

        if let (Some(else_branch), Some(else_block)) = (else_branch, else_block) {
            self.builder.position_at_end(else_block);
            self.lower_stmt(else_branch);
            if !self.current_block_terminated() {
                let _ = self.check(self.builder.build_unconditional_branch(merge_block));
            }
        }

        self.builder.position_at_end(merge_block);
    }

    fn lower_while(&mut self, condition: &Expr, body: &Stmt) {
        let Some(function) = self.builder.get_insert_block().and_then(|b| b.get_parent()) else {
            return;
        };

        let cond_block = self.context.append_basic_block(function, "loopcond");
        let body_block = self.context.append_basic_block(function, "loopbody");
        let after_block = self.context.append_basic_block(function, "afterloop");

        let _ = self.check(self.builder.build_unconditional_branch(cond_block));

        self.builder.position_at_end(cond_block);
        let cond = self
            .lower_expr(condition)
            .and_then(|v| self.expect_float(v, "Invalid condition value"))
            .and_then(|v| self.to_bool(v, "loopcond"));
        let Some(cond) = cond else {
            // Leave the insertion point somewhere sane for the statements
            // that follow the abandoned loop
            self.builder.position_at_end(after_block);
            return;
        };
        let _ = self.check(
            self.builder
                .build_conditional_branch(cond, body_block, after_block),
        );

        self.builder.position_at_end(body_block);
        self.lower_stmt(body);
        if !self.current_block_terminated() {
            let _ = self.check(self.builder.build_unconditional_branch(cond_block));
        }

        self.builder.position_at_end(after_block);
    }

    fn lower_function(&mut self, name: &Token, params: &[Token], body: &[Stmt]) {
        let f64_type = self.context.f64_type();
        let param_types: Vec<BasicMetadataTypeEnum> = vec![f64_type.into(); params.len()];
        let fn_type = f64_type.fn_type(&param_types, false);
        let function = self.module.add_function(&name.lexeme, fn_type, None);

        for (param, value) in params.iter().zip(function.get_param_iter()) {
            value.into_float_value().set_name(&param.lexeme);
        }

        // Save the outer function's context
        let saved_block = self.builder.get_insert_block();
        let saved_fn = self.current_fn;
        let saved_locals = std::mem::take(&mut self.named_values);
        let was_in_function = self.in_function;

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);
        self.current_fn = Some(function);
        self.in_function = true;

        // A slot per parameter, with the incoming argument stored into it
        for (param, value) in params.iter().zip(function.get_param_iter()) {
            if let Some(slot) = self.create_entry_block_alloca(function, &param.lexeme) {
                let _ = self.check(self.builder.build_store(slot, value));
                self.named_values.insert(param.lexeme.clone(), slot);
            }
        }

        for stmt in body {
            self.lower_stmt(stmt);
        }

        // Fall off the end of the function: return 0.0
        if !self.current_block_terminated() {
            let zero = f64_type.const_float(0.0);
            let _ = self.check(self.builder.build_return(Some(&zero)));
        }

        if !function.verify(true) {
            self.handler.error_without_line(format!(
                "Function verification failed: {}",
                name.lexeme
            ));
        }

        self.functions.insert(name.lexeme.clone(), function);

        // Restore the outer function's context
        self.named_values = saved_locals;
        self.current_fn = saved_fn;
        self.in_function = was_in_function;
        if let Some(block) = saved_block {
            self.builder.position_at_end(block);
        }
    }

    fn lower_return(&mut self, keyword: &Token, value: Option<&Expr>) {
        if !self.in_function {
            self.handler
                .error(keyword.line, "Return statement outside a function.");
            return;
        }

        let result = match value {
            Some(expr) => {
                let Some(value) = self.lower_expr(expr) else {
                    return;
                };
                let Some(value) = self.expect_float(value, "Invalid return value") else {
                    return;
                };
                value
            }
            None => self.context.f64_type().const_float(0.0),
        };

        let _ = self.check(self.builder.build_return(Some(&result)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribc_lex::Lexer;
    use tribc_par::Parser;

    /// Runs the full front-end and lowering over `source`, returning the
    /// printed IR and the diagnostics.
    fn lower_source(source: &str) -> (String, Handler) {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).scan_tokens();
        let statements = Parser::new(tokens, &mut handler).parse();

        let context = Context::create();
        let codegen = CodeGen::new(&context, &mut handler);
        let module = codegen.generate(&statements);
        (module.print_to_string().to_string(), handler)
    }

    #[test]
    fn test_lowers_program_with_function() {
        let (ir, handler) = lower_source("var x = 10; function test() { return x + 5; }");
        // `x` is a main-local, so the body's reference to it is a lowering
        // error, but main and the function are still emitted
        assert!(ir.contains("define i32 @main"));
        assert!(ir.contains("define double @test"));
        assert!(handler.has_errors());
    }

    #[test]
    fn test_simple_program_is_clean() {
        let (ir, handler) = lower_source("var x = 10; var y = x + 5;");
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("define i32 @main"));
        assert!(ir.contains("alloca double"));
        assert!(ir.contains("ret i32 0"));
    }

    #[test]
    fn test_function_with_params_and_call() {
        let (ir, handler) =
            lower_source("function add(a, b) { return a + b; } var r = add(1, 2);");
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("define double @add(double"));
        assert!(ir.contains("call double @add"));
        assert!(ir.contains("fadd double"));
    }

    #[test]
    fn test_lowering_is_deterministic() {
        let source = "function f(n) { अगर (n <= 1) { ঘূৰাই_দিয়ক 1; } return n * f(n - 1); }\n\
                      var r = f(5);";
        let (first, _) = lower_source(source);
        let (second, _) = lower_source(source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_integer_literals_widen_to_double() {
        let (ir, _) = lower_source("var x = 42;");
        assert!(ir.contains("4.200000e+01"));
    }

    #[test]
    fn test_string_literal_becomes_private_global() {
        let (ir, handler) = lower_source("var s = 0; printf(\"hello\");");
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("private unnamed_addr constant"));
        assert!(ir.contains("hello"));
        assert!(ir.contains("call i32 (ptr, ...) @printf"));
    }

    #[test]
    fn test_unknown_variable_is_reported() {
        let (_, handler) = lower_source("var x = y + 1;");
        assert!(handler.has_errors());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unknown variable name: y")));
    }

    #[test]
    fn test_unknown_function_is_reported() {
        let (_, handler) = lower_source("missing(1);");
        assert!(handler.has_errors());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unknown function referenced")));
    }

    #[test]
    fn test_arity_mismatch_uses_closing_paren_line() {
        let (_, handler) = lower_source("function f(a) { return a; }\nvar r = f(1,\n2\n);");
        assert!(handler.has_errors());

        let diag = handler
            .diagnostics()
            .iter()
            .find(|d| d.message.contains("Incorrect number of arguments"))
            .expect("arity diagnostic");
        assert_eq!(diag.line, Some(4));
    }

    #[test]
    fn test_error_aborts_statement_but_not_program() {
        let (ir, handler) = lower_source("var a = missing(); var b = 2;");
        assert!(handler.has_errors());
        // `b` is still lowered after the failed statement
        assert!(ir.contains("%b = alloca double"));
    }

    #[test]
    fn test_return_outside_function_is_lowering_error() {
        let (_, handler) = lower_source("return 1;");
        assert!(handler.has_errors());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Return statement outside a function")));
    }

    #[test]
    fn test_block_scoping_unbinds_at_exit() {
        let (_, handler) = lower_source("{ var x = 1; } x = 2;");
        assert!(handler.has_errors());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unknown variable name: x")));
    }

    #[test]
    fn test_shadowing_is_permitted() {
        let (_, handler) = lower_source("var x = 1; { var x = 2; x = 3; } x = 4;");
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
    }

    #[test]
    fn test_if_else_blocks_verify() {
        let source = "function sign(n) {\n\
                          if (n < 0) { return 0 - 1; } else { return 1; }\n\
                      }\n\
                      var r = sign(5);";
        let (ir, handler) = lower_source(source);
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("then:"));
        assert!(ir.contains("else:"));
        assert!(ir.contains("ifcont:"));
    }

    #[test]
    fn test_while_loop_verifies() {
        let source = "var n = 10; while (n > 0) { n = n - 1; }";
        let (ir, handler) = lower_source(source);
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("loopcond:"));
        assert!(ir.contains("loopbody:"));
        assert!(ir.contains("afterloop:"));
    }

    #[test]
    fn test_desugared_for_loop_verifies() {
        let (ir, handler) =
            lower_source("var x = 0; for (var i = 0; i < 3; i = i + 1) { x = x + i; }");
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("loopcond:"));
    }

    #[test]
    fn test_statements_after_return_are_no_ops() {
        let source = "function f() { return 1; return 2; x = 3; }";
        let (_, handler) = lower_source(source);
        // The unreachable statements must not produce malformed IR; the
        // unknown-variable reference after the terminator is never lowered
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
    }

    #[test]
    fn test_comparisons_widen_to_double() {
        // Operands load from a slot so the builder cannot constant-fold
        let (ir, handler) = lower_source("var a = 1; var x = a < 2;");
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("fcmp olt"));
        assert!(ir.contains("uitofp i1"));
    }

    #[test]
    fn test_not_equal_is_unordered() {
        let (ir, _) = lower_source("var a = 1; var x = a != 2;");
        assert!(ir.contains("fcmp une"));
    }

    #[test]
    fn test_logical_not_in_any_language() {
        for source in [
            "var a = 1; var x = !a;",
            "var a = 1; var x = not a;",
            "var a = 1; var x = नहीं a;",
            "var a = 1; var x = নহয় a;",
        ] {
            let (ir, handler) = lower_source(source);
            assert!(!handler.has_errors(), "{source} should lower cleanly");
            assert!(ir.contains("fcmp oeq"), "{source} should compare against zero");
        }
    }

    #[test]
    fn test_modulo_uses_frem() {
        let (ir, _) = lower_source("var a = 7; var x = a % 3;");
        assert!(ir.contains("frem double"));
    }

    #[test]
    fn test_mixed_language_program_lowers() {
        let source = "फलन दुगुना(n) { वापस n * 2; }\n\
                      var x = दुगुना(21);";
        let (ir, handler) = lower_source(source);
        assert!(!handler.has_errors(), "diagnostics: {:?}", handler.diagnostics());
        assert!(ir.contains("define double"));
    }

    #[test]
    fn test_string_in_arithmetic_is_reported() {
        let (_, handler) = lower_source("var x = \"a\" + 1;");
        assert!(handler.has_errors());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Invalid binary operands")));
    }
}
