// japy-sema - Semantic analysis pass for the Japy language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Statement analysis for the semantic analyzer.
//!
//! This module provides statement analysis functionality:
//! - Variable definitions and the call checks on their initializers
//! - Indexed assignments and their array index checks
//!
//! A failed call check or index check ends the checks of its own
//! statement only.

use super::registry::Declaration;
use super::symbol::SymbolDescriptor;
use super::type_check::{check_arguments, ArgumentCheck};
use super::Analyzer;
use crate::ast::{Assignment, Expr, VarDef};
use crate::error::{SemanticError, Span};
use std::io::{self, Write};
use std::ops::ControlFlow;

/// Extension trait for statement analysis.
pub trait StatementAnalyzer {
    /// Analyze a variable definition.
    fn analyze_var_def(&mut self, def: &VarDef, span: &Span) -> io::Result<()>;

    /// Check a call in a variable initializer against its target.
    ///
    /// Breaks when a diagnostic was raised.
    fn check_call_initializer(&mut self, expr: &Expr, span: &Span)
        -> io::Result<ControlFlow<()>>;

    /// Analyze an assignment statement.
    fn analyze_assignment(&mut self, assign: &Assignment, span: &Span) -> io::Result<()>;
}

impl<W: Write> StatementAnalyzer for Analyzer<W> {
    fn analyze_var_def(&mut self, def: &VarDef, span: &Span) -> io::Result<()> {
        let line = span.start_line();
        for name in &def.names {
            let symbol = SymbolDescriptor::variable(name, line).with_array_length(def.array_length);
            let key = format!("var_{name}");
            if let Declaration::Conflict { alias, .. } =
                self.registry.declare_current(&key, symbol, span.start)
            {
                log::debug!("variable {} redefined, kept as {}", name, alias);
            }
        }

        for expr in def.initializers.iter().filter(|e| e.is_call()) {
            if self.check_call_initializer(expr, span)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    fn check_call_initializer(
        &mut self,
        expr: &Expr,
        span: &Span,
    ) -> io::Result<ControlFlow<()>> {
        let Some(callee) = expr.call_target() else {
            return Ok(ControlFlow::Continue(()));
        };

        // Call targets resolve in the innermost scope only.
        let key = self.options.call_target_key(callee);
        let Some(target) = self.registry.lookup(self.registry.current(), &key) else {
            log::trace!("call target {} not found in {}", key, self.registry.current());
            return Ok(ControlFlow::Continue(()));
        };

        let arguments = expr.call_arguments();
        match check_arguments(target.parameter_types(), &arguments) {
            ArgumentCheck::Conforms => Ok(ControlFlow::Continue(())),
            ArgumentCheck::CountMismatch { expected, found } => {
                self.error(SemanticError::WrongNumberOfArguments {
                    method: callee.to_string(),
                    expected,
                    found,
                    position: span.start,
                })?;
                Ok(ControlFlow::Break(()))
            }
            ArgumentCheck::TypeMismatch {
                index,
                expected,
                found,
            } => {
                self.error(SemanticError::ArgumentTypeMismatch {
                    method: callee.to_string(),
                    argument: index + 1,
                    expected,
                    found: found.name().to_string(),
                    position: expr.position,
                })?;
                Ok(ControlFlow::Break(()))
            }
        }
    }

    fn analyze_assignment(&mut self, assign: &Assignment, span: &Span) -> io::Result<()> {
        let Some(index) = &assign.index else {
            return Ok(());
        };
        let position = span.start;

        if !index.is_integer_literal() {
            return self.error(SemanticError::ArrayIndexMustBeInteger {
                index: index.text.clone(),
                position,
            });
        }

        let key = format!("var_{}", assign.target);
        let Some(length) = self
            .registry
            .resolve_in_stack(&key)
            .and_then(|symbol| symbol.array_length)
        else {
            log::debug!(
                "no array length recorded for {}, range check skipped",
                assign.target
            );
            return Ok(());
        };

        // Negative literals and literals too large to parse are out of range.
        let in_range = index
            .as_integer()
            .and_then(|value| usize::try_from(value).ok())
            .is_some_and(|value| value < length);
        if !in_range {
            self.error(SemanticError::ArrayIndexOutOfRange {
                array: assign.target.clone(),
                index: index.text.clone(),
                length,
                position,
            })?;
        }
        Ok(())
    }
}
