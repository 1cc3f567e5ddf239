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

//! Control flow analysis for the semantic analyzer.
//!
//! Closed if statements and closed while loops open block scopes named
//! after their source lines. Open forms do not open scopes.

use super::scope::ScopeId;
use super::symbol::{SymbolDescriptor, SymbolKind};
use super::Analyzer;
use crate::ast::Conditional;
use crate::error::Span;
use std::io::Write;

/// Key of the marker recorded in every if-scope.
pub const IF_MARKER_KEY: &str = "if_condition";

/// Key of the marker recorded in every while-scope.
pub const LOOP_MARKER_KEY: &str = "while_loop";

/// Extension trait for control flow analysis.
pub trait ControlFlowAnalyzer {
    /// Open the scopes of a closed if statement.
    fn enter_conditional(&mut self, cond: &Conditional, span: &Span);

    /// Close the scopes of a closed if statement.
    fn exit_conditional(&mut self, cond: &Conditional);

    /// Open the scope of a closed while loop.
    fn enter_loop(&mut self, span: &Span);

    /// Close the scope of a closed while loop.
    fn exit_loop(&mut self);
}

impl<W: Write> ControlFlowAnalyzer for Analyzer<W> {
    fn enter_conditional(&mut self, cond: &Conditional, span: &Span) {
        let (start, end) = (span.start_line(), span.end_line());

        let if_scope = ScopeId::if_block(start, end);
        let marker =
            SymbolDescriptor::block_marker(SymbolKind::ConditionalIf, if_scope.as_str(), start);
        self.registry.enter(if_scope.clone());
        self.registry
            .declare(&if_scope, IF_MARKER_KEY, marker, span.start);

        // The else-scope sits on top of the if-scope. It gets no marker.
        if cond.has_else() {
            self.registry.enter(ScopeId::else_block(start, end));
        }
    }

    fn exit_conditional(&mut self, cond: &Conditional) {
        if cond.has_else() {
            self.registry.exit();
        }
        self.registry.exit();
    }

    fn enter_loop(&mut self, span: &Span) {
        let (start, end) = (span.start_line(), span.end_line());

        let loop_scope = ScopeId::while_block(start, end);
        let marker = SymbolDescriptor::block_marker(SymbolKind::Loop, loop_scope.as_str(), start);
        self.registry.enter(loop_scope.clone());
        self.registry
            .declare(&loop_scope, LOOP_MARKER_KEY, marker, span.start);
    }

    fn exit_loop(&mut self) {
        self.registry.exit();
    }
}
