// japy-sema - Semantic analysis pass for the Japy language
//
// Copyright (C) 2026 Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Analysis context for the semantic analyzer.
//!
//! Tracks the traversal state that is not part of the symbol tables.

/// Context for semantic analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    /// The name of the input being analyzed.
    pub source_name: String,
    /// One entry per open method declaration: whether its entry opened a scope.
    ///
    /// A duplicate method does not open a scope, so its exit must not close one.
    pub method_scopes: Vec<bool>,
}

impl AnalysisContext {
    /// Record the entry of a method declaration.
    pub fn enter_method(&mut self, opened_scope: bool) {
        self.method_scopes.push(opened_scope);
    }

    /// Record the exit of a method declaration and report whether its
    /// entry opened a scope.
    pub fn exit_method(&mut self) -> bool {
        self.method_scopes.pop().unwrap_or(false)
    }
}
