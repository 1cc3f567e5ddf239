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

//! Statement AST nodes.

use super::Expr;

/// A local variable definition.
///
/// One statement may define several names and carry several initializers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDef {
    /// The defined names.
    pub names: Vec<String>,
    /// Initializer expressions, in source order.
    pub initializers: Vec<Expr>,
    /// Array size, when the names are declared as arrays.
    pub array_length: Option<usize>,
}

impl VarDef {
    /// Create a definition of a single name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            initializers: Vec::new(),
            array_length: None,
        }
    }

    /// Define another name in the same statement.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add an initializer expression.
    pub fn with_initializer(mut self, expr: Expr) -> Self {
        self.initializers.push(expr);
        self
    }

    /// Declare the names as arrays of the given length.
    pub fn with_array_length(mut self, length: usize) -> Self {
        self.array_length = Some(length);
        self
    }
}

/// An assignment statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The assigned name.
    pub target: String,
    /// The index expression for `target[index] = value`.
    pub index: Option<Expr>,
    /// The assigned value.
    pub value: Expr,
}

impl Assignment {
    /// Create a plain assignment.
    pub fn new(target: impl Into<String>, value: Expr) -> Self {
        Self {
            target: target.into(),
            index: None,
            value,
        }
    }

    /// Create an indexed assignment.
    pub fn indexed(target: impl Into<String>, index: Expr, value: Expr) -> Self {
        Self {
            target: target.into(),
            index: Some(index),
            value,
        }
    }
}

/// A closed if statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conditional {
    /// The line of the first token of the else-branch, if there is one.
    pub else_line: Option<usize>,
}

impl Conditional {
    /// An if statement without an else-branch.
    pub fn new() -> Self {
        Self::default()
    }

    /// An if statement with an else-branch starting on `line`.
    pub fn with_else(line: usize) -> Self {
        Self {
            else_line: Some(line),
        }
    }

    /// Whether the statement has an else-branch.
    pub fn has_else(&self) -> bool {
        self.else_line.is_some()
    }
}
