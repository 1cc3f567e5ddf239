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

//! Expression AST nodes.
//!
//! The pass never needs a structured expression tree. Expressions are kept
//! as the parser's textual reconstruction (token texts concatenated without
//! whitespace) plus the position of their first token.

use crate::error::Position;

/// An expression, as reconstructed source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    /// The reconstructed text.
    pub text: String,
    /// The position of the first token.
    pub position: Position,
}

impl Expr {
    /// Create a new expression.
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Whether the text contains call syntax.
    pub fn is_call(&self) -> bool {
        self.text.contains('(')
    }

    /// The name in front of the first `(`, if any.
    pub fn call_target(&self) -> Option<&str> {
        self.text.find('(').map(|open| self.text[..open].trim())
    }

    /// The arguments between the first `(` and the first `)`.
    ///
    /// Returns an empty list for `f()` or when the parentheses are missing
    /// or out of order.
    pub fn call_arguments(&self) -> Vec<&str> {
        let text = self.text.trim();
        let (Some(open), Some(close)) = (text.find('('), text.find(')')) else {
            return Vec::new();
        };
        if close < open {
            return Vec::new();
        }
        let inner = text[open + 1..close].trim();
        if inner.is_empty() {
            return Vec::new();
        }
        inner.split(',').map(str::trim).collect()
    }

    /// Whether the text is an integer literal: an optional sign followed
    /// by decimal digits only. Literals of any magnitude qualify.
    pub fn is_integer_literal(&self) -> bool {
        let text = self.text.trim();
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    /// The value of the text as an integer literal.
    ///
    /// Returns `None` for non-literals and for literals outside `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        if !self.is_integer_literal() {
            return None;
        }
        self.text.trim().parse().ok()
    }
}
