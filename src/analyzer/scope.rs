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

//! Scope management for the semantic analyzer.
//!
//! A scope represents a lexical region where symbols are defined.
//! Declaration scopes are named after what they declare (`class_Foo`,
//! `method_f(int)`); block scopes are named after their source lines
//! (`if_3_7`), so two different blocks never share a table.

use super::symbol::SymbolDescriptor;
use std::collections::HashMap;
use std::fmt;

/// The identity of a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(String);

/// The name of the outermost scope.
pub const GLOBAL_SCOPE: &str = "global";

impl ScopeId {
    /// The global scope.
    pub fn global() -> Self {
        Self(GLOBAL_SCOPE.to_string())
    }

    /// The scope of a class body.
    pub fn class(name: &str) -> Self {
        Self(format!("class_{name}"))
    }

    /// The scope of a method body, keyed by its signature.
    pub fn method(signature: &str) -> Self {
        Self(format!("method_{signature}"))
    }

    /// The scope of an if-branch spanning the given lines.
    pub fn if_block(start_line: usize, end_line: usize) -> Self {
        Self(format!("if_{start_line}_{end_line}"))
    }

    /// The scope of an else-branch of the if statement spanning the given lines.
    pub fn else_block(start_line: usize, end_line: usize) -> Self {
        Self(format!("else_{start_line}_{end_line}"))
    }

    /// The scope of a while loop spanning the given lines.
    pub fn while_block(start_line: usize, end_line: usize) -> Self {
        Self(format!("while_{start_line}_{end_line}"))
    }

    /// Get the scope id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the global scope.
    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_SCOPE
    }

    /// Classify the scope by its id prefix.
    pub fn kind(&self) -> ScopeKind {
        let id = self.0.as_str();
        if id == GLOBAL_SCOPE {
            ScopeKind::Global
        } else if id.starts_with("if") {
            ScopeKind::If
        } else if id.starts_with("while") {
            ScopeKind::While
        } else if id.starts_with("else") {
            ScopeKind::Else
        } else if id.starts_with("class_") {
            ScopeKind::Class
        } else if id.starts_with("method_") {
            ScopeKind::Method
        } else {
            ScopeKind::Other
        }
    }
}

impl From<&str> for ScopeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ScopeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of a scope, derived from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Class,
    Method,
    If,
    Else,
    While,
    Other,
}

impl ScopeKind {
    /// Check if this is an if or while block.
    pub fn is_guarded_block(&self) -> bool {
        matches!(self, ScopeKind::If | ScopeKind::While)
    }
}

/// The symbol table of one scope.
#[derive(Debug, Default, Clone)]
pub struct ScopeTable {
    /// Symbols defined in this scope, by key.
    symbols: HashMap<String, SymbolDescriptor>,
}

impl ScopeTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol under `key`.
    ///
    /// Fails with the existing descriptor when the key is taken; the table
    /// is left unchanged in that case.
    pub fn define(&mut self, key: &str, symbol: SymbolDescriptor) -> Result<(), SymbolDescriptor> {
        if let Some(existing) = self.symbols.get(key) {
            return Err(existing.clone());
        }
        self.symbols.insert(key.to_string(), symbol);
        Ok(())
    }

    /// Look up a symbol in this table.
    pub fn lookup(&self, key: &str) -> Option<&SymbolDescriptor> {
        self.symbols.get(key)
    }

    /// Check if a key is defined.
    pub fn contains(&self, key: &str) -> bool {
        self.symbols.contains_key(key)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get all entries sorted by key.
    pub fn sorted_entries(&self) -> Vec<(&str, &SymbolDescriptor)> {
        let mut entries: Vec<_> = self
            .symbols
            .iter()
            .map(|(key, symbol)| (key.as_str(), symbol))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
