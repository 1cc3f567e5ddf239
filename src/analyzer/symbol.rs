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

//! Symbol descriptor definitions for the semantic analyzer.
//!
//! A descriptor records everything the pass knows about one declared name.
//! Its `Display` form is the `value` column of the end-of-run report.

use std::fmt;

/// Access modifier recorded when a declaration has none.
pub const DEFAULT_ACCESS: &str = "default";

/// The kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Field,
    Method,
    Variable,
    ConditionalIf,
    ConditionalElse,
    Loop,
}

impl SymbolKind {
    /// The name used for this kind in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Field => "field",
            SymbolKind::Method => "method",
            SymbolKind::Variable => "variable",
            SymbolKind::ConditionalIf => "if",
            SymbolKind::ConditionalElse => "else",
            SymbolKind::Loop => "while",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A formal parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// 1-based position, not counting any implicit receiver.
    pub index: usize,
    /// The parameter name.
    pub name: String,
    /// The declared type.
    pub param_type: String,
}

impl ParameterDescriptor {
    /// Create a new parameter descriptor.
    pub fn new(index: usize, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{index={}, name='{}', type='{}'}}",
            self.index, self.name, self.param_type
        )
    }
}

/// Symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDescriptor {
    /// The symbol kind.
    pub kind: SymbolKind,
    /// The symbol name.
    pub name: String,
    /// The declared type (field type, method return type).
    pub declared_type: Option<String>,
    /// The access modifier.
    pub access_modifier: Option<String>,
    /// Key of the inherited class (`class_<Parent>`), classes only.
    pub inherits: Option<String>,
    /// Formal parameters, methods only.
    pub parameters: Vec<ParameterDescriptor>,
    /// Line of the first appearance (variables and block markers).
    pub first_appearance: Option<usize>,
    /// Declared array length, for array variables.
    pub array_length: Option<usize>,
}

impl SymbolDescriptor {
    fn bare(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            declared_type: None,
            access_modifier: None,
            inherits: None,
            parameters: Vec::new(),
            first_appearance: None,
            array_length: None,
        }
    }

    /// Create a new class symbol.
    pub fn class(name: impl Into<String>, access: Option<&str>, parent: Option<&str>) -> Self {
        Self {
            access_modifier: Some(access.unwrap_or(DEFAULT_ACCESS).to_string()),
            inherits: parent.map(|p| format!("class_{p}")),
            ..Self::bare(SymbolKind::Class, name)
        }
    }

    /// Create a new field symbol.
    pub fn field(name: impl Into<String>, field_type: impl Into<String>, access: Option<&str>) -> Self {
        Self {
            declared_type: Some(field_type.into()),
            access_modifier: Some(access.unwrap_or(DEFAULT_ACCESS).to_string()),
            ..Self::bare(SymbolKind::Field, name)
        }
    }

    /// Create a new method symbol.
    pub fn method(
        name: impl Into<String>,
        return_type: impl Into<String>,
        access: Option<&str>,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        Self {
            declared_type: Some(return_type.into()),
            access_modifier: Some(access.unwrap_or(DEFAULT_ACCESS).to_string()),
            parameters,
            ..Self::bare(SymbolKind::Method, name)
        }
    }

    /// Create a new variable symbol.
    pub fn variable(name: impl Into<String>, line: usize) -> Self {
        Self {
            first_appearance: Some(line),
            ..Self::bare(SymbolKind::Variable, name)
        }
    }

    /// Create a marker for a block scope (if, else, while).
    pub fn block_marker(kind: SymbolKind, scope_name: impl Into<String>, line: usize) -> Self {
        Self {
            first_appearance: Some(line),
            ..Self::bare(kind, scope_name)
        }
    }

    /// Record an array length on a variable symbol.
    pub fn with_array_length(mut self, length: Option<usize>) -> Self {
        self.array_length = length;
        self
    }

    /// Get the declared parameter types, in order.
    pub fn parameter_types(&self) -> impl ExactSizeIterator<Item = &str> {
        self.parameters.iter().map(|p| p.param_type.as_str())
    }

    /// Check if this is a variable symbol.
    pub fn is_variable(&self) -> bool {
        self.kind == SymbolKind::Variable
    }
}

impl fmt::Display for SymbolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{kind='{}', name='{}'", self.kind, self.name)?;
        if let Some(ty) = &self.declared_type {
            write!(f, ", type='{ty}'")?;
        }
        if let Some(access) = &self.access_modifier {
            write!(f, ", accessModifier='{access}'")?;
        }
        if let Some(parent) = &self.inherits {
            write!(f, ", inherits='{parent}'")?;
        }
        if !self.parameters.is_empty() {
            f.write_str(", parameters=[")?;
            for (i, param) in self.parameters.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{param}")?;
            }
            f.write_str("]")?;
        }
        if let Some(length) = self.array_length {
            write!(f, ", length={length}")?;
        }
        f.write_str("}")
    }
}
