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

//! Declaration AST nodes (classes, fields, methods).

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// The class name.
    pub name: String,
    /// The parent class name, if the class inherits.
    pub parent: Option<String>,
    /// The access modifier as written, if any.
    pub access_modifier: Option<String>,
}

impl ClassDecl {
    /// Create a new class declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            access_modifier: None,
        }
    }

    /// Set the parent class.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the access modifier.
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access_modifier = Some(access.into());
        self
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// The field name.
    pub name: String,
    /// The declared type, as written.
    pub field_type: String,
    /// The access modifier as written, if any.
    pub access_modifier: Option<String>,
}

impl FieldDecl {
    /// Create a new field declaration.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            access_modifier: None,
        }
    }

    /// Set the access modifier.
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access_modifier = Some(access.into());
        self
    }
}

/// A method declaration.
///
/// `identifiers` holds every identifier token captured by the declaration
/// rule, starting with the method name. Parameter names are the remaining
/// identifiers; the type at index `i` of `param_types` belongs to the
/// identifier at index `i + 1`. `param_names` holds only the parameter names
/// the grammar labels explicitly, which can be fewer than the captured ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// The method name.
    pub name: String,
    /// The declared return type, as written.
    pub return_type: String,
    /// The access modifier as written, if any.
    pub access_modifier: Option<String>,
    /// Labelled parameter names.
    pub param_names: Vec<String>,
    /// Declared parameter types, in order.
    pub param_types: Vec<String>,
    /// All captured identifier tokens, method name first.
    pub identifiers: Vec<String>,
}

impl MethodDecl {
    /// Create a new method declaration without parameters.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            identifiers: vec![name.clone()],
            name,
            return_type: return_type.into(),
            access_modifier: None,
            param_names: Vec::new(),
            param_types: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        let name = name.into();
        self.param_names.push(name.clone());
        self.identifiers.push(name);
        self.param_types.push(param_type.into());
        self
    }

    /// Add an identifier token that the grammar does not label as a parameter.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifiers.push(identifier.into());
        self
    }

    /// Set the access modifier.
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access_modifier = Some(access.into());
        self
    }

    /// Whether the method declares at least one parameter.
    pub fn has_params(&self) -> bool {
        !self.param_names.is_empty()
    }

    /// Pair captured parameter identifiers with their declared types.
    ///
    /// Yields `(position, name, type)` with 1-based positions. Pairing stops
    /// at whichever list runs out first.
    pub fn parameters(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.identifiers
            .iter()
            .skip(1)
            .zip(self.param_types.iter())
            .enumerate()
            .map(|(i, (name, ty))| (i + 1, name.as_str(), ty.as_str()))
    }
}
