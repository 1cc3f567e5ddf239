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

//! Error types for the semantic analysis pass.
//!
//! Two families live here:
//! - [`SemanticError`]: recoverable diagnostics raised by the rule checks.
//!   Their `Display` output is the exact line printed to the user.
//! - [`Error`]: failures that stop a pass (writing to the output sink).

use std::fmt;
use std::io;
use thiserror::Error;

/// A position in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source span covering the first and last token of a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Position of the first token.
    pub start: Position,
    /// Position of the last token.
    pub end: Position,
}

impl Span {
    /// Create a new span.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span covering whole lines, starting at `column` of `start_line`.
    pub fn lines(start_line: usize, column: usize, end_line: usize) -> Self {
        Self {
            start: Position::new(start_line, column),
            end: Position::new(end_line, 0),
        }
    }

    /// Create a span for a construct that fits on a single token.
    pub fn at(line: usize, column: usize) -> Self {
        let pos = Position::new(line, column);
        Self { start: pos, end: pos }
    }

    /// The line of the first token.
    pub fn start_line(&self) -> usize {
        self.start.line
    }

    /// The line of the last token.
    pub fn end_line(&self) -> usize {
        self.end.line
    }
}

/// Broad category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A class, field or method declared twice in the same scope.
    DuplicateDefinition,
    /// Parameter or argument count disagreement.
    ArityMismatch,
    /// Declared or inferred types disagree.
    TypeMismatch,
    /// Non-integer or out-of-range array index.
    IndexError,
}

/// Error codes for semantic diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ClassAlreadyDefined,
    MethodAlreadyDefined,
    FieldAlreadyDefined,
    ReturnTypeMismatch,
    ParameterCountMismatch,
    WrongNumberOfArguments,
    ArgumentTypeMismatch,
    ArrayIndexMustBeInteger,
    ArrayIndexOutOfRange,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().unwrap_or("Error"))
    }
}

impl ErrorCode {
    /// Get the numbered code for this error, if it has one.
    ///
    /// Errors without a number are printed with a generic `Error:` prefix.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ErrorCode::ClassAlreadyDefined => Some("Error102"),
            ErrorCode::MethodAlreadyDefined => Some("Error102"),
            ErrorCode::FieldAlreadyDefined => Some("Error104"),
            ErrorCode::ReturnTypeMismatch => Some("Error210"),
            ErrorCode::ParameterCountMismatch
            | ErrorCode::WrongNumberOfArguments
            | ErrorCode::ArgumentTypeMismatch
            | ErrorCode::ArrayIndexMustBeInteger
            | ErrorCode::ArrayIndexOutOfRange => None,
        }
    }

    /// Get the category of this error.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ErrorCode::ClassAlreadyDefined
            | ErrorCode::MethodAlreadyDefined
            | ErrorCode::FieldAlreadyDefined => DiagnosticKind::DuplicateDefinition,
            ErrorCode::ParameterCountMismatch | ErrorCode::WrongNumberOfArguments => {
                DiagnosticKind::ArityMismatch
            }
            ErrorCode::ReturnTypeMismatch | ErrorCode::ArgumentTypeMismatch => {
                DiagnosticKind::TypeMismatch
            }
            ErrorCode::ArrayIndexMustBeInteger | ErrorCode::ArrayIndexOutOfRange => {
                DiagnosticKind::IndexError
            }
        }
    }
}

/// A semantic diagnostic.
///
/// The `Display` implementation produces the exact line written to the
/// diagnostic sink; downstream tooling matches on these strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Error102: in line [{position}], class [{name}] has been defined already.")]
    ClassAlreadyDefined { name: String, position: Position },

    #[error("Error102: in line [{position}], method [{name}] has been defined already.")]
    MethodAlreadyDefined { name: String, position: Position },

    #[error("Error104: in line [{position}], field [{name}] has been defined already.")]
    FieldAlreadyDefined { name: String, position: Position },

    /// The reported type is the one found on the declaration.
    #[error("Error210: in line [{position}], ReturnType of this method must be [{found}]")]
    ReturnTypeMismatch {
        method: String,
        expected: String,
        found: String,
        position: Position,
    },

    #[error(
        "Error: Line {position}, Number of parameters in method call does not match with formal parameter count in method definition."
    )]
    ParameterCountMismatch {
        method: String,
        declared: usize,
        captured: usize,
        position: Position,
    },

    #[error("Error: in line [{position}], Incorrect number of arguments for method [{method}]")]
    WrongNumberOfArguments {
        method: String,
        expected: usize,
        found: usize,
        position: Position,
    },

    #[error("Error: in line [{position}], Type mismatch for argument {argument} of method [{method}]")]
    ArgumentTypeMismatch {
        method: String,
        /// 1-based argument number.
        argument: usize,
        expected: String,
        found: String,
        position: Position,
    },

    #[error("Error: in line [{position}], array index [{index}] must be an integer")]
    ArrayIndexMustBeInteger { index: String, position: Position },

    #[error("Error: in line [{position}], array index [{index}] is out of range")]
    ArrayIndexOutOfRange {
        array: String,
        index: String,
        length: usize,
        position: Position,
    },
}

impl SemanticError {
    /// Get the error code of this diagnostic.
    pub fn code(&self) -> ErrorCode {
        match self {
            SemanticError::ClassAlreadyDefined { .. } => ErrorCode::ClassAlreadyDefined,
            SemanticError::MethodAlreadyDefined { .. } => ErrorCode::MethodAlreadyDefined,
            SemanticError::FieldAlreadyDefined { .. } => ErrorCode::FieldAlreadyDefined,
            SemanticError::ReturnTypeMismatch { .. } => ErrorCode::ReturnTypeMismatch,
            SemanticError::ParameterCountMismatch { .. } => ErrorCode::ParameterCountMismatch,
            SemanticError::WrongNumberOfArguments { .. } => ErrorCode::WrongNumberOfArguments,
            SemanticError::ArgumentTypeMismatch { .. } => ErrorCode::ArgumentTypeMismatch,
            SemanticError::ArrayIndexMustBeInteger { .. } => ErrorCode::ArrayIndexMustBeInteger,
            SemanticError::ArrayIndexOutOfRange { .. } => ErrorCode::ArrayIndexOutOfRange,
        }
    }

    /// Get the category of this diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        self.code().kind()
    }

    /// Get the position the diagnostic points at.
    pub fn position(&self) -> Position {
        match self {
            SemanticError::ClassAlreadyDefined { position, .. }
            | SemanticError::MethodAlreadyDefined { position, .. }
            | SemanticError::FieldAlreadyDefined { position, .. }
            | SemanticError::ReturnTypeMismatch { position, .. }
            | SemanticError::ParameterCountMismatch { position, .. }
            | SemanticError::WrongNumberOfArguments { position, .. }
            | SemanticError::ArgumentTypeMismatch { position, .. }
            | SemanticError::ArrayIndexMustBeInteger { position, .. }
            | SemanticError::ArrayIndexOutOfRange { position, .. } => *position,
        }
    }
}

/// A failure that aborts a pass.
#[derive(Debug, Error)]
pub enum Error {
    /// The diagnostic or report sink could not be written.
    #[error("failed to write analysis output: {0}")]
    Io(#[from] io::Error),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A collection of semantic diagnostics, in emission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<SemanticError>,
}

impl Diagnostics {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a diagnostic to the collection.
    pub fn push(&mut self, error: SemanticError) {
        self.errors.push(error);
    }

    /// Check if there are any diagnostics.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Count the diagnostics carrying the given code.
    pub fn count(&self, code: ErrorCode) -> usize {
        self.errors.iter().filter(|e| e.code() == code).count()
    }

    /// Get an iterator over the diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &SemanticError> {
        self.errors.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = SemanticError;
    type IntoIter = std::vec::IntoIter<SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
