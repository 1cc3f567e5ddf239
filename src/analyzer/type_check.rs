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

//! Type checking utilities for the semantic analyzer.
//!
//! Call arguments are typed by looking at their text only:
//! - Anything containing a double quote → string
//! - Anything containing a `.` → double
//! - Anything containing `True` or `False` → bool
//! - Everything else → int
//!
//! A formal parameter accepts an argument when the formal type name
//! contains the inferred type name (`int[]` accepts `int`).

use std::fmt;

/// The type inferred for an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Double,
    Bool,
    Int,
}

impl ValueType {
    /// Infer the type of an argument from its text.
    pub fn infer(text: &str) -> Self {
        if text.contains('"') {
            ValueType::String
        } else if text.contains('.') {
            ValueType::Double
        } else if text.contains("True") || text.contains("False") {
            ValueType::Bool
        } else {
            ValueType::Int
        }
    }

    /// The type name as written in declarations.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Double => "double",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
        }
    }

    /// Check if a parameter declared as `formal` accepts this type.
    pub fn conforms_to(&self, formal: &str) -> bool {
        formal.contains(self.name())
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of comparing call arguments against formal parameter types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentCheck {
    /// Count and types agree.
    Conforms,
    /// The argument count differs from the parameter count.
    CountMismatch { expected: usize, found: usize },
    /// The argument at 0-based `index` does not fit its parameter.
    TypeMismatch {
        index: usize,
        expected: String,
        found: ValueType,
    },
}

/// Compare arguments against formal parameter types.
///
/// Stops at the first mismatching argument.
pub fn check_arguments<'a>(
    formals: impl ExactSizeIterator<Item = &'a str>,
    arguments: &[&str],
) -> ArgumentCheck {
    if formals.len() != arguments.len() {
        return ArgumentCheck::CountMismatch {
            expected: formals.len(),
            found: arguments.len(),
        };
    }
    for (index, (formal, argument)) in formals.zip(arguments).enumerate() {
        let found = ValueType::infer(argument);
        if !found.conforms_to(formal) {
            return ArgumentCheck::TypeMismatch {
                index,
                expected: formal.to_string(),
                found,
            };
        }
    }
    ArgumentCheck::Conforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("\"hi\"", ValueType::String; "quoted")]
    #[test_case("\"1.5\"", ValueType::String; "quoted_decimal")]
    #[test_case("1.5", ValueType::Double; "decimal")]
    #[test_case("True", ValueType::Bool; "true_literal")]
    #[test_case("False", ValueType::Bool; "false_literal")]
    #[test_case("42", ValueType::Int; "integer")]
    #[test_case("x", ValueType::Int; "identifier")]
    fn test_infer(text: &str, expected: ValueType) {
        assert_eq!(ValueType::infer(text), expected);
    }

    #[test]
    fn test_conforms_by_containment() {
        assert!(ValueType::Int.conforms_to("int"));
        assert!(ValueType::Int.conforms_to("int[]"));
        assert!(!ValueType::Int.conforms_to("double"));
        assert!(ValueType::String.conforms_to("string"));
    }

    #[test]
    fn test_check_arguments() {
        let formals = ["int", "string"];
        assert_eq!(
            check_arguments(formals.iter().copied(), &["1", "\"a\""]),
            ArgumentCheck::Conforms
        );
        assert_eq!(
            check_arguments(formals.iter().copied(), &["1"]),
            ArgumentCheck::CountMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            check_arguments(formals.iter().copied(), &["1.5", "2"]),
            ArgumentCheck::TypeMismatch {
                index: 0,
                expected: "int".to_string(),
                found: ValueType::Double
            }
        );
    }
}
