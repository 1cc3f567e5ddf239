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

//! Japy Semantic Analysis Library
//!
//! This library provides the semantic analysis pass of the Japy compiler
//! front end. It takes the syntax tree produced by the parser, builds one
//! symbol table per scope, checks declarations, calls and array indexing,
//! and writes diagnostics plus a symbol report.
//!
//! # Modules
//!
//! - [`error`] - Diagnostics and error types
//! - [`ast`] - Syntax tree definitions handed over by the parser
//! - [`walker`] - Depth-first traversal of the syntax tree
//! - [`analyzer`] - Scopes, symbol tables and the rule checks
//! - [`report`] - Diagnostic output and the end-of-run report
//!
//! # Example
//!
//! ```
//! use japy_sema::ast::{ClassDecl, Node, NodeKind, Program};
//! use japy_sema::Span;
//!
//! let program = Program::new("main.japy").with_item(Node::new(
//!     NodeKind::ClassDecl(ClassDecl::new("Main")),
//!     Span::lines(1, 0, 3),
//! ));
//!
//! let analysis = japy_sema::analyze(&program).unwrap();
//! assert!(analysis.diagnostics.is_empty());
//! assert!(analysis.output.contains("key = class_Main"));
//! ```

pub mod analyzer;
pub mod ast;
pub mod error;
pub mod report;
pub mod walker;

// Re-export commonly used types
pub use analyzer::{analyze, analyze_to, analyze_with_options, Analysis, Analyzer, AnalyzerOptions};
pub use ast::{Node, NodeKind, Program};
pub use error::{
    Diagnostics, DiagnosticKind, Error, ErrorCode, Position, Result, SemanticError, Span,
};

/// The version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the language this pass analyzes.
pub const LANGUAGE: &str = "Japy";
