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

//! Semantic analyzer module.
//!
//! This module performs semantic analysis on the syntax tree:
//! - Scope tracking (global, class, method, if/else, while)
//! - Symbol registration with duplicate detection
//! - Method declaration checks (return type, parameter count)
//! - Call argument checks in variable initializers
//! - Array index checks in indexed assignments
//!
//! The rule checks live in extension traits implemented for [`Analyzer`]:
//! [`DeclarationAnalyzer`], [`StatementAnalyzer`] and
//! [`ControlFlowAnalyzer`].

mod context;
mod control_flow;
mod declarations;
mod options;
mod registry;
mod scope;
mod statements;
mod symbol;
mod type_check;

pub use context::AnalysisContext;
pub use control_flow::{ControlFlowAnalyzer, IF_MARKER_KEY, LOOP_MARKER_KEY};
pub use declarations::{method_signature, DeclarationAnalyzer};
pub use options::{
    AnalyzerOptions, ReturnTypeRule, DEFAULT_CALL_TARGET_PREFIX, DEFAULT_EXPECTED_RETURN_TYPE,
};
pub use registry::{alias_key, Declaration, ScopeRegistry};
pub use scope::{ScopeId, ScopeKind, ScopeTable, GLOBAL_SCOPE};
pub use statements::StatementAnalyzer;
pub use symbol::{ParameterDescriptor, SymbolDescriptor, SymbolKind, DEFAULT_ACCESS};
pub use type_check::{check_arguments, ArgumentCheck, ValueType};

use crate::ast::{Node, NodeKind, Program};
use crate::error::{Diagnostics, Result, SemanticError};
use crate::report::Reporter;
use crate::walker::{walk_program, Listener};
use std::io::{self, Write};

/// The semantic analyzer.
///
/// One analyzer runs one pass. It owns the scope registry, the diagnostic
/// reporter and the traversal state.
pub struct Analyzer<W: Write> {
    /// The scope tables.
    pub registry: ScopeRegistry,
    /// Diagnostic output.
    reporter: Reporter<W>,
    /// Traversal state.
    context: AnalysisContext,
    /// Pass configuration.
    options: AnalyzerOptions,
}

impl<W: Write> Analyzer<W> {
    /// Create an analyzer with default options.
    pub fn new(sink: W) -> Self {
        Self::with_options(AnalyzerOptions::default(), sink)
    }

    /// Create an analyzer with the given options.
    pub fn with_options(options: AnalyzerOptions, sink: W) -> Self {
        Self {
            registry: ScopeRegistry::new(),
            reporter: Reporter::new(sink),
            context: AnalysisContext::default(),
            options,
        }
    }

    /// Analyze a program, writing diagnostics and the report to the sink.
    pub fn analyze(&mut self, program: &Program) -> Result<()> {
        log::debug!(
            "analyzing {} ({} top-level nodes)",
            program.source_name,
            program.items.len()
        );
        walk_program(program, self)?;
        Ok(())
    }

    /// Report a diagnostic.
    pub fn error(&mut self, error: SemanticError) -> io::Result<()> {
        self.reporter.emit(error)
    }

    /// Get the diagnostics emitted so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        self.reporter.diagnostics()
    }

    /// Check if any diagnostics were emitted.
    pub fn has_errors(&self) -> bool {
        self.reporter.diagnostics().has_errors()
    }

    /// Get the number of diagnostics emitted.
    pub fn error_count(&self) -> usize {
        self.reporter.diagnostics().len()
    }

    /// Get the pass configuration.
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Consume the analyzer, returning the sink, the diagnostics and the registry.
    pub fn into_parts(self) -> (W, Diagnostics, ScopeRegistry) {
        let (sink, diagnostics) = self.reporter.into_parts();
        (sink, diagnostics, self.registry)
    }
}

impl<W: Write> Listener for Analyzer<W> {
    type Error = io::Error;

    fn enter_program(&mut self, program: &Program) -> io::Result<()> {
        self.context.source_name = program.source_name.clone();
        Ok(())
    }

    fn exit_program(&mut self, _program: &Program) -> io::Result<()> {
        self.reporter
            .write_report(&self.context.source_name, &self.registry)
    }

    fn enter(&mut self, node: &Node) -> io::Result<()> {
        match &node.kind {
            NodeKind::ClassDecl(decl) => self.enter_class(decl, &node.span),
            NodeKind::FieldDecl(decl) => self.declare_field(decl, &node.span),
            NodeKind::MethodDecl(decl) => self.enter_method(decl, &node.span),
            NodeKind::VarDef(def) => self.analyze_var_def(def, &node.span),
            NodeKind::Assignment(assign) => self.analyze_assignment(assign, &node.span),
            NodeKind::ClosedConditional(cond) => {
                self.enter_conditional(cond, &node.span);
                Ok(())
            }
            NodeKind::ClosedLoop => {
                self.enter_loop(&node.span);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn exit(&mut self, node: &Node) -> io::Result<()> {
        match &node.kind {
            NodeKind::ClassDecl(_) => self.exit_class(),
            NodeKind::MethodDecl(_) => self.exit_method(),
            NodeKind::ClosedConditional(cond) => self.exit_conditional(cond),
            NodeKind::ClosedLoop => self.exit_loop(),
            _ => {}
        }
        Ok(())
    }
}

/// The result of a completed pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Diagnostics in emission order.
    pub diagnostics: Diagnostics,
    /// The final scope tables.
    pub registry: ScopeRegistry,
    /// Everything written during the pass: diagnostic lines, then the report.
    pub output: String,
}

/// Analyze a program with default options.
pub fn analyze(program: &Program) -> Result<Analysis> {
    analyze_with_options(program, AnalyzerOptions::default())
}

/// Analyze a program, collecting the output in memory.
pub fn analyze_with_options(program: &Program, options: AnalyzerOptions) -> Result<Analysis> {
    let mut analyzer = Analyzer::with_options(options, Vec::new());
    analyzer.analyze(program)?;
    let (sink, diagnostics, registry) = analyzer.into_parts();
    Ok(Analysis {
        diagnostics,
        registry,
        output: String::from_utf8_lossy(&sink).into_owned(),
    })
}

/// Analyze a program, writing the output to `sink` as it is produced.
pub fn analyze_to<W: Write>(
    program: &Program,
    options: AnalyzerOptions,
    sink: W,
) -> Result<(Diagnostics, ScopeRegistry)> {
    let mut analyzer = Analyzer::with_options(options, sink);
    analyzer.analyze(program)?;
    let (_, diagnostics, registry) = analyzer.into_parts();
    Ok((diagnostics, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ClassDecl, Conditional, Expr, FieldDecl, MethodDecl, VarDef};
    use crate::error::{ErrorCode, Position, Span};

    fn class(name: &str, line: usize, end: usize) -> Node {
        Node::new(
            NodeKind::ClassDecl(ClassDecl::new(name)),
            Span::lines(line, 0, end),
        )
    }

    fn method(decl: MethodDecl, line: usize, end: usize) -> Node {
        Node::new(NodeKind::MethodDecl(decl), Span::lines(line, 4, end))
    }

    fn options() -> AnalyzerOptions {
        AnalyzerOptions::new().with_return_type_rule(ReturnTypeRule::Disabled)
    }

    // ========================================
    // Declaration Tests
    // ========================================

    #[test]
    fn test_valid_class_with_members() {
        let program = Program::new("ok.japy").with_item(
            class("Main", 1, 10)
                .with_child(Node::new(
                    NodeKind::FieldDecl(FieldDecl::new("count", "int").with_access("private")),
                    Span::at(2, 4),
                ))
                .with_child(method(MethodDecl::new("run", "int").with_param("n", "int"), 3, 9)),
        );
        let analysis = analyze_with_options(&program, options()).unwrap();
        assert!(analysis.diagnostics.is_empty());

        let class_scope = ScopeId::class("Main");
        let field = analysis.registry.lookup(&class_scope, "field_count").unwrap();
        assert_eq!(field.access_modifier.as_deref(), Some("private"));
        assert!(analysis
            .registry
            .lookup(&class_scope, "method_run(int)")
            .is_some());
        assert_eq!(
            analysis.registry.discovery_order(),
            &[
                ScopeId::global(),
                ScopeId::class("Main"),
                ScopeId::method("run(int)")
            ]
        );
    }

    #[test]
    fn test_duplicate_class() {
        let program = Program::new("dup.japy")
            .with_item(class("A", 1, 2))
            .with_item(class("A", 3, 4));
        let analysis = analyze_with_options(&program, options()).unwrap();
        assert_eq!(analysis.diagnostics.count(ErrorCode::ClassAlreadyDefined), 1);
        let global = ScopeId::global();
        assert!(analysis.registry.lookup(&global, "class_A").is_some());
        assert!(analysis.registry.lookup(&global, "class_A_3_0").is_some());
        assert!(analysis.registry.is_global_scope());
    }

    #[test]
    fn test_duplicate_method_keeps_stack_balanced() {
        let program = Program::new("dup.japy").with_item(
            class("A", 1, 20)
                .with_child(method(MethodDecl::new("f", "int").with_param("a", "int"), 2, 4))
                .with_child(method(MethodDecl::new("f", "int").with_param("b", "int"), 5, 7))
                .with_child(Node::new(
                    NodeKind::FieldDecl(FieldDecl::new("after", "int")),
                    Span::at(8, 4),
                )),
        );
        let analysis = analyze_with_options(&program, options()).unwrap();
        assert_eq!(analysis.diagnostics.count(ErrorCode::MethodAlreadyDefined), 1);
        // The field after the duplicate still lands in the class scope.
        assert!(analysis
            .registry
            .lookup(&ScopeId::class("A"), "field_after")
            .is_some());
        assert!(analysis.registry.is_global_scope());
    }

    #[test]
    fn test_default_return_type_rule() {
        let program = Program::new("ret.japy").with_item(
            class("A", 1, 5).with_child(method(MethodDecl::new("f", "int"), 2, 4)),
        );
        let analysis = analyze(&program).unwrap();
        assert_eq!(analysis.diagnostics.count(ErrorCode::ReturnTypeMismatch), 1);
        assert!(analysis
            .output
            .starts_with("Error210: in line [2:4], ReturnType of this method must be [int]\n"));
    }

    // ========================================
    // Statement Tests
    // ========================================

    #[test]
    fn test_call_arity_aborts_statement() {
        let mut analyzer = Analyzer::with_options(options(), Vec::new());
        analyzer.registry.declare_current(
            "function_sum",
            SymbolDescriptor::method(
                "sum",
                "int",
                None,
                vec![
                    ParameterDescriptor::new(1, "a", "int"),
                    ParameterDescriptor::new(2, "b", "int"),
                ],
            ),
            Position::new(1, 0),
        );
        let def = VarDef::new("x")
            .with_initializer(Expr::new("sum(1)", Position::new(4, 8)))
            .with_initializer(Expr::new("sum(1.5,2)", Position::new(4, 20)));
        let program = Program::new("call.japy")
            .with_item(Node::new(NodeKind::VarDef(def), Span::at(4, 4)));
        analyzer.analyze(&program).unwrap();

        assert_eq!(analyzer.error_count(), 1);
        assert_eq!(
            analyzer.diagnostics().count(ErrorCode::WrongNumberOfArguments),
            1
        );
    }

    // ========================================
    // Control Flow Tests
    // ========================================

    #[test]
    fn test_if_else_scopes() {
        let body = Node::new(
            NodeKind::VarDef(VarDef::new("x")),
            Span::at(3, 8),
        );
        let program = Program::new("if.japy").with_item(
            Node::new(
                NodeKind::ClosedConditional(Conditional::with_else(5)),
                Span::lines(2, 4, 7),
            )
            .with_child(body),
        );
        let analysis = analyze_with_options(&program, options()).unwrap();
        let order: Vec<_> = analysis
            .registry
            .discovery_order()
            .iter()
            .map(ScopeId::as_str)
            .collect();
        assert_eq!(order, vec!["global", "if_2_7", "else_2_7"]);
        assert!(analysis
            .registry
            .lookup(&ScopeId::if_block(2, 7), IF_MARKER_KEY)
            .is_some());
        assert!(analysis
            .registry
            .table(&ScopeId::else_block(2, 7))
            .unwrap()
            .lookup("var_x")
            .is_some());
        // The else-branch marker is never stored.
        assert_eq!(
            analysis.registry.table(&ScopeId::else_block(2, 7)).unwrap().len(),
            1
        );
        assert!(analysis.registry.is_global_scope());
    }
}
