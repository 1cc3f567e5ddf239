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

//! Declaration analysis for the semantic analyzer.
//!
//! This module provides declaration-related analysis:
//! - Class declarations (registered in the global scope)
//! - Field declarations
//! - Method declarations (signature keys, return type and parameter count)

use super::registry::Declaration;
use super::scope::ScopeId;
use super::symbol::{ParameterDescriptor, SymbolDescriptor};
use super::Analyzer;
use crate::ast::{ClassDecl, FieldDecl, MethodDecl};
use crate::error::{SemanticError, Span};
use std::io::{self, Write};

/// Build the signature of a method: its name followed by the parameter
/// types in declaration order, e.g. `sum(int,double)`.
pub fn method_signature(name: &str, parameters: &[ParameterDescriptor]) -> String {
    let types: Vec<&str> = parameters.iter().map(|p| p.param_type.as_str()).collect();
    format!("{}({})", name, types.join(","))
}

/// Extension trait for declaration analysis.
pub trait DeclarationAnalyzer {
    /// Register a class and open its scope.
    fn enter_class(&mut self, decl: &ClassDecl, span: &Span) -> io::Result<()>;

    /// Close the scope of a class.
    fn exit_class(&mut self);

    /// Register a field in the innermost scope.
    fn declare_field(&mut self, decl: &FieldDecl, span: &Span) -> io::Result<()>;

    /// Register a method, check it and open its scope.
    fn enter_method(&mut self, decl: &MethodDecl, span: &Span) -> io::Result<()>;

    /// Close the scope of a method, if its entry opened one.
    fn exit_method(&mut self);
}

impl<W: Write> DeclarationAnalyzer for Analyzer<W> {
    fn enter_class(&mut self, decl: &ClassDecl, span: &Span) -> io::Result<()> {
        let key = format!("class_{}", decl.name);
        let symbol = SymbolDescriptor::class(
            &decl.name,
            decl.access_modifier.as_deref(),
            decl.parent.as_deref(),
        );

        let outcome = self
            .registry
            .declare(&ScopeId::global(), &key, symbol, span.start);
        if outcome.is_conflict() {
            self.error(SemanticError::ClassAlreadyDefined {
                name: decl.name.clone(),
                position: span.start,
            })?;
        }

        // A duplicate class still gets a scope; its members share the table
        // of the first declaration.
        self.registry.enter(ScopeId::class(&decl.name));
        Ok(())
    }

    fn exit_class(&mut self) {
        self.registry.exit();
    }

    fn declare_field(&mut self, decl: &FieldDecl, span: &Span) -> io::Result<()> {
        let key = format!("field_{}", decl.name);
        let symbol = SymbolDescriptor::field(
            &decl.name,
            &decl.field_type,
            decl.access_modifier.as_deref(),
        );

        if self
            .registry
            .declare_current(&key, symbol, span.start)
            .is_conflict()
        {
            self.error(SemanticError::FieldAlreadyDefined {
                name: decl.name.clone(),
                position: span.start,
            })?;
        }
        Ok(())
    }

    fn enter_method(&mut self, decl: &MethodDecl, span: &Span) -> io::Result<()> {
        let parameters: Vec<ParameterDescriptor> = if decl.has_params() {
            decl.parameters()
                .map(|(index, name, ty)| ParameterDescriptor::new(index, name, ty))
                .collect()
        } else {
            Vec::new()
        };
        let signature = method_signature(&decl.name, &parameters);
        let key = format!("method_{signature}");
        let symbol = SymbolDescriptor::method(
            &decl.name,
            &decl.return_type,
            decl.access_modifier.as_deref(),
            parameters,
        );
        let position = span.start;

        if let Declaration::Conflict { .. } = self.registry.declare_current(&key, symbol, position) {
            self.context.enter_method(false);
            return self.error(SemanticError::MethodAlreadyDefined {
                name: decl.name.clone(),
                position,
            });
        }

        self.registry.enter(ScopeId::method(&signature));
        self.context.enter_method(true);

        let violation = self
            .options
            .return_type_rule
            .violation(&decl.return_type)
            .map(str::to_string);
        if let Some(expected) = violation {
            self.error(SemanticError::ReturnTypeMismatch {
                method: decl.name.clone(),
                expected,
                found: decl.return_type.clone(),
                position,
            })?;
        }

        let captured = decl.identifiers.len().saturating_sub(1);
        if decl.param_names.len() != captured {
            self.error(SemanticError::ParameterCountMismatch {
                method: decl.name.clone(),
                declared: decl.param_names.len(),
                captured,
                position,
            })?;
        }
        Ok(())
    }

    fn exit_method(&mut self) {
        if self.context.exit_method() {
            self.registry.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerOptions, ReturnTypeRule};
    use crate::error::{ErrorCode, Position};

    fn analyzer() -> Analyzer<Vec<u8>> {
        Analyzer::with_options(
            AnalyzerOptions::new().with_return_type_rule(ReturnTypeRule::Disabled),
            Vec::new(),
        )
    }

    fn output(analyzer: Analyzer<Vec<u8>>) -> String {
        let (sink, _, _) = analyzer.into_parts();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn test_method_signature() {
        let params = vec![
            ParameterDescriptor::new(1, "a", "int"),
            ParameterDescriptor::new(2, "b", "double"),
        ];
        assert_eq!(method_signature("sum", &params), "sum(int,double)");
        assert_eq!(method_signature("run", &[]), "run()");
    }

    #[test]
    fn test_class_inherits() {
        let mut analyzer = analyzer();
        analyzer
            .enter_class(&ClassDecl::new("Dog").with_parent("Animal"), &Span::at(1, 0))
            .unwrap();
        let dog = analyzer
            .registry
            .lookup(&ScopeId::global(), "class_Dog")
            .unwrap();
        assert_eq!(dog.inherits.as_deref(), Some("class_Animal"));
        assert_eq!(dog.access_modifier.as_deref(), Some("default"));
        assert_eq!(analyzer.registry.current(), &ScopeId::class("Dog"));
    }

    #[test]
    fn test_duplicate_class_opens_scope() {
        let mut analyzer = analyzer();
        analyzer.enter_class(&ClassDecl::new("A"), &Span::at(1, 0)).unwrap();
        analyzer.exit_class();
        analyzer.enter_class(&ClassDecl::new("A"), &Span::at(6, 2)).unwrap();
        assert_eq!(analyzer.registry.depth(), 2);
        analyzer.exit_class();
        assert_eq!(
            output(analyzer),
            "Error102: in line [6:2], class [A] has been defined already.\n"
        );
    }

    #[test]
    fn test_duplicate_field() {
        let mut analyzer = analyzer();
        let field = FieldDecl::new("x", "int");
        analyzer.declare_field(&field, &Span::at(2, 4)).unwrap();
        analyzer.declare_field(&field, &Span::at(3, 4)).unwrap();
        assert_eq!(analyzer.diagnostics().count(ErrorCode::FieldAlreadyDefined), 1);
        assert!(analyzer
            .registry
            .lookup(&ScopeId::global(), "field_x_3_4")
            .is_some());
    }

    #[test]
    fn test_overloads_by_parameter_type() {
        let mut analyzer = analyzer();
        let span = Span::at(2, 4);
        analyzer
            .enter_method(&MethodDecl::new("f", "int").with_param("a", "int"), &span)
            .unwrap();
        analyzer.exit_method();
        analyzer
            .enter_method(&MethodDecl::new("f", "int").with_param("a", "bool"), &span)
            .unwrap();
        analyzer.exit_method();

        assert!(!analyzer.has_errors());
        let global = ScopeId::global();
        assert!(analyzer.registry.lookup(&global, "method_f(int)").is_some());
        assert!(analyzer.registry.lookup(&global, "method_f(bool)").is_some());
    }

    #[test]
    fn test_duplicate_method_opens_no_scope() {
        let mut analyzer = analyzer();
        let decl = MethodDecl::new("f", "int").with_param("a", "int");
        analyzer.enter_method(&decl, &Span::at(2, 4)).unwrap();
        analyzer.exit_method();
        analyzer.enter_method(&decl, &Span::at(5, 4)).unwrap();
        assert_eq!(analyzer.registry.depth(), 1);
        analyzer.exit_method();
        assert_eq!(analyzer.registry.depth(), 1);
        assert_eq!(
            analyzer.diagnostics().count(ErrorCode::MethodAlreadyDefined),
            1
        );
    }

    #[test]
    fn test_return_type_rule() {
        let mut analyzer = Analyzer::with_options(
            AnalyzerOptions::new().with_return_type_rule(ReturnTypeRule::ExpectToken("void".into())),
            Vec::new(),
        );
        analyzer
            .enter_method(&MethodDecl::new("ok", "void"), &Span::at(2, 4))
            .unwrap();
        analyzer.exit_method();
        analyzer
            .enter_method(&MethodDecl::new("bad", "int"), &Span::at(4, 4))
            .unwrap();
        analyzer.exit_method();

        let errors: Vec<_> = analyzer.diagnostics().iter().cloned().collect();
        assert_eq!(
            errors,
            vec![SemanticError::ReturnTypeMismatch {
                method: "bad".to_string(),
                expected: "void".to_string(),
                found: "int".to_string(),
                position: Position::new(4, 4),
            }]
        );
    }

    #[test]
    fn test_parameter_count_mismatch() {
        let mut analyzer = analyzer();
        let decl = MethodDecl::new("f", "int")
            .with_param("a", "int")
            .with_identifier("b");
        analyzer.enter_method(&decl, &Span::at(3, 4)).unwrap();
        analyzer.exit_method();
        assert_eq!(
            output(analyzer),
            "Error: Line 3:4, Number of parameters in method call does not match \
             with formal parameter count in method definition.\n"
        );
    }
}
