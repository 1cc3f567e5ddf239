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

//! Syntax tree definitions consumed by the semantic analysis pass.
//!
//! The parser builds these nodes; this crate only reads them. Every node
//! carries its construct kind, the span of its first and last token, and
//! its children in source order.

mod decl;
mod expr;
mod stmt;

pub use decl::*;
pub use expr::*;
pub use stmt::*;

use crate::error::Span;

/// A complete Japy program.
#[derive(Debug, Clone)]
pub struct Program {
    /// The name of the input the program was parsed from.
    pub source_name: String,
    /// Top-level nodes (usually class declarations).
    pub items: Vec<Node>,
}

impl Program {
    /// Create a new empty program.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            items: Vec::new(),
        }
    }

    /// Add a top-level node to the program.
    pub fn add_item(&mut self, item: Node) {
        self.items.push(item);
    }

    /// Builder-style variant of [`Program::add_item`].
    pub fn with_item(mut self, item: Node) -> Self {
        self.items.push(item);
        self
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// The construct this node represents.
    pub kind: NodeKind,
    /// The source span of this node.
    pub span: Span,
    /// Child nodes in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new leaf node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the children of this node.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Count this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// The construct kind of a node.
///
/// Only a handful of kinds carry semantic rules; everything else the grammar
/// produces is folded into [`NodeKind::Block`], [`NodeKind::Expression`] or
/// [`NodeKind::Other`].
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A class declaration. Children are the class members.
    ClassDecl(ClassDecl),

    /// A field declaration inside a class.
    FieldDecl(FieldDecl),

    /// A method declaration. Children are the body statements.
    MethodDecl(MethodDecl),

    /// A local variable definition statement.
    VarDef(VarDef),

    /// An assignment statement.
    Assignment(Assignment),

    /// An if statement whose branches are all blocks.
    /// Children are the then-branch and, when present, the else-branch.
    ClosedConditional(Conditional),

    /// A while loop whose body is a block.
    ClosedLoop,

    /// A dangling-else form of an if statement.
    OpenConditional,

    /// A while loop whose body is an open statement.
    OpenLoop,

    /// A braced statement block.
    Block,

    /// A standalone expression.
    Expression(Expr),

    /// Any other statement (return, break, continue, write, ...).
    Other,
}
