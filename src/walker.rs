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

//! Depth-first traversal of the syntax tree.
//!
//! Every node gets exactly one `enter` call before its children and one
//! `exit` call after them. The program itself is bracketed by
//! `enter_program` and `exit_program`.

use crate::ast::{Node, Program};

/// Receives traversal events.
pub trait Listener {
    /// The error that aborts a traversal.
    type Error;

    /// Called once before any node.
    fn enter_program(&mut self, _program: &Program) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after every node.
    fn exit_program(&mut self, _program: &Program) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the children of `node`.
    fn enter(&mut self, node: &Node) -> Result<(), Self::Error>;

    /// Called after the children of `node`.
    fn exit(&mut self, node: &Node) -> Result<(), Self::Error>;
}

/// Walk a node and its descendants.
pub fn walk<L: Listener>(node: &Node, listener: &mut L) -> Result<(), L::Error> {
    listener.enter(node)?;
    for child in &node.children {
        walk(child, listener)?;
    }
    listener.exit(node)
}

/// Walk a whole program.
pub fn walk_program<L: Listener>(program: &Program, listener: &mut L) -> Result<(), L::Error> {
    listener.enter_program(program)?;
    for item in &program.items {
        walk(item, listener)?;
    }
    listener.exit_program(program)
}
