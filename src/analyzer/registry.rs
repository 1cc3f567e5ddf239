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
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Scope registry for the semantic analyzer.
//!
//! The registry owns every scope table created during a pass, remembers the
//! order in which scopes were discovered, and keeps the stack of scopes that
//! are currently open. Tables are never dropped while the registry lives, so
//! the end-of-run report can list closed scopes too.

use super::scope::{ScopeId, ScopeTable};
use super::symbol::SymbolDescriptor;
use crate::error::Position;
use std::collections::HashMap;

/// The outcome of [`ScopeRegistry::declare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// The key was free and now holds the descriptor.
    Declared,
    /// The key was taken. The existing descriptor is returned and the new
    /// one was stored under `alias`.
    Conflict {
        existing: SymbolDescriptor,
        alias: String,
    },
}

impl Declaration {
    /// Check if the declaration collided with an existing key.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Declaration::Conflict { .. })
    }
}

/// Build the key a conflicting declaration is stored under.
pub fn alias_key(key: &str, position: Position) -> String {
    format!("{}_{}_{}", key, position.line, position.column)
}

/// Find a free alias for a conflicting declaration of `key`.
///
/// Several conflicts at one position get a counter suffix
/// (`var_x_3_4`, `var_x_3_4_2`, `var_x_3_4_3`).
fn free_alias(table: &ScopeTable, key: &str, position: Position) -> String {
    let base = alias_key(key, position);
    let mut alias = base.clone();
    let mut counter = 2;
    while table.contains(&alias) {
        alias = format!("{base}_{counter}");
        counter += 1;
    }
    alias
}

/// All scope tables of one pass.
#[derive(Debug, Clone)]
pub struct ScopeRegistry {
    /// Every table ever created, by scope id.
    tables: HashMap<ScopeId, ScopeTable>,
    /// Scope ids in discovery order (global first).
    order: Vec<ScopeId>,
    /// The open scopes (innermost last, global at the bottom).
    stack: Vec<ScopeId>,
}

impl ScopeRegistry {
    /// Create a registry holding only the global scope.
    pub fn new() -> Self {
        let global = ScopeId::global();
        let mut tables = HashMap::new();
        tables.insert(global.clone(), ScopeTable::new());
        Self {
            tables,
            order: vec![global.clone()],
            stack: vec![global],
        }
    }

    /// Create the table for `id` if needed and record its discovery.
    fn ensure_table(&mut self, id: &ScopeId) -> &mut ScopeTable {
        if !self.tables.contains_key(id) {
            self.order.push(id.clone());
        }
        self.tables.entry(id.clone()).or_default()
    }

    /// Open a scope, creating its table on first use.
    pub fn enter(&mut self, id: ScopeId) {
        log::debug!("enter scope {} (depth {})", id, self.stack.len() + 1);
        self.ensure_table(&id);
        self.stack.push(id);
    }

    /// Close the innermost scope.
    ///
    /// The global scope is never popped; an attempt returns `None`.
    pub fn exit(&mut self) -> Option<ScopeId> {
        if self.stack.len() > 1 {
            let id = self.stack.pop();
            if let Some(id) = &id {
                log::debug!("exit scope {} (depth {})", id, self.stack.len());
            }
            id
        } else {
            log::warn!("attempt to exit the global scope ignored");
            None
        }
    }

    /// Get the innermost open scope.
    pub fn current(&self) -> &ScopeId {
        // The stack always holds the global scope.
        &self.stack[self.stack.len() - 1]
    }

    /// Get the number of open scopes, global included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if only the global scope is open.
    pub fn is_global_scope(&self) -> bool {
        self.stack.len() == 1
    }

    /// Declare a symbol in `scope` under `key`.
    ///
    /// An existing entry is never replaced. On a collision the new
    /// descriptor is stored under a key suffixed with `position`, so both
    /// stay visible in the report.
    pub fn declare(
        &mut self,
        scope: &ScopeId,
        key: &str,
        symbol: SymbolDescriptor,
        position: Position,
    ) -> Declaration {
        log::trace!("declare {} in {}", key, scope);
        let table = self.ensure_table(scope);
        match table.define(key, symbol.clone()) {
            Ok(()) => Declaration::Declared,
            Err(existing) => {
                let alias = free_alias(table, key, position);
                let stored = table.define(&alias, symbol);
                debug_assert!(stored.is_ok(), "alias {alias} was free");
                Declaration::Conflict { existing, alias }
            }
        }
    }

    /// Declare a symbol in the innermost open scope.
    pub fn declare_current(
        &mut self,
        key: &str,
        symbol: SymbolDescriptor,
        position: Position,
    ) -> Declaration {
        let scope = self.current().clone();
        self.declare(&scope, key, symbol, position)
    }

    /// Look up `key` in exactly one scope. Ancestors are not searched.
    pub fn lookup(&self, scope: &ScopeId, key: &str) -> Option<&SymbolDescriptor> {
        self.tables.get(scope).and_then(|table| table.lookup(key))
    }

    /// Look up `key` in the open scopes, innermost first.
    pub fn resolve_in_stack(&self, key: &str) -> Option<&SymbolDescriptor> {
        self.stack
            .iter()
            .rev()
            .find_map(|scope| self.lookup(scope, key))
    }

    /// Get the table of a scope.
    pub fn table(&self, scope: &ScopeId) -> Option<&ScopeTable> {
        self.tables.get(scope)
    }

    /// Iterate over all scopes in discovery order.
    pub fn scopes(&self) -> impl Iterator<Item = (&ScopeId, &ScopeTable)> {
        self.order
            .iter()
            .filter_map(|id| self.tables.get(id).map(|table| (id, table)))
    }

    /// Get the scope ids in discovery order.
    pub fn discovery_order(&self) -> &[ScopeId] {
        &self.order
    }
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn test_new_registry() {
        let registry = ScopeRegistry::new();
        assert!(registry.current().is_global());
        assert_eq!(registry.depth(), 1);
        assert_eq!(registry.discovery_order(), &[ScopeId::global()]);
        assert!(registry.table(&ScopeId::global()).unwrap().is_empty());
    }

    #[test]
    fn test_enter_is_idempotent_for_order() {
        let mut registry = ScopeRegistry::new();
        registry.enter(ScopeId::class("A"));
        registry.exit();
        registry.enter(ScopeId::class("A"));
        registry.exit();
        assert_eq!(
            registry.discovery_order(),
            &[ScopeId::global(), ScopeId::class("A")]
        );
    }

    #[test]
    fn test_exit_never_pops_global() {
        let mut registry = ScopeRegistry::new();
        assert_eq!(registry.exit(), None);
        assert_eq!(registry.depth(), 1);

        registry.enter(ScopeId::while_block(1, 2));
        assert_eq!(registry.exit(), Some(ScopeId::while_block(1, 2)));
        assert!(registry.is_global_scope());
    }

    #[test]
    fn test_scope_nesting() {
        let mut registry = ScopeRegistry::new();
        registry.enter(ScopeId::class("A"));
        registry.enter(ScopeId::method("m()"));
        assert_eq!(registry.current(), &ScopeId::method("m()"));
        assert_eq!(registry.depth(), 3);
        registry.exit();
        assert_eq!(registry.current(), &ScopeId::class("A"));
    }

    #[test]
    fn test_declare_then_lookup() {
        let mut registry = ScopeRegistry::new();
        let symbol = SymbolDescriptor::class("A", None, None);
        let outcome = registry.declare(&ScopeId::global(), "class_A", symbol.clone(), pos(1, 0));
        assert_eq!(outcome, Declaration::Declared);
        assert_eq!(registry.lookup(&ScopeId::global(), "class_A"), Some(&symbol));
    }

    #[test]
    fn test_declare_conflict_stores_alias() {
        let mut registry = ScopeRegistry::new();
        let first = SymbolDescriptor::class("A", None, None);
        let second = SymbolDescriptor::class("A", Some("public"), None);
        registry.declare(&ScopeId::global(), "class_A", first.clone(), pos(1, 0));

        let outcome = registry.declare(&ScopeId::global(), "class_A", second.clone(), pos(5, 2));
        assert_eq!(
            outcome,
            Declaration::Conflict {
                existing: first.clone(),
                alias: "class_A_5_2".to_string(),
            }
        );
        assert_eq!(registry.lookup(&ScopeId::global(), "class_A"), Some(&first));
        assert_eq!(registry.lookup(&ScopeId::global(), "class_A_5_2"), Some(&second));
    }

    #[test]
    fn test_repeated_conflicts_at_one_position_are_all_kept() {
        let mut registry = ScopeRegistry::new();
        let global = ScopeId::global();
        let symbols: Vec<_> = (0..4)
            .map(|i| SymbolDescriptor::variable("x", 3).with_array_length(Some(i)))
            .collect();
        let aliases: Vec<_> = symbols
            .iter()
            .map(|symbol| registry.declare(&global, "var_x", symbol.clone(), pos(3, 4)))
            .filter_map(|outcome| match outcome {
                Declaration::Conflict { alias, .. } => Some(alias),
                Declaration::Declared => None,
            })
            .collect();

        assert_eq!(aliases, vec!["var_x_3_4", "var_x_3_4_2", "var_x_3_4_3"]);
        assert_eq!(registry.table(&global).unwrap().len(), 4);
        assert_eq!(registry.lookup(&global, "var_x"), Some(&symbols[0]));
        assert_eq!(registry.lookup(&global, "var_x_3_4_3"), Some(&symbols[3]));
    }

    #[test]
    fn test_lookup_is_scope_local() {
        let mut registry = ScopeRegistry::new();
        registry.declare_current("var_x", SymbolDescriptor::variable("x", 1), pos(1, 0));
        registry.enter(ScopeId::if_block(2, 4));
        assert!(registry.lookup(registry.current(), "var_x").is_none());
        assert!(registry.resolve_in_stack("var_x").is_some());
    }

    #[test]
    fn test_declare_into_unknown_scope_records_discovery() {
        let mut registry = ScopeRegistry::new();
        let scope = ScopeId::from("method_helper()");
        registry.declare(&scope, "var_t", SymbolDescriptor::variable("t", 3), pos(3, 4));
        assert_eq!(registry.discovery_order().last(), Some(&scope));
        assert_eq!(registry.depth(), 1);
    }
}
