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

//! Diagnostic output and the end-of-run symbol report.
//!
//! Diagnostics are written as soon as a rule raises them. The report lists
//! every scope in discovery order with its entries sorted by key:
//!
//! ```text
//! ------------------ program:"main.japy" ------------------
//! -------------------- global --------------------
//! key = class_Main, value = {kind='class', name='Main', accessModifier='default'}
//! ------------------------------------------------------
//! ```

use crate::analyzer::{ScopeId, ScopeKind, ScopeRegistry, ScopeTable};
use crate::error::{Diagnostics, SemanticError};
use std::fmt;
use std::io::{self, Write};

/// Printed for scopes that have nothing to list.
pub const NO_ENTRIES_BANNER: &str = "                    !NO KEY FOUND!";

/// Closes every scope section.
pub const SECTION_DIVIDER: &str = "------------------------------------------------------";

/// Writes diagnostics to a sink and keeps a copy of each.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    sink: W,
    diagnostics: Diagnostics,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Write a diagnostic line immediately and record it.
    pub fn emit(&mut self, error: SemanticError) -> io::Result<()> {
        log::debug!("diagnostic {:?} at {}", error.code(), error.position());
        writeln!(self.sink, "{error}")?;
        self.diagnostics.push(error);
        Ok(())
    }

    /// Write the end-of-run report.
    pub fn write_report(&mut self, source_name: &str, registry: &ScopeRegistry) -> io::Result<()> {
        write!(self.sink, "{}", Report::new(source_name, registry))?;
        self.sink.flush()
    }

    /// Get the diagnostics emitted so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consume the reporter, returning the sink and the diagnostics.
    pub fn into_parts(self) -> (W, Diagnostics) {
        (self.sink, self.diagnostics)
    }
}

/// The end-of-run symbol report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    source_name: &'a str,
    registry: &'a ScopeRegistry,
}

impl<'a> Report<'a> {
    /// Create a report for the given registry.
    pub fn new(source_name: &'a str, registry: &'a ScopeRegistry) -> Self {
        Self {
            source_name,
            registry,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "------------------ program:\"{}\" ------------------",
            self.source_name
        )?;
        for (id, table) in self.registry.scopes() {
            write_section(f, id, table)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, id: &ScopeId, table: &ScopeTable) -> fmt::Result {
    writeln!(f, "-------------------- {id} --------------------")?;
    let entries = table.sorted_entries();
    let kind = id.kind();
    match kind {
        _ if kind.is_guarded_block() => {
            writeln!(f, "{NO_ENTRIES_BANNER}")?;
            for (key, symbol) in entries.into_iter().filter(|(_, s)| s.is_variable()) {
                write_short_entry(f, key, &symbol.name, symbol.first_appearance)?;
            }
        }
        ScopeKind::Else => {
            for (key, symbol) in entries {
                write_short_entry(f, key, &symbol.name, symbol.first_appearance)?;
            }
        }
        _ if entries.is_empty() => writeln!(f, "{NO_ENTRIES_BANNER}")?,
        _ => {
            for (key, symbol) in entries {
                writeln!(f, "key = {key}, value = {symbol}")?;
            }
        }
    }
    writeln!(f, "{SECTION_DIVIDER}")
}

fn write_short_entry(
    f: &mut fmt::Formatter<'_>,
    key: &str,
    name: &str,
    first_appearance: Option<usize>,
) -> fmt::Result {
    writeln!(
        f,
        "key = {}, value = (name: {}) (first_appearance: {})",
        key,
        name,
        first_appearance.unwrap_or(0)
    )
}

/// Render the report for a registry.
pub fn format_report(source_name: &str, registry: &ScopeRegistry) -> String {
    Report::new(source_name, registry).to_string()
}
