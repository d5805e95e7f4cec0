//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! Symbols and the insertion-ordered tables that hold them.
//!
//! Every name crossing a table boundary (insert, find, get, search) is folded
//! through [normalize] first. Text that begins with `"`, `'` or `\` (string
//! literals, character literals and extended identifiers) is compared exactly;
//! all other text is compared in lower case. A symbol always keeps the casing it
//! was first written with.

use super::ast::NodeRef;
use crate::lexer::{Position, Span};
use indexmap::IndexMap;
use std::fmt::Display;

/// Folds `name` into the key used by every symbol table.
pub fn normalize(name: &str) -> String {
    match name.chars().next() {
        Some('"') | Some('\'') | Some('\\') => name.to_string(),
        _ => name.to_lowercase(),
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct SymbolId(usize);

impl SymbolId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol#{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Symbol {
    name: String,
    span: Option<Span>,
    ast: Option<NodeRef>,
    defn: Option<NodeRef>,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            span: None,
            ast: None,
            defn: None,
        }
    }

    /// Sets the location where the symbol was declared.
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized lookup key of the symbol's name.
    pub fn key(&self) -> String {
        normalize(&self.name)
    }

    pub fn get_span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.span.as_ref().map(|s| s.start())
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = Some(span);
    }

    /// The node that declared the symbol.
    pub fn get_ast(&self) -> Option<NodeRef> {
        self.ast
    }

    /// The node that completed the declaration, when it came later.
    pub fn get_defn(&self) -> Option<NodeRef> {
        self.defn
    }

    pub fn set_ast(&mut self, node: NodeRef) {
        self.ast = Some(node);
    }

    pub fn set_defn(&mut self, node: NodeRef) {
        self.defn = Some(node);
    }
}

/// An insertion-ordered mapping from normalized names to symbols.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts `id` under the normalized form of `name`.
    ///
    /// An existing entry is never replaced; its id is returned as the error.
    pub fn add(&mut self, name: &str, id: SymbolId) -> Result<(), SymbolId> {
        match self.entries.entry(normalize(name)) {
            indexmap::map::Entry::Occupied(e) => Err(*e.get()),
            indexmap::map::Entry::Vacant(e) => {
                e.insert(id);
                Ok(())
            }
        }
    }

    /// Looks up `name` in this table only.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.entries.get(&normalize(name)).copied()
    }

    /// Iterates the symbols in the order they were inserted.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.entries.values().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_rules() {
        assert_eq!(normalize("Std_Logic"), "std_logic");
        assert_eq!(normalize("\\Bus A\\"), "\\Bus A\\");
        assert_eq!(normalize("'A'"), "'A'");
        assert_eq!(normalize("\"AND\""), "\"AND\"");
        assert_eq!(normalize("ÀB"), "àb");
    }

    #[test]
    fn table_folds_plain_identifiers() {
        let mut table = SymbolTable::new();
        assert_eq!(table.add("Counter", SymbolId::new(0)), Ok(()));
        assert_eq!(table.find("COUNTER"), Some(SymbolId::new(0)));
        assert_eq!(table.find("counter"), Some(SymbolId::new(0)));
        // never overwrites
        assert_eq!(table.add("counter", SymbolId::new(1)), Err(SymbolId::new(0)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn table_keeps_case_for_literals() {
        let mut table = SymbolTable::new();
        table.add("'a'", SymbolId::new(0)).unwrap();
        table.add("\\Ext\\", SymbolId::new(1)).unwrap();
        assert_eq!(table.find("'A'"), None);
        assert_eq!(table.find("\\EXT\\"), None);
        assert_eq!(table.add("'A'", SymbolId::new(2)), Ok(()));
        assert_eq!(table.find("'a'"), Some(SymbolId::new(0)));
        assert_eq!(table.find("'A'"), Some(SymbolId::new(2)));
    }

    #[test]
    fn table_iterates_in_insertion_order() {
        let mut table = SymbolTable::new();
        table.add("zeta", SymbolId::new(4)).unwrap();
        table.add("alpha", SymbolId::new(2)).unwrap();
        table.add("mid", SymbolId::new(9)).unwrap();
        assert_eq!(
            table.iter().collect::<Vec<SymbolId>>(),
            vec![SymbolId::new(4), SymbolId::new(2), SymbolId::new(9)]
        );
    }

    #[test]
    fn symbol_keeps_original_case() {
        let sym = Symbol::new("MyType").at(Span::new(Position::place(3, 6)));
        assert_eq!(sym.get_name(), "MyType");
        assert_eq!(sym.key(), "mytype");
        assert_eq!(sym.get_position(), Some(&Position::place(3, 6)));
    }
}
