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

//! The syntax tree produced by the parser.
//!
//! A [DesignFile] owns every arena: the scope tree (scopes and symbols), the
//! declarations and the design units. Nodes refer to each other and to symbols
//! by index, so back-links from a symbol to its declaring node never own it.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod unit;

use super::format::VhdlFormat;
use super::scope::{ScopeId, ScopeTree};
use super::symbol::SymbolId;
use super::token::Keyword;
use decl::Declaration;
use std::fmt::Display;
use unit::DesignUnit;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DeclId(usize);

impl DeclId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct UnitId(usize);

impl UnitId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A non-owning link to a node of the tree.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NodeRef {
    File,
    Unit(UnitId),
    Decl(DeclId),
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "File"),
            Self::Unit(u) => write!(f, "Unit#{}", u.0),
            Self::Decl(d) => write!(f, "Decl#{}", d.0),
        }
    }
}

/// Names pre-declared in the root scope.
pub const RESERVED_NAMES: [Keyword; 4] = [Keyword::All, Keyword::Open, Keyword::Null, Keyword::Others];

#[derive(Debug, PartialEq, Clone)]
pub struct DesignFile {
    name: SymbolId,
    root: ScopeId,
    tree: ScopeTree,
    decls: Vec<Declaration>,
    units: Vec<DesignUnit>,
}

impl DesignFile {
    /// Creates an empty design file whose root scope is named `name` and holds
    /// the reserved pseudo-names.
    pub fn new(name: &str) -> Self {
        let mut tree = ScopeTree::new();
        let root = tree.alloc_scope(None, None);
        let sym = tree.get(root, name);
        tree.set_name(root, sym);
        tree.symbol_mut(sym).set_ast(NodeRef::File);
        tree.set_owner(root, NodeRef::File);
        for kw in RESERVED_NAMES {
            tree.get(root, &kw.as_str().to_ascii_uppercase());
        }
        Self {
            name: sym,
            root: root,
            tree: tree,
            decls: Vec::new(),
            units: Vec::new(),
        }
    }

    pub fn get_name(&self) -> SymbolId {
        self.name
    }

    pub fn get_root(&self) -> ScopeId {
        self.root
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut ScopeTree {
        &mut self.tree
    }

    pub fn units(&self) -> &Vec<DesignUnit> {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> &DesignUnit {
        &self.units[id.0]
    }

    pub fn decls(&self) -> &Vec<Declaration> {
        &self.decls
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0]
    }

    /// Finds the first design unit whose name matches `name`.
    pub fn find_unit(&self, name: &str) -> Option<&DesignUnit> {
        let key = super::symbol::normalize(name);
        self.units
            .iter()
            .find(|u| self.tree.symbol(u.get_name()).key() == key)
    }

    /// Accesses the symbol of the reserved pseudo-name `kw`.
    pub fn reserved(&self, kw: &Keyword) -> Option<SymbolId> {
        self.tree.find(self.root, kw.as_str())
    }

    pub(crate) fn alloc_decl(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len());
        self.decls.push(decl);
        id
    }

    pub(crate) fn alloc_unit(&mut self, unit: DesignUnit) -> UnitId {
        let id = UnitId(self.units.len());
        self.units.push(unit);
        id
    }

    /// Creates a rendering context using the format `fmt`.
    pub fn context<'a>(&'a self, fmt: &'a VhdlFormat) -> RenderContext<'a> {
        RenderContext {
            file: self,
            fmt: fmt,
        }
    }

    /// Writes every design unit as canonical VHDL text with the default format.
    pub fn render(&self) -> String {
        self.render_with(&VhdlFormat::default())
    }

    pub fn render_with(&self, fmt: &VhdlFormat) -> String {
        let cx = self.context(fmt);
        self.units
            .iter()
            .map(|u| u.render(&cx, 0))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Writes the structural form of the tree followed by every scope.
    pub fn dump(&self) -> String {
        let fmt = VhdlFormat::new().tab_size(2);
        let cx = self.context(&fmt);
        let mut text = format!(
            "DesignFile {} {}\n",
            cx.dump_symbol(self.name),
            cx.dump_scope(self.root)
        );
        for u in &self.units {
            text.push_str(&u.dump(&cx, 1));
        }
        for (id, scope) in self.tree.iter_scopes() {
            text.push_str(&cx.dump_scope(id));
            if let Some(outer) = scope.get_outer() {
                text.push_str(&format!(" outer={}", outer));
            }
            if scope.get_public().is_empty() == false {
                text.push_str(&format!(
                    " public=[{}]",
                    scope
                        .get_public()
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                ));
            }
            text.push('\n');
            for sym in scope.get_table().iter() {
                text.push_str(&format!("{}{}\n", cx.indent(1), cx.dump_symbol(sym)));
            }
        }
        text
    }
}

/// Everything needed to write nodes as text.
pub struct RenderContext<'a> {
    file: &'a DesignFile,
    fmt: &'a VhdlFormat,
}

impl<'a> RenderContext<'a> {
    pub fn tree(&self) -> &ScopeTree {
        &self.file.tree
    }

    pub fn name(&self, id: SymbolId) -> &'a str {
        self.file.tree.name_of(id)
    }

    pub fn kw(&self, kw: Keyword) -> String {
        self.fmt.keyword(&kw)
    }

    pub fn indent(&self, level: usize) -> String {
        self.fmt.indent(level)
    }

    pub fn decl(&self, id: DeclId) -> &'a Declaration {
        self.file.decl(id)
    }

    /// Renders each declaration in `items` on its own line(s).
    pub fn render_items(&self, items: &[DeclId], indent: usize) -> String {
        items
            .iter()
            .map(|i| self.decl(*i).render(self, indent))
            .collect::<String>()
    }

    /// Renders interface elements as a `;`-separated list.
    pub fn render_interface(&self, items: &[DeclId]) -> String {
        items
            .iter()
            .map(|i| match self.decl(*i) {
                Declaration::Interface(e) => e.render_inline(self),
                other => other.render(self, 0).trim_end().trim_end_matches(';').to_string(),
            })
            .collect::<Vec<String>>()
            .join("; ")
    }

    pub fn dump_items(&self, items: &[DeclId], indent: usize) -> String {
        items
            .iter()
            .map(|i| self.decl(*i).dump(self, indent))
            .collect::<String>()
    }

    /// Writes a symbol with its arena identity and node links.
    pub fn dump_symbol(&self, id: SymbolId) -> String {
        let sym = self.file.tree.symbol(id);
        let mut text = format!("{} \"{}\"", id, sym.get_name());
        if let Some(a) = sym.get_ast() {
            text.push_str(&format!(" ast={}", a));
        }
        if let Some(d) = sym.get_defn() {
            text.push_str(&format!(" defn={}", d));
        }
        text
    }

    /// Writes a scope with its arena identity and owner.
    pub fn dump_scope(&self, id: ScopeId) -> String {
        match self.file.tree.scope(id).get_owner() {
            Some(owner) => format!("{} owner={}", id, owner),
            None => id.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn root_scope_holds_reserved_names() {
        let file = DesignFile::new("top.vhd");
        let root = file.get_root();
        assert_eq!(file.tree().scope(root).get_name(), Some(file.get_name()));
        assert_eq!(file.tree().name_of(file.get_name()), "top.vhd");
        for kw in RESERVED_NAMES.iter() {
            let id = file.reserved(kw).unwrap();
            assert_eq!(file.tree().name_of(id), kw.as_str().to_ascii_uppercase());
        }
        assert_eq!(file.tree().scope(root).get_table().len(), 5);
        assert_eq!(file.tree().scope(root).get_owner(), Some(NodeRef::File));
    }

    #[test]
    fn empty_file_renders_nothing() {
        let file = DesignFile::new("_root");
        assert_eq!(file.render(), "");
        let dump = file.dump();
        assert!(dump.starts_with("DesignFile Symbol#0 \"_root\" ast=File Scope#0 owner=File\n"));
        assert!(dump.contains("\"OTHERS\""));
    }
}
