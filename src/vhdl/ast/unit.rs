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

//! Design units and the context clauses that precede them.

use super::expr::{Expr, Suffix};
use super::stmt::Statement;
use super::{DeclId, RenderContext};
use crate::vhdl::scope::{ScopeId, ScopeTree};
use crate::vhdl::symbol::{normalize, SymbolId};
use crate::vhdl::token::Keyword;
use indexmap::IndexMap;

/// Computes the lookup key of a (selected) name used in a context clause.
///
/// Returns `None` when `expr` is not a name.
pub fn name_key(expr: &Expr, tree: &ScopeTree) -> Option<String> {
    match expr {
        Expr::Name(id) => Some(normalize(tree.name_of(*id))),
        Expr::Reserved(kw, _) => Some(kw.as_str().to_string()),
        Expr::Selected(prefix, suffix) => Some(format!(
            "{}.{}",
            name_key(prefix, tree)?,
            match suffix {
                Suffix::Name(s) => normalize(s),
                Suffix::All => String::from("all"),
            }
        )),
        _ => None,
    }
}

/// The library and use clauses preceding a design unit.
///
/// Repeated clauses naming the same library or selected name are kept once, in
/// the order they first appeared.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ContextClause {
    libraries: IndexMap<String, SymbolId>,
    uses: IndexMap<String, Expr>,
}

impl ContextClause {
    pub fn new() -> Self {
        Self {
            libraries: IndexMap::new(),
            uses: IndexMap::new(),
        }
    }

    /// Adds a library logical name, returning `false` if it was already present.
    pub fn add_library(&mut self, key: String, lib: SymbolId) -> bool {
        match self.libraries.contains_key(&key) {
            true => false,
            false => {
                self.libraries.insert(key, lib);
                true
            }
        }
    }

    /// Adds a selected name from a use clause, returning `false` if it was already
    /// present.
    pub fn add_use(&mut self, key: String, name: Expr) -> bool {
        match self.uses.contains_key(&key) {
            true => false,
            false => {
                self.uses.insert(key, name);
                true
            }
        }
    }

    pub fn get_libraries(&self) -> impl Iterator<Item = &SymbolId> {
        self.libraries.values()
    }

    pub fn get_uses(&self) -> impl Iterator<Item = &Expr> {
        self.uses.values()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty() && self.uses.is_empty()
    }

    pub fn render(&self, cx: &RenderContext) -> String {
        let mut text = String::new();
        for lib in self.libraries.values() {
            text.push_str(&format!("{} {};\n", cx.kw(Keyword::Library), cx.name(*lib)));
        }
        for name in self.uses.values() {
            text.push_str(&format!("{} {};\n", cx.kw(Keyword::Use), name.render(cx)));
        }
        text
    }

    fn dump(&self, cx: &RenderContext, indent: usize) -> String {
        let mut text = format!("{}ContextClause\n", cx.indent(indent));
        for lib in self.libraries.values() {
            text.push_str(&format!("{}library {}\n", cx.indent(indent + 1), cx.dump_symbol(*lib)));
        }
        for name in self.uses.values() {
            text.push_str(&format!("{}use\n", cx.indent(indent + 1)));
            text.push_str(&name.dump(cx, indent + 2));
        }
        text
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum UnitKind {
    PackageDecl {
        items: Vec<DeclId>,
    },
    PackageBody {
        items: Vec<DeclId>,
    },
    EntityDecl {
        generics: Option<Vec<DeclId>>,
        ports: Option<Vec<DeclId>>,
        items: Vec<DeclId>,
        statements: Option<Vec<Statement>>,
    },
    ArchitectureBody {
        entity: SymbolId,
        items: Vec<DeclId>,
        statements: Vec<Statement>,
    },
    ConfigDecl {
        entity: SymbolId,
        items: Vec<DeclId>,
        /// The block configuration, kept as raw statements.
        body: Vec<Statement>,
    },
}

impl UnitKind {
    pub fn get_items(&self) -> &Vec<DeclId> {
        match self {
            Self::PackageDecl { items } => items,
            Self::PackageBody { items } => items,
            Self::EntityDecl { items, .. } => items,
            Self::ArchitectureBody { items, .. } => items,
            Self::ConfigDecl { items, .. } => items,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PackageDecl { .. } => "PackageDecl",
            Self::PackageBody { .. } => "PackageBody",
            Self::EntityDecl { .. } => "EntityDecl",
            Self::ArchitectureBody { .. } => "ArchitectureBody",
            Self::ConfigDecl { .. } => "ConfigDecl",
        }
    }

    /// Returns the reserved words repeated after `end`.
    fn closing(&self, cx: &RenderContext) -> String {
        match self {
            Self::PackageDecl { .. } => cx.kw(Keyword::Package),
            Self::PackageBody { .. } => {
                format!("{} {}", cx.kw(Keyword::Package), cx.kw(Keyword::Body))
            }
            Self::EntityDecl { .. } => cx.kw(Keyword::Entity),
            Self::ArchitectureBody { .. } => cx.kw(Keyword::Architecture),
            Self::ConfigDecl { .. } => cx.kw(Keyword::Configuration),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct DesignUnit {
    name: SymbolId,
    context: Option<ContextClause>,
    scope: ScopeId,
    kind: UnitKind,
}

impl DesignUnit {
    pub fn new(
        name: SymbolId,
        context: Option<ContextClause>,
        scope: ScopeId,
        kind: UnitKind,
    ) -> Self {
        Self {
            name: name,
            context: context,
            scope: scope,
            kind: kind,
        }
    }

    pub fn get_name(&self) -> SymbolId {
        self.name
    }

    pub fn get_context(&self) -> Option<&ContextClause> {
        self.context.as_ref()
    }

    pub fn get_scope(&self) -> ScopeId {
        self.scope
    }

    pub fn get_kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn get_items(&self) -> &Vec<DeclId> {
        self.kind.get_items()
    }

    /// Writes the unit as VHDL text starting at nesting level `indent`.
    pub fn render(&self, cx: &RenderContext, indent: usize) -> String {
        let p = cx.indent(indent);
        let p1 = cx.indent(indent + 1);
        let is = cx.kw(Keyword::Is);
        let mut text = match &self.context {
            Some(c) => c.render(cx),
            None => String::new(),
        };
        let name = cx.name(self.name);
        match &self.kind {
            UnitKind::PackageDecl { items } => {
                text.push_str(&format!("{}{} {} {}\n", p, cx.kw(Keyword::Package), name, is));
                text.push_str(&cx.render_items(items, indent + 1));
            }
            UnitKind::PackageBody { items } => {
                text.push_str(&format!("{}{} {} {}\n", p, self.kind.closing(cx), name, is));
                text.push_str(&cx.render_items(items, indent + 1));
            }
            UnitKind::EntityDecl {
                generics,
                ports,
                items,
                statements,
            } => {
                text.push_str(&format!("{}{} {} {}\n", p, cx.kw(Keyword::Entity), name, is));
                if let Some(g) = generics {
                    text.push_str(&format!(
                        "{}{} ({});\n",
                        p1,
                        cx.kw(Keyword::Generic),
                        cx.render_interface(g)
                    ));
                }
                if let Some(ports) = ports {
                    text.push_str(&format!(
                        "{}{} ({});\n",
                        p1,
                        cx.kw(Keyword::Port),
                        cx.render_interface(ports)
                    ));
                }
                text.push_str(&cx.render_items(items, indent + 1));
                if let Some(stmts) = statements {
                    text.push_str(&format!("{}{}\n", p, cx.kw(Keyword::Begin)));
                    stmts
                        .iter()
                        .for_each(|s| text.push_str(&format!("{}{}\n", p1, s.render(cx))));
                }
            }
            UnitKind::ArchitectureBody {
                entity,
                items,
                statements,
            } => {
                text.push_str(&format!(
                    "{}{} {} {} {} {}\n",
                    p,
                    cx.kw(Keyword::Architecture),
                    name,
                    cx.kw(Keyword::Of),
                    cx.name(*entity),
                    is
                ));
                text.push_str(&cx.render_items(items, indent + 1));
                text.push_str(&format!("{}{}\n", p, cx.kw(Keyword::Begin)));
                statements
                    .iter()
                    .for_each(|s| text.push_str(&format!("{}{}\n", p1, s.render(cx))));
            }
            UnitKind::ConfigDecl {
                entity,
                items,
                body,
            } => {
                text.push_str(&format!(
                    "{}{} {} {} {} {}\n",
                    p,
                    cx.kw(Keyword::Configuration),
                    name,
                    cx.kw(Keyword::Of),
                    cx.name(*entity),
                    is
                ));
                text.push_str(&cx.render_items(items, indent + 1));
                body.iter()
                    .for_each(|s| text.push_str(&format!("{}{}\n", p1, s.render(cx))));
            }
        }
        text.push_str(&format!(
            "{}{} {} {};\n",
            p,
            cx.kw(Keyword::End),
            self.kind.closing(cx),
            name
        ));
        text
    }

    pub fn dump(&self, cx: &RenderContext, indent: usize) -> String {
        let p1 = cx.indent(indent + 1);
        let mut text = format!(
            "{}{} {} {}\n",
            cx.indent(indent),
            self.kind.kind_name(),
            cx.dump_symbol(self.name),
            cx.dump_scope(self.scope)
        );
        if let Some(c) = &self.context {
            text.push_str(&c.dump(cx, indent + 1));
        }
        match &self.kind {
            UnitKind::EntityDecl {
                generics,
                ports,
                statements,
                ..
            } => {
                if let Some(g) = generics {
                    text.push_str(&format!("{}generics\n", p1));
                    text.push_str(&cx.dump_items(g, indent + 2));
                }
                if let Some(ports) = ports {
                    text.push_str(&format!("{}ports\n", p1));
                    text.push_str(&cx.dump_items(ports, indent + 2));
                }
                if let Some(stmts) = statements {
                    text.push_str(&format!("{}statements {}\n", p1, stmts.len()));
                }
            }
            UnitKind::ArchitectureBody {
                entity, statements, ..
            } => {
                text.push_str(&format!("{}of {}\n", p1, cx.dump_symbol(*entity)));
                text.push_str(&format!("{}statements {}\n", p1, statements.len()));
            }
            UnitKind::ConfigDecl { entity, body, .. } => {
                text.push_str(&format!("{}of {}\n", p1, cx.dump_symbol(*entity)));
                text.push_str(&format!("{}statements {}\n", p1, body.len()));
            }
            _ => (),
        }
        text.push_str(&cx.dump_items(self.kind.get_items(), indent + 1));
        text
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vhdl::ast::DesignFile;
    use crate::vhdl::format::VhdlFormat;

    #[test]
    fn context_clause_folds_duplicates() {
        let mut file = DesignFile::new("_root");
        let root = file.get_root();
        let ieee = file.tree_mut().get(root, "ieee");
        let upper = file.tree_mut().get(root, "IEEE");
        let mut ctx = ContextClause::new();
        assert_eq!(ctx.add_library(normalize("ieee"), ieee), true);
        assert_eq!(ctx.add_library(normalize("IEEE"), upper), false);

        let pkg = file.tree_mut().get(root, "std_logic_1164");
        let name = Expr::Selected(
            Box::new(Expr::Selected(Box::new(Expr::Name(ieee)), Suffix::Name(String::from("STD_LOGIC_1164")))),
            Suffix::All,
        );
        let key = name_key(&name, file.tree()).unwrap();
        assert_eq!(key, "ieee.std_logic_1164.all");
        assert_eq!(ctx.add_use(key.clone(), name.clone()), true);
        assert_eq!(ctx.add_use(key, name), false);
        assert_eq!(name_key(&Expr::Name(pkg), file.tree()), Some(String::from("std_logic_1164")));

        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        assert_eq!(ctx.render(&cx), "library ieee;\nuse ieee.STD_LOGIC_1164.all;\n");
    }

    #[test]
    fn render_empty_package() {
        let mut file = DesignFile::new("_root");
        let root = file.get_root();
        let p = file.tree_mut().add(root, "P", None).unwrap();
        let scope = file.tree_mut().alloc_scope(Some(p), Some(root));
        let unit = DesignUnit::new(p, None, scope, UnitKind::PackageDecl { items: Vec::new() });
        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        assert_eq!(unit.render(&cx, 0), "package P is\nend package P;\n");
        assert!(unit.dump(&cx, 0).starts_with("PackageDecl Symbol#"));
    }
}
