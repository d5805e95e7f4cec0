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

//! Context clauses and the five kinds of design unit.

use super::{Result, VhdlParser};
use crate::lexer::{Position, Span};
use crate::vhdl::ast::unit::{name_key, ContextClause, DesignUnit, UnitKind};
use crate::vhdl::ast::NodeRef;
use crate::vhdl::scope::ScopeId;
use crate::vhdl::symbol::{normalize, SymbolId};
use crate::vhdl::token::{Delimiter, Keyword, VhdlToken};

impl VhdlParser {
    /// Parses a context clause followed by one library unit.
    pub(super) fn parse_design_unit(&mut self) -> Result<()> {
        let context = self.parse_context_clause()?;
        match self.peek() {
            VhdlToken::Keyword(Keyword::Package) => {
                match self.check_kw_nth(1, &Keyword::Body) {
                    true => self.parse_package_body(context),
                    false => self.parse_package(context),
                }
            }
            VhdlToken::Keyword(Keyword::Entity) => self.parse_entity(context),
            VhdlToken::Keyword(Keyword::Architecture) => self.parse_architecture(context),
            VhdlToken::Keyword(Keyword::Configuration) => self.parse_configuration(context),
            _ => Err(self.unexpected("a design unit")),
        }
    }

    /// Collects the library and use clauses preceding a design unit.
    ///
    /// Library names are kept in the root scope without complaint.
    fn parse_context_clause(&mut self) -> Result<Option<ContextClause>> {
        let mut clause = ContextClause::new();
        let mut seen = false;
        loop {
            if self.accept_kw(&Keyword::Library) == true {
                loop {
                    let (name, _) = self.expect_identifier()?;
                    let root = self.file.get_root();
                    let lib = self.file.tree_mut().get(root, &name);
                    clause.add_library(normalize(&name), lib);
                    if self.accept_delim(&Delimiter::Comma) == false {
                        break;
                    }
                }
            } else if self.accept_kw(&Keyword::Use) == true {
                loop {
                    let name = self.parse_use_name()?;
                    if let Some(key) = name_key(&name, self.file.tree()) {
                        clause.add_use(key, name);
                    }
                    if self.accept_delim(&Delimiter::Comma) == false {
                        break;
                    }
                }
            } else {
                break;
            }
            self.expect_delim(&Delimiter::Terminator)?;
            seen = true;
        }
        Ok(match seen {
            true => Some(clause),
            false => None,
        })
    }

    /// Stores `unit` and links its name and region back to it.
    ///
    /// A unit that completes an earlier one only becomes the name's definition.
    fn finish_unit(&mut self, unit: DesignUnit, span: Span, completes: bool) {
        let sym = unit.get_name();
        let scope = unit.get_scope();
        let kind = unit.get_kind().kind_name();
        let id = self.file.alloc_unit(unit);
        match completes {
            true => self
                .file
                .tree_mut()
                .symbol_mut(sym)
                .set_defn(NodeRef::Unit(id)),
            false => {
                self.bind(sym, NodeRef::Unit(id));
                self.file.tree_mut().symbol_mut(sym).set_span(span);
            }
        }
        self.file.tree_mut().set_owner(scope, NodeRef::Unit(id));
        tracing::debug!(unit = self.file.tree().name_of(sym), kind = kind, "parsed design unit");
    }

    /// Accesses the region of the unit named by `sym` when it is of the kind
    /// `want` accepts.
    fn unit_scope(&self, sym: SymbolId, want: fn(&UnitKind) -> bool) -> Option<ScopeId> {
        match self.file.tree().symbol(sym).get_ast() {
            Some(NodeRef::Unit(u)) => {
                let unit = self.file.unit(u);
                match want(unit.get_kind()) {
                    true => Some(unit.get_scope()),
                    false => None,
                }
            }
            _ => None,
        }
    }

    /// Consumes `end [keyword] [name] ;` and returns where the unit ends.
    fn parse_unit_end(&mut self, sym: SymbolId, closing: &[Keyword], home: ScopeId) -> Result<Position> {
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        if let Some((first, rest)) = closing.split_first() {
            if self.accept_kw(first) == true {
                for kw in rest {
                    self.expect_kw(kw)?;
                }
            }
        }
        self.check_end_name(sym, home);
        Ok(self.expect_delim(&Delimiter::Terminator)?.ending().clone())
    }

    fn parse_package(&mut self, context: Option<ContextClause>) -> Result<()> {
        let start = self.expect_kw(&Keyword::Package)?.locate().clone();
        let (name, span) = self.expect_identifier()?;
        let root = self.file.get_root();
        let sym = self.declare_in(root, &name, span);
        self.expect_kw(&Keyword::Is)?;
        let scope = self.new_scope(Some(sym));
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[]);
        let end = self.parse_unit_end(sym, &[Keyword::Package], root)?;
        self.finish_unit(
            DesignUnit::new(sym, context, scope, UnitKind::PackageDecl { items: items }),
            Span::between(start, end),
            false,
        );
        Ok(())
    }

    /// Parses a package body within the region of its package, when the package
    /// was declared earlier in the file.
    fn parse_package_body(&mut self, context: Option<ContextClause>) -> Result<()> {
        let start = self.expect_kw(&Keyword::Package)?.locate().clone();
        self.expect_kw(&Keyword::Body)?;
        let (name, span) = self.expect_identifier()?;
        let sym = self.reference(&name, span);
        self.expect_kw(&Keyword::Is)?;
        let home = self.current();
        let outer = self
            .unit_scope(sym, |k| matches!(k, UnitKind::PackageDecl { .. }))
            .unwrap_or(home);
        let scope = self.file.tree_mut().alloc_scope(Some(sym), Some(outer));
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[]);
        let end = self.parse_unit_end(sym, &[Keyword::Package, Keyword::Body], home)?;
        self.finish_unit(
            DesignUnit::new(sym, context, scope, UnitKind::PackageBody { items: items }),
            Span::between(start, end),
            true,
        );
        Ok(())
    }

    fn parse_entity(&mut self, context: Option<ContextClause>) -> Result<()> {
        let start = self.expect_kw(&Keyword::Entity)?.locate().clone();
        let (name, span) = self.expect_identifier()?;
        let root = self.file.get_root();
        let sym = self.declare_in(root, &name, span);
        self.expect_kw(&Keyword::Is)?;
        let scope = self.new_scope(Some(sym));
        self.push_scope(scope);
        let (generics, ports) = self.parse_generic_and_port_clauses()?;
        let items = self.parse_declarative_part(&[Keyword::Begin]);
        let statements = match self.accept_kw(&Keyword::Begin) {
            true => Some(self.skip_statements(false)),
            false => None,
        };
        let end = self.parse_unit_end(sym, &[Keyword::Entity], root)?;
        self.finish_unit(
            DesignUnit::new(
                sym,
                context,
                scope,
                UnitKind::EntityDecl {
                    generics: generics,
                    ports: ports,
                    items: items,
                    statements: statements,
                },
            ),
            Span::between(start, end),
            false,
        );
        Ok(())
    }

    /// Parses an architecture body, declaring its name in the region of the
    /// entity it implements.
    fn parse_architecture(&mut self, context: Option<ContextClause>) -> Result<()> {
        let start = self.expect_kw(&Keyword::Architecture)?.locate().clone();
        let (name, span) = self.expect_identifier()?;
        self.expect_kw(&Keyword::Of)?;
        let (entity_name, entity_span) = self.expect_identifier()?;
        let entity = self.reference(&entity_name, entity_span);
        let home = self
            .unit_scope(entity, |k| matches!(k, UnitKind::EntityDecl { .. }))
            .unwrap_or(self.current());
        let sym = self.declare_in(home, &name, span);
        self.expect_kw(&Keyword::Is)?;
        let scope = self.file.tree_mut().alloc_scope(Some(sym), Some(home));
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[Keyword::Begin]);
        self.expect_kw(&Keyword::Begin)?;
        let statements = self.skip_statements(false);
        let end = self.parse_unit_end(sym, &[Keyword::Architecture], home)?;
        self.finish_unit(
            DesignUnit::new(
                sym,
                context,
                scope,
                UnitKind::ArchitectureBody {
                    entity: entity,
                    items: items,
                    statements: statements,
                },
            ),
            Span::between(start, end),
            false,
        );
        Ok(())
    }

    fn parse_configuration(&mut self, context: Option<ContextClause>) -> Result<()> {
        let start = self.expect_kw(&Keyword::Configuration)?.locate().clone();
        let (name, span) = self.expect_identifier()?;
        let root = self.file.get_root();
        let sym = self.declare_in(root, &name, span);
        self.expect_kw(&Keyword::Of)?;
        let (entity_name, entity_span) = self.expect_identifier()?;
        let entity = self.reference(&entity_name, entity_span);
        self.expect_kw(&Keyword::Is)?;
        let scope = self.new_scope(Some(sym));
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[Keyword::For]);
        let body = self.skip_statements(true);
        let end = self.parse_unit_end(sym, &[Keyword::Configuration], root)?;
        self.finish_unit(
            DesignUnit::new(
                sym,
                context,
                scope,
                UnitKind::ConfigDecl {
                    entity: entity,
                    items: items,
                    body: body,
                },
            ),
            Span::between(start, end),
            false,
        );
        Ok(())
    }
}
