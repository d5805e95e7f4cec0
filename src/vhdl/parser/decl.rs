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

//! Declarative items and the interface lists of entities, components and
//! subprograms.

use super::{Result, VhdlParser};
use crate::lexer::Span;
use crate::vhdl::ast::decl::{
    AccessType, AliasDecl, AttributeDecl, AttributeSpec, ComponentDecl, ConstrainedType,
    Declaration, DisconnectSpec, EntityNames, EnumBuilder, FileDecl, FileOpen, GroupDecl,
    GroupTemplate, IncompleteType, InterfaceElement, Mode, ObjectClass, ObjectDecl,
    PhysicalBuilder, ProtectedBody, ProtectedType, Purity, RecordBuilder, SignalKind,
    SubprogramBody, SubprogramKind, SubprogramSpec, SubtypeDecl, UseClause, ArrayType,
};
use crate::vhdl::ast::expr::{Expr, SubtypeIndication};
use crate::vhdl::ast::{DeclId, NodeRef};
use crate::vhdl::scope::ScopeId;
use crate::vhdl::symbol::SymbolId;
use crate::vhdl::token::{Delimiter, Keyword, VhdlToken};

/// Symbols declared inside the region a declaration opens.
fn member_names(decl: &Declaration) -> Vec<SymbolId> {
    match decl {
        Declaration::EnumType(d) => d.literals.clone(),
        Declaration::PhysicalType(d) => std::iter::once(d.primary)
            .chain(d.units.iter().map(|(u, _)| *u))
            .collect(),
        Declaration::RecordType(d) => d.elements.iter().flat_map(|e| e.names.clone()).collect(),
        _ => Vec::new(),
    }
}

impl VhdlParser {
    /// Parses declarative items until `end`, one of the `stop` keywords or the
    /// end of the file.
    ///
    /// A malformed item is reported and skipped.
    pub(super) fn parse_declarative_part(&mut self, stop: &[Keyword]) -> Vec<DeclId> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                VhdlToken::EOF | VhdlToken::Keyword(Keyword::End) => break,
                VhdlToken::Keyword(kw) if stop.contains(kw) => break,
                _ => (),
            }
            let depth = self.scopes.depth();
            let mark = self.stream.consumed();
            match self.parse_declarative_item() {
                Ok(id) => items.push(id),
                Err(e) => {
                    self.recover(depth, e);
                    if self.stream.consumed() == mark
                        && self.peek().is_eof() == false
                        && self.check_kw(&Keyword::End) == false
                    {
                        self.advance();
                    }
                }
            }
        }
        items
    }

    fn parse_declarative_item(&mut self) -> Result<DeclId> {
        match self.peek() {
            VhdlToken::Keyword(kw) => match kw {
                Keyword::Type => self.parse_type_decl(),
                Keyword::Subtype => self.parse_subtype_decl(),
                Keyword::Constant
                | Keyword::Signal
                | Keyword::Variable
                | Keyword::Shared
                | Keyword::File => self.parse_object_decl(),
                Keyword::Alias => self.parse_alias_decl(),
                Keyword::Component => self.parse_component_decl(),
                Keyword::Attribute => self.parse_attribute_item(),
                Keyword::Disconnect => self.parse_disconnect_spec(),
                Keyword::Use => self.parse_use_clause(),
                Keyword::Group => self.parse_group_item(),
                Keyword::Function | Keyword::Procedure | Keyword::Pure | Keyword::Impure => {
                    self.parse_subprogram()
                }
                _ => Err(self.unexpected("a declaration")),
            },
            _ => Err(self.unexpected("a declaration")),
        }
    }

    /// Stores `decl` and links its names and its region back to it.
    fn finish_decl(&mut self, decl: Declaration) -> DeclId {
        let names = decl.names();
        let members = member_names(&decl);
        let scope = decl.scope();
        let id = self.file.alloc_decl(decl);
        for sym in names.into_iter().chain(members) {
            self.bind(sym, NodeRef::Decl(id));
        }
        if let Some(scope) = scope {
            if self.file.tree().scope(scope).get_owner().is_none() {
                self.file.tree_mut().set_owner(scope, NodeRef::Decl(id));
            }
        }
        id
    }

    /// Marks `decl` as the full definition of `sym`.
    fn complete(&mut self, sym: SymbolId, decl: DeclId) {
        self.file
            .tree_mut()
            .symbol_mut(sym)
            .set_defn(NodeRef::Decl(decl));
    }

    /// Accesses the declaration that introduced `sym`, if any.
    fn decl_of(&self, sym: SymbolId) -> Option<&Declaration> {
        match self.file.tree().symbol(sym).get_ast() {
            Some(NodeRef::Decl(d)) => Some(self.file.decl(d)),
            _ => None,
        }
    }

    /// Declares each name of `ident {, ident}` in the current scope.
    fn parse_identifier_list(&mut self) -> Result<Vec<SymbolId>> {
        let mut names = Vec::new();
        loop {
            let (name, span) = self.expect_identifier()?;
            names.push(self.declare(&name, span));
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        Ok(names)
    }

    /* types */

    fn parse_type_decl(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Type)?;
        if self.check_kw_nth(1, &Keyword::Is)
            && self.check_kw_nth(2, &Keyword::Protected)
            && self.check_kw_nth(3, &Keyword::Body)
        {
            return self.parse_protected_body();
        }
        let (name, span) = self.expect_identifier()?;
        let (sym, completes) = self.declare_type(&name, span);
        if self.accept_delim(&Delimiter::Terminator) == true {
            return Ok(self.finish_decl(Declaration::IncompleteType(IncompleteType { name: sym })));
        }
        self.expect_kw(&Keyword::Is)?;
        let decl = match self.peek() {
            VhdlToken::Delimiter(Delimiter::ParenL) => self.parse_enum_type(sym)?,
            VhdlToken::Keyword(Keyword::Range) => self.parse_range_type(sym)?,
            VhdlToken::Keyword(Keyword::Array) => {
                self.advance();
                let indexes = self.parse_array_indexes()?;
                self.expect_kw(&Keyword::Of)?;
                let element = self.parse_subtype_indication()?;
                Declaration::ArrayType(ArrayType {
                    name: sym,
                    indexes: indexes,
                    element: element,
                })
            }
            VhdlToken::Keyword(Keyword::Record) => self.parse_record_type(sym)?,
            VhdlToken::Keyword(Keyword::Access) => {
                self.advance();
                Declaration::AccessType(AccessType {
                    name: sym,
                    subtype: self.parse_subtype_indication()?,
                })
            }
            VhdlToken::Keyword(Keyword::File) => {
                self.advance();
                self.expect_kw(&Keyword::Of)?;
                Declaration::FileType(FileDecl {
                    name: sym,
                    type_mark: self.parse_type_mark()?,
                })
            }
            VhdlToken::Keyword(Keyword::Protected) => self.parse_protected_type(sym)?,
            _ => return Err(self.unexpected("a type definition")),
        };
        self.expect_delim(&Delimiter::Terminator)?;
        let id = self.finish_decl(decl);
        if completes == true {
            self.complete(sym, id);
        }
        Ok(id)
    }

    /// Declares a type name, reusing an incomplete type of the same name in the
    /// current scope as the one being completed.
    fn declare_type(&mut self, name: &str, span: Span) -> (SymbolId, bool) {
        if let Some(existing) = self.file.tree().find(self.current(), name) {
            if let Some(Declaration::IncompleteType(_)) = self.decl_of(existing) {
                if self.file.tree().symbol(existing).get_defn().is_none() {
                    return (existing, true);
                }
            }
        }
        (self.declare(name, span), false)
    }

    fn parse_enum_type(&mut self, name: SymbolId) -> Result<Declaration> {
        self.expect_delim(&Delimiter::ParenL)?;
        let scope = self.new_scope(Some(name));
        let outer = self.current();
        self.file.tree_mut().add_public_subscope(outer, scope);
        self.push_scope(scope);
        let mut builder = EnumBuilder::new(name, scope);
        loop {
            let lit = match self.peek() {
                VhdlToken::Identifier(_) => {
                    let (text, span) = self.expect_identifier()?;
                    self.declare(&text, span)
                }
                VhdlToken::CharLiteral(_) => {
                    let t = self.advance();
                    let span = t.span();
                    self.declare_quiet(&t.take().to_string(), span)
                }
                _ => return Err(self.unexpected("an enumeration literal")),
            };
            builder.literal(lit);
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::ParenR)?;
        self.pop_scope();
        Ok(builder.finish())
    }

    /// Parses an integer, floating or physical type definition.
    fn parse_range_type(&mut self, name: SymbolId) -> Result<Declaration> {
        self.expect_kw(&Keyword::Range)?;
        let range = self.parse_range()?;
        if self.accept_kw(&Keyword::Units) == false {
            return Ok(Declaration::ConstrainedType(ConstrainedType {
                name: name,
                range: range,
            }));
        }
        let scope = self.new_scope(Some(name));
        let outer = self.current();
        self.file.tree_mut().add_public_subscope(outer, scope);
        self.push_scope(scope);
        let (text, span) = self.expect_identifier()?;
        let primary = self.declare(&text, span);
        self.expect_delim(&Delimiter::Terminator)?;
        let mut builder = PhysicalBuilder::new(name, range, scope, primary);
        let depth = self.scopes.depth();
        while self.check_kw(&Keyword::End) == false && self.peek().is_eof() == false {
            match self.parse_secondary_unit() {
                Ok((unit, value)) => builder.unit(unit, value),
                Err(e) => self.recover(depth, e),
            }
        }
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        self.expect_kw(&Keyword::Units)?;
        let home = self.current();
        self.check_end_name(name, home);
        Ok(builder.finish())
    }

    fn parse_secondary_unit(&mut self) -> Result<(SymbolId, Expr)> {
        let (text, span) = self.expect_identifier()?;
        let unit = self.declare(&text, span);
        self.expect_delim(&Delimiter::Eq)?;
        let value = self.parse_expr()?;
        self.expect_delim(&Delimiter::Terminator)?;
        Ok((unit, value))
    }

    fn parse_record_type(&mut self, name: SymbolId) -> Result<Declaration> {
        self.expect_kw(&Keyword::Record)?;
        let scope = self.new_scope(Some(name));
        self.push_scope(scope);
        let mut builder = RecordBuilder::new(name, scope);
        let depth = self.scopes.depth();
        while self.check_kw(&Keyword::End) == false && self.peek().is_eof() == false {
            match self.parse_element_decl() {
                Ok((names, subtype)) => builder.element(names, subtype),
                Err(e) => self.recover(depth, e),
            }
        }
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        self.expect_kw(&Keyword::Record)?;
        let home = self.current();
        self.check_end_name(name, home);
        Ok(builder.finish())
    }

    fn parse_element_decl(&mut self) -> Result<(Vec<SymbolId>, SubtypeIndication)> {
        let names = self.parse_identifier_list()?;
        self.expect_delim(&Delimiter::Colon)?;
        let subtype = self.parse_subtype_indication()?;
        self.expect_delim(&Delimiter::Terminator)?;
        Ok((names, subtype))
    }

    fn parse_protected_type(&mut self, name: SymbolId) -> Result<Declaration> {
        self.expect_kw(&Keyword::Protected)?;
        let scope = self.new_scope(Some(name));
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[]);
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        self.expect_kw(&Keyword::Protected)?;
        let home = self.current();
        self.check_end_name(name, home);
        Ok(Declaration::ProtectedType(ProtectedType {
            name: name,
            scope: scope,
            items: items,
        }))
    }

    /// Parses a protected type body, re-entering the region of its declaration
    /// when one is visible.
    fn parse_protected_body(&mut self) -> Result<DeclId> {
        let (name, span) = self.expect_identifier()?;
        self.expect_kw(&Keyword::Is)?;
        self.expect_kw(&Keyword::Protected)?;
        self.expect_kw(&Keyword::Body)?;
        let found = self.file.tree().search(self.current(), &name);
        let declared = found.iter().find_map(|sym| match self.decl_of(*sym) {
            Some(Declaration::ProtectedType(p)) => Some((*sym, p.scope)),
            _ => None,
        });
        let (sym, scope) = match declared {
            Some(pair) => pair,
            None => {
                let sym = self.reference(&name, span);
                (sym, self.new_scope(Some(sym)))
            }
        };
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[]);
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        self.expect_kw(&Keyword::Protected)?;
        self.expect_kw(&Keyword::Body)?;
        let home = self.current();
        self.check_end_name(sym, home);
        self.expect_delim(&Delimiter::Terminator)?;
        let id = self.finish_decl(Declaration::ProtectedBody(ProtectedBody {
            name: sym,
            scope: scope,
            items: items,
        }));
        self.complete(sym, id);
        Ok(id)
    }

    fn parse_subtype_decl(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Subtype)?;
        let (name, span) = self.expect_identifier()?;
        let sym = self.declare(&name, span);
        self.expect_kw(&Keyword::Is)?;
        let indication = self.parse_subtype_indication()?;
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Subtype(SubtypeDecl {
            name: sym,
            indication: indication,
        })))
    }

    /* objects */

    fn parse_object_decl(&mut self) -> Result<DeclId> {
        let class = match self.advance().take() {
            VhdlToken::Keyword(Keyword::Constant) => ObjectClass::Constant,
            VhdlToken::Keyword(Keyword::Signal) => ObjectClass::Signal,
            VhdlToken::Keyword(Keyword::Variable) => ObjectClass::Variable,
            VhdlToken::Keyword(Keyword::Shared) => {
                self.expect_kw(&Keyword::Variable)?;
                ObjectClass::SharedVariable
            }
            _ => ObjectClass::File,
        };
        let names = self.parse_identifier_list()?;
        self.expect_delim(&Delimiter::Colon)?;
        let subtype = self.parse_subtype_indication()?;
        let signal_kind = match self.peek() {
            VhdlToken::Keyword(Keyword::Register) => Some(SignalKind::Register),
            VhdlToken::Keyword(Keyword::Bus) => Some(SignalKind::Bus),
            _ => None,
        };
        if signal_kind.is_some() == true {
            self.advance();
        }
        let default = match self.accept_delim(&Delimiter::VarAssign) {
            true => Some(self.parse_expr()?),
            false => None,
        };
        let file_open = match class {
            ObjectClass::File => {
                let mode = match self.accept_kw(&Keyword::Open) {
                    true => Some(self.parse_expr()?),
                    false => None,
                };
                match self.check_kw(&Keyword::Is) || mode.is_some() {
                    true => {
                        self.expect_kw(&Keyword::Is)?;
                        Some(FileOpen {
                            mode: mode,
                            logical_name: self.parse_expr()?,
                        })
                    }
                    false => None,
                }
            }
            _ => None,
        };
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Object(ObjectDecl {
            class: class,
            names: names,
            subtype: subtype,
            signal_kind: signal_kind,
            default: default,
            file_open: file_open,
        })))
    }

    /// Parses `( element {; element} )` declaring one interface element per name
    /// in the current scope.
    pub(super) fn parse_interface_list(&mut self) -> Result<Vec<DeclId>> {
        self.expect_delim(&Delimiter::ParenL)?;
        let mut items = Vec::new();
        loop {
            let class = match self.peek() {
                VhdlToken::Keyword(Keyword::Constant) => Some(ObjectClass::Constant),
                VhdlToken::Keyword(Keyword::Signal) => Some(ObjectClass::Signal),
                VhdlToken::Keyword(Keyword::Variable) => Some(ObjectClass::Variable),
                VhdlToken::Keyword(Keyword::File) => Some(ObjectClass::File),
                _ => None,
            };
            if class.is_some() == true {
                self.advance();
            }
            let names = self.parse_identifier_list()?;
            self.expect_delim(&Delimiter::Colon)?;
            let mode = self.peek().as_keyword().and_then(Mode::from_keyword);
            if mode.is_some() == true {
                self.advance();
            }
            let subtype = self.parse_subtype_indication()?;
            let bus = self.accept_kw(&Keyword::Bus);
            let default = match self.accept_delim(&Delimiter::VarAssign) {
                true => Some(self.parse_expr()?),
                false => None,
            };
            for name in names {
                items.push(self.finish_decl(Declaration::Interface(InterfaceElement {
                    class: class,
                    name: name,
                    mode: mode,
                    subtype: subtype.clone(),
                    bus: bus,
                    default: default.clone(),
                })));
            }
            if self.accept_delim(&Delimiter::Terminator) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::ParenR)?;
        Ok(items)
    }

    fn parse_alias_decl(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Alias)?;
        let sym = match self.peek() {
            VhdlToken::CharLiteral(_) => {
                let t = self.advance();
                let span = t.span();
                self.declare(&t.take().to_string(), span)
            }
            _ => {
                let (name, span) = self.expect_designator()?;
                self.declare(&name, span)
            }
        };
        let subtype = match self.accept_delim(&Delimiter::Colon) {
            true => Some(self.parse_subtype_indication()?),
            false => None,
        };
        self.expect_kw(&Keyword::Is)?;
        let target = match self.peek() {
            VhdlToken::StrLiteral(_) => {
                let (name, span) = self.expect_designator()?;
                Expr::Name(self.reference(&name, span))
            }
            _ => self.parse_name()?,
        };
        let signature = match self.check_delim(&Delimiter::BrackL) {
            true => Some(self.parse_signature()?),
            false => None,
        };
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Alias(AliasDecl {
            name: sym,
            subtype: subtype,
            target: target,
            signature: signature,
        })))
    }

    fn parse_component_decl(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Component)?;
        let (name, span) = self.expect_identifier()?;
        let sym = self.declare(&name, span);
        let scope = self.new_scope(Some(sym));
        self.push_scope(scope);
        self.accept_kw(&Keyword::Is);
        let (generics, ports) = self.parse_generic_and_port_clauses()?;
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        self.expect_kw(&Keyword::Component)?;
        let home = self.current();
        self.check_end_name(sym, home);
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Component(ComponentDecl {
            name: sym,
            scope: scope,
            generics: generics,
            ports: ports,
        })))
    }

    /// Parses the optional `generic (...);` and `port (...);` clauses of an
    /// entity or component.
    pub(super) fn parse_generic_and_port_clauses(
        &mut self,
    ) -> Result<(Option<Vec<DeclId>>, Option<Vec<DeclId>>)> {
        let generics = match self.accept_kw(&Keyword::Generic) {
            true => {
                let list = self.parse_interface_list()?;
                self.expect_delim(&Delimiter::Terminator)?;
                Some(list)
            }
            false => None,
        };
        let ports = match self.accept_kw(&Keyword::Port) {
            true => {
                let list = self.parse_interface_list()?;
                self.expect_delim(&Delimiter::Terminator)?;
                Some(list)
            }
            false => None,
        };
        Ok((generics, ports))
    }

    /* attributes, groups and other specifications */

    fn parse_attribute_item(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Attribute)?;
        let (name, span) = self.expect_identifier()?;
        if self.accept_delim(&Delimiter::Colon) == true {
            let sym = self.declare(&name, span);
            let type_mark = self.parse_type_mark()?;
            self.expect_delim(&Delimiter::Terminator)?;
            return Ok(self.finish_decl(Declaration::Attribute(AttributeDecl {
                name: sym,
                type_mark: type_mark,
            })));
        }
        let attribute = self.reference(&name, span);
        self.expect_kw(&Keyword::Of)?;
        let entities = self.parse_entity_names()?;
        self.expect_delim(&Delimiter::Colon)?;
        let class = self.parse_entity_class()?;
        self.expect_kw(&Keyword::Is)?;
        let value = self.parse_expr()?;
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::AttributeSpec(AttributeSpec {
            attribute: attribute,
            entities: entities,
            class: class,
            value: value,
        })))
    }

    /// Parses `others`, `all` or a list of designators with optional signatures.
    fn parse_entity_names(&mut self) -> Result<EntityNames> {
        if self.accept_kw(&Keyword::Others) == true {
            return Ok(EntityNames::Others);
        }
        if self.accept_kw(&Keyword::All) == true {
            return Ok(EntityNames::All);
        }
        let mut list = Vec::new();
        loop {
            let designator = match self.peek() {
                VhdlToken::CharLiteral(c) => {
                    let c = c.0.clone();
                    self.advance();
                    Expr::CharLiteral(c)
                }
                _ => {
                    let (name, span) = self.expect_designator()?;
                    Expr::Name(self.reference(&name, span))
                }
            };
            let signature = match self.check_delim(&Delimiter::BrackL) {
                true => Some(self.parse_signature()?),
                false => None,
            };
            list.push((designator, signature));
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        Ok(EntityNames::List(list))
    }

    fn parse_entity_class(&mut self) -> Result<Keyword> {
        match self.peek().as_keyword().copied() {
            Some(
                kw @ (Keyword::Entity
                | Keyword::Architecture
                | Keyword::Configuration
                | Keyword::Procedure
                | Keyword::Function
                | Keyword::Package
                | Keyword::Type
                | Keyword::Subtype
                | Keyword::Constant
                | Keyword::Signal
                | Keyword::Variable
                | Keyword::Component
                | Keyword::Label
                | Keyword::Literal
                | Keyword::Units
                | Keyword::Group
                | Keyword::File),
            ) => {
                self.advance();
                Ok(kw)
            }
            _ => Err(self.unexpected("an entity class")),
        }
    }

    fn parse_group_item(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Group)?;
        let (name, span) = self.expect_identifier()?;
        let sym = self.declare(&name, span);
        if self.accept_kw(&Keyword::Is) == true {
            self.expect_delim(&Delimiter::ParenL)?;
            let mut classes = Vec::new();
            loop {
                let class = self.parse_entity_class()?;
                classes.push((class, self.accept_delim(&Delimiter::Box)));
                if self.accept_delim(&Delimiter::Comma) == false {
                    break;
                }
            }
            self.expect_delim(&Delimiter::ParenR)?;
            self.expect_delim(&Delimiter::Terminator)?;
            return Ok(self.finish_decl(Declaration::GroupTemplate(GroupTemplate {
                name: sym,
                classes: classes,
            })));
        }
        self.expect_delim(&Delimiter::Colon)?;
        let template = self.parse_type_mark()?;
        self.expect_delim(&Delimiter::ParenL)?;
        let mut constituents = Vec::new();
        loop {
            constituents.push(self.parse_expr()?);
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::ParenR)?;
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Group(GroupDecl {
            name: sym,
            template: template,
            constituents: constituents,
        })))
    }

    fn parse_disconnect_spec(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Disconnect)?;
        let signals = self.parse_entity_names()?;
        self.expect_delim(&Delimiter::Colon)?;
        let type_mark = self.parse_type_mark()?;
        self.expect_kw(&Keyword::After)?;
        let after = self.parse_expr()?;
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Disconnect(DisconnectSpec {
            signals: signals,
            type_mark: type_mark,
            after: after,
        })))
    }

    fn parse_use_clause(&mut self) -> Result<DeclId> {
        self.expect_kw(&Keyword::Use)?;
        let mut names = Vec::new();
        loop {
            names.push(self.parse_use_name()?);
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(self.finish_decl(Declaration::Use(UseClause { names: names })))
    }

    /// Parses the selected name of a use clause.
    ///
    /// A prefix that is not visible is taken to be a library and kept in the
    /// root scope.
    pub(super) fn parse_use_name(&mut self) -> Result<Expr> {
        let (name, span) = self.expect_identifier()?;
        let sym = match self.file.tree().search(self.current(), &name).is_empty() {
            true => {
                let root = self.file.get_root();
                self.file.tree_mut().get(root, &name)
            }
            false => self.reference(&name, span),
        };
        let mut prefix = Expr::Name(sym);
        while self.accept_delim(&Delimiter::Dot) == true {
            let suffix = self.parse_suffix()?;
            prefix = Expr::Selected(Box::new(prefix), suffix);
        }
        Ok(prefix)
    }

    /* subprograms */

    fn parse_subprogram(&mut self) -> Result<DeclId> {
        let purity = match self.peek() {
            VhdlToken::Keyword(Keyword::Pure) => Some(Purity::Pure),
            VhdlToken::Keyword(Keyword::Impure) => Some(Purity::Impure),
            _ => None,
        };
        if purity.is_some() == true {
            self.advance();
        }
        let is_function = match self.peek() {
            VhdlToken::Keyword(Keyword::Function) => true,
            VhdlToken::Keyword(Keyword::Procedure) if purity.is_none() => false,
            _ => return Err(self.unexpected("'function'")),
        };
        self.advance();
        let (name, span) = self.expect_designator()?;
        let formals_scope = self.new_scope(None);
        self.push_scope(formals_scope);
        let formals = match self.check_delim(&Delimiter::ParenL) {
            true => self.parse_interface_list()?,
            false => Vec::new(),
        };
        let kind = match is_function {
            true => {
                self.expect_kw(&Keyword::Return)?;
                SubprogramKind::Function {
                    purity: purity,
                    result: self.parse_type_mark()?,
                }
            }
            false => SubprogramKind::Procedure,
        };
        self.pop_scope();
        let has_body = self.check_kw(&Keyword::Is);
        let (sym, completes) = self.bind_subprogram(&name, span, has_body);
        self.file.tree_mut().set_name(formals_scope, sym);
        let spec = SubprogramSpec::new(kind, sym, formals_scope, formals);
        let (decl, body_scope) = match has_body {
            false => {
                self.expect_delim(&Delimiter::Terminator)?;
                (spec.declare(), None)
            }
            true => {
                let body = self.parse_subprogram_body(sym, formals_scope)?;
                let scope = body.scope;
                (spec.define(body), Some(scope))
            }
        };
        let id = self.finish_decl(decl);
        if let Some(scope) = body_scope {
            self.file.tree_mut().set_owner(scope, NodeRef::Decl(id));
        }
        if completes == true {
            self.complete(sym, id);
        }
        Ok(id)
    }

    /// Parses `is {declaration} begin {statement} end [function|procedure]
    /// [designator] ;`.
    fn parse_subprogram_body(
        &mut self,
        sym: SymbolId,
        formals_scope: ScopeId,
    ) -> Result<SubprogramBody> {
        self.expect_kw(&Keyword::Is)?;
        let scope = self.file.tree_mut().alloc_scope(Some(sym), Some(formals_scope));
        self.push_scope(scope);
        let items = self.parse_declarative_part(&[Keyword::Begin]);
        self.expect_kw(&Keyword::Begin)?;
        let statements = self.skip_statements(false);
        self.expect_kw(&Keyword::End)?;
        self.pop_scope();
        if self.accept_kw(&Keyword::Function) == false {
            self.accept_kw(&Keyword::Procedure);
        }
        let home = self.current();
        self.check_end_name(sym, home);
        self.expect_delim(&Delimiter::Terminator)?;
        Ok(SubprogramBody {
            scope: scope,
            items: items,
            statements: statements,
        })
    }

    /// Chooses the symbol for a subprogram designator.
    ///
    /// A body completes a visible subprogram declaration of the same name that
    /// has no body yet.
    fn bind_subprogram(&mut self, name: &str, span: Span, has_body: bool) -> (SymbolId, bool) {
        let scope = self.current();
        if has_body == true {
            let pending = match self.file.tree().find(scope, name) {
                Some(local) => Some(local).filter(|s| self.is_pending_subprogram(*s)),
                None => self
                    .file
                    .tree()
                    .search(scope, name)
                    .into_iter()
                    .find(|s| self.is_pending_subprogram(*s)),
            };
            if let Some(sym) = pending {
                return (sym, true);
            }
        }
        (self.declare(name, span), false)
    }

    /// Checks if `sym` names a subprogram declared without a body that has not
    /// been completed.
    fn is_pending_subprogram(&self, sym: SymbolId) -> bool {
        if self.file.tree().symbol(sym).get_defn().is_some() == true {
            return false;
        }
        match self.decl_of(sym) {
            Some(Declaration::Subprogram(s)) => s.body.is_none(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::vhdl::ast::decl::Declaration;
    use crate::vhdl::ast::NodeRef;
    use crate::vhdl::diagnostic::DiagnosticKind;
    use crate::vhdl::parser::{ParsedFile, VhdlParser};

    fn parse_package(items: &str) -> ParsedFile {
        VhdlParser::new(&format!("package p is\n{}\nend package p;\n", items)).parse()
    }

    fn items(parsed: &ParsedFile) -> Vec<&Declaration> {
        parsed.file.units()[0]
            .get_items()
            .iter()
            .map(|id| parsed.file.decl(*id))
            .collect()
    }

    #[test]
    fn enum_literals_are_visible_through_type() {
        let parsed = parse_package(
            "type state is (idle, busy, '0');\nconstant s0 : state := idle;",
        );
        assert_eq!(parsed.diagnostics.len(), 0);
        let unit_scope = parsed.file.units()[0].get_scope();
        let tree = parsed.file.tree();
        let idle = tree.search(unit_scope, "idle");
        assert_eq!(idle.len(), 1);
        // the literal lives in the enumeration's own scope
        assert_eq!(tree.find(unit_scope, "idle"), None);
        let decl = parsed.file.units()[0].get_items()[0];
        assert_eq!(tree.symbol(idle[0]).get_ast(), Some(NodeRef::Decl(decl)));
        assert_eq!(tree.search(unit_scope, "'0'").len(), 1);
    }

    #[test]
    fn duplicate_literal_is_reported() {
        let parsed = parse_package("type t is (a, b, a);");
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 1);
        match items(&parsed)[0] {
            Declaration::EnumType(e) => assert_eq!(e.literals[0], e.literals[2]),
            _ => panic!("expecting an enumeration"),
        }
    }

    #[test]
    fn physical_type_units() {
        let parsed = parse_package(
            "type time_t is range 0 to 1000 units fs; ps = 1000 fs; ns = 1000 ps; end units time_t;\nconstant d : time_t := 5 ns;",
        );
        assert_eq!(parsed.diagnostics.len(), 0);
        match items(&parsed)[0] {
            Declaration::PhysicalType(p) => assert_eq!(p.units.len(), 2),
            _ => panic!("expecting a physical type"),
        }
    }

    #[test]
    fn record_elements_are_scoped() {
        let parsed = parse_package("type pair is record\n  a, b : bit;\nend record pair;\nsignal a : bit;");
        // `bit` is unresolved in both scopes; `a` is not a duplicate of the element
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 0);
        assert_eq!(parsed.count(DiagnosticKind::UnresolvedName), 2);
        let record = match items(&parsed)[0] {
            Declaration::RecordType(r) => r,
            _ => panic!("expecting a record"),
        };
        assert_eq!(record.elements[0].names.len(), 2);
        let tree = parsed.file.tree();
        let unit_scope = parsed.file.units()[0].get_scope();
        let element = record.elements[0].names[0];
        assert_eq!(tree.find(record.scope, "a"), Some(element));
        // only the signal is visible from the package, never the element
        let signal = tree.find(unit_scope, "a").unwrap();
        assert_eq!(signal != element, true);
        assert_eq!(tree.search(unit_scope, "a"), vec![signal]);
        assert_eq!(tree.search(unit_scope, "b"), vec![]);
    }

    #[test]
    fn incomplete_type_is_completed() {
        let parsed = parse_package("type node;\ntype node_ptr is access node;\ntype node is record\n  link : node_ptr;\nend record;");
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 0);
        let unit = &parsed.file.units()[0];
        let sym = parsed.file.tree().find(unit.get_scope(), "node").unwrap();
        let symbol = parsed.file.tree().symbol(sym);
        assert_eq!(symbol.get_ast(), Some(NodeRef::Decl(unit.get_items()[0])));
        assert_eq!(symbol.get_defn(), Some(NodeRef::Decl(unit.get_items()[2])));
    }

    #[test]
    fn subprogram_formals_have_their_own_scope() {
        let parsed = parse_package(
            "function f(x : integer; y : integer := 0) return integer;\nconstant x : integer := 1;",
        );
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 0);
        match items(&parsed)[0] {
            Declaration::Subprogram(s) => {
                assert_eq!(s.formals.len(), 2);
                assert_eq!(s.body.is_none(), true);
                let tree = parsed.file.tree();
                assert_eq!(tree.scope(s.scope).get_name(), Some(s.designator));
                assert_eq!(tree.find(s.scope, "x").is_some(), true);
                assert_eq!(tree.find(s.scope, "Y").is_some(), true);
            }
            _ => panic!("expecting a function"),
        }
    }

    #[test]
    fn subprogram_body_completes_declaration() {
        let parsed = parse_package(
            "procedure p(a : in bit);\nprocedure p(a : in bit) is\n  variable v : bit;\nbegin\n  v := a;\nend procedure p;",
        );
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 0);
        let unit = &parsed.file.units()[0];
        let sym = parsed.file.tree().find(unit.get_scope(), "p").unwrap();
        assert_eq!(
            parsed.file.tree().symbol(sym).get_defn(),
            Some(NodeRef::Decl(unit.get_items()[1]))
        );
        match parsed.file.decl(unit.get_items()[1]) {
            Declaration::Subprogram(s) => assert_eq!(s.body.as_ref().unwrap().statements.len(), 1),
            _ => panic!("expecting a procedure"),
        }
    }

    #[test]
    fn redeclared_subprogram_is_duplicate() {
        let parsed = parse_package("procedure p;\nprocedure p;");
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 1);
    }

    #[test]
    fn attribute_declaration_and_specification() {
        let parsed = parse_package(
            "attribute keep : boolean;\nsignal s : bit;\nattribute keep of s : signal is true;",
        );
        match items(&parsed)[2] {
            Declaration::AttributeSpec(a) => {
                let decl = parsed.file.units()[0].get_items()[0];
                assert_eq!(
                    parsed.file.tree().symbol(a.attribute).get_ast(),
                    Some(NodeRef::Decl(decl))
                );
            }
            _ => panic!("expecting an attribute specification"),
        }
    }

    #[test]
    fn bad_item_resynchronizes() {
        let parsed = parse_package("signal s bit;\nconstant c : integer := 1;");
        assert_eq!(parsed.count(DiagnosticKind::Syntax), 1);
        assert_eq!(items(&parsed).len(), 1);
        assert_eq!(parsed.balance.is_balanced(), true);
    }

    #[test]
    fn non_range_constraint_is_error() {
        let parsed = parse_package("subtype t is integer range 5;\nconstant c : integer := 1;");
        let syntax: Vec<_> = parsed
            .diagnostics
            .iter()
            .filter(|d| d.kind() == DiagnosticKind::Syntax)
            .collect();
        assert_eq!(syntax.len(), 1);
        assert_eq!(syntax[0].message(), "expecting a range but found 5");
        assert_eq!(items(&parsed).len(), 1);
    }
}
