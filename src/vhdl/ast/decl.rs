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

//! Declarative items: types, subtypes, objects, subprograms and the other
//! declarations allowed in package, entity and architecture regions.

use super::expr::{join, Expr, Signature, SubtypeIndication};
use super::stmt::Statement;
use super::{DeclId, RenderContext};
use crate::vhdl::scope::ScopeId;
use crate::vhdl::symbol::SymbolId;
use crate::vhdl::token::Keyword;

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum ObjectClass {
    Constant,
    Signal,
    Variable,
    SharedVariable,
    File,
}

impl ObjectClass {
    fn render(&self, cx: &RenderContext) -> String {
        match self {
            Self::Constant => cx.kw(Keyword::Constant),
            Self::Signal => cx.kw(Keyword::Signal),
            Self::Variable => cx.kw(Keyword::Variable),
            Self::SharedVariable => {
                format!("{} {}", cx.kw(Keyword::Shared), cx.kw(Keyword::Variable))
            }
            Self::File => cx.kw(Keyword::File),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum Mode {
    In,
    Out,
    Inout,
    Buffer,
    Linkage,
}

impl Mode {
    pub fn from_keyword(kw: &Keyword) -> Option<Self> {
        Some(match kw {
            Keyword::In => Self::In,
            Keyword::Out => Self::Out,
            Keyword::Inout => Self::Inout,
            Keyword::Buffer => Self::Buffer,
            Keyword::Linkage => Self::Linkage,
            _ => return None,
        })
    }

    fn as_keyword(&self) -> Keyword {
        match self {
            Self::In => Keyword::In,
            Self::Out => Keyword::Out,
            Self::Inout => Keyword::Inout,
            Self::Buffer => Keyword::Buffer,
            Self::Linkage => Keyword::Linkage,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum Purity {
    Pure,
    Impure,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum SignalKind {
    Register,
    Bus,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SubtypeDecl {
    pub name: SymbolId,
    pub indication: SubtypeIndication,
}

/// An integer or floating type defined by a range constraint.
#[derive(Debug, PartialEq, Clone)]
pub struct ConstrainedType {
    pub name: SymbolId,
    pub range: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IncompleteType {
    pub name: SymbolId,
}

#[derive(Debug, PartialEq, Clone)]
pub struct EnumType {
    pub name: SymbolId,
    pub scope: ScopeId,
    pub literals: Vec<SymbolId>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalType {
    pub name: SymbolId,
    pub range: Expr,
    pub scope: ScopeId,
    pub primary: SymbolId,
    /// Secondary units and their values expressed in earlier units.
    pub units: Vec<(SymbolId, Expr)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ArrayType {
    pub name: SymbolId,
    /// Either unconstrained `T range <>` bounds or discrete ranges.
    pub indexes: Vec<Expr>,
    pub element: SubtypeIndication,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ElementDecl {
    pub names: Vec<SymbolId>,
    pub subtype: SubtypeIndication,
}

#[derive(Debug, PartialEq, Clone)]
pub struct RecordType {
    pub name: SymbolId,
    pub scope: ScopeId,
    pub elements: Vec<ElementDecl>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ProtectedType {
    pub name: SymbolId,
    pub scope: ScopeId,
    pub items: Vec<DeclId>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ProtectedBody {
    pub name: SymbolId,
    pub scope: ScopeId,
    pub items: Vec<DeclId>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AttributeDecl {
    pub name: SymbolId,
    pub type_mark: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AccessType {
    pub name: SymbolId,
    pub subtype: SubtypeIndication,
}

/// A file type definition `type T is file of M;`.
#[derive(Debug, PartialEq, Clone)]
pub struct FileDecl {
    pub name: SymbolId,
    pub type_mark: Expr,
}

/// One formal of a generic, port or parameter list.
#[derive(Debug, PartialEq, Clone)]
pub struct InterfaceElement {
    pub class: Option<ObjectClass>,
    pub name: SymbolId,
    pub mode: Option<Mode>,
    pub subtype: SubtypeIndication,
    pub bus: bool,
    pub default: Option<Expr>,
}

impl InterfaceElement {
    /// Writes the element without indentation or terminator.
    pub fn render_inline(&self, cx: &RenderContext) -> String {
        let mut text = String::new();
        if let Some(c) = &self.class {
            text.push_str(&c.render(cx));
            text.push(' ');
        }
        text.push_str(&format!("{} : ", cx.name(self.name)));
        if let Some(m) = &self.mode {
            text.push_str(&cx.kw(m.as_keyword()));
            text.push(' ');
        }
        text.push_str(&self.subtype.render(cx));
        if self.bus == true {
            text.push_str(&format!(" {}", cx.kw(Keyword::Bus)));
        }
        if let Some(d) = &self.default {
            text.push_str(&format!(" := {}", d.render(cx)));
        }
        text
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum SubprogramKind {
    Function {
        purity: Option<Purity>,
        result: Expr,
    },
    Procedure,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SubprogramBody {
    pub scope: ScopeId,
    pub items: Vec<DeclId>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Subprogram {
    pub kind: SubprogramKind,
    pub designator: SymbolId,
    /// The region holding the formal parameters.
    pub scope: ScopeId,
    pub formals: Vec<DeclId>,
    pub body: Option<SubprogramBody>,
}

impl Subprogram {
    fn keyword(&self) -> Keyword {
        match self.kind {
            SubprogramKind::Function { .. } => Keyword::Function,
            SubprogramKind::Procedure => Keyword::Procedure,
        }
    }

    fn render_spec(&self, cx: &RenderContext) -> String {
        let mut text = String::new();
        if let SubprogramKind::Function {
            purity: Some(p), ..
        } = &self.kind
        {
            text.push_str(&match p {
                Purity::Pure => cx.kw(Keyword::Pure),
                Purity::Impure => cx.kw(Keyword::Impure),
            });
            text.push(' ');
        }
        text.push_str(&format!("{} {}", cx.kw(self.keyword()), cx.name(self.designator)));
        if self.formals.is_empty() == false {
            text.push_str(&format!("({})", cx.render_interface(&self.formals)));
        }
        if let SubprogramKind::Function { result, .. } = &self.kind {
            text.push_str(&format!(" {} {}", cx.kw(Keyword::Return), result.render(cx)));
        }
        text
    }
}

/// The in-progress state of a subprogram once its formals are known.
#[derive(Debug, PartialEq, Clone)]
pub struct SubprogramSpec {
    kind: SubprogramKind,
    designator: SymbolId,
    scope: ScopeId,
    formals: Vec<DeclId>,
}

impl SubprogramSpec {
    pub fn new(
        kind: SubprogramKind,
        designator: SymbolId,
        scope: ScopeId,
        formals: Vec<DeclId>,
    ) -> Self {
        Self {
            kind: kind,
            designator: designator,
            scope: scope,
            formals: formals,
        }
    }

    pub fn get_designator(&self) -> SymbolId {
        self.designator
    }

    /// Completes the subprogram as a declaration without a body.
    pub fn declare(self) -> Declaration {
        self.finish(None)
    }

    /// Completes the subprogram with its body.
    pub fn define(self, body: SubprogramBody) -> Declaration {
        self.finish(Some(body))
    }

    fn finish(self, body: Option<SubprogramBody>) -> Declaration {
        Declaration::Subprogram(Subprogram {
            kind: self.kind,
            designator: self.designator,
            scope: self.scope,
            formals: self.formals,
            body: body,
        })
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct FileOpen {
    pub mode: Option<Expr>,
    pub logical_name: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ObjectDecl {
    pub class: ObjectClass,
    pub names: Vec<SymbolId>,
    pub subtype: SubtypeIndication,
    pub signal_kind: Option<SignalKind>,
    pub default: Option<Expr>,
    pub file_open: Option<FileOpen>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AliasDecl {
    pub name: SymbolId,
    pub subtype: Option<SubtypeIndication>,
    pub target: Expr,
    pub signature: Option<Signature>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ComponentDecl {
    pub name: SymbolId,
    pub scope: ScopeId,
    pub generics: Option<Vec<DeclId>>,
    pub ports: Option<Vec<DeclId>>,
}

/// The named items an attribute specification or disconnection applies to.
#[derive(Debug, PartialEq, Clone)]
pub enum EntityNames {
    List(Vec<(Expr, Option<Signature>)>),
    Others,
    All,
}

impl EntityNames {
    fn render(&self, cx: &RenderContext) -> String {
        match self {
            Self::List(list) => list
                .iter()
                .map(|(e, sig)| match sig {
                    Some(s) => format!("{}{}", e.render(cx), s.render(cx)),
                    None => e.render(cx),
                })
                .collect::<Vec<String>>()
                .join(", "),
            Self::Others => cx.kw(Keyword::Others),
            Self::All => cx.kw(Keyword::All),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct AttributeSpec {
    pub attribute: SymbolId,
    pub entities: EntityNames,
    pub class: Keyword,
    pub value: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UseClause {
    pub names: Vec<Expr>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct GroupTemplate {
    pub name: SymbolId,
    /// Entity classes, each flagged when followed by `<>`.
    pub classes: Vec<(Keyword, bool)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct GroupDecl {
    pub name: SymbolId,
    pub template: Expr,
    pub constituents: Vec<Expr>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DisconnectSpec {
    pub signals: EntityNames,
    pub type_mark: Expr,
    pub after: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Declaration {
    Subtype(SubtypeDecl),
    ConstrainedType(ConstrainedType),
    IncompleteType(IncompleteType),
    EnumType(EnumType),
    PhysicalType(PhysicalType),
    ArrayType(ArrayType),
    RecordType(RecordType),
    ProtectedType(ProtectedType),
    ProtectedBody(ProtectedBody),
    Attribute(AttributeDecl),
    AccessType(AccessType),
    FileType(FileDecl),
    Interface(InterfaceElement),
    Subprogram(Subprogram),
    Object(ObjectDecl),
    Alias(AliasDecl),
    Component(ComponentDecl),
    AttributeSpec(AttributeSpec),
    Use(UseClause),
    GroupTemplate(GroupTemplate),
    Group(GroupDecl),
    Disconnect(DisconnectSpec),
}

impl Declaration {
    /// Returns the symbols introduced by the declaration.
    pub fn names(&self) -> Vec<SymbolId> {
        match self {
            Self::Subtype(d) => vec![d.name],
            Self::ConstrainedType(d) => vec![d.name],
            Self::IncompleteType(d) => vec![d.name],
            Self::EnumType(d) => vec![d.name],
            Self::PhysicalType(d) => vec![d.name],
            Self::ArrayType(d) => vec![d.name],
            Self::RecordType(d) => vec![d.name],
            Self::ProtectedType(d) => vec![d.name],
            Self::ProtectedBody(d) => vec![d.name],
            Self::Attribute(d) => vec![d.name],
            Self::AccessType(d) => vec![d.name],
            Self::FileType(d) => vec![d.name],
            Self::Interface(d) => vec![d.name],
            Self::Subprogram(d) => vec![d.designator],
            Self::Object(d) => d.names.clone(),
            Self::Alias(d) => vec![d.name],
            Self::Component(d) => vec![d.name],
            Self::GroupTemplate(d) => vec![d.name],
            Self::Group(d) => vec![d.name],
            Self::AttributeSpec(_) | Self::Use(_) | Self::Disconnect(_) => Vec::new(),
        }
    }

    /// Returns the region opened by the declaration, if it opens one.
    pub fn scope(&self) -> Option<ScopeId> {
        match self {
            Self::EnumType(d) => Some(d.scope),
            Self::PhysicalType(d) => Some(d.scope),
            Self::RecordType(d) => Some(d.scope),
            Self::ProtectedType(d) => Some(d.scope),
            Self::ProtectedBody(d) => Some(d.scope),
            Self::Subprogram(d) => Some(d.scope),
            Self::Component(d) => Some(d.scope),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Subtype(_) => "SubtypeDecl",
            Self::ConstrainedType(_) => "ConstrainedType",
            Self::IncompleteType(_) => "IncompleteType",
            Self::EnumType(_) => "EnumType",
            Self::PhysicalType(_) => "PhysicalType",
            Self::ArrayType(_) => "ArrayType",
            Self::RecordType(_) => "RecordType",
            Self::ProtectedType(_) => "ProtectedType",
            Self::ProtectedBody(_) => "ProtectedBody",
            Self::Attribute(_) => "AttributeDecl",
            Self::AccessType(_) => "AccessType",
            Self::FileType(_) => "FileDecl",
            Self::Interface(_) => "InterfaceElement",
            Self::Subprogram(s) => match s.kind {
                SubprogramKind::Function { .. } => "Function",
                SubprogramKind::Procedure => "Procedure",
            },
            Self::Object(_) => "ObjectDecl",
            Self::Alias(_) => "AliasDecl",
            Self::Component(_) => "ComponentDecl",
            Self::AttributeSpec(_) => "AttributeSpec",
            Self::Use(_) => "UseClause",
            Self::GroupTemplate(_) => "GroupTemplate",
            Self::Group(_) => "GroupDecl",
            Self::Disconnect(_) => "DisconnectSpec",
        }
    }

    /// Writes the declaration as VHDL text nested `indent` levels deep.
    pub fn render(&self, cx: &RenderContext, indent: usize) -> String {
        let p = cx.indent(indent);
        let p1 = cx.indent(indent + 1);
        let ty = cx.kw(Keyword::Type);
        let is = cx.kw(Keyword::Is);
        let end = cx.kw(Keyword::End);
        match self {
            Self::Subtype(d) => format!(
                "{}{} {} {} {};\n",
                p,
                cx.kw(Keyword::Subtype),
                cx.name(d.name),
                is,
                d.indication.render(cx)
            ),
            Self::ConstrainedType(d) => format!(
                "{}{} {} {} {} {};\n",
                p,
                ty,
                cx.name(d.name),
                is,
                cx.kw(Keyword::Range),
                d.range.render(cx)
            ),
            Self::IncompleteType(d) => format!("{}{} {};\n", p, ty, cx.name(d.name)),
            Self::EnumType(d) => format!(
                "{}{} {} {} ({});\n",
                p,
                ty,
                cx.name(d.name),
                is,
                d.literals
                    .iter()
                    .map(|l| cx.name(*l))
                    .collect::<Vec<&str>>()
                    .join(", ")
            ),
            Self::PhysicalType(d) => {
                let p2 = cx.indent(indent + 2);
                let units = cx.kw(Keyword::Units);
                let mut text = format!(
                    "{}{} {} {} {} {}\n{}{}\n{}{};\n",
                    p,
                    ty,
                    cx.name(d.name),
                    is,
                    cx.kw(Keyword::Range),
                    d.range.render(cx),
                    p1,
                    units,
                    p2,
                    cx.name(d.primary)
                );
                for (unit, value) in &d.units {
                    text.push_str(&format!("{}{} = {};\n", p2, cx.name(*unit), value.render(cx)));
                }
                text.push_str(&format!("{}{} {} {};\n", p1, end, units, cx.name(d.name)));
                text
            }
            Self::ArrayType(d) => format!(
                "{}{} {} {} {} ({}) {} {};\n",
                p,
                ty,
                cx.name(d.name),
                is,
                cx.kw(Keyword::Array),
                join(&d.indexes, cx, ", "),
                cx.kw(Keyword::Of),
                d.element.render(cx)
            ),
            Self::RecordType(d) => {
                let record = cx.kw(Keyword::Record);
                let mut text = format!("{}{} {} {} {}\n", p, ty, cx.name(d.name), is, record);
                for e in &d.elements {
                    text.push_str(&format!(
                        "{}{} : {};\n",
                        p1,
                        e.names.iter().map(|n| cx.name(*n)).collect::<Vec<&str>>().join(", "),
                        e.subtype.render(cx)
                    ));
                }
                text.push_str(&format!("{}{} {} {};\n", p, end, record, cx.name(d.name)));
                text
            }
            Self::ProtectedType(d) => {
                let protected = cx.kw(Keyword::Protected);
                format!(
                    "{}{} {} {} {}\n{}{}{} {} {};\n",
                    p,
                    ty,
                    cx.name(d.name),
                    is,
                    protected,
                    cx.render_items(&d.items, indent + 1),
                    p,
                    end,
                    protected,
                    cx.name(d.name)
                )
            }
            Self::ProtectedBody(d) => {
                let protected = format!("{} {}", cx.kw(Keyword::Protected), cx.kw(Keyword::Body));
                format!(
                    "{}{} {} {} {}\n{}{}{} {} {};\n",
                    p,
                    ty,
                    cx.name(d.name),
                    is,
                    protected,
                    cx.render_items(&d.items, indent + 1),
                    p,
                    end,
                    protected,
                    cx.name(d.name)
                )
            }
            Self::Attribute(d) => format!(
                "{}{} {} : {};\n",
                p,
                cx.kw(Keyword::Attribute),
                cx.name(d.name),
                d.type_mark.render(cx)
            ),
            Self::AccessType(d) => format!(
                "{}{} {} {} {} {};\n",
                p,
                ty,
                cx.name(d.name),
                is,
                cx.kw(Keyword::Access),
                d.subtype.render(cx)
            ),
            Self::FileType(d) => format!(
                "{}{} {} {} {} {} {};\n",
                p,
                ty,
                cx.name(d.name),
                is,
                cx.kw(Keyword::File),
                cx.kw(Keyword::Of),
                d.type_mark.render(cx)
            ),
            Self::Interface(d) => format!("{}{};\n", p, d.render_inline(cx)),
            Self::Subprogram(d) => match &d.body {
                None => format!("{}{};\n", p, d.render_spec(cx)),
                Some(body) => {
                    let mut text = format!("{}{} {}\n", p, d.render_spec(cx), is);
                    text.push_str(&cx.render_items(&body.items, indent + 1));
                    text.push_str(&format!("{}{}\n", p, cx.kw(Keyword::Begin)));
                    for s in &body.statements {
                        text.push_str(&format!("{}{}\n", p1, s.render(cx)));
                    }
                    text.push_str(&format!(
                        "{}{} {} {};\n",
                        p,
                        end,
                        cx.kw(d.keyword()),
                        cx.name(d.designator)
                    ));
                    text
                }
            },
            Self::Object(d) => {
                let mut text = format!(
                    "{}{} {} : {}",
                    p,
                    d.class.render(cx),
                    d.names.iter().map(|n| cx.name(*n)).collect::<Vec<&str>>().join(", "),
                    d.subtype.render(cx)
                );
                match d.signal_kind {
                    Some(SignalKind::Register) => {
                        text.push_str(&format!(" {}", cx.kw(Keyword::Register)))
                    }
                    Some(SignalKind::Bus) => text.push_str(&format!(" {}", cx.kw(Keyword::Bus))),
                    None => (),
                }
                if let Some(e) = &d.default {
                    text.push_str(&format!(" := {}", e.render(cx)));
                }
                if let Some(f) = &d.file_open {
                    if let Some(m) = &f.mode {
                        text.push_str(&format!(" {} {}", cx.kw(Keyword::Open), m.render(cx)));
                    }
                    text.push_str(&format!(" {} {}", is, f.logical_name.render(cx)));
                }
                text.push_str(";\n");
                text
            }
            Self::Alias(d) => {
                let mut text = format!("{}{} {}", p, cx.kw(Keyword::Alias), cx.name(d.name));
                if let Some(si) = &d.subtype {
                    text.push_str(&format!(" : {}", si.render(cx)));
                }
                text.push_str(&format!(" {} {}", is, d.target.render(cx)));
                if let Some(sig) = &d.signature {
                    text.push_str(&sig.render(cx));
                }
                text.push_str(";\n");
                text
            }
            Self::Component(d) => {
                let component = cx.kw(Keyword::Component);
                let mut text = format!("{}{} {} {}\n", p, component, cx.name(d.name), is);
                if let Some(g) = &d.generics {
                    text.push_str(&format!(
                        "{}{} ({});\n",
                        p1,
                        cx.kw(Keyword::Generic),
                        cx.render_interface(g)
                    ));
                }
                if let Some(ports) = &d.ports {
                    text.push_str(&format!(
                        "{}{} ({});\n",
                        p1,
                        cx.kw(Keyword::Port),
                        cx.render_interface(ports)
                    ));
                }
                text.push_str(&format!("{}{} {} {};\n", p, end, component, cx.name(d.name)));
                text
            }
            Self::AttributeSpec(d) => format!(
                "{}{} {} {} {} : {} {} {};\n",
                p,
                cx.kw(Keyword::Attribute),
                cx.name(d.attribute),
                cx.kw(Keyword::Of),
                d.entities.render(cx),
                cx.kw(d.class),
                is,
                d.value.render(cx)
            ),
            Self::Use(d) => format!("{}{} {};\n", p, cx.kw(Keyword::Use), join(&d.names, cx, ", ")),
            Self::GroupTemplate(d) => format!(
                "{}{} {} {} ({});\n",
                p,
                cx.kw(Keyword::Group),
                cx.name(d.name),
                is,
                d.classes
                    .iter()
                    .map(|(c, boxed)| match boxed {
                        true => format!("{} <>", cx.kw(*c)),
                        false => cx.kw(*c),
                    })
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Self::Group(d) => format!(
                "{}{} {} : {}({});\n",
                p,
                cx.kw(Keyword::Group),
                cx.name(d.name),
                d.template.render(cx),
                join(&d.constituents, cx, ", ")
            ),
            Self::Disconnect(d) => format!(
                "{}{} {} : {} {} {};\n",
                p,
                cx.kw(Keyword::Disconnect),
                d.signals.render(cx),
                d.type_mark.render(cx),
                cx.kw(Keyword::After),
                d.after.render(cx)
            ),
        }
    }

    /// Writes the structural form of the declaration.
    pub fn dump(&self, cx: &RenderContext, indent: usize) -> String {
        let p1 = cx.indent(indent + 1);
        let mut text = format!("{}{}", cx.indent(indent), self.kind_name());
        for n in self.names() {
            text.push_str(&format!(" {}", cx.dump_symbol(n)));
        }
        if let Some(s) = self.scope() {
            text.push_str(&format!(" {}", cx.dump_scope(s)));
        }
        text.push('\n');
        let child = indent + 1;
        match self {
            Self::Subtype(d) => text.push_str(&d.indication.dump(cx, child)),
            Self::ConstrainedType(d) => text.push_str(&d.range.dump(cx, child)),
            Self::IncompleteType(_) => (),
            Self::EnumType(d) => {
                for l in &d.literals {
                    text.push_str(&format!("{}literal {}\n", p1, cx.dump_symbol(*l)));
                }
            }
            Self::PhysicalType(d) => {
                text.push_str(&d.range.dump(cx, child));
                text.push_str(&format!("{}primary {}\n", p1, cx.dump_symbol(d.primary)));
                for (unit, value) in &d.units {
                    text.push_str(&format!("{}unit {}\n", p1, cx.dump_symbol(*unit)));
                    text.push_str(&value.dump(cx, child + 1));
                }
            }
            Self::ArrayType(d) => {
                d.indexes.iter().for_each(|i| text.push_str(&i.dump(cx, child)));
                text.push_str(&d.element.dump(cx, child));
            }
            Self::RecordType(d) => {
                for e in &d.elements {
                    text.push_str(&format!(
                        "{}element {}\n",
                        p1,
                        e.names.iter().map(|n| cx.dump_symbol(*n)).collect::<Vec<String>>().join(", ")
                    ));
                    text.push_str(&e.subtype.dump(cx, child + 1));
                }
            }
            Self::ProtectedType(d) => text.push_str(&cx.dump_items(&d.items, child)),
            Self::ProtectedBody(d) => text.push_str(&cx.dump_items(&d.items, child)),
            Self::Attribute(d) => text.push_str(&d.type_mark.dump(cx, child)),
            Self::AccessType(d) => text.push_str(&d.subtype.dump(cx, child)),
            Self::FileType(d) => text.push_str(&d.type_mark.dump(cx, child)),
            Self::Interface(d) => {
                text.push_str(&format!(
                    "{}class {:?} mode {:?} bus {}\n",
                    p1, d.class, d.mode, d.bus
                ));
                text.push_str(&d.subtype.dump(cx, child));
                if let Some(e) = &d.default {
                    text.push_str(&e.dump(cx, child));
                }
            }
            Self::Subprogram(d) => {
                text.push_str(&cx.dump_items(&d.formals, child));
                if let SubprogramKind::Function { purity, result } = &d.kind {
                    text.push_str(&format!("{}return {:?}\n", p1, purity));
                    text.push_str(&result.dump(cx, child + 1));
                }
                if let Some(body) = &d.body {
                    text.push_str(&format!("{}body {}\n", p1, cx.dump_scope(body.scope)));
                    text.push_str(&cx.dump_items(&body.items, child + 1));
                    text.push_str(&format!(
                        "{}statements {}\n",
                        cx.indent(child + 1),
                        body.statements.len()
                    ));
                }
            }
            Self::Object(d) => {
                text.push_str(&format!("{}class {:?}\n", p1, d.class));
                text.push_str(&d.subtype.dump(cx, child));
                if let Some(e) = &d.default {
                    text.push_str(&e.dump(cx, child));
                }
                if let Some(f) = &d.file_open {
                    if let Some(m) = &f.mode {
                        text.push_str(&m.dump(cx, child));
                    }
                    text.push_str(&f.logical_name.dump(cx, child));
                }
            }
            Self::Alias(d) => {
                if let Some(si) = &d.subtype {
                    text.push_str(&si.dump(cx, child));
                }
                text.push_str(&d.target.dump(cx, child));
            }
            Self::Component(d) => {
                if let Some(g) = &d.generics {
                    text.push_str(&format!("{}generics\n", p1));
                    text.push_str(&cx.dump_items(g, child + 1));
                }
                if let Some(ports) = &d.ports {
                    text.push_str(&format!("{}ports\n", p1));
                    text.push_str(&cx.dump_items(ports, child + 1));
                }
            }
            Self::AttributeSpec(d) => {
                text.push_str(&format!(
                    "{}attribute {} class {}\n",
                    p1,
                    cx.dump_symbol(d.attribute),
                    d.class
                ));
                text.push_str(&d.value.dump(cx, child));
            }
            Self::Use(d) => d.names.iter().for_each(|n| text.push_str(&n.dump(cx, child))),
            Self::GroupTemplate(d) => {
                for (c, boxed) in &d.classes {
                    text.push_str(&format!("{}class {} {}\n", p1, c, boxed));
                }
            }
            Self::Group(d) => {
                text.push_str(&d.template.dump(cx, child));
                d.constituents.iter().for_each(|c| text.push_str(&c.dump(cx, child)));
            }
            Self::Disconnect(d) => {
                text.push_str(&d.type_mark.dump(cx, child));
                text.push_str(&d.after.dump(cx, child));
            }
        }
        text
    }
}

/// Collects enumeration literals while the literal list is open.
#[derive(Debug, PartialEq, Clone)]
pub struct EnumBuilder {
    name: SymbolId,
    scope: ScopeId,
    literals: Vec<SymbolId>,
}

impl EnumBuilder {
    pub fn new(name: SymbolId, scope: ScopeId) -> Self {
        Self {
            name: name,
            scope: scope,
            literals: Vec::new(),
        }
    }

    pub fn literal(&mut self, lit: SymbolId) {
        self.literals.push(lit);
    }

    pub fn finish(self) -> Declaration {
        Declaration::EnumType(EnumType {
            name: self.name,
            scope: self.scope,
            literals: self.literals,
        })
    }
}

/// Collects secondary unit declarations while the units region is open.
#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalBuilder {
    name: SymbolId,
    range: Expr,
    scope: ScopeId,
    primary: SymbolId,
    units: Vec<(SymbolId, Expr)>,
}

impl PhysicalBuilder {
    pub fn new(name: SymbolId, range: Expr, scope: ScopeId, primary: SymbolId) -> Self {
        Self {
            name: name,
            range: range,
            scope: scope,
            primary: primary,
            units: Vec::new(),
        }
    }

    pub fn unit(&mut self, unit: SymbolId, value: Expr) {
        self.units.push((unit, value));
    }

    pub fn finish(self) -> Declaration {
        Declaration::PhysicalType(PhysicalType {
            name: self.name,
            range: self.range,
            scope: self.scope,
            primary: self.primary,
            units: self.units,
        })
    }
}

/// Collects element declarations while a record body is open.
#[derive(Debug, PartialEq, Clone)]
pub struct RecordBuilder {
    name: SymbolId,
    scope: ScopeId,
    elements: Vec<ElementDecl>,
}

impl RecordBuilder {
    pub fn new(name: SymbolId, scope: ScopeId) -> Self {
        Self {
            name: name,
            scope: scope,
            elements: Vec::new(),
        }
    }

    pub fn element(&mut self, names: Vec<SymbolId>, subtype: SubtypeIndication) {
        self.elements.push(ElementDecl {
            names: names,
            subtype: subtype,
        });
    }

    pub fn finish(self) -> Declaration {
        Declaration::RecordType(RecordType {
            name: self.name,
            scope: self.scope,
            elements: self.elements,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vhdl::ast::expr::{BinaryOp, Direction};
    use crate::vhdl::ast::DesignFile;
    use crate::vhdl::format::VhdlFormat;
    use crate::vhdl::token::literal::AbstLiteral;

    fn lit(s: &str) -> Expr {
        Expr::AbstractLiteral(AbstLiteral::Decimal(s.to_string()))
    }

    #[test]
    fn render_enum_and_constant() {
        let mut file = DesignFile::new("_root");
        let root = file.get_root();
        let color = file.tree_mut().add(root, "Color", None).unwrap();
        let scope = file.tree_mut().alloc_scope(Some(color), Some(root));
        let mut b = EnumBuilder::new(color, scope);
        for name in ["Red", "Green"] {
            let id = file.tree_mut().add(scope, name, None).unwrap();
            b.literal(id);
        }
        let e = file.alloc_decl(b.finish());

        let n = file.tree_mut().add(root, "N", None).unwrap();
        let int = file.tree_mut().get(root, "integer");
        let c = file.alloc_decl(Declaration::Object(ObjectDecl {
            class: ObjectClass::Constant,
            names: vec![n],
            subtype: SubtypeIndication::new(Expr::Name(int)),
            signal_kind: None,
            default: Some(lit("1").chain(BinaryOp::Add, lit("2"))),
            file_open: None,
        }));

        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        assert_eq!(file.decl(e).render(&cx, 1), "    type Color is (Red, Green);\n");
        assert_eq!(file.decl(c).render(&cx, 0), "constant N : integer := 1 + 2;\n");
        assert_eq!(file.decl(e).names(), vec![color]);
        assert_eq!(file.decl(e).scope(), Some(scope));
    }

    #[test]
    fn render_physical_type() {
        let mut file = DesignFile::new("_root");
        let root = file.get_root();
        let t = file.tree_mut().add(root, "time_t", None).unwrap();
        let scope = file.tree_mut().alloc_scope(Some(t), Some(root));
        let fs = file.tree_mut().add(scope, "fs", None).unwrap();
        let ps = file.tree_mut().add(scope, "ps", None).unwrap();
        let range = Expr::Range {
            left: Box::new(lit("0")),
            dir: Direction::To,
            right: Box::new(lit("1000")),
        };
        let mut b = PhysicalBuilder::new(t, range, scope, fs);
        b.unit(
            ps,
            Expr::PhysicalLiteral {
                value: AbstLiteral::Decimal(String::from("1000")),
                unit: fs,
            },
        );
        let id = file.alloc_decl(b.finish());
        let fmt = VhdlFormat::new().tab_size(2);
        let cx = file.context(&fmt);
        assert_eq!(
            file.decl(id).render(&cx, 0),
            "type time_t is range 0 to 1000\n  units\n    fs;\n    ps = 1000 fs;\n  end units time_t;\n"
        );
    }

    #[test]
    fn dump_shows_links() {
        let mut file = DesignFile::new("_root");
        let root = file.get_root();
        let t = file.tree_mut().add(root, "T", None).unwrap();
        let id = file.alloc_decl(Declaration::IncompleteType(IncompleteType { name: t }));
        file.tree_mut().symbol_mut(t).set_ast(crate::vhdl::ast::NodeRef::Decl(id));
        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        let text = file.decl(id).dump(&cx, 0);
        assert!(text.starts_with("IncompleteType Symbol#"));
        assert!(text.contains("\"T\""));
        assert!(text.contains("ast=Decl#0"));
    }
}
