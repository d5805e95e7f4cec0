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

//! Expressions, names and subtype indications.

use super::RenderContext;
use crate::vhdl::scope::ScopeTree;
use crate::vhdl::symbol::SymbolId;
use crate::vhdl::token::literal::AbstLiteral;
use crate::vhdl::token::{Delimiter, Keyword, VhdlToken};

/// Operator classes from loosest to tightest binding.
#[derive(Debug, PartialEq, Clone, Copy, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Logical = 0,
    Relational = 1,
    Shift = 2,
    Adding = 3,
    Multiplying = 5,
    Exponent = 6,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Sll,
    Srl,
    Sla,
    Sra,
    Rol,
    Ror,
    Add,
    Sub,
    Concat,
    Mul,
    Div,
    Mod,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::And | Self::Or | Self::Nand | Self::Nor | Self::Xor | Self::Xnor => {
                Precedence::Logical
            }
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => {
                Precedence::Relational
            }
            Self::Sll | Self::Srl | Self::Sla | Self::Sra | Self::Rol | Self::Ror => {
                Precedence::Shift
            }
            Self::Add | Self::Sub | Self::Concat => Precedence::Adding,
            Self::Mul | Self::Div | Self::Mod | Self::Rem => Precedence::Multiplying,
            Self::Pow => Precedence::Exponent,
        }
    }

    /// Interprets `t` as a binary operator, if it is one.
    pub fn from_token(t: &VhdlToken) -> Option<Self> {
        Some(match t {
            VhdlToken::Keyword(kw) => match kw {
                Keyword::And => Self::And,
                Keyword::Or => Self::Or,
                Keyword::Nand => Self::Nand,
                Keyword::Nor => Self::Nor,
                Keyword::Xor => Self::Xor,
                Keyword::Xnor => Self::Xnor,
                Keyword::Sll => Self::Sll,
                Keyword::Srl => Self::Srl,
                Keyword::Sla => Self::Sla,
                Keyword::Sra => Self::Sra,
                Keyword::Rol => Self::Rol,
                Keyword::Ror => Self::Ror,
                Keyword::Mod => Self::Mod,
                Keyword::Rem => Self::Rem,
                _ => return None,
            },
            VhdlToken::Delimiter(d) => match d {
                Delimiter::Eq => Self::Eq,
                Delimiter::Inequality => Self::Ne,
                Delimiter::Lt => Self::Lt,
                Delimiter::SigAssign => Self::Le,
                Delimiter::Gt => Self::Gt,
                Delimiter::GTE => Self::Ge,
                Delimiter::Plus => Self::Add,
                Delimiter::Dash => Self::Sub,
                Delimiter::Ampersand => Self::Concat,
                Delimiter::Star => Self::Mul,
                Delimiter::FwdSlash => Self::Div,
                Delimiter::DoubleStar => Self::Pow,
                _ => return None,
            },
            _ => return None,
        })
    }

    /// Returns the reserved word spelling the operator, if it is not a symbol.
    pub fn as_keyword(&self) -> Option<Keyword> {
        Some(match self {
            Self::And => Keyword::And,
            Self::Or => Keyword::Or,
            Self::Nand => Keyword::Nand,
            Self::Nor => Keyword::Nor,
            Self::Xor => Keyword::Xor,
            Self::Xnor => Keyword::Xnor,
            Self::Sll => Keyword::Sll,
            Self::Srl => Keyword::Srl,
            Self::Sla => Keyword::Sla,
            Self::Sra => Keyword::Sra,
            Self::Rol => Keyword::Rol,
            Self::Ror => Keyword::Ror,
            Self::Mod => Keyword::Mod,
            Self::Rem => Keyword::Rem,
            _ => return None,
        })
    }

    fn as_symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "/=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Concat => "&",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            _ => "",
        }
    }

    pub fn render(&self, cx: &RenderContext) -> String {
        match self.as_keyword() {
            Some(kw) => cx.kw(kw),
            None => self.as_symbol().to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Abs,
    Not,
}

impl UnaryOp {
    fn render(&self, cx: &RenderContext) -> String {
        match self {
            Self::Neg => String::from("-"),
            Self::Pos => String::from("+"),
            Self::Abs => format!("{} ", cx.kw(Keyword::Abs)),
            Self::Not => format!("{} ", cx.kw(Keyword::Not)),
        }
    }
}

/// A chain of operators sharing one precedence class.
///
/// `a - b + c` is stored as `a` followed by `[(-, b), (+, c)]`.
#[derive(Debug, PartialEq, Clone)]
pub struct BinaryExpr {
    first: Box<Expr>,
    rest: Vec<(BinaryOp, Expr)>,
}

impl BinaryExpr {
    pub fn new(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Self {
            first: Box::new(left),
            rest: vec![(op, right)],
        }
    }

    /// Appends another operand to the chain.
    ///
    /// Panics if `op` belongs to a different precedence class than the chain.
    pub fn push(&mut self, op: BinaryOp, right: Expr) {
        if op.precedence() != self.precedence() {
            panic!(
                "cannot extend a {:?} chain with {:?} operator {:?}",
                self.precedence(),
                op.precedence(),
                op
            );
        }
        self.rest.push((op, right));
    }

    pub fn precedence(&self) -> Precedence {
        self.rest[0].0.precedence()
    }

    pub fn first(&self) -> &Expr {
        &self.first
    }

    pub fn rest(&self) -> &Vec<(BinaryOp, Expr)> {
        &self.rest
    }

    /// Counts the operands in the chain.
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum Direction {
    To,
    Downto,
}

impl Direction {
    fn as_keyword(&self) -> Keyword {
        match self {
            Self::To => Keyword::To,
            Self::Downto => Keyword::Downto,
        }
    }
}

/// The part written after the dot of a selected name.
#[derive(Debug, PartialEq, Clone)]
pub enum Suffix {
    /// A simple name, character literal or operator symbol.
    Name(String),
    All,
}

#[derive(Debug, PartialEq, Clone)]
pub enum AttributeDesignator {
    /// The `range` reserved word.
    Range,
    /// A user-defined attribute declared in a visible scope.
    User(SymbolId),
    /// A language-defined attribute such as `length` or `event`.
    Predefined(String),
}

/// A parameter and result type profile: `[T1, T2 return R]`.
#[derive(Debug, PartialEq, Clone)]
pub struct Signature {
    params: Vec<Expr>,
    result: Option<Box<Expr>>,
}

impl Signature {
    pub fn new(params: Vec<Expr>, result: Option<Expr>) -> Self {
        Self {
            params: params,
            result: result.map(Box::new),
        }
    }

    pub fn render(&self, cx: &RenderContext) -> String {
        let mut text = join(&self.params, cx, ", ");
        if let Some(r) = &self.result {
            if text.is_empty() == false {
                text.push(' ');
            }
            text.push_str(&format!("{} {}", cx.kw(Keyword::Return), r.render(cx)));
        }
        format!("[{}]", text)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Association {
    formal: Option<Expr>,
    actual: Expr,
}

impl Association {
    pub fn new(formal: Option<Expr>, actual: Expr) -> Self {
        Self {
            formal: formal,
            actual: actual,
        }
    }

    pub fn get_formal(&self) -> Option<&Expr> {
        self.formal.as_ref()
    }

    pub fn get_actual(&self) -> &Expr {
        &self.actual
    }
}

/// One element of an aggregate, with its choices when written in named form.
#[derive(Debug, PartialEq, Clone)]
pub struct ElementAssociation {
    choices: Vec<Expr>,
    value: Expr,
}

impl ElementAssociation {
    pub fn new(choices: Vec<Expr>, value: Expr) -> Self {
        Self {
            choices: choices,
            value: value,
        }
    }

    pub fn get_choices(&self) -> &Vec<Expr> {
        &self.choices
    }

    pub fn get_value(&self) -> &Expr {
        &self.value
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Constraint {
    /// A scalar `range` constraint.
    Range(Box<Expr>),
    /// An index constraint listing one discrete range per dimension.
    Index(Vec<Expr>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct SubtypeIndication {
    resolution: Option<Box<Expr>>,
    type_mark: Box<Expr>,
    constraint: Option<Constraint>,
}

impl SubtypeIndication {
    pub fn new(type_mark: Expr) -> Self {
        Self {
            resolution: None,
            type_mark: Box::new(type_mark),
            constraint: None,
        }
    }

    pub fn resolved_by(mut self, function: Expr) -> Self {
        self.resolution = Some(Box::new(function));
        self
    }

    pub fn constrain(mut self, c: Constraint) -> Self {
        self.constraint = Some(c);
        self
    }

    pub fn get_type_mark(&self) -> &Expr {
        &self.type_mark
    }

    pub fn get_resolution(&self) -> Option<&Expr> {
        self.resolution.as_deref()
    }

    pub fn get_constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    pub fn render(&self, cx: &RenderContext) -> String {
        let mut text = String::new();
        if let Some(r) = &self.resolution {
            text.push_str(&r.render(cx));
            text.push(' ');
        }
        text.push_str(&self.type_mark.render(cx));
        match &self.constraint {
            Some(Constraint::Range(r)) => {
                text.push_str(&format!(" {} {}", cx.kw(Keyword::Range), r.render(cx)))
            }
            Some(Constraint::Index(list)) => text.push_str(&format!("({})", join(list, cx, ", "))),
            None => (),
        }
        text
    }

    pub fn dump(&self, cx: &RenderContext, indent: usize) -> String {
        let pad = cx.indent(indent);
        let mut text = format!("{}SubtypeIndication\n", pad);
        if let Some(r) = &self.resolution {
            text.push_str(&format!("{}resolution\n{}", cx.indent(indent + 1), r.dump(cx, indent + 2)));
        }
        text.push_str(&self.type_mark.dump(cx, indent + 1));
        match &self.constraint {
            Some(Constraint::Range(r)) => {
                text.push_str(&format!("{}RangeConstraint\n", cx.indent(indent + 1)));
                text.push_str(&r.dump(cx, indent + 2));
            }
            Some(Constraint::Index(list)) => {
                text.push_str(&format!("{}IndexConstraint\n", cx.indent(indent + 1)));
                list.iter().for_each(|e| text.push_str(&e.dump(cx, indent + 2)));
            }
            None => (),
        }
        text
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    /// A simple name or operator symbol resolved to a symbol.
    Name(SymbolId),
    /// One of the pseudo-names `all`, `open`, `null` or `others`.
    Reserved(Keyword, SymbolId),
    Selected(Box<Expr>, Suffix),
    /// A function call, indexed name or slice.
    Applied(Box<Expr>, Vec<Association>),
    Attribute {
        prefix: Box<Expr>,
        signature: Option<Signature>,
        designator: AttributeDesignator,
        arg: Option<Box<Expr>>,
    },
    Qualified {
        type_mark: Box<Expr>,
        operand: Box<Expr>,
    },
    Aggregate(Vec<ElementAssociation>),
    Paren(Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryExpr),
    Range {
        left: Box<Expr>,
        dir: Direction,
        right: Box<Expr>,
    },
    /// An index subtype definition `type_mark range <>`.
    UnconstrainedRange(Box<Expr>),
    AbstractLiteral(AbstLiteral),
    PhysicalLiteral {
        value: AbstLiteral,
        unit: SymbolId,
    },
    CharLiteral(String),
    StrLiteral(String),
    BitStrLiteral(String),
    Allocator(Box<Expr>),
    SubtypeIndication(SubtypeIndication),
}

impl Expr {
    /// Extends `self` with another operand, continuing an existing chain of the
    /// same precedence class or starting a new one.
    pub fn chain(self, op: BinaryOp, right: Expr) -> Expr {
        match self {
            Expr::Binary(mut b) if b.precedence() == op.precedence() => {
                b.push(op, right);
                Expr::Binary(b)
            }
            left => Expr::Binary(BinaryExpr::new(left, op, right)),
        }
    }

    /// Checks if the expression denotes a range: an explicit `l to r` range or a
    /// `'range` / `'reverse_range` attribute.
    pub fn is_range(&self, tree: &ScopeTree) -> bool {
        match self {
            Expr::Range { .. } => true,
            Expr::Attribute { designator, .. } => match designator {
                AttributeDesignator::Range => true,
                AttributeDesignator::Predefined(name) => name.eq_ignore_ascii_case("reverse_range"),
                AttributeDesignator::User(id) => {
                    tree.name_of(*id).eq_ignore_ascii_case("reverse_range")
                }
            },
            _ => false,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryExpr> {
        match self {
            Expr::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<SymbolId> {
        match self {
            Expr::Name(id) => Some(*id),
            _ => None,
        }
    }

    pub fn render(&self, cx: &RenderContext) -> String {
        match self {
            Expr::Name(id) => cx.name(*id).to_string(),
            Expr::Reserved(kw, _) => cx.kw(*kw),
            Expr::Selected(prefix, suffix) => format!(
                "{}.{}",
                prefix.render(cx),
                match suffix {
                    Suffix::Name(s) => s.clone(),
                    Suffix::All => cx.kw(Keyword::All),
                }
            ),
            Expr::Applied(prefix, args) => format!(
                "{}({})",
                prefix.render(cx),
                args.iter()
                    .map(|a| match &a.formal {
                        Some(f) => format!("{} => {}", f.render(cx), a.actual.render(cx)),
                        None => a.actual.render(cx),
                    })
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Expr::Attribute {
                prefix,
                signature,
                designator,
                arg,
            } => {
                let mut text = prefix.render(cx);
                if let Some(sig) = signature {
                    text.push_str(&sig.render(cx));
                }
                text.push('\'');
                text.push_str(&match designator {
                    AttributeDesignator::Range => cx.kw(Keyword::Range),
                    AttributeDesignator::User(id) => cx.name(*id).to_string(),
                    AttributeDesignator::Predefined(s) => s.clone(),
                });
                if let Some(arg) = arg {
                    text.push_str(&format!("({})", arg.render(cx)));
                }
                text
            }
            Expr::Qualified { type_mark, operand } => {
                format!("{}'{}", type_mark.render(cx), operand.render(cx))
            }
            Expr::Aggregate(elements) => format!(
                "({})",
                elements
                    .iter()
                    .map(|e| match e.choices.is_empty() {
                        true => e.value.render(cx),
                        false => format!("{} => {}", join(&e.choices, cx, " | "), e.value.render(cx)),
                    })
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Expr::Paren(inner) => format!("({})", inner.render(cx)),
            Expr::Unary(op, operand) => format!("{}{}", op.render(cx), operand.render(cx)),
            Expr::Binary(b) => {
                let mut text = b.first.render(cx);
                for (op, operand) in &b.rest {
                    text.push_str(&format!(" {} {}", op.render(cx), operand.render(cx)));
                }
                text
            }
            Expr::Range { left, dir, right } => format!(
                "{} {} {}",
                left.render(cx),
                cx.kw(dir.as_keyword()),
                right.render(cx)
            ),
            Expr::UnconstrainedRange(type_mark) => {
                format!("{} {} <>", type_mark.render(cx), cx.kw(Keyword::Range))
            }
            Expr::AbstractLiteral(lit) => lit.to_string(),
            Expr::PhysicalLiteral { value, unit } => format!("{} {}", value, cx.name(*unit)),
            Expr::CharLiteral(c) => format!("'{}'", c),
            Expr::StrLiteral(s) => format!("\"{}\"", s),
            Expr::BitStrLiteral(b) => b.clone(),
            Expr::Allocator(inner) => format!("{} {}", cx.kw(Keyword::New), inner.render(cx)),
            Expr::SubtypeIndication(si) => si.render(cx),
        }
    }

    pub fn dump(&self, cx: &RenderContext, indent: usize) -> String {
        let pad = cx.indent(indent);
        let next = indent + 1;
        match self {
            Expr::Name(id) => format!("{}Name {}\n", pad, cx.dump_symbol(*id)),
            Expr::Reserved(kw, id) => {
                format!("{}Reserved {} {}\n", pad, kw, cx.dump_symbol(*id))
            }
            Expr::Selected(prefix, suffix) => format!(
                "{}Selected {}\n{}",
                pad,
                match suffix {
                    Suffix::Name(s) => s.clone(),
                    Suffix::All => String::from("all"),
                },
                prefix.dump(cx, next)
            ),
            Expr::Applied(prefix, args) => {
                let mut text = format!("{}Applied\n{}", pad, prefix.dump(cx, next));
                for a in args {
                    text.push_str(&format!("{}Association\n", cx.indent(next)));
                    if let Some(f) = &a.formal {
                        text.push_str(&f.dump(cx, next + 1));
                    }
                    text.push_str(&a.actual.dump(cx, next + 1));
                }
                text
            }
            Expr::Attribute {
                prefix,
                signature,
                designator,
                arg,
            } => {
                let name = match designator {
                    AttributeDesignator::Range => String::from("range"),
                    AttributeDesignator::User(id) => cx.dump_symbol(*id),
                    AttributeDesignator::Predefined(s) => format!("{} (predefined)", s),
                };
                let mut text = format!("{}Attribute {}\n{}", pad, name, prefix.dump(cx, next));
                if let Some(sig) = signature {
                    text.push_str(&format!("{}Signature {}\n", cx.indent(next), sig.render(cx)));
                }
                if let Some(arg) = arg {
                    text.push_str(&arg.dump(cx, next));
                }
                text
            }
            Expr::Qualified { type_mark, operand } => format!(
                "{}Qualified\n{}{}",
                pad,
                type_mark.dump(cx, next),
                operand.dump(cx, next)
            ),
            Expr::Aggregate(elements) => {
                let mut text = format!("{}Aggregate\n", pad);
                for e in elements {
                    text.push_str(&format!("{}Element\n", cx.indent(next)));
                    for c in &e.choices {
                        text.push_str(&format!("{}choice\n{}", cx.indent(next + 1), c.dump(cx, next + 2)));
                    }
                    text.push_str(&e.value.dump(cx, next + 1));
                }
                text
            }
            Expr::Paren(inner) => format!("{}Paren\n{}", pad, inner.dump(cx, next)),
            Expr::Unary(op, operand) => {
                format!("{}Unary {:?}\n{}", pad, op, operand.dump(cx, next))
            }
            Expr::Binary(b) => {
                let mut text = format!("{}Binary {:?}\n{}", pad, b.precedence(), b.first.dump(cx, next));
                for (op, operand) in &b.rest {
                    text.push_str(&format!("{}{:?}\n{}", cx.indent(next), op, operand.dump(cx, next)));
                }
                text
            }
            Expr::Range { left, dir, right } => format!(
                "{}Range {:?}\n{}{}",
                pad,
                dir,
                left.dump(cx, next),
                right.dump(cx, next)
            ),
            Expr::UnconstrainedRange(type_mark) => {
                format!("{}UnconstrainedRange\n{}", pad, type_mark.dump(cx, next))
            }
            Expr::AbstractLiteral(lit) => format!("{}AbstractLiteral {}\n", pad, lit),
            Expr::PhysicalLiteral { value, unit } => {
                format!("{}PhysicalLiteral {} {}\n", pad, value, cx.dump_symbol(*unit))
            }
            Expr::CharLiteral(c) => format!("{}CharLiteral '{}'\n", pad, c),
            Expr::StrLiteral(s) => format!("{}StrLiteral \"{}\"\n", pad, s),
            Expr::BitStrLiteral(b) => format!("{}BitStrLiteral {}\n", pad, b),
            Expr::Allocator(inner) => format!("{}Allocator\n{}", pad, inner.dump(cx, next)),
            Expr::SubtypeIndication(si) => si.dump(cx, indent),
        }
    }
}

/// Renders each expression in `list` separated by `sep`.
pub fn join(list: &[Expr], cx: &RenderContext, sep: &str) -> String {
    list.iter()
        .map(|e| e.render(cx))
        .collect::<Vec<String>>()
        .join(sep)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vhdl::ast::DesignFile;
    use crate::vhdl::format::{KeywordCase, VhdlFormat};

    fn lit(s: &str) -> Expr {
        Expr::AbstractLiteral(AbstLiteral::Decimal(s.to_string()))
    }

    #[test]
    fn chain_flattens_same_class() {
        let e = lit("1").chain(BinaryOp::Sub, lit("2")).chain(BinaryOp::Add, lit("3"));
        let b = e.as_binary().unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.precedence(), Precedence::Adding);
        assert_eq!(b.first(), &lit("1"));
    }

    #[test]
    fn chain_nests_other_class() {
        let product = lit("2").chain(BinaryOp::Mul, lit("3"));
        let e = product.chain(BinaryOp::Add, lit("4"));
        let b = e.as_binary().unwrap();
        assert_eq!(b.precedence(), Precedence::Adding);
        assert_eq!(b.first().as_binary().unwrap().precedence(), Precedence::Multiplying);
    }

    #[test]
    #[should_panic]
    fn push_other_class_panics() {
        let mut b = BinaryExpr::new(lit("1"), BinaryOp::Add, lit("2"));
        b.push(BinaryOp::Mul, lit("3"));
    }

    #[test]
    fn precedence_order() {
        assert!(Precedence::Logical < Precedence::Relational);
        assert!(Precedence::Shift < Precedence::Adding);
        assert!(Precedence::Multiplying < Precedence::Exponent);
        assert_eq!(Precedence::Multiplying as u8, 5);
        assert_eq!(BinaryOp::Concat.precedence(), Precedence::Adding);
        assert_eq!(
            BinaryOp::from_token(&VhdlToken::Delimiter(Delimiter::SigAssign)),
            Some(BinaryOp::Le)
        );
        assert_eq!(BinaryOp::from_token(&VhdlToken::Keyword(Keyword::Abs)), None);
    }

    #[test]
    fn render_expressions() {
        let file = DesignFile::new("_root");
        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        let e = lit("1").chain(BinaryOp::Add, lit("2").chain(BinaryOp::Mul, lit("3")));
        assert_eq!(e.render(&cx), "1 + 2 * 3");

        let r = Expr::Range {
            left: Box::new(lit("7")),
            dir: Direction::Downto,
            right: Box::new(lit("0")),
        };
        assert_eq!(r.render(&cx), "7 downto 0");
        assert_eq!(r.is_range(file.tree()), true);
        assert_eq!(lit("7").is_range(file.tree()), false);

        let neg = Expr::Unary(UnaryOp::Neg, Box::new(lit("1")));
        assert_eq!(neg.render(&cx), "-1");
        let not = Expr::Unary(UnaryOp::Not, Box::new(Expr::CharLiteral(String::from("0"))));
        assert_eq!(not.render(&cx), "not '0'");
    }

    #[test]
    fn render_keyword_case() {
        let file = DesignFile::new("_root");
        let fmt = VhdlFormat::new().keyword_case(KeywordCase::Upper);
        let cx = file.context(&fmt);
        let e = Expr::CharLiteral(String::from("1")).chain(
            BinaryOp::And,
            Expr::Unary(UnaryOp::Abs, Box::new(lit("2"))),
        );
        assert_eq!(e.render(&cx), "'1' AND ABS 2");
    }

    #[test]
    fn render_signature() {
        let file = DesignFile::new("_root");
        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        let sig = Signature::new(vec![], Some(Expr::StrLiteral(String::from("x"))));
        assert_eq!(sig.render(&cx), "[return \"x\"]");
    }
}
