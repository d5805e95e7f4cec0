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

use super::{Result, VhdlParser};
use crate::vhdl::ast::expr::{
    Association, AttributeDesignator, BinaryOp, Constraint, Direction, ElementAssociation, Expr,
    Precedence, Signature, SubtypeIndication, Suffix, UnaryOp,
};
use crate::vhdl::error::{SyntaxError, VhdlError};
use crate::vhdl::format::VhdlFormat;
use crate::vhdl::token::{Delimiter, Keyword, VhdlToken};

impl VhdlParser {
    /// Parses an expression, or a range when a direction follows the first
    /// simple expression.
    pub(super) fn parse_expr(&mut self) -> Result<Expr> {
        let left = self.parse_simple_expr()?;
        if let Some(dir) = self.accept_direction() {
            let right = self.parse_simple_expr()?;
            return Ok(Expr::Range {
                left: Box::new(left),
                dir: dir,
                right: Box::new(right),
            });
        }
        let shift = self.shift_rest(left)?;
        let relation = self.relation_rest(shift)?;
        self.logical_rest(relation)
    }

    fn accept_direction(&mut self) -> Option<Direction> {
        let dir = match self.peek() {
            VhdlToken::Keyword(Keyword::To) => Direction::To,
            VhdlToken::Keyword(Keyword::Downto) => Direction::Downto,
            _ => return None,
        };
        self.advance();
        Some(dir)
    }

    /// Checks if the next token is a binary operator of class `class`.
    fn peek_op(&mut self, class: Precedence) -> Option<BinaryOp> {
        BinaryOp::from_token(self.peek()).filter(|op| op.precedence() == class)
    }

    fn logical_rest(&mut self, mut left: Expr) -> Result<Expr> {
        while let Some(op) = self.peek_op(Precedence::Logical) {
            self.advance();
            let shift = self.parse_shift_expr()?;
            let right = self.relation_rest(shift)?;
            left = left.chain(op, right);
        }
        Ok(left)
    }

    fn relation_rest(&mut self, mut left: Expr) -> Result<Expr> {
        while let Some(op) = self.peek_op(Precedence::Relational) {
            self.advance();
            let right = self.parse_shift_expr()?;
            left = left.chain(op, right);
        }
        Ok(left)
    }

    fn parse_shift_expr(&mut self) -> Result<Expr> {
        let left = self.parse_simple_expr()?;
        self.shift_rest(left)
    }

    fn shift_rest(&mut self, mut left: Expr) -> Result<Expr> {
        while let Some(op) = self.peek_op(Precedence::Shift) {
            self.advance();
            let right = self.parse_simple_expr()?;
            left = left.chain(op, right);
        }
        Ok(left)
    }

    /// Parses `[sign] term {adding_operator term}`.
    ///
    /// A leading sign applies to the whole chain of adding operators.
    fn parse_simple_expr(&mut self) -> Result<Expr> {
        let sign = match self.peek() {
            VhdlToken::Delimiter(Delimiter::Plus) => Some(UnaryOp::Pos),
            VhdlToken::Delimiter(Delimiter::Dash) => Some(UnaryOp::Neg),
            _ => None,
        };
        if sign.is_some() == true {
            self.advance();
        }
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek_op(Precedence::Adding) {
            self.advance();
            let right = self.parse_term()?;
            left = left.chain(op, right);
        }
        Ok(match sign {
            Some(op) => Expr::Unary(op, Box::new(left)),
            None => left,
        })
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_factor()?;
        while let Some(op) = self.peek_op(Precedence::Multiplying) {
            self.advance();
            let right = self.parse_factor()?;
            left = left.chain(op, right);
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let unary = match self.peek() {
            VhdlToken::Keyword(Keyword::Abs) => Some(UnaryOp::Abs),
            VhdlToken::Keyword(Keyword::Not) => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = unary {
            self.advance();
            let operand = self.parse_primary()?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }
        let base = self.parse_primary()?;
        match self.check_delim(&Delimiter::DoubleStar) {
            true => {
                self.advance();
                let exponent = self.parse_primary()?;
                Ok(base.chain(BinaryOp::Pow, exponent))
            }
            false => Ok(base),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek() {
            VhdlToken::AbstLiteral(lit) => {
                let lit = lit.clone();
                self.advance();
                // a unit name makes the literal physical
                match self.peek() {
                    VhdlToken::Identifier(_) => {
                        let (name, span) = self.expect_identifier()?;
                        let unit = self.reference(&name, span);
                        Ok(Expr::PhysicalLiteral {
                            value: lit,
                            unit: unit,
                        })
                    }
                    _ => Ok(Expr::AbstractLiteral(lit)),
                }
            }
            VhdlToken::CharLiteral(c) => {
                let c = c.0.clone();
                self.advance();
                Ok(Expr::CharLiteral(c))
            }
            VhdlToken::BitStrLiteral(b) => {
                let b = b.0.clone();
                self.advance();
                Ok(Expr::BitStrLiteral(b))
            }
            VhdlToken::StrLiteral(s) => {
                let s = s.clone();
                match self.check_delim_nth(1, &Delimiter::ParenL) {
                    // an operator symbol called as a function
                    true => {
                        let (name, span) = self.expect_designator()?;
                        let sym = self.reference(&name, span);
                        self.parse_name_suffixes(Expr::Name(sym), true)
                    }
                    false => {
                        self.advance();
                        Ok(Expr::StrLiteral(s))
                    }
                }
            }
            VhdlToken::Delimiter(Delimiter::ParenL) => self.parse_aggregate(),
            VhdlToken::Keyword(Keyword::New) => self.parse_allocator(),
            VhdlToken::Keyword(Keyword::Null)
            | VhdlToken::Keyword(Keyword::Others)
            | VhdlToken::Keyword(Keyword::Open)
            | VhdlToken::Keyword(Keyword::All) => self.parse_reserved(),
            VhdlToken::Identifier(_) => self.parse_name(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Parses one of the pseudo-names kept in the root scope.
    pub(super) fn parse_reserved(&mut self) -> Result<Expr> {
        let kw = match self.peek().as_keyword() {
            Some(kw) => *kw,
            None => return Err(self.unexpected("a reserved name")),
        };
        match self.file.reserved(&kw) {
            Some(sym) => {
                self.advance();
                Ok(Expr::Reserved(kw, sym))
            }
            None => Err(self.unexpected("a reserved name")),
        }
    }

    /// Parses `( element {, element} )` where each element is
    /// `[choices =>] expression`.
    ///
    /// A single positional element is a parenthesized expression.
    pub(super) fn parse_aggregate(&mut self) -> Result<Expr> {
        self.expect_delim(&Delimiter::ParenL)?;
        let mut elements: Vec<(Vec<Expr>, Expr)> = Vec::new();
        loop {
            let mut choices = vec![self.parse_expr()?];
            while self.accept_delim(&Delimiter::Pipe) == true {
                choices.push(self.parse_expr()?);
            }
            match self.accept_delim(&Delimiter::Arrow) {
                true => {
                    let value = self.parse_expr()?;
                    elements.push((choices, value));
                }
                false => match choices.len() {
                    1 => elements.push((Vec::new(), choices.remove(0))),
                    _ => return Err(self.unexpected("'=>'")),
                },
            }
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::ParenR)?;
        if elements.len() == 1 && elements[0].0.is_empty() == true {
            if let Some((_, value)) = elements.pop() {
                return Ok(Expr::Paren(Box::new(value)));
            }
        }
        Ok(Expr::Aggregate(
            elements
                .into_iter()
                .map(|(choices, value)| ElementAssociation::new(choices, value))
                .collect(),
        ))
    }

    fn parse_allocator(&mut self) -> Result<Expr> {
        self.expect_kw(&Keyword::New)?;
        let type_mark = self.parse_type_mark()?;
        if self.check_delim(&Delimiter::SingleQuote) && self.check_delim_nth(1, &Delimiter::ParenL)
        {
            self.advance();
            let operand = self.parse_aggregate()?;
            return Ok(Expr::Allocator(Box::new(Expr::Qualified {
                type_mark: Box::new(type_mark),
                operand: Box::new(operand),
            })));
        }
        match self.check_delim(&Delimiter::ParenL) {
            true => {
                let ranges = self.parse_index_constraint()?;
                Ok(Expr::Allocator(Box::new(Expr::SubtypeIndication(
                    SubtypeIndication::new(type_mark).constrain(Constraint::Index(ranges)),
                ))))
            }
            false => Ok(Expr::Allocator(Box::new(type_mark))),
        }
    }

    /// Parses a simple name resolved from the current scope followed by any
    /// selections, calls, attributes and qualified expressions.
    pub(super) fn parse_name(&mut self) -> Result<Expr> {
        let (name, span) = self.expect_identifier()?;
        let sym = self.reference(&name, span);
        self.parse_name_suffixes(Expr::Name(sym), true)
    }

    /// Parses a type mark: a name that may be selected or carry an attribute but
    /// is never called.
    pub(super) fn parse_type_mark(&mut self) -> Result<Expr> {
        let (name, span) = self.expect_identifier()?;
        let sym = self.reference(&name, span);
        self.parse_name_suffixes(Expr::Name(sym), false)
    }

    fn parse_name_suffixes(&mut self, mut prefix: Expr, full: bool) -> Result<Expr> {
        loop {
            match self.peek() {
                VhdlToken::Delimiter(Delimiter::Dot) => {
                    self.advance();
                    let suffix = self.parse_suffix()?;
                    prefix = Expr::Selected(Box::new(prefix), suffix);
                }
                VhdlToken::Delimiter(Delimiter::ParenL) if full == true => {
                    let args = self.parse_association_list()?;
                    prefix = Expr::Applied(Box::new(prefix), args);
                }
                VhdlToken::Delimiter(Delimiter::BrackL) => {
                    if self.is_signature_attribute() == false {
                        break;
                    }
                    let sig = self.parse_signature()?;
                    self.expect_delim(&Delimiter::SingleQuote)?;
                    prefix = self.parse_attribute(prefix, Some(sig))?;
                }
                VhdlToken::Delimiter(Delimiter::SingleQuote) => {
                    match self.check_delim_nth(1, &Delimiter::ParenL) {
                        true => {
                            if full == false {
                                break;
                            }
                            self.advance();
                            let operand = self.parse_aggregate()?;
                            prefix = Expr::Qualified {
                                type_mark: Box::new(prefix),
                                operand: Box::new(operand),
                            };
                        }
                        false => {
                            self.advance();
                            prefix = self.parse_attribute(prefix, None)?;
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(prefix)
    }

    pub(super) fn parse_suffix(&mut self) -> Result<Suffix> {
        match self.peek() {
            VhdlToken::Keyword(Keyword::All) => {
                self.advance();
                Ok(Suffix::All)
            }
            VhdlToken::Identifier(_) | VhdlToken::CharLiteral(_) | VhdlToken::StrLiteral(_) => {
                Ok(Suffix::Name(self.advance().take().to_string()))
            }
            _ => Err(self.unexpected("a suffix")),
        }
    }

    /// Parses the designator (and optional argument) after a tick.
    fn parse_attribute(&mut self, prefix: Expr, signature: Option<Signature>) -> Result<Expr> {
        let designator = match self.peek() {
            VhdlToken::Keyword(Keyword::Range) => {
                self.advance();
                AttributeDesignator::Range
            }
            VhdlToken::Identifier(_) => {
                let (name, _) = self.expect_identifier()?;
                let found = self.file.tree().search(self.current(), &name);
                match found.first() {
                    Some(sym) => AttributeDesignator::User(*sym),
                    None => AttributeDesignator::Predefined(name),
                }
            }
            _ => return Err(self.unexpected("an attribute designator")),
        };
        let arg = match self.check_delim(&Delimiter::ParenL) {
            true => {
                self.advance();
                let e = self.parse_expr()?;
                self.expect_delim(&Delimiter::ParenR)?;
                Some(Box::new(e))
            }
            false => None,
        };
        Ok(Expr::Attribute {
            prefix: Box::new(prefix),
            signature: signature,
            designator: designator,
            arg: arg,
        })
    }

    /// Checks if the `[` ahead opens a signature that is followed by a tick.
    fn is_signature_attribute(&mut self) -> bool {
        let mut n = 1;
        loop {
            match self.peek_nth(n) {
                VhdlToken::Delimiter(Delimiter::BrackR) => {
                    return self.check_delim_nth(n + 1, &Delimiter::SingleQuote)
                }
                VhdlToken::EOF | VhdlToken::Delimiter(Delimiter::Terminator) => return false,
                _ => n += 1,
            }
        }
    }

    /// Parses `[ [type_mark {, type_mark}] [return type_mark] ]`.
    pub(super) fn parse_signature(&mut self) -> Result<Signature> {
        self.expect_delim(&Delimiter::BrackL)?;
        let mut params = Vec::new();
        if self.check_delim(&Delimiter::BrackR) == false && self.check_kw(&Keyword::Return) == false
        {
            params.push(self.parse_type_mark()?);
            while self.accept_delim(&Delimiter::Comma) == true {
                params.push(self.parse_type_mark()?);
            }
        }
        let result = match self.accept_kw(&Keyword::Return) {
            true => Some(self.parse_type_mark()?),
            false => None,
        };
        self.expect_delim(&Delimiter::BrackR)?;
        Ok(Signature::new(params, result))
    }

    /// Parses `( [formal =>] actual {, [formal =>] actual} )`.
    fn parse_association_list(&mut self) -> Result<Vec<Association>> {
        self.expect_delim(&Delimiter::ParenL)?;
        let mut list = Vec::new();
        loop {
            let first = self.parse_expr()?;
            match self.accept_delim(&Delimiter::Arrow) {
                true => {
                    let actual = self.parse_expr()?;
                    list.push(Association::new(Some(first), actual));
                }
                false => list.push(Association::new(None, first)),
            }
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::ParenR)?;
        Ok(list)
    }

    /// Parses `[resolution_function] type_mark [constraint]`.
    pub(super) fn parse_subtype_indication(&mut self) -> Result<SubtypeIndication> {
        let first = self.parse_type_mark()?;
        let si = match self.peek() {
            VhdlToken::Identifier(_) => SubtypeIndication::new(self.parse_type_mark()?).resolved_by(first),
            _ => SubtypeIndication::new(first),
        };
        if self.accept_kw(&Keyword::Range) == true {
            let range = self.parse_range()?;
            return Ok(si.constrain(Constraint::Range(Box::new(range))));
        }
        match self.check_delim(&Delimiter::ParenL) {
            true => {
                let ranges = self.parse_index_constraint()?;
                Ok(si.constrain(Constraint::Index(ranges)))
            }
            false => Ok(si),
        }
    }

    /// Parses an expression that must denote a range.
    pub(super) fn parse_range(&mut self) -> Result<Expr> {
        let span = self.peek_span();
        let e = self.parse_expr()?;
        match e.is_range(self.file.tree()) {
            true => Ok(e),
            false => Err(SyntaxError::new(
                VhdlError::ExpectedRange(self.render_expr(&e)),
                span,
            )),
        }
    }

    /// Parses `( discrete_range {, discrete_range} )`.
    pub(super) fn parse_index_constraint(&mut self) -> Result<Vec<Expr>> {
        self.parse_index_list(false)
    }

    /// Parses the index list of an array type definition, where each index
    /// may also be left unconstrained with `range <>`.
    pub(super) fn parse_array_indexes(&mut self) -> Result<Vec<Expr>> {
        self.parse_index_list(true)
    }

    fn parse_index_list(&mut self, allow_box: bool) -> Result<Vec<Expr>> {
        self.expect_delim(&Delimiter::ParenL)?;
        let mut list = Vec::new();
        loop {
            let e = self.parse_expr()?;
            let index = match self.accept_kw(&Keyword::Range) {
                true => match allow_box == true && self.accept_delim(&Delimiter::Box) == true {
                    true => Expr::UnconstrainedRange(Box::new(e)),
                    false => {
                        let range = self.parse_range()?;
                        Expr::SubtypeIndication(
                            SubtypeIndication::new(e).constrain(Constraint::Range(Box::new(range))),
                        )
                    }
                },
                false => e,
            };
            list.push(index);
            if self.accept_delim(&Delimiter::Comma) == false {
                break;
            }
        }
        self.expect_delim(&Delimiter::ParenR)?;
        Ok(list)
    }

    /// Writes `e` as canonical text for use in a message.
    pub(super) fn render_expr(&self, e: &Expr) -> String {
        let fmt = VhdlFormat::default();
        e.render(&self.file.context(&fmt))
    }
}
