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

//! Delimits statement parts without analysing them.

use super::VhdlParser;
use crate::lexer::Token;
use crate::vhdl::ast::stmt::Statement;
use crate::vhdl::token::{Delimiter, Keyword, VhdlToken};

/// A region opened inside a statement part that a later `end` closes.
#[derive(Debug, PartialEq, Clone, Copy)]
enum Frame {
    If { fresh: bool },
    Case { fresh: bool },
    Other,
    /// A subprogram that is only a declaration until `is` is seen.
    Subprogram { has_body: bool },
}

impl VhdlParser {
    /// Collects `;`-terminated statements until the `end` closing the enclosing
    /// region, which is left unconsumed.
    ///
    /// In a configuration `for` also opens a region.
    pub(super) fn skip_statements(&mut self, configuration: bool) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut current: Vec<Token<VhdlToken>> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut after_end = false;
        let mut alt_branch = false;
        loop {
            match self.peek() {
                VhdlToken::EOF => break,
                VhdlToken::Keyword(Keyword::End) if stack.is_empty() == true => break,
                _ => (),
            }
            let t = self.advance();
            let mut terminated = false;
            match t.as_ref() {
                VhdlToken::Keyword(kw) => match kw {
                    Keyword::If if after_end == false => stack.push(Frame::If { fresh: true }),
                    Keyword::Case if after_end == false => stack.push(Frame::Case { fresh: true }),
                    Keyword::Loop
                    | Keyword::Process
                    | Keyword::Block
                    | Keyword::Record
                    | Keyword::Units
                    | Keyword::Protected
                        if after_end == false =>
                    {
                        stack.push(Frame::Other)
                    }
                    Keyword::For if configuration == true && after_end == false => {
                        stack.push(Frame::Other)
                    }
                    Keyword::Function | Keyword::Procedure if after_end == false => {
                        stack.push(Frame::Subprogram { has_body: false })
                    }
                    Keyword::Is => {
                        if let Some(Frame::Subprogram { has_body }) = stack.last_mut() {
                            *has_body = true;
                        }
                    }
                    Keyword::Elsif | Keyword::Else | Keyword::When => alt_branch = true,
                    Keyword::Generate if after_end == false => match stack.last().copied() {
                        // an if/case generate announced on this statement
                        Some(Frame::If { fresh: true }) | Some(Frame::Case { fresh: true }) => {
                            stack.pop();
                            stack.push(Frame::Other);
                        }
                        // a branch of an enclosing if/case generate
                        _ if alt_branch == true => (),
                        _ => stack.push(Frame::Other),
                    },
                    Keyword::End => {
                        stack.pop();
                    }
                    _ => (),
                },
                VhdlToken::Delimiter(Delimiter::Terminator) => {
                    if let Some(Frame::Subprogram { has_body: false }) = stack.last() {
                        stack.pop();
                    }
                    stack.iter_mut().for_each(|f| match f {
                        Frame::If { fresh } | Frame::Case { fresh } => *fresh = false,
                        _ => (),
                    });
                    alt_branch = false;
                    terminated = true;
                }
                _ => (),
            }
            after_end = t.as_ref().check_keyword(&Keyword::End);
            current.push(t);
            if terminated == true {
                statements.push(Statement::new(std::mem::take(&mut current)));
            }
        }
        if current.is_empty() == false {
            statements.push(Statement::new(current));
        }
        statements
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn skip(src: &str, configuration: bool) -> (Vec<Statement>, VhdlToken) {
        let mut p = VhdlParser::new(src);
        let stmts = p.skip_statements(configuration);
        let next = p.peek().clone();
        (stmts, next)
    }

    #[test]
    fn stops_at_closing_end() {
        let (stmts, next) = skip("a <= b; c <= d; end architecture;", false);
        assert_eq!(stmts.len(), 2);
        assert_eq!(next, VhdlToken::Keyword(Keyword::End));
    }

    #[test]
    fn nested_regions_are_kept() {
        let src = "p: process (clk) begin if rising_edge(clk) then q <= d; end if; end process; end;";
        let (stmts, next) = skip(src, false);
        // `p: process (clk) begin if ... then q <= d;`, `end if;`, `end process;`
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[1].tokens().len(), 3);
        assert_eq!(next, VhdlToken::Keyword(Keyword::End));
    }

    #[test]
    fn generate_statements() {
        let src = "g1: if w > 1 generate x <= y; elsif w = 1 generate x <= z; end generate; \
            g2: for i in 0 to 3 generate x(i) <= y(i); end generate; end;";
        let (stmts, next) = skip(src, false);
        assert_eq!(stmts.len(), 5);
        assert_eq!(next, VhdlToken::Keyword(Keyword::End));
    }

    #[test]
    fn subprograms_in_process() {
        let src = "process function f return bit; procedure g is begin null; end procedure; begin end process; end;";
        let (_, next) = skip(src, false);
        assert_eq!(next, VhdlToken::Keyword(Keyword::End));
    }

    #[test]
    fn configuration_blocks() {
        let src = "for rtl for u0 : c use entity work.e; end for; end for; end configuration;";
        let (stmts, next) = skip(src, true);
        assert_eq!(stmts.len(), 3);
        assert_eq!(next, VhdlToken::Keyword(Keyword::End));
    }

    #[test]
    fn eof_keeps_partial_statement() {
        let (stmts, next) = skip("a <= b; c <=", false);
        assert_eq!(stmts.len(), 2);
        assert_eq!(next.is_eof(), true);
    }
}
