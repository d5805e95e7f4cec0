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

use crate::lexer::{Position, Token, TokenError};
use crate::vhdl::error::VhdlError;
use crate::vhdl::token::{VhdlToken, VhdlTokenizer};
use std::collections::VecDeque;

/// A bounded-lookahead view over the scanner.
///
/// Tokens are pulled from the tokenizer only when the parser looks at them.
/// Scanner errors met along the way are queued for the parser to report.
pub struct TokenStream {
    tokenizer: VhdlTokenizer,
    buf: VecDeque<Token<VhdlToken>>,
    errors: Vec<TokenError<VhdlError>>,
    eof: Option<Token<VhdlToken>>,
    last_end: Position,
    consumed: usize,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        Self {
            tokenizer: VhdlTokenizer::new(source),
            buf: VecDeque::new(),
            errors: Vec::new(),
            eof: None,
            last_end: Position::new(),
            consumed: 0,
        }
    }

    /// Buffers tokens until `n + 1` are available or the input is exhausted.
    fn fill(&mut self, n: usize) {
        while self.buf.len() <= n && self.eof.is_none() {
            match self.tokenizer.next() {
                Some(Ok(t)) => {
                    if t.as_ref().is_eof() == true {
                        self.eof = Some(t.clone());
                    }
                    self.buf.push_back(t);
                }
                Some(Err(e)) => self.errors.push(e),
                None => self.eof = Some(Token::new(VhdlToken::EOF, self.last_end.clone())),
            }
        }
    }

    /// References the token `n` places ahead of the next token.
    ///
    /// Looking past the end of input always lands on the end-of-file token.
    pub fn peek_nth(&mut self, n: usize) -> &Token<VhdlToken> {
        self.fill(n);
        match self.buf.get(n) {
            Some(t) => t,
            None => match &self.eof {
                Some(t) => t,
                None => panic!("token stream ended without an end-of-file token"),
            },
        }
    }

    pub fn peek(&mut self) -> &Token<VhdlToken> {
        self.peek_nth(0)
    }

    /// Takes the next token. The end-of-file token is never consumed.
    pub fn next(&mut self) -> Token<VhdlToken> {
        self.fill(0);
        match self.buf.front().map(|t| t.as_ref().is_eof()) {
            Some(false) => match self.buf.pop_front() {
                Some(t) => {
                    self.last_end = t.ending().clone();
                    self.consumed += 1;
                    t
                }
                None => self.peek().clone(),
            },
            _ => self.peek().clone(),
        }
    }

    /// Drains the scanner errors collected so far.
    pub fn take_errors(&mut self) -> Vec<TokenError<VhdlError>> {
        std::mem::take(&mut self.errors)
    }

    /// Returns the position of the last character of the most recently consumed
    /// token.
    pub fn last_end(&self) -> &Position {
        &self.last_end
    }

    /// Counts the tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vhdl::token::{Delimiter, Keyword};

    #[test]
    fn lookahead_and_consume() {
        let mut ts = TokenStream::new("package p is");
        assert_eq!(ts.peek_nth(2).as_ref(), &VhdlToken::Keyword(Keyword::Is));
        assert_eq!(ts.next().as_ref(), &VhdlToken::Keyword(Keyword::Package));
        assert_eq!(ts.last_end(), &Position::place(1, 7));
        assert_eq!(ts.consumed(), 1);
        ts.next();
        ts.next();
        assert_eq!(ts.peek().as_ref().is_eof(), true);
        // the end of file token is sticky
        assert_eq!(ts.next().as_ref().is_eof(), true);
        assert_eq!(ts.peek_nth(5).as_ref().is_eof(), true);
        assert_eq!(ts.consumed(), 3);
    }

    #[test]
    fn scanner_errors_are_queued() {
        let mut ts = TokenStream::new("a ? ;");
        ts.next();
        assert_eq!(ts.peek().as_ref(), &VhdlToken::Delimiter(Delimiter::Terminator));
        let errors = ts.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].locate(), &Position::place(1, 3));
        assert_eq!(ts.take_errors().len(), 0);
    }
}
