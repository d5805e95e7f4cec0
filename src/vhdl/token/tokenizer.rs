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

pub mod char_set {
    pub const DOUBLE_QUOTE: char = '\"';
    pub const BACKSLASH: char = '\\';
    pub const DASH: char = '-';
    pub const UNDERLINE: char = '_';
    pub const SINGLE_QUOTE: char = '\'';
    pub const DOT: char = '.';
    pub const HASH: char = '#';
    pub const PLUS: char = '+';

    /// Checks if `c` is a digit according to VHDL-2008 LRM p225.
    pub fn is_digit(c: &char) -> bool {
        match c {
            '0'..='9' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a digit allowed within a based literal.
    pub fn is_hex_digit(c: &char) -> bool {
        c.is_ascii_hexdigit()
    }

    /// Checks if `c` is an upper-case letter according to VHDL-2019 LRM p257.
    /// Set: `ABCDEFGHIJKLMNOPQRSTUVWXYZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖØÙÚÛÜÝÞ`
    pub fn is_upper(c: &char) -> bool {
        match c {
            '\u{00D7}' => false, // reject multiplication sign
            'A'..='Z' | 'À'..='Þ' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a lower-case letter according to VHDL-2019 LRM p257.
    /// Set: `abcdefghijklmnopqrstuvwxyzßàáâãäåæçèéêëìíîïðñòóôõöøùúûüýþÿ`
    pub fn is_lower(c: &char) -> bool {
        match c {
            '\u{00F7}' => false, // reject division sign
            'a'..='z' | 'ß'..='ÿ' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a letter according to VHDL-2019 LRM p257.
    pub fn is_letter(c: &char) -> bool {
        is_lower(&c) || is_upper(&c)
    }

    /// Checks if `c` is a digit | letter according to VHDL-2008 LRM p229.
    pub fn is_letter_or_digit(c: &char) -> bool {
        is_digit(&c) || is_letter(&c)
    }

    /// Checks if `c` is a new-line character.
    pub fn is_newline(c: &char) -> bool {
        c == &'\n'
    }

    /// Checks if the character is a seperator according to VHDL-2019 LRM p259.
    pub fn is_separator(c: &char) -> bool {
        // whitespace: space, nbsp
        c == &'\u{0020}' || c == &'\u{00A0}' ||
        // format-effectors: ht (\t), vt, cr (\r), lf (\n), ff
        c == &'\u{0009}' || c == &'\u{000B}' || c == &'\u{000D}' || c == &'\u{000A}' || c == &'\u{000C}'
    }
}

use super::super::error::VhdlError;
use super::{Delimiter, VhdlToken};
use crate::lexer::{TrainCar, Token, TokenError, Tokenize};

/// Scans VHDL source code into tokens on demand.
///
/// The final item is always a `VhdlToken::EOF` token. An unrecognized character
/// produces an error item after exactly one character is skipped, and scanning
/// carries on from there.
pub struct VhdlTokenizer {
    train: TrainCar,
    char_lit_allowed: bool,
    done: bool,
}

impl VhdlTokenizer {
    /// Creates a new `VhdlTokenizer` ready to scan source code `s`.
    pub fn new(s: &str) -> Self {
        Self {
            train: TrainCar::new(s),
            char_lit_allowed: true,
            done: false,
        }
    }

    /// Transforms the source code `s` into a list of tokens, silently skipping over
    /// errors.
    pub fn into_tokens(s: &str) -> Vec<Token<VhdlToken>> {
        Self::new(s).filter_map(|f| f.ok()).collect()
    }

    /// Checks if a leading underline eventually reaches a letter.
    fn leads_to_letter(&self) -> bool {
        let mut n = 0;
        while self.train.peek_nth(n) == Some(&char_set::UNDERLINE) {
            n += 1;
        }
        self.train.peek_nth(n).map_or(false, char_set::is_letter)
    }

    /// Checks if a single quote following `tk` may begin a character literal.
    ///
    /// After a name, a single quote is the attribute/qualification tick.
    fn allows_char_literal(tk: &VhdlToken) -> bool {
        match tk {
            VhdlToken::Identifier(_) => false,
            VhdlToken::Delimiter(Delimiter::ParenR) | VhdlToken::Delimiter(Delimiter::BrackR) => {
                false
            }
            _ => true,
        }
    }

    fn is_char_literal(&self) -> bool {
        self.char_lit_allowed
            && self.train.peek_nth(1) == Some(&char_set::SINGLE_QUOTE)
            && self.train.peek().map_or(false, |c| char_set::is_newline(c) == false)
    }
}

impl Iterator for VhdlTokenizer {
    type Item = Result<Token<VhdlToken>, TokenError<VhdlError>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done == true {
            return None;
        }
        loop {
            let c = match self.train.consume() {
                Some(c) => c,
                None => {
                    self.done = true;
                    let mut loc = self.train.locate();
                    loc.next_col();
                    return Some(Ok(Token::new(VhdlToken::EOF, loc)));
                }
            };
            // skip over whitespace
            if char_set::is_separator(&c) {
                continue;
            }
            // skip over comments
            if c == char_set::DASH && self.train.peek() == Some(&char_set::DASH) {
                VhdlToken::consume_comment(&mut self.train);
                continue;
            }
            let tk_loc = self.train.locate();
            let result = if char_set::is_letter(&c)
                || (c == char_set::UNDERLINE && self.leads_to_letter())
            {
                Ok(VhdlToken::consume_word(&mut self.train, c))
            } else if c == char_set::BACKSLASH {
                VhdlToken::consume_extended_identifier(&mut self.train)
            } else if c == char_set::DOUBLE_QUOTE {
                VhdlToken::consume_str_lit(&mut self.train)
            } else if c == char_set::SINGLE_QUOTE && self.is_char_literal() {
                VhdlToken::consume_char_lit(&mut self.train)
            } else if char_set::is_digit(&c) {
                Ok(VhdlToken::consume_numeric(&mut self.train, c))
            } else {
                VhdlToken::collect_delimiter(&mut self.train, c)
            };
            return Some(match result {
                Ok(tk) => {
                    self.char_lit_allowed = Self::allows_char_literal(&tk);
                    tracing::trace!(at = %tk_loc, token = %tk, "scanned token");
                    Ok(Token::with_end(tk, tk_loc, self.train.locate()))
                }
                Err(e) => Err(TokenError::new(e, tk_loc)),
            });
        }
    }
}

impl Tokenize for VhdlTokenizer {
    type TokenType = VhdlToken;
    type Err = VhdlError;

    fn tokenize(s: &str) -> Vec<Result<Token<Self::TokenType>, TokenError<Self::Err>>> {
        Self::new(s).collect()
    }
}

#[cfg(test)]
mod test {
    use super::super::literal::{AbstLiteral, BitStrLiteral, Character};
    use super::super::{Identifier, Keyword};
    use super::*;
    use crate::lexer::Position;

    fn types(s: &str) -> Vec<VhdlToken> {
        VhdlTokenizer::tokenize(s)
            .into_iter()
            .map(|f| f.unwrap().take())
            .collect()
    }

    fn ident(s: &str) -> VhdlToken {
        VhdlToken::Identifier(Identifier::Basic(s.to_owned()))
    }

    #[test]
    fn single_quote_as_delimiter() {
        let contents = "\
foo <= std_logic_vector'('a','b','c');";
        assert_eq!(
            types(contents),
            vec![
                ident("foo"),
                VhdlToken::Delimiter(Delimiter::SigAssign),
                ident("std_logic_vector"),
                VhdlToken::Delimiter(Delimiter::SingleQuote),
                VhdlToken::Delimiter(Delimiter::ParenL),
                VhdlToken::CharLiteral(Character("a".to_owned())),
                VhdlToken::Delimiter(Delimiter::Comma),
                VhdlToken::CharLiteral(Character("b".to_owned())),
                VhdlToken::Delimiter(Delimiter::Comma),
                VhdlToken::CharLiteral(Character("c".to_owned())),
                VhdlToken::Delimiter(Delimiter::ParenR),
                VhdlToken::Delimiter(Delimiter::Terminator),
                VhdlToken::EOF,
            ]
        );

        let contents = "\
(clk'event = '1')";
        assert_eq!(
            types(contents),
            vec![
                VhdlToken::Delimiter(Delimiter::ParenL),
                ident("clk"),
                VhdlToken::Delimiter(Delimiter::SingleQuote),
                ident("event"),
                VhdlToken::Delimiter(Delimiter::Eq),
                VhdlToken::CharLiteral(Character("1".to_owned())),
                VhdlToken::Delimiter(Delimiter::ParenR),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn minus_versus_comment() {
        let contents = "x := a - b; -- a note - with dashes\ny";
        assert_eq!(
            types(contents),
            vec![
                ident("x"),
                VhdlToken::Delimiter(Delimiter::VarAssign),
                ident("a"),
                VhdlToken::Delimiter(Delimiter::Dash),
                ident("b"),
                VhdlToken::Delimiter(Delimiter::Terminator),
                ident("y"),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn literals_and_keywords() {
        let contents = "constant C : T := X\"0F\" & 16#a# & 2.5 & \"str\" & \\Ext Id\\;";
        assert_eq!(
            types(contents),
            vec![
                VhdlToken::Keyword(Keyword::Constant),
                ident("C"),
                VhdlToken::Delimiter(Delimiter::Colon),
                ident("T"),
                VhdlToken::Delimiter(Delimiter::VarAssign),
                VhdlToken::BitStrLiteral(BitStrLiteral("X\"0F\"".to_owned())),
                VhdlToken::Delimiter(Delimiter::Ampersand),
                VhdlToken::AbstLiteral(AbstLiteral::Based("16#a#".to_owned())),
                VhdlToken::Delimiter(Delimiter::Ampersand),
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("2.5".to_owned())),
                VhdlToken::Delimiter(Delimiter::Ampersand),
                VhdlToken::StrLiteral("str".to_owned()),
                VhdlToken::Delimiter(Delimiter::Ampersand),
                VhdlToken::Identifier(Identifier::Extended("Ext Id".to_owned())),
                VhdlToken::Delimiter(Delimiter::Terminator),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn leading_underlines() {
        assert_eq!(types("__tmp"), vec![ident("__tmp"), VhdlToken::EOF]);
    }

    #[test]
    fn locate_tokens() {
        let s = "\
package fa is
  end package;";
        let tokens: Vec<Position> = VhdlTokenizer::tokenize(s)
            .into_iter()
            .map(|f| f.unwrap().locate().clone())
            .collect();
        assert_eq!(
            tokens,
            vec![
                Position::place(1, 1),  // keyword: package
                Position::place(1, 9),  // basic identifier: fa
                Position::place(1, 12), // keyword: is
                Position::place(2, 3),  // keyword: end
                Position::place(2, 7),  // keyword: package
                Position::place(2, 14), // delimiter: ;
                Position::place(2, 15), // eof
            ]
        );
    }

    #[test]
    fn token_endings() {
        let tokens = VhdlTokenizer::into_tokens("signal magic_num");
        assert_eq!(tokens[1].locate(), &Position::place(1, 8));
        assert_eq!(tokens[1].ending(), &Position::place(1, 16));
    }

    #[test]
    fn invalid_character_skips_one() {
        let results = VhdlTokenizer::tokenize("a $? b");
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].as_ref().unwrap().as_ref(), &ident("a"));
        assert_eq!(
            results[1],
            Err(TokenError::new(
                VhdlError::Invalid("$".to_owned()),
                Position::place(1, 3)
            ))
        );
        assert_eq!(
            results[2],
            Err(TokenError::new(
                VhdlError::Invalid("?".to_owned()),
                Position::place(1, 4)
            ))
        );
        assert_eq!(results[3].as_ref().unwrap().as_ref(), &ident("b"));
        assert_eq!(results[4].as_ref().unwrap().as_ref(), &VhdlToken::EOF);
    }

    #[test]
    fn unterminated_string_recovers() {
        let results = VhdlTokenizer::tokenize("\"abc\nx");
        assert_eq!(
            results[0],
            Err(TokenError::new(
                VhdlError::MissingClosing('"'),
                Position::place(1, 1)
            ))
        );
        assert_eq!(results[1].as_ref().unwrap().as_ref(), &ident("abc"));
        assert_eq!(results[2].as_ref().unwrap().as_ref(), &ident("x"));
    }
}
