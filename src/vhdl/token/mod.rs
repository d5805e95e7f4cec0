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

pub mod delimiter;
pub mod identifier;
pub mod keyword;
pub mod literal;
pub mod tokenizer;

use super::error::VhdlError;
use crate::lexer::TrainCar;
use literal::{AbstLiteral, BaseSpec, BitStrLiteral, Character};
use std::fmt::Display;
use std::str::FromStr;

pub use tokenizer::char_set;

pub type Identifier = identifier::Identifier;
pub type Keyword = keyword::Keyword;
pub type Delimiter = delimiter::Delimiter;
pub type VhdlTokenizer = tokenizer::VhdlTokenizer;

#[derive(Debug, PartialEq, Clone)]
pub enum VhdlToken {
    Identifier(Identifier), // can be general or extended (case-sensitive) identifier
    AbstLiteral(AbstLiteral),
    CharLiteral(Character),
    StrLiteral(String),
    BitStrLiteral(BitStrLiteral),
    Keyword(Keyword),
    Delimiter(Delimiter),
    EOF,
}

impl Display for VhdlToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Identifier(id) => id.to_string(),
                Self::AbstLiteral(a) => a.to_string(),
                Self::CharLiteral(c) => c.to_string(),
                Self::StrLiteral(s) => format!("\"{}\"", s),
                Self::BitStrLiteral(b) => b.to_string(),
                Self::Keyword(kw) => kw.to_string(),
                Self::Delimiter(d) => d.to_string(),
                Self::EOF => String::new(),
            }
        )
    }
}

impl VhdlToken {
    /// Takes the identifier from the token.
    pub fn take_identifier(self) -> Option<Identifier> {
        match self {
            Self::Identifier(i) => Some(i),
            _ => None,
        }
    }

    /// Casts into a keyword.
    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self {
            Self::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Casts as a delimiter
    pub fn as_delimiter(&self) -> Option<&Delimiter> {
        match self {
            Self::Delimiter(d) => Some(d),
            _ => None,
        }
    }

    /// Accesses the underlying `Identifier`, if one exists.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            VhdlToken::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Checks if the element is a particular keyword `kw`.
    pub fn check_keyword(&self, kw: &Keyword) -> bool {
        match self {
            VhdlToken::Keyword(r) => r == kw,
            _ => false,
        }
    }

    /// Checks if the element is a particular delimiter `d`.
    pub fn check_delimiter(&self, d: &Delimiter) -> bool {
        match self {
            VhdlToken::Delimiter(r) => r == d,
            _ => false,
        }
    }

    pub fn is_eof(&self) -> bool {
        match self {
            VhdlToken::EOF => true,
            _ => false,
        }
    }

    /// Writes the token for use within a diagnostic message.
    pub fn describe(&self) -> String {
        match self {
            VhdlToken::EOF => String::from("end of file"),
            _ => format!("'{}'", self),
        }
    }
}

impl VhdlToken {
    /// Captures VHDL Tokens that begin with a digit: decimal literals and
    /// based literals.
    ///
    /// Assumes the incoming char `c0` was the last char consumed. A based literal
    /// that never closes with a `#` falls back to the decimal literal formed by
    /// its leading digits.
    pub fn consume_numeric(train: &mut TrainCar, c0: char) -> VhdlToken {
        let mut number = String::from(c0);
        Self::consume_value_pattern(train, &mut number, char_set::is_digit);
        // * based_literal
        if train.peek() == Some(&char_set::HASH) && Self::is_base_prefix(&number) {
            let mark = train.checkpoint();
            if let Some(based) = Self::consume_based(train, &number) {
                return VhdlToken::AbstLiteral(AbstLiteral::Based(based));
            }
            train.restore(mark);
        }
        // * decimal_literal
        if train.peek() == Some(&char_set::DOT)
            && train.peek_nth(1).map_or(false, char_set::is_digit)
        {
            number.push(char_set::DOT);
            train.consume();
            Self::consume_value_pattern(train, &mut number, char_set::is_digit);
        }
        Self::consume_exponent(train, &mut number);
        VhdlToken::AbstLiteral(AbstLiteral::Decimal(number))
    }

    /// A base is one digit, or two digits led by a `1`.
    fn is_base_prefix(s: &str) -> bool {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(_), None, None) => true,
            (Some('1'), Some(_), None) => true,
            _ => false,
        }
    }

    /// Captures the remainder of a based literal after its `base`.
    ///
    /// Assumes the next char is the opening `#`. Returns `None` when the literal
    /// is malformed, leaving the train at an unspecified location.
    fn consume_based(train: &mut TrainCar, base: &str) -> Option<String> {
        let mut lit = String::from(base);
        lit.push(train.consume()?);
        if train.peek().map_or(false, char_set::is_hex_digit) == false {
            return None;
        }
        Self::consume_value_pattern(train, &mut lit, char_set::is_hex_digit);
        if train.peek() == Some(&char_set::DOT)
            && train.peek_nth(1).map_or(false, char_set::is_hex_digit)
        {
            lit.push(char_set::DOT);
            train.consume();
            Self::consume_value_pattern(train, &mut lit, char_set::is_hex_digit);
        }
        if train.peek() != Some(&char_set::HASH) {
            return None;
        }
        lit.push(train.consume()?);
        Self::consume_exponent(train, &mut lit);
        Some(lit)
    }

    /// Captures VHDL Tokens: keywords, basic identifiers, and bit string literals.
    ///
    /// Assumes the first char `c0` (a letter or leading underline) was the last
    /// char consumed before the function call.
    pub fn consume_word(train: &mut TrainCar, c0: char) -> VhdlToken {
        let mut word = String::from(c0);
        while let Some(&c) = train.peek() {
            if char_set::is_letter_or_digit(&c) || c == char_set::UNDERLINE {
                word.push(c);
                train.consume();
            } else {
                break;
            }
        }
        // * bit string literal: check if the next char is a double quote
        if train.peek() == Some(&char_set::DOUBLE_QUOTE) {
            if let Ok(base) = BaseSpec::from_str(&word) {
                let mark = train.checkpoint();
                if let Some(lit) = Self::consume_bit_str_literal(train, &word, base) {
                    return VhdlToken::BitStrLiteral(lit);
                }
                train.restore(mark);
            }
        }
        match Keyword::match_keyword(&word) {
            Some(kw) => VhdlToken::Keyword(kw),
            None => VhdlToken::Identifier(Identifier::Basic(word)),
        }
    }

    /// Captures the remaining characters for a bit string literal.
    ///
    /// Assumes the base specifier was already consumed and passed as `prefix`, and
    /// that the next char is the opening `"`. At least one digit valid for the base
    /// must appear before the closing `"` on the same line.
    pub fn consume_bit_str_literal(
        train: &mut TrainCar,
        prefix: &str,
        base: BaseSpec,
    ) -> Option<BitStrLiteral> {
        let eval = base.as_fn();
        let mut literal = String::from(prefix);
        literal.push(train.consume()?);
        if train.peek().map_or(false, eval) == false {
            return None;
        }
        Self::consume_value_pattern(train, &mut literal, eval);
        if train.peek() != Some(&char_set::DOUBLE_QUOTE) {
            return None;
        }
        literal.push(train.consume()?);
        Some(BitStrLiteral(literal))
    }

    /// Captures an extended identifier token.
    ///
    /// Assumes the opening backslash was the last char consumed. On failure the
    /// train is returned to just after the opening backslash.
    pub fn consume_extended_identifier(train: &mut TrainCar) -> Result<VhdlToken, VhdlError> {
        let mark = train.checkpoint();
        let mut id = String::new();
        while let Some(c) = train.consume() {
            if c == char_set::BACKSLASH {
                if id.is_empty() == true {
                    break;
                }
                return Ok(VhdlToken::Identifier(Identifier::Extended(id)));
            } else if char_set::is_newline(&c) {
                break;
            }
            id.push(c);
        }
        train.restore(mark);
        Err(VhdlError::MissingClosing(char_set::BACKSLASH))
    }

    /// Captures a character literal.
    ///
    /// Assumes the opening single quote was the last char consumed and the
    /// closing single quote sits right after the next char.
    pub fn consume_char_lit(train: &mut TrainCar) -> Result<VhdlToken, VhdlError> {
        let c = train
            .consume()
            .ok_or(VhdlError::MissingClosing(char_set::SINGLE_QUOTE))?;
        match train.consume() {
            Some(char_set::SINGLE_QUOTE) => Ok(VhdlToken::CharLiteral(Character(c.to_string()))),
            _ => Err(VhdlError::MissingClosing(char_set::SINGLE_QUOTE)),
        }
    }

    /// Captures a string literal.
    ///
    /// Assumes the first double quote was the last char consumed before entering
    /// the function. The literal ends at the very next double quote on the same
    /// line; doubled quotes are not treated as an escape.
    pub fn consume_str_lit(train: &mut TrainCar) -> Result<VhdlToken, VhdlError> {
        let mark = train.checkpoint();
        let mut value = String::new();
        while let Some(c) = train.consume() {
            if c == char_set::DOUBLE_QUOTE {
                return Ok(VhdlToken::StrLiteral(value));
            } else if char_set::is_newline(&c) {
                break;
            }
            value.push(c);
        }
        train.restore(mark);
        Err(VhdlError::MissingClosing(char_set::DOUBLE_QUOTE))
    }

    /// Skips a single-line comment (all characters after a `--` up until end-of-line).
    ///
    /// Assumes the opening '-' was the last char consumed and the next char is '-'.
    pub fn consume_comment(train: &mut TrainCar) {
        while let Some(c) = train.consume() {
            if char_set::is_newline(&c) {
                break;
            }
        }
    }

    /// Captures a VHDL delimiter, preferring two-character delimiters over one.
    ///
    /// Assumes `c0` was the last char consumed.
    pub fn collect_delimiter(train: &mut TrainCar, c0: char) -> Result<VhdlToken, VhdlError> {
        if let Some(&c1) = train.peek() {
            let pair: String = [c0, c1].iter().collect();
            if let Some(d) = Delimiter::transform(&pair) {
                train.consume();
                return Ok(VhdlToken::Delimiter(d));
            }
        }
        match Delimiter::transform(&c0.to_string()) {
            Some(d) => Ok(VhdlToken::Delimiter(d)),
            None => Err(VhdlError::Invalid(c0.to_string())),
        }
    }

    /// Captures the generic pattern production rule by passing a fn as `eval` to compare.
    ///
    /// An underline is only taken when a char accepted by `eval` follows it.
    /// - A ::= A { \[ underline ] A }
    fn consume_value_pattern(train: &mut TrainCar, car: &mut String, eval: fn(&char) -> bool) {
        while let Some(&c) = train.peek() {
            if eval(&c) == true {
                car.push(c);
                train.consume();
            } else if c == char_set::UNDERLINE && train.peek_nth(1).map_or(false, eval) {
                car.push(c);
                train.consume();
                if let Some(d) = train.consume() {
                    car.push(d);
                }
            } else {
                break;
            }
        }
    }

    /// Captures an exponent when the next chars form one.
    /// - exponent ::= E \[ + ] integer | E - integer
    fn consume_exponent(train: &mut TrainCar, car: &mut String) {
        let e = match train.peek() {
            Some(&c) if c == 'e' || c == 'E' => c,
            _ => return,
        };
        let (c1, c2) = (train.peek_nth(1).copied(), train.peek_nth(2).copied());
        match (c1, c2) {
            (Some(d), _) if char_set::is_digit(&d) => {
                car.push(e);
                train.consume();
            }
            (Some(sign), Some(d))
                if (sign == char_set::PLUS || sign == char_set::DASH) && char_set::is_digit(&d) =>
            {
                car.push(e);
                car.push(sign);
                train.consume();
                train.consume();
            }
            _ => return,
        }
        Self::consume_value_pattern(train, car, char_set::is_digit);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Consumes the first char and hands the rest to `consume_numeric`.
    fn numeric(s: &str) -> (VhdlToken, String) {
        let mut tc = TrainCar::new(s);
        let c0 = tc.consume().unwrap();
        let tk = VhdlToken::consume_numeric(&mut tc, c0);
        (tk, tc.remaining())
    }

    #[test]
    fn lex_numeric() {
        assert_eq!(
            numeric("32)"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("32".to_owned())),
                String::from(")")
            )
        );
        assert_eq!(
            numeric("1_000_000;"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("1_000_000".to_owned())),
                String::from(";")
            )
        );
        assert_eq!(
            numeric("1.5E-3 ns"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("1.5E-3".to_owned())),
                String::from(" ns")
            )
        );
    }

    #[test]
    fn lex_numeric_stops_before_dangling_marks() {
        // no digit after the dot
        assert_eq!(
            numeric("7.all"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("7".to_owned())),
                String::from(".all")
            )
        );
        // exponent marker without digits belongs to the next token
        assert_eq!(
            numeric("3e"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("3".to_owned())),
                String::from("e")
            )
        );
        // trailing underline
        assert_eq!(
            numeric("4_x"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("4".to_owned())),
                String::from("_x")
            )
        );
    }

    #[test]
    fn lex_based() {
        assert_eq!(
            numeric("16#FF_0A#;"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Based("16#FF_0A#".to_owned())),
                String::from(";")
            )
        );
        assert_eq!(
            numeric("2#1.01#e+2"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Based("2#1.01#e+2".to_owned())),
                String::new()
            )
        );
    }

    #[test]
    fn lex_based_falls_back_to_decimal() {
        // missing closing '#'
        assert_eq!(
            numeric("16#FF"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("16".to_owned())),
                String::from("#FF")
            )
        );
        // base has too many digits to be a base
        assert_eq!(
            numeric("123#1#"),
            (
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("123".to_owned())),
                String::from("#1#")
            )
        );
    }

    #[test]
    fn lex_bit_str() {
        let mut tc = TrainCar::new("x\"F0_0a\" more");
        let c0 = tc.consume().unwrap();
        assert_eq!(
            VhdlToken::consume_word(&mut tc, c0),
            VhdlToken::BitStrLiteral(BitStrLiteral("x\"F0_0a\"".to_owned()))
        );
        assert_eq!(tc.remaining(), " more");

        // digit outside of the base is not a bit string
        let mut tc = TrainCar::new("b\"102\"");
        let c0 = tc.consume().unwrap();
        assert_eq!(
            VhdlToken::consume_word(&mut tc, c0),
            VhdlToken::Identifier(Identifier::Basic("b".to_owned()))
        );
        assert_eq!(tc.remaining(), "\"102\"");
    }

    #[test]
    fn lex_word() {
        let mut tc = TrainCar::new("Is_Ready__ <=");
        let c0 = tc.consume().unwrap();
        assert_eq!(
            VhdlToken::consume_word(&mut tc, c0),
            VhdlToken::Identifier(Identifier::Basic("Is_Ready__".to_owned()))
        );
        let mut tc = TrainCar::new("ENTITY");
        let c0 = tc.consume().unwrap();
        assert_eq!(
            VhdlToken::consume_word(&mut tc, c0),
            VhdlToken::Keyword(Keyword::Entity)
        );
    }

    #[test]
    fn lex_str_and_extended() {
        let mut tc = TrainCar::new("hello world\" x");
        assert_eq!(
            VhdlToken::consume_str_lit(&mut tc),
            Ok(VhdlToken::StrLiteral("hello world".to_owned()))
        );
        // no escape handling: a doubled quote closes the literal
        let mut tc = TrainCar::new("a\"\"b\"");
        assert_eq!(
            VhdlToken::consume_str_lit(&mut tc),
            Ok(VhdlToken::StrLiteral("a".to_owned()))
        );
        let mut tc = TrainCar::new("open\nend\"");
        assert_eq!(
            VhdlToken::consume_str_lit(&mut tc),
            Err(VhdlError::MissingClosing('"'))
        );
        assert_eq!(tc.remaining(), "open\nend\"");

        let mut tc = TrainCar::new("Bus A\\ ");
        assert_eq!(
            VhdlToken::consume_extended_identifier(&mut tc),
            Ok(VhdlToken::Identifier(Identifier::Extended(
                "Bus A".to_owned()
            )))
        );
    }

    #[test]
    fn lex_delimiter() {
        let mut tc = TrainCar::new("=1");
        assert_eq!(
            VhdlToken::collect_delimiter(&mut tc, '<'),
            Ok(VhdlToken::Delimiter(Delimiter::SigAssign))
        );
        let mut tc = TrainCar::new("a");
        assert_eq!(
            VhdlToken::collect_delimiter(&mut tc, '<'),
            Ok(VhdlToken::Delimiter(Delimiter::Lt))
        );
        assert_eq!(tc.remaining(), "a");
        let mut tc = TrainCar::new("");
        assert_eq!(
            VhdlToken::collect_delimiter(&mut tc, '?'),
            Err(VhdlError::Invalid("?".to_owned()))
        );
    }
}
