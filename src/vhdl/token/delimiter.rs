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

use std::fmt::Display;

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub enum Delimiter {
    Ampersand,   // &
    SingleQuote, // '
    ParenL,      // (
    ParenR,      // )
    Star,        // *
    Plus,        // +
    Comma,       // ,
    Dash,        // -
    Dot,         // .
    FwdSlash,    // /
    Colon,       // :
    Terminator,  // ;
    Lt,          // <
    Eq,          // =
    Gt,          // >
    Pipe,        // |
    BrackL,      // [
    BrackR,      // ]
    Arrow,       // =>
    DoubleStar,  // **
    VarAssign,   // :=
    Inequality,  // /=
    GTE,         // >=
    SigAssign,   // <=
    Box,         // <>
}

impl Delimiter {
    /// Attempts to match the given string of characters `s` to a VHDL delimiter.
    pub fn transform(s: &str) -> Option<Self> {
        Some(match s {
            "&" => Self::Ampersand,
            "'" => Self::SingleQuote,
            "(" => Self::ParenL,
            ")" => Self::ParenR,
            "*" => Self::Star,
            "+" => Self::Plus,
            "," => Self::Comma,
            "-" => Self::Dash,
            "." => Self::Dot,
            "/" => Self::FwdSlash,
            ":" => Self::Colon,
            ";" => Self::Terminator,
            "<" => Self::Lt,
            "=" => Self::Eq,
            ">" => Self::Gt,
            "|" => Self::Pipe,
            "[" => Self::BrackL,
            "]" => Self::BrackR,
            "=>" => Self::Arrow,
            "**" => Self::DoubleStar,
            ":=" => Self::VarAssign,
            "/=" => Self::Inequality,
            ">=" => Self::GTE,
            "<=" => Self::SigAssign,
            "<>" => Self::Box,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ampersand => "&",
            Self::SingleQuote => "'",
            Self::ParenL => "(",
            Self::ParenR => ")",
            Self::Star => "*",
            Self::Plus => "+",
            Self::Comma => ",",
            Self::Dash => "-",
            Self::Dot => ".",
            Self::FwdSlash => "/",
            Self::Colon => ":",
            Self::Terminator => ";",
            Self::Lt => "<",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Pipe => "|",
            Self::BrackL => "[",
            Self::BrackR => "]",
            Self::Arrow => "=>",
            Self::DoubleStar => "**",
            Self::VarAssign => ":=",
            Self::Inequality => "/=",
            Self::GTE => ">=",
            Self::SigAssign => "<=",
            Self::Box => "<>",
        }
    }

    /// Checks if the delimiter is made of two characters.
    pub fn is_compound(&self) -> bool {
        self.as_str().len() == 2
    }
}

impl Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transform_delimiters() {
        assert_eq!(Delimiter::transform("=>"), Some(Delimiter::Arrow));
        assert_eq!(Delimiter::transform("<>"), Some(Delimiter::Box));
        assert_eq!(Delimiter::transform("-"), Some(Delimiter::Dash));
        assert_eq!(Delimiter::transform("?"), None);
        assert_eq!(Delimiter::transform("<=>"), None);
        assert_eq!(Delimiter::Inequality.is_compound(), true);
        assert_eq!(Delimiter::Terminator.is_compound(), false);
    }
}
