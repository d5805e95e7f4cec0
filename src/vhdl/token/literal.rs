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

use super::char_set;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, PartialEq, Clone)]
pub struct Character(pub String);

impl Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct BitStrLiteral(pub String);

impl Display for BitStrLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AbstLiteral {
    Decimal(String),
    Based(String),
}

impl AbstLiteral {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Decimal(val) => val,
            Self::Based(val) => val,
        }
    }
}

impl Display for AbstLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base specifiers allowed on bit string literals.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BaseSpec {
    B,
    O,
    X,
}

impl FromStr for BaseSpec {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "b" => Ok(Self::B),
            "o" => Ok(Self::O),
            "x" => Ok(Self::X),
            _ => Err(()),
        }
    }
}

impl BaseSpec {
    /// Selects the function that accepts a single digit of the base.
    pub fn as_fn(&self) -> fn(&char) -> bool {
        match self {
            Self::B => is_base_2,
            Self::O => is_base_8,
            Self::X => char_set::is_hex_digit,
        }
    }
}

fn is_base_2(c: &char) -> bool {
    match c {
        '0'..='1' => true,
        _ => false,
    }
}

fn is_base_8(c: &char) -> bool {
    match c {
        '0'..='7' => true,
        _ => false,
    }
}
