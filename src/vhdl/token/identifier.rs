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

/// An identifier as it appeared in the source.
///
/// Comparison rules are applied by the symbol tables, not here.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum Identifier {
    Basic(String),
    Extended(String),
}

impl Identifier {
    pub fn is_extended(&self) -> bool {
        match self {
            Self::Extended(_) => true,
            Self::Basic(_) => false,
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic(id) => write!(f, "{}", id),
            Self::Extended(id) => write!(f, "\\{}\\", id),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_keeps_backslashes() {
        assert_eq!(Identifier::Basic(String::from("Clk")).to_string(), "Clk");
        let ext = Identifier::Extended(String::from("Bus A"));
        assert_eq!(ext.to_string(), "\\Bus A\\");
        assert_eq!(ext.is_extended(), true);
    }
}
