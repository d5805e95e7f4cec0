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

use super::error::VhdlError;
use super::token::Keyword;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use std::str::FromStr;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum KeywordCase {
    #[serde(rename = "lower")]
    Lower,
    #[serde(rename = "upper")]
    Upper,
}

/// Options that shape the canonical text written by the renderer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VhdlFormat {
    #[serde(rename = "tab-size")]
    tab_size: Option<u8>,
    #[serde(rename = "keyword-case")]
    keyword_case: Option<KeywordCase>,
}

impl VhdlFormat {
    pub fn new() -> Self {
        Self {
            tab_size: Some(4),
            keyword_case: Some(KeywordCase::Lower),
        }
    }

    pub fn tab_size(mut self, n: u8) -> Self {
        self.tab_size = Some(n);
        self
    }

    pub fn keyword_case(mut self, case: KeywordCase) -> Self {
        self.keyword_case = Some(case);
        self
    }

    pub fn get_tab_size(&self) -> u8 {
        self.tab_size.unwrap_or(4)
    }

    pub fn get_keyword_case(&self) -> KeywordCase {
        self.keyword_case.unwrap_or(KeywordCase::Lower)
    }

    /// Creates the whitespace prefix for a line nested `level` regions deep.
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.get_tab_size() as usize * level)
    }

    /// Writes the keyword `kw` in the configured case.
    pub fn keyword(&self, kw: &Keyword) -> String {
        match self.get_keyword_case() {
            KeywordCase::Lower => kw.as_str().to_string(),
            KeywordCase::Upper => kw.as_str().to_ascii_uppercase(),
        }
    }

    /// Merges any populated data from `rhs` into attributes that do not already
    /// have data defined in `self`.
    pub fn merge(&mut self, rhs: Option<Self>) -> () {
        if let Some(rhs) = rhs {
            if self.tab_size.is_some() == false {
                self.tab_size = rhs.tab_size
            }
            if self.keyword_case.is_some() == false {
                self.keyword_case = rhs.keyword_case
            }
        }
    }
}

impl Default for VhdlFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for VhdlFormat {
    type Err = VhdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| VhdlError::BadFormat(e.to_string()))
    }
}
