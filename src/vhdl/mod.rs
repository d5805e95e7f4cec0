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

//! VHDL front end: scanning, name resolution and a syntax tree that renders
//! back to canonical source text.

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod format;
pub mod highlight;
pub mod parser;
pub mod scope;
pub mod symbol;
pub mod token;

pub use ast::DesignFile;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use format::VhdlFormat;
pub use parser::{ParsedFile, VhdlParser};

/// Parses the VHDL `source` text of a single design file.
pub fn parse(source: &str) -> ParsedFile {
    VhdlParser::new(source).parse()
}
