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

use crate::lexer::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum VhdlError {
    #[error("{0}")]
    Any(String),
    #[error("invalid character {0}")]
    Invalid(String),
    #[error("missing closing {0}")]
    MissingClosing(char),
    #[error("expecting a range but found {0}")]
    ExpectedRange(String),
    #[error("expecting {0} but got {1}")]
    Expecting(String, String),
    #[error("unexpected end of file while expecting {0}")]
    UnexpectedEof(String),
    #[error("failed to read format: {0}")]
    BadFormat(String),
}

/// A hard error that aborts the production being parsed.
#[derive(Debug, Error, PartialEq, Clone)]
#[error("{err}")]
pub struct SyntaxError {
    err: VhdlError,
    span: Span,
}

impl SyntaxError {
    pub fn new(err: VhdlError, span: Span) -> Self {
        Self {
            err: err,
            span: span,
        }
    }

    pub fn as_err(&self) -> &VhdlError {
        &self.err
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn into_parts(self) -> (VhdlError, Span) {
        (self.err, self.span)
    }
}
