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

//! Recoverable problems reported while scanning and parsing.

use super::highlight::{self, color};
use crate::lexer::Span;
use colored::Colorize;
use std::fmt::Display;

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum DiagnosticKind {
    /// An unrecognized character was skipped.
    Lexical,
    /// A production was abandoned and parsing resynchronized.
    Syntax,
    UnresolvedName,
    AmbiguousName,
    DuplicateDeclaration,
    EndNameMismatch,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Lexical | Self::Syntax => Severity::Error,
            Self::UnresolvedName
            | Self::AmbiguousName
            | Self::DuplicateDeclaration
            | Self::EndNameMismatch => Severity::Warning,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind,
            message: message.into(),
            span: span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity() {
            Severity::Error => color("error", highlight::ERROR_LABEL).bold(),
            Severity::Warning => color("warning", highlight::WARNING_LABEL).bold(),
        };
        write!(
            f,
            "{}: {} at {}",
            label,
            self.message,
            color(&self.span.to_string(), highlight::LOCATION)
        )
    }
}

/// An ordered sink of diagnostics.
///
/// Every record is mirrored as a `tracing` event and handed to the optional
/// listener as soon as it is pushed.
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    listener: Option<Box<dyn FnMut(&Diagnostic)>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            listener: None,
        }
    }

    /// Streams each future diagnostic to `f` as it is reported.
    pub fn listen(&mut self, f: impl FnMut(&Diagnostic) + 'static) {
        self.listener = Some(Box::new(f));
    }

    pub fn push(&mut self, d: Diagnostic) {
        match d.severity() {
            Severity::Error => {
                tracing::error!(kind = ?d.kind(), at = %d.span(), "{}", d.message())
            }
            Severity::Warning => {
                tracing::warn!(kind = ?d.kind(), at = %d.span(), "{}", d.message())
            }
        }
        if let Some(f) = self.listener.as_mut() {
            f(&d);
        }
        self.records.push(d);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts the number of records of a particular `kind`.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.records.iter().filter(|d| d.kind() == kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.records.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::Position;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn severity_by_kind() {
        assert_eq!(DiagnosticKind::Lexical.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::Syntax.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::UnresolvedName.severity(), Severity::Warning);
        assert_eq!(DiagnosticKind::EndNameMismatch.severity(), Severity::Warning);
    }

    #[test]
    fn listener_sees_records_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut diags = Diagnostics::new();
        diags.listen(move |d| sink.borrow_mut().push(d.message().to_string()));
        diags.push(Diagnostic::new(
            DiagnosticKind::Lexical,
            "invalid character $",
            Span::new(Position::place(1, 3)),
        ));
        diags.push(Diagnostic::new(
            DiagnosticKind::UnresolvedName,
            "symbol 'foo' not found, creating and continuing",
            Span::new(Position::place(2, 1)),
        ));
        assert_eq!(
            *seen.borrow(),
            vec![
                String::from("invalid character $"),
                String::from("symbol 'foo' not found, creating and continuing")
            ]
        );
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.count(DiagnosticKind::Lexical), 1);
    }

    #[test]
    fn display_contains_message() {
        let d = Diagnostic::new(
            DiagnosticKind::EndNameMismatch,
            "end name 'q' does not match 'p'",
            Span::new(Position::place(4, 9)),
        );
        let text = d.to_string();
        assert!(text.contains("end name 'q' does not match 'p'"));
        assert!(text.contains(":4:9"));
    }
}
