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

//! A single-pass recursive descent parser for VHDL design files.
//!
//! The parser walks the token stream once. As each production is recognized it
//! allocates AST nodes, declares or resolves symbols and pushes or pops scopes on
//! a [ScopeStack], so every name is resolved against exactly the declarations
//! visible at that point of the source.
//!
//! Problems with names (unresolved, ambiguous, duplicate, mismatched end names)
//! and unrecognized characters are reported as diagnostics and parsing carries
//! on. Only syntax errors abort a production; the parser then unwinds the scopes
//! the production opened and resynchronizes at the next `;` (or the `end` that
//! closes the enclosing region).

mod decl;
mod expr;
mod skip;
mod stream;
mod unit;

use super::ast::{DesignFile, NodeRef};
use super::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use super::error::{SyntaxError, VhdlError};
use super::scope::{ScopeBalance, ScopeId, ScopeStack};
use super::symbol::SymbolId;
use super::token::{Delimiter, Keyword, VhdlToken};
use crate::lexer::{Span, Token};
use stream::TokenStream;

type Result<T> = std::result::Result<T, SyntaxError>;

/// The outcome of parsing one design file.
#[derive(Debug)]
pub struct ParsedFile {
    pub file: DesignFile,
    pub diagnostics: Vec<Diagnostic>,
    pub balance: ScopeBalance,
}

impl ParsedFile {
    /// Checks if any diagnostic of `kind` was reported.
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind() == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind() == kind).count()
    }
}

pub struct VhdlParser {
    stream: TokenStream,
    file: DesignFile,
    scopes: ScopeStack,
    diagnostics: Diagnostics,
}

impl VhdlParser {
    /// Creates a parser over `source` whose root scope is named `_root`.
    pub fn new(source: &str) -> Self {
        Self::with_name(source, "_root")
    }

    /// Creates a parser over `source` whose design file is named `name`.
    pub fn with_name(source: &str, name: &str) -> Self {
        let file = DesignFile::new(name);
        let root = file.get_root();
        Self {
            stream: TokenStream::new(source),
            file: file,
            scopes: ScopeStack::new(root),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Streams every diagnostic to `f` as soon as it is reported.
    pub fn on_diagnostic(mut self, f: impl FnMut(&Diagnostic) + 'static) -> Self {
        self.diagnostics.listen(f);
        self
    }

    /// Parses every design unit in the source.
    pub fn parse(mut self) -> ParsedFile {
        loop {
            if self.peek().is_eof() == true {
                break;
            }
            let depth = self.scopes.depth();
            let mark = self.stream.consumed();
            if let Err(e) = self.parse_design_unit() {
                self.recover(depth, e);
                // a stray `end` at the top level stops the resync without progress
                if self.stream.consumed() == mark {
                    self.advance();
                }
            }
        }
        self.flush_lexical();
        let balance = self.scopes.balance();
        if balance.is_balanced() == false {
            tracing::error!(
                pushes = balance.pushes,
                pops = balance.pops,
                depth = balance.depth,
                "scope balance violation"
            );
        }
        tracing::debug!(
            units = self.file.units().len(),
            diagnostics = self.diagnostics.len(),
            "parsed design file"
        );
        ParsedFile {
            file: self.file,
            balance: balance,
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    /* token access */

    /// Reports any scanner errors gathered by the token stream.
    fn flush_lexical(&mut self) {
        for e in self.stream.take_errors() {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::Lexical,
                e.as_err().to_string(),
                Span::new(e.locate().clone()),
            ));
        }
    }

    fn peek(&mut self) -> &VhdlToken {
        self.peek_nth(0)
    }

    fn peek_nth(&mut self, n: usize) -> &VhdlToken {
        self.stream.peek_nth(n);
        self.flush_lexical();
        self.stream.peek_nth(n).as_ref()
    }

    fn peek_span(&mut self) -> Span {
        self.stream.peek().span()
    }

    fn advance(&mut self) -> Token<VhdlToken> {
        let t = self.stream.next();
        self.flush_lexical();
        t
    }

    fn check_kw(&mut self, kw: &Keyword) -> bool {
        self.peek().check_keyword(kw)
    }

    fn check_delim(&mut self, d: &Delimiter) -> bool {
        self.peek().check_delimiter(d)
    }

    fn check_kw_nth(&mut self, n: usize, kw: &Keyword) -> bool {
        self.peek_nth(n).check_keyword(kw)
    }

    fn check_delim_nth(&mut self, n: usize, d: &Delimiter) -> bool {
        self.peek_nth(n).check_delimiter(d)
    }

    /// Consumes the next token if it is the keyword `kw`.
    fn accept_kw(&mut self, kw: &Keyword) -> bool {
        match self.check_kw(kw) {
            true => {
                self.advance();
                true
            }
            false => false,
        }
    }

    /// Consumes the next token if it is the delimiter `d`.
    fn accept_delim(&mut self, d: &Delimiter) -> bool {
        match self.check_delim(d) {
            true => {
                self.advance();
                true
            }
            false => false,
        }
    }

    fn expect_kw(&mut self, kw: &Keyword) -> Result<Token<VhdlToken>> {
        match self.check_kw(kw) {
            true => Ok(self.advance()),
            false => Err(self.unexpected(&format!("'{}'", kw))),
        }
    }

    fn expect_delim(&mut self, d: &Delimiter) -> Result<Token<VhdlToken>> {
        match self.check_delim(d) {
            true => Ok(self.advance()),
            false => Err(self.unexpected(&format!("'{}'", d))),
        }
    }

    /// Consumes an identifier and returns its text with where it was written.
    fn expect_identifier(&mut self) -> Result<(String, Span)> {
        match self.peek() {
            VhdlToken::Identifier(_) => {
                let t = self.advance();
                let span = t.span();
                Ok((t.take().to_string(), span))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Consumes an identifier or operator symbol naming a subprogram.
    fn expect_designator(&mut self) -> Result<(String, Span)> {
        match self.peek() {
            VhdlToken::Identifier(_) | VhdlToken::StrLiteral(_) => {
                let t = self.advance();
                let span = t.span();
                Ok((t.take().to_string(), span))
            }
            _ => Err(self.unexpected("a designator")),
        }
    }

    /// Creates the error for finding something other than `expected`.
    ///
    /// Running out of input is reported at the end of the last token consumed.
    fn unexpected(&mut self, expected: &str) -> SyntaxError {
        match self.peek() {
            VhdlToken::EOF => SyntaxError::new(
                VhdlError::UnexpectedEof(expected.to_string()),
                Span::new(self.stream.last_end().clone()),
            ),
            tk => {
                let err = VhdlError::Expecting(expected.to_string(), tk.describe());
                SyntaxError::new(err, self.peek_span())
            }
        }
    }

    /* diagnostics */

    fn report(&mut self, kind: DiagnosticKind, message: String, span: Span) {
        self.diagnostics.push(Diagnostic::new(kind, message, span));
    }

    /* scopes and symbols */

    fn current(&self) -> ScopeId {
        self.scopes.current()
    }

    /// Allocates a scope nested in the current scope.
    fn new_scope(&mut self, name: Option<SymbolId>) -> ScopeId {
        let outer = self.current();
        self.file.tree_mut().alloc_scope(name, Some(outer))
    }

    fn push_scope(&mut self, scope: ScopeId) {
        self.scopes.push(scope);
    }

    fn pop_scope(&mut self) -> ScopeId {
        self.scopes.pop()
    }

    /// Introduces `name` in the current scope.
    ///
    /// A name already declared in the scope is reused after reporting it.
    fn declare(&mut self, name: &str, span: Span) -> SymbolId {
        let scope = self.current();
        self.declare_in(scope, name, span)
    }

    fn declare_in(&mut self, scope: ScopeId, name: &str, span: Span) -> SymbolId {
        match self.file.tree_mut().add(scope, name, Some(span.clone())) {
            Ok(id) => id,
            Err(existing) => {
                self.report(
                    DiagnosticKind::DuplicateDeclaration,
                    format!("duplicate declaration of '{}', continuing", name),
                    span,
                );
                existing
            }
        }
    }

    /// Finds `name` in the current scope, or declares it without complaint.
    fn declare_quiet(&mut self, name: &str, span: Span) -> SymbolId {
        let scope = self.current();
        match self.file.tree_mut().add(scope, name, Some(span)) {
            Ok(id) => id,
            Err(existing) => existing,
        }
    }

    /// Resolves `name` from the current scope.
    ///
    /// An unknown name gets a placeholder symbol in the current scope so later
    /// productions can keep using it.
    fn reference(&mut self, name: &str, span: Span) -> SymbolId {
        let scope = self.current();
        let found = self.file.tree().search(scope, name);
        match found.len() {
            0 => {
                self.report(
                    DiagnosticKind::UnresolvedName,
                    format!("symbol '{}' not found, creating and continuing", name),
                    span.clone(),
                );
                self.declare_quiet(name, span)
            }
            1 => found[0],
            _ => {
                self.report(
                    DiagnosticKind::AmbiguousName,
                    format!(
                        "ambiguous symbol '{}', resolved optimistically to the nearest declaration",
                        name
                    ),
                    span,
                );
                found[0]
            }
        }
    }

    /// Links `sym` to the node that declared it, unless it already has one.
    fn bind(&mut self, sym: SymbolId, node: NodeRef) {
        let symbol = self.file.tree_mut().symbol_mut(sym);
        if symbol.get_ast().is_none() {
            symbol.set_ast(node);
        }
    }

    /// Consumes the optional name repeated after `end` and checks it against
    /// `expected` as seen from `home`.
    fn check_end_name(&mut self, expected: SymbolId, home: ScopeId) {
        let (name, span) = match self.peek() {
            VhdlToken::Identifier(_) | VhdlToken::StrLiteral(_) | VhdlToken::CharLiteral(_) => {
                let t = self.advance();
                let span = t.span();
                (t.take().to_string(), span)
            }
            _ => return,
        };
        let found = self.file.tree().search(home, &name);
        if found.contains(&expected) == false {
            let message = format!(
                "end name '{}' does not match '{}'",
                name,
                self.file.tree().name_of(expected)
            );
            self.report(DiagnosticKind::EndNameMismatch, message, span);
        }
    }

    /* recovery */

    /// Reports `err`, leaves every scope opened since `depth` and skips to the
    /// next declaration boundary.
    fn recover(&mut self, depth: usize, err: SyntaxError) {
        let (err, span) = err.into_parts();
        self.report(DiagnosticKind::Syntax, err.to_string(), span);
        self.scopes.unwind(depth);
        let mut nesting: usize = 0;
        loop {
            match self.peek() {
                VhdlToken::EOF => break,
                VhdlToken::Keyword(Keyword::End) if nesting == 0 => break,
                VhdlToken::Keyword(Keyword::End) => {
                    // `end units`, `end record` or `end protected`
                    nesting -= 1;
                }
                VhdlToken::Keyword(Keyword::Units)
                | VhdlToken::Keyword(Keyword::Record)
                | VhdlToken::Keyword(Keyword::Protected) => {
                    nesting += 1;
                }
                VhdlToken::Delimiter(Delimiter::ParenL) => nesting += 1,
                VhdlToken::Delimiter(Delimiter::ParenR) => nesting = nesting.saturating_sub(1),
                VhdlToken::Delimiter(Delimiter::Terminator) if nesting == 0 => {
                    self.advance();
                    break;
                }
                _ => (),
            }
            let t = self.advance();
            // the closing keyword after `end` does not open another region
            if t.as_ref().check_keyword(&Keyword::End) == true {
                match self.peek() {
                    VhdlToken::Keyword(Keyword::Units)
                    | VhdlToken::Keyword(Keyword::Record)
                    | VhdlToken::Keyword(Keyword::Protected) => {
                        self.advance();
                    }
                    _ => (),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vhdl::ast::decl::Declaration;
    use crate::vhdl::ast::expr::{Expr, Precedence};
    use crate::vhdl::ast::unit::UnitKind;
    use crate::vhdl::format::{KeywordCase, VhdlFormat};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DESIGN: &str = r#"library ieee;
use ieee.std_logic_1164.all;

package types is
    type state_t is (IDLE, RUN, '0');
    type word_t is array (natural range <>) of std_logic;
    subtype byte_t is word_t(7 downto 0);
    type ticks_t is range 0 to 1000 units tick; tock = 10 tick; end units;
    type pair_t is record a, b : integer; end record;
    constant WIDTH : natural := 2 ** 3 - 1;
    signal s : resolved std_ulogic bus := 'Z';
    shared variable v : integer;
    file f : text open read_mode is "in.txt";
    alias w is WIDTH;
    attribute keep : boolean;
    attribute keep of s : signal is true;
    component c is
        generic (N : integer := 4);
        port (a : in bit; y : out bit_vector(N - 1 downto 0));
    end component;
    function add(x, y : integer) return integer;
    procedure reset(signal q : out std_logic);
    type counter is protected
        procedure incr;
    end protected;
end package types;

package body types is
    function add(x, y : integer) return integer is
    begin
        return x + y;
    end function;
    type counter is protected body
        variable n : integer := 0;
        procedure incr is begin n := n + 1; end procedure;
    end protected body;
end package body;

entity top is
    port (clk : in std_logic; q : out std_logic);
end entity;

architecture rtl of top is
    signal r : std_logic := '0';
begin
    process (clk) begin
        if rising_edge(clk) then r <= not r; end if;
    end process;
    q <= r;
end architecture;
"#;

    fn items(parsed: &ParsedFile, unit: usize) -> Vec<&Declaration> {
        parsed.file.units()[unit]
            .get_items()
            .iter()
            .map(|id| parsed.file.decl(*id))
            .collect()
    }

    #[test]
    fn empty_package() {
        let parsed = VhdlParser::new("package P is end package P;").parse();
        assert_eq!(parsed.diagnostics.len(), 0);
        assert_eq!(parsed.file.units().len(), 1);
        let unit = &parsed.file.units()[0];
        assert_eq!(parsed.file.tree().name_of(unit.get_name()), "P");
        assert_eq!(unit.get_items().len(), 0);
        assert_eq!(parsed.file.render(), "package P is\nend package P;\n");
        assert_eq!(
            parsed.balance,
            ScopeBalance {
                pushes: 1,
                pops: 1,
                depth: 0
            }
        );
        assert_eq!(
            parsed.file.dump().contains("PackageDecl Symbol#5 \"P\" ast=Unit#0"),
            true
        );
    }

    #[test]
    fn enum_literals_are_public() {
        let parsed =
            VhdlParser::new("package p is type Color is (Red, Green, Blue); end package p;").parse();
        assert_eq!(parsed.diagnostics.len(), 0);
        let tree = parsed.file.tree();
        let scope = parsed.file.units()[0].get_scope();
        assert_eq!(tree.find(scope, "color").is_some(), true);
        for lit in ["Red", "green", "BLUE"] {
            assert_eq!(tree.search(scope, lit).len(), 1);
        }
    }

    #[test]
    fn operator_precedence_nesting() {
        let parsed =
            VhdlParser::new("package p is constant N : integer := 1 + 2 * 3; end package p;")
                .parse();
        let value = match items(&parsed, 0)[0] {
            Declaration::Object(o) => o.default.clone().unwrap(),
            _ => panic!("expecting a constant"),
        };
        let sum = value.as_binary().unwrap();
        assert_eq!(sum.precedence(), Precedence::Adding);
        assert_eq!(sum.len(), 2);
        assert_eq!(matches!(sum.first(), Expr::AbstractLiteral(_)), true);
        let product = sum.rest()[0].1.as_binary().unwrap();
        assert_eq!(product.precedence(), Precedence::Multiplying);
        assert_eq!(product.len(), 2);
    }

    #[test]
    fn unresolved_name_gets_placeholder() {
        let src = "package p is\n  constant a : integer := foo;\n  constant b : integer := foo + 1;\nend package p;";
        let parsed = VhdlParser::new(src).parse();
        let unresolved: Vec<&Diagnostic> = parsed
            .diagnostics
            .iter()
            .filter(|d| d.message().contains("'foo'"))
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].kind(), DiagnosticKind::UnresolvedName);
        assert_eq!(
            unresolved[0].message(),
            "symbol 'foo' not found, creating and continuing"
        );
        assert_eq!(unresolved[0].span().start(), &crate::lexer::Position::place(2, 27));
        // both constants were still parsed
        assert_eq!(items(&parsed, 0).len(), 2);
    }

    #[test]
    fn render_is_stable() {
        let first = VhdlParser::new(DESIGN).parse();
        assert_eq!(first.count(DiagnosticKind::Syntax), 0);
        assert_eq!(first.count(DiagnosticKind::Lexical), 0);
        assert_eq!(first.count(DiagnosticKind::DuplicateDeclaration), 0);
        assert_eq!(first.count(DiagnosticKind::EndNameMismatch), 0);
        assert_eq!(first.file.units().len(), 4);
        let text = first.file.render();
        let second = VhdlParser::new(&text).parse();
        assert_eq!(second.count(DiagnosticKind::Syntax), 0);
        assert_eq!(second.file.render(), text);
        let fmt = VhdlFormat::new().keyword_case(KeywordCase::Upper);
        let upper = first.file.render_with(&fmt);
        assert_eq!(upper.starts_with("LIBRARY ieee;\nUSE ieee.std_logic_1164.ALL;\nPACKAGE types IS\n"), true);
        assert_eq!(VhdlParser::new(&upper).parse().file.render(), text);
    }

    #[test]
    fn scopes_are_balanced() {
        let parsed = VhdlParser::new(DESIGN).parse();
        assert_eq!(parsed.balance.is_balanced(), true);
        assert_eq!(parsed.balance.pushes > 10, true);
        // errors in the middle of nested regions still unwind
        let parsed = VhdlParser::new(
            "package p is type r is record a : ; end record; function f(x : ) return t; end package p;",
        )
        .parse();
        assert_eq!(parsed.count(DiagnosticKind::Syntax), 2);
        // package, record and formals were each entered once and left once
        assert_eq!(parsed.balance.pushes, 3);
        assert_eq!(parsed.balance.pops, 3);
        assert_eq!(parsed.balance.depth, 0);
    }

    #[test]
    fn leaked_scope_is_unbalanced() {
        let mut parser = VhdlParser::new("package p is end package p;");
        let extra = parser.new_scope(None);
        parser.push_scope(extra);
        let parsed = parser.parse();
        assert_eq!(parsed.file.units().len(), 1);
        assert_eq!(parsed.balance.pushes, 2);
        assert_eq!(parsed.balance.pops, 1);
        assert_eq!(parsed.balance.depth, 1);
        assert_eq!(parsed.balance.is_balanced(), false);
    }

    #[test]
    fn protected_body_reenters_declaration() {
        let parsed = VhdlParser::new(DESIGN).parse();
        let file = &parsed.file;
        let (decl_id, decl_scope) = file.units()[0]
            .get_items()
            .iter()
            .find_map(|id| match file.decl(*id) {
                Declaration::ProtectedType(p) => Some((*id, p.scope)),
                _ => None,
            })
            .unwrap();
        let (body_id, body) = file.units()[1]
            .get_items()
            .iter()
            .find_map(|id| match file.decl(*id) {
                Declaration::ProtectedBody(b) => Some((*id, b)),
                _ => None,
            })
            .unwrap();
        assert_eq!(body.scope, decl_scope);
        let counter = file.tree().symbol(body.name);
        assert_eq!(counter.get_ast(), Some(NodeRef::Decl(decl_id)));
        assert_eq!(counter.get_defn(), Some(NodeRef::Decl(body_id)));
        // the body of `incr` completes the declaration inside the protected type
        let incr = file.tree().find(decl_scope, "incr").unwrap();
        assert_eq!(file.tree().symbol(incr).get_defn().is_some(), true);
        assert_eq!(file.tree().find(decl_scope, "n").is_some(), true);
    }

    #[test]
    fn range_error_resynchronizes() {
        let src = "package p is\n  subtype s is integer range 10;\n  constant c : integer := 0;\nend package p;";
        let parsed = VhdlParser::new(src).parse();
        let errors: Vec<&Diagnostic> = parsed
            .diagnostics
            .iter()
            .filter(|d| d.kind() == DiagnosticKind::Syntax)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "expecting a range but found 10");
        assert_eq!(errors[0].span().start(), &crate::lexer::Position::place(2, 30));
        assert_eq!(items(&parsed, 0).len(), 1);
        assert_eq!(parsed.file.units().len(), 1);
    }

    #[test]
    fn end_name_mismatch() {
        let parsed = VhdlParser::new("package p is end package q;").parse();
        assert_eq!(parsed.count(DiagnosticKind::EndNameMismatch), 1);
        assert_eq!(parsed.diagnostics[0].message(), "end name 'q' does not match 'p'");
        // no placeholder is created for the mismatched name
        let root = parsed.file.get_root();
        assert_eq!(parsed.file.tree().find(root, "q"), None);
    }

    #[test]
    fn overlapping_literals_are_ambiguous() {
        let src = "package p is\n  type t1 is (a, b);\n  type t2 is (a, c);\n  constant x : t1 := a;\nend package p;";
        let parsed = VhdlParser::new(src).parse();
        assert_eq!(parsed.count(DiagnosticKind::AmbiguousName), 1);
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 0);
        let first = match items(&parsed, 0)[0] {
            Declaration::EnumType(e) => e.literals[0],
            _ => panic!("expecting an enumeration"),
        };
        match items(&parsed, 0)[2] {
            Declaration::Object(o) => assert_eq!(o.default, Some(Expr::Name(first))),
            _ => panic!("expecting a constant"),
        }
    }

    #[test]
    fn duplicate_declaration_reuses_symbol() {
        let src = "package p is\n  constant k : integer := 1;\n  signal K : bit;\nend package p;";
        let parsed = VhdlParser::new(src).parse();
        assert_eq!(parsed.count(DiagnosticKind::DuplicateDeclaration), 1);
        let names: Vec<Vec<SymbolId>> = items(&parsed, 0).iter().map(|d| d.names()).collect();
        assert_eq!(names[0], names[1]);
    }

    #[test]
    fn lexical_errors_do_not_stop_parsing() {
        let parsed =
            VhdlParser::new("package p is\n  constant c : integer := 1 $;\nend package p;").parse();
        assert_eq!(parsed.count(DiagnosticKind::Lexical), 1);
        assert_eq!(parsed.count(DiagnosticKind::Syntax), 0);
        let lexical = parsed
            .diagnostics
            .iter()
            .find(|d| d.kind() == DiagnosticKind::Lexical)
            .unwrap();
        assert_eq!(lexical.message(), "invalid character $");
        assert_eq!(lexical.span().start().line(), 2);
        assert_eq!(items(&parsed, 0).len(), 1);
    }

    #[test]
    fn truncated_source_reports_last_token() {
        let parsed =
            VhdlParser::new("package p is constant c : integer :=\n\n-- trailing note\n").parse();
        let first = parsed
            .diagnostics
            .iter()
            .find(|d| d.kind() == DiagnosticKind::Syntax)
            .unwrap();
        assert_eq!(
            first.message(),
            "unexpected end of file while expecting an expression"
        );
        assert_eq!(first.span().start(), &crate::lexer::Position::place(1, 36));
        assert_eq!(parsed.balance.is_balanced(), true);
    }

    #[test]
    fn stray_tokens_between_units() {
        let parsed = VhdlParser::new("foo bar; package p is end package p;").parse();
        assert_eq!(parsed.count(DiagnosticKind::Syntax), 1);
        assert_eq!(
            parsed.diagnostics[0].message(),
            "expecting a design unit but got 'foo'"
        );
        assert_eq!(parsed.file.units().len(), 1);
        assert_eq!(parsed.balance.is_balanced(), true);
    }

    #[test]
    fn listener_streams_diagnostics() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let parsed = VhdlParser::new("package p is constant c : t := x; end package q;")
            .on_diagnostic(move |d| sink.borrow_mut().push(d.kind()))
            .parse();
        let kinds: Vec<DiagnosticKind> = parsed.diagnostics.iter().map(|d| d.kind()).collect();
        assert_eq!(*seen.borrow(), kinds);
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnresolvedName,
                DiagnosticKind::UnresolvedName,
                DiagnosticKind::EndNameMismatch
            ]
        );
    }

    #[test]
    fn named_design_file() {
        let parsed = VhdlParser::with_name("entity e is end;", "top.vhd").parse();
        let file = &parsed.file;
        assert_eq!(file.tree().name_of(file.get_name()), "top.vhd");
        assert_eq!(file.tree().root(), Some(file.get_root()));
        assert_eq!(file.find_unit("E").is_some(), true);
        match file.units()[0].get_kind() {
            UnitKind::EntityDecl { ports, .. } => assert_eq!(ports, &None),
            _ => panic!("expecting an entity"),
        }
    }
}
