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

use super::RenderContext;
use crate::lexer::{Span, Token};
use crate::vhdl::token::{Delimiter, VhdlToken};

/// A statement kept as the raw tokens that form it, terminator included.
///
/// Statement parts are not analysed; they are delimited and carried so the
/// surrounding unit can be re-rendered.
#[derive(Debug, PartialEq, Clone)]
pub struct Statement(Vec<Token<VhdlToken>>);

impl Statement {
    pub fn new(tokens: Vec<Token<VhdlToken>>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &Vec<Token<VhdlToken>> {
        &self.0
    }

    /// Returns the source region covered by the statement.
    pub fn span(&self) -> Option<Span> {
        let first = self.0.first()?;
        let last = self.0.last()?;
        Some(Span::between(first.locate().clone(), last.ending().clone()))
    }

    /// Writes the tokens separated by single spaces.
    ///
    /// Parentheses hug their contents, and `;`, `,`, ticks and selections attach
    /// to the token before them. A `(` attaches to a preceding name.
    pub fn render(&self, cx: &RenderContext) -> String {
        let mut text = String::new();
        let mut prev: Option<&VhdlToken> = None;
        for t in &self.0 {
            if let Some(p) = prev {
                if is_spaced(p, t.as_ref()) == true {
                    text.push(' ');
                }
            }
            match t.as_ref() {
                VhdlToken::Keyword(kw) => text.push_str(&cx.kw(*kw)),
                other => text.push_str(&other.to_string()),
            }
            prev = Some(t.as_ref());
        }
        text
    }
}

/// Checks if a space separates the adjacent tokens `prev` and `next`.
fn is_spaced(prev: &VhdlToken, next: &VhdlToken) -> bool {
    match prev {
        VhdlToken::Delimiter(Delimiter::ParenL)
        | VhdlToken::Delimiter(Delimiter::SingleQuote)
        | VhdlToken::Delimiter(Delimiter::Dot) => return false,
        _ => (),
    }
    match next {
        VhdlToken::Delimiter(Delimiter::Terminator)
        | VhdlToken::Delimiter(Delimiter::Comma)
        | VhdlToken::Delimiter(Delimiter::ParenR)
        | VhdlToken::Delimiter(Delimiter::SingleQuote)
        | VhdlToken::Delimiter(Delimiter::Dot) => false,
        VhdlToken::Delimiter(Delimiter::ParenL) => match prev {
            VhdlToken::Identifier(_)
            | VhdlToken::StrLiteral(_)
            | VhdlToken::Delimiter(Delimiter::ParenR) => false,
            _ => true,
        },
        _ => true,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vhdl::ast::DesignFile;
    use crate::vhdl::format::{KeywordCase, VhdlFormat};
    use crate::vhdl::token::VhdlTokenizer;

    fn statement(s: &str) -> Statement {
        let mut tokens = VhdlTokenizer::into_tokens(s);
        // drop the trailing end-of-file marker
        tokens.pop();
        Statement::new(tokens)
    }

    #[test]
    fn render_keeps_parentheses_tight() {
        let file = DesignFile::new("_root");
        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        assert_eq!(statement("y<=a(0)and b;").render(&cx), "y <= a(0) and b;");
        assert_eq!(
            statement("wait until rising_edge(clk);").render(&cx),
            "wait until rising_edge(clk);"
        );
        assert_eq!(statement("return 1 ;").render(&cx), "return 1;");
        assert_eq!(
            statement("if (a)then x := f( a , b )'length ; end if ;").render(&cx),
            "if (a) then x := f(a, b)'length; end if;"
        );
        assert_eq!(statement("q <= r . s ;").render(&cx), "q <= r.s;");
    }

    #[test]
    fn rendered_text_scans_to_same_tokens() {
        let file = DesignFile::new("_root");
        let fmt = VhdlFormat::new();
        let cx = file.context(&fmt);
        let s = statement("x <= t'('1') when f(a,b)/=\"01\" else y(0)or z;");
        let text = s.render(&cx);
        assert_eq!(text, "x <= t'('1') when f(a, b) /= \"01\" else y(0) or z;");
        let kinds = |st: &Statement| -> Vec<VhdlToken> {
            st.tokens().iter().map(|t| t.as_ref().clone()).collect()
        };
        assert_eq!(kinds(&statement(&text)), kinds(&s));
    }

    #[test]
    fn render_keyword_case() {
        let file = DesignFile::new("_root");
        let fmt = VhdlFormat::new().keyword_case(KeywordCase::Upper);
        let cx = file.context(&fmt);
        assert_eq!(statement("end if;").render(&cx), "END IF;");
    }

    #[test]
    fn span_covers_tokens() {
        let s = statement("x := 1;");
        assert_eq!(s.span().unwrap().to_string(), ":1:1-1:7");
    }
}
