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

/// Reserved words of VHDL-2002.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub enum Keyword {
    Abs,
    Access,
    After,
    Alias,
    All,
    And,
    Architecture,
    Array,
    Assert,
    Attribute,
    Begin,
    Block,
    Body,
    Buffer,
    Bus,
    Case,
    Component,
    Configuration,
    Constant,
    Disconnect,
    Downto,
    Else,
    Elsif,
    End,
    Entity,
    Exit,
    File,
    For,
    Function,
    Generate,
    Generic,
    Group,
    Guarded,
    If,
    Impure,
    In,
    Inertial,
    Inout,
    Is,
    Label,
    Library,
    Linkage,
    Literal,
    Loop,
    Map,
    Mod,
    Nand,
    New,
    Next,
    Nor,
    Not,
    Null,
    Of,
    On,
    Open,
    Or,
    Others,
    Out,
    Package,
    Port,
    Postponed,
    Procedure,
    Process,
    Protected,
    Pure,
    Range,
    Record,
    Register,
    Reject,
    Rem,
    Report,
    Return,
    Rol,
    Ror,
    Select,
    Severity,
    Shared,
    Signal,
    Sla,
    Sll,
    Sra,
    Srl,
    Subtype,
    Then,
    To,
    Transport,
    Type,
    Unaffected,
    Units,
    Until,
    Use,
    Variable,
    Wait,
    When,
    While,
    With,
    Xnor,
    Xor,
}

impl Keyword {
    /// Attempts to match the given string of characters `s` to a VHDL keyword.
    ///
    /// Compares `s` without regard to case.
    pub fn match_keyword(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_ref() {
            "abs" => Self::Abs,
            "access" => Self::Access,
            "after" => Self::After,
            "alias" => Self::Alias,
            "all" => Self::All,
            "and" => Self::And,
            "architecture" => Self::Architecture,
            "array" => Self::Array,
            "assert" => Self::Assert,
            "attribute" => Self::Attribute,
            "begin" => Self::Begin,
            "block" => Self::Block,
            "body" => Self::Body,
            "buffer" => Self::Buffer,
            "bus" => Self::Bus,
            "case" => Self::Case,
            "component" => Self::Component,
            "configuration" => Self::Configuration,
            "constant" => Self::Constant,
            "disconnect" => Self::Disconnect,
            "downto" => Self::Downto,
            "else" => Self::Else,
            "elsif" => Self::Elsif,
            "end" => Self::End,
            "entity" => Self::Entity,
            "exit" => Self::Exit,
            "file" => Self::File,
            "for" => Self::For,
            "function" => Self::Function,
            "generate" => Self::Generate,
            "generic" => Self::Generic,
            "group" => Self::Group,
            "guarded" => Self::Guarded,
            "if" => Self::If,
            "impure" => Self::Impure,
            "in" => Self::In,
            "inertial" => Self::Inertial,
            "inout" => Self::Inout,
            "is" => Self::Is,
            "label" => Self::Label,
            "library" => Self::Library,
            "linkage" => Self::Linkage,
            "literal" => Self::Literal,
            "loop" => Self::Loop,
            "map" => Self::Map,
            "mod" => Self::Mod,
            "nand" => Self::Nand,
            "new" => Self::New,
            "next" => Self::Next,
            "nor" => Self::Nor,
            "not" => Self::Not,
            "null" => Self::Null,
            "of" => Self::Of,
            "on" => Self::On,
            "open" => Self::Open,
            "or" => Self::Or,
            "others" => Self::Others,
            "out" => Self::Out,
            "package" => Self::Package,
            "port" => Self::Port,
            "postponed" => Self::Postponed,
            "procedure" => Self::Procedure,
            "process" => Self::Process,
            "protected" => Self::Protected,
            "pure" => Self::Pure,
            "range" => Self::Range,
            "record" => Self::Record,
            "register" => Self::Register,
            "reject" => Self::Reject,
            "rem" => Self::Rem,
            "report" => Self::Report,
            "return" => Self::Return,
            "rol" => Self::Rol,
            "ror" => Self::Ror,
            "select" => Self::Select,
            "severity" => Self::Severity,
            "shared" => Self::Shared,
            "signal" => Self::Signal,
            "sla" => Self::Sla,
            "sll" => Self::Sll,
            "sra" => Self::Sra,
            "srl" => Self::Srl,
            "subtype" => Self::Subtype,
            "then" => Self::Then,
            "to" => Self::To,
            "transport" => Self::Transport,
            "type" => Self::Type,
            "unaffected" => Self::Unaffected,
            "units" => Self::Units,
            "until" => Self::Until,
            "use" => Self::Use,
            "variable" => Self::Variable,
            "wait" => Self::Wait,
            "when" => Self::When,
            "while" => Self::While,
            "with" => Self::With,
            "xnor" => Self::Xnor,
            "xor" => Self::Xor,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Abs => "abs",
            Self::Access => "access",
            Self::After => "after",
            Self::Alias => "alias",
            Self::All => "all",
            Self::And => "and",
            Self::Architecture => "architecture",
            Self::Array => "array",
            Self::Assert => "assert",
            Self::Attribute => "attribute",
            Self::Begin => "begin",
            Self::Block => "block",
            Self::Body => "body",
            Self::Buffer => "buffer",
            Self::Bus => "bus",
            Self::Case => "case",
            Self::Component => "component",
            Self::Configuration => "configuration",
            Self::Constant => "constant",
            Self::Disconnect => "disconnect",
            Self::Downto => "downto",
            Self::Else => "else",
            Self::Elsif => "elsif",
            Self::End => "end",
            Self::Entity => "entity",
            Self::Exit => "exit",
            Self::File => "file",
            Self::For => "for",
            Self::Function => "function",
            Self::Generate => "generate",
            Self::Generic => "generic",
            Self::Group => "group",
            Self::Guarded => "guarded",
            Self::If => "if",
            Self::Impure => "impure",
            Self::In => "in",
            Self::Inertial => "inertial",
            Self::Inout => "inout",
            Self::Is => "is",
            Self::Label => "label",
            Self::Library => "library",
            Self::Linkage => "linkage",
            Self::Literal => "literal",
            Self::Loop => "loop",
            Self::Map => "map",
            Self::Mod => "mod",
            Self::Nand => "nand",
            Self::New => "new",
            Self::Next => "next",
            Self::Nor => "nor",
            Self::Not => "not",
            Self::Null => "null",
            Self::Of => "of",
            Self::On => "on",
            Self::Open => "open",
            Self::Or => "or",
            Self::Others => "others",
            Self::Out => "out",
            Self::Package => "package",
            Self::Port => "port",
            Self::Postponed => "postponed",
            Self::Procedure => "procedure",
            Self::Process => "process",
            Self::Protected => "protected",
            Self::Pure => "pure",
            Self::Range => "range",
            Self::Record => "record",
            Self::Register => "register",
            Self::Reject => "reject",
            Self::Rem => "rem",
            Self::Report => "report",
            Self::Return => "return",
            Self::Rol => "rol",
            Self::Ror => "ror",
            Self::Select => "select",
            Self::Severity => "severity",
            Self::Shared => "shared",
            Self::Signal => "signal",
            Self::Sla => "sla",
            Self::Sll => "sll",
            Self::Sra => "sra",
            Self::Srl => "srl",
            Self::Subtype => "subtype",
            Self::Then => "then",
            Self::To => "to",
            Self::Transport => "transport",
            Self::Type => "type",
            Self::Unaffected => "unaffected",
            Self::Units => "units",
            Self::Until => "until",
            Self::Use => "use",
            Self::Variable => "variable",
            Self::Wait => "wait",
            Self::When => "when",
            Self::While => "while",
            Self::With => "with",
            Self::Xnor => "xnor",
            Self::Xor => "xor",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn match_ignores_case() {
        assert_eq!(Keyword::match_keyword("PACKAGE"), Some(Keyword::Package));
        assert_eq!(Keyword::match_keyword("Downto"), Some(Keyword::Downto));
        assert_eq!(Keyword::match_keyword("protected"), Some(Keyword::Protected));
        assert_eq!(Keyword::match_keyword("std_logic"), None);
        // reserved only from VHDL-2008 onward
        assert_eq!(Keyword::match_keyword("context"), None);
    }

    #[test]
    fn round_trip_text() {
        assert_eq!(Keyword::Xnor.to_string(), "xnor");
        assert_eq!(
            Keyword::match_keyword(Keyword::Unaffected.as_str()),
            Some(Keyword::Unaffected)
        );
    }
}
