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

use std::cmp::Ordering;
use std::fmt::Display;

pub trait Tokenize {
    type TokenType;
    type Err;

    fn tokenize(s: &str) -> Vec<Result<Token<Self::TokenType>, TokenError<Self::Err>>>
    where
        <Self as Tokenize>::Err: Display;
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token<T> {
    position: Position,
    end: Position,
    ttype: T,
}

impl<T> Token<T> {
    pub fn as_type(&self) -> &T {
        &self.ttype
    }

    /// Transforms the token into its type.
    pub fn take(self) -> T {
        self.ttype
    }

    /// Decouples the position and token into their separate structs.
    pub fn decouple(self) -> (Position, T) {
        (self.position, self.ttype)
    }

    /// Returns the position in the file where the token was captured.
    pub fn locate(&self) -> &Position {
        &self.position
    }

    /// Returns the position of the last character belonging to the token.
    pub fn ending(&self) -> &Position {
        &self.end
    }

    /// Returns the full source span covered by the token.
    pub fn span(&self) -> Span {
        Span::between(self.position.clone(), self.end.clone())
    }

    /// Creates a new token that begins and ends at `loc`.
    pub fn new(ttype: T, loc: Position) -> Self {
        Self {
            end: loc.clone(),
            position: loc,
            ttype: ttype,
        }
    }

    /// Creates a new token covering the characters from `start` to `end`.
    pub fn with_end(ttype: T, start: Position, end: Position) -> Self {
        Self {
            position: start,
            end: end,
            ttype: ttype,
        }
    }

    /// References the inner token type.
    pub fn as_ref(&self) -> &T {
        &self.ttype
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct TokenError<T: Display> {
    position: Position,
    err: T,
}

impl<T: Display> TokenError<T> {
    /// Creates a new `TokenError` struct at position `loc` with error `T`.
    pub fn new(err: T, loc: Position) -> Self {
        Self {
            position: loc,
            err: err,
        }
    }

    pub fn locate(&self) -> &Position {
        &self.position
    }

    pub fn as_err(&self) -> &T {
        &self.err
    }
}

impl<T: Display> Display for TokenError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.position, self.err)
    }
}

#[derive(Debug, PartialEq, Clone, Ord, Eq, Hash)]
/// (Line, Col)
pub struct Position(usize, usize);

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.cmp(&other.0) {
            Ordering::Equal => Some(self.1.cmp(&other.1)),
            ord => Some(ord),
        }
    }
}

impl Position {
    /// Creates a new `Position` struct as line 1, col 0.
    pub fn new() -> Self {
        Position(1, 0)
    }

    /// Creates a `Position` struct at a particular location `line`:`col`.
    pub fn place(line: usize, col: usize) -> Self {
        Self(line, col)
    }

    /// Increments the column counter by 1.
    pub fn next_col(&mut self) {
        self.1 += 1;
    }

    /// Increments the column counter by 1. If the current char `c` is a newline,
    /// it will then drop down to the next line.
    pub fn step(&mut self, c: &char) {
        self.next_col();
        if c == &'\n' {
            self.next_line();
        }
    }

    /// Increments the line counter by 1.
    ///
    /// Also resets the column counter to 0.
    pub fn next_line(&mut self) {
        self.0 += 1;
        self.1 = 0;
    }

    /// Access the line (`.0`) number.
    pub fn line(&self) -> usize {
        self.0
    }

    /// Access the col (`.1`) number.
    pub fn col(&self) -> usize {
        self.1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ":{}:{}", self.0, self.1)
    }
}

/// A region of source code.
///
/// The ending position remains unknown until the syntax that owns the region
/// has been fully recognized.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Span {
    start: Position,
    end: Option<Position>,
}

impl Span {
    /// Creates a span that only knows where it begins.
    pub fn new(start: Position) -> Self {
        Self {
            start: start,
            end: None,
        }
    }

    pub fn between(start: Position, end: Position) -> Self {
        Self {
            start: start,
            end: Some(end),
        }
    }

    pub fn start(&self) -> &Position {
        &self.start
    }

    pub fn end(&self) -> Option<&Position> {
        self.end.as_ref()
    }

    /// Closes the span at `end`.
    pub fn set_end(&mut self, end: Position) {
        self.end = Some(end);
    }
}

impl From<Position> for Span {
    fn from(value: Position) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{}-{}:{}", self.start, end.line(), end.col()),
            None => write!(f, "{}", self.start),
        }
    }
}

/// A saved location within a `TrainCar` that can be returned to.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Checkpoint {
    offset: usize,
    line: usize,
    line_start: usize,
}

/// Helps keep the current position in the contents as the characters are consumed.
///
/// The car tracks the current line number and the offset at which that line
/// began, so the column of any character is its offset minus the line start.
pub struct TrainCar {
    contents: Vec<char>,
    offset: usize,
    line: usize,
    line_start: usize,
}

impl TrainCar {
    /// Creates a new `TrainCar` struct with an initial position (1, 0) over the
    /// characters of `s`.
    pub fn new(s: &str) -> Self {
        Self {
            contents: s.chars().collect(),
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Takes the next char and steps the line marker accordingly, if a char exists.
    pub fn consume(&mut self) -> Option<char> {
        let c = *self.contents.get(self.offset)?;
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.line_start = self.offset;
        }
        Some(c)
    }

    /// References the next char, if it exists.
    pub fn peek(&self) -> Option<&char> {
        self.contents.get(self.offset)
    }

    /// References the char `n` places after the next char, if it exists.
    pub fn peek_nth(&self, n: usize) -> Option<&char> {
        self.contents.get(self.offset + n)
    }

    /// Access the position of the last consumed character.
    pub fn locate(&self) -> Position {
        Position(self.line, self.offset - self.line_start)
    }

    /// Marks the current location so scanning can be rewound to it.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            line: self.line,
            line_start: self.line_start,
        }
    }

    /// Rewinds the car to a previously saved `checkpoint`.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.line = checkpoint.line;
        self.line_start = checkpoint.line_start;
    }

    /// Collects the characters still remaining in `self`.
    pub fn remaining(&self) -> String {
        self.contents[self.offset..].iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.contents.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn moving_position() {
        let mut pos = Position::new();
        assert_eq!(pos, Position::place(1, 0));
        pos.next_col();
        assert_eq!(pos, Position::place(1, 1));
        pos.next_col();
        assert_eq!(pos, Position::place(1, 2));
        pos.next_line();
        assert_eq!(pos, Position::place(2, 0));
        pos.step(&'a');
        assert_eq!(pos, Position::place(2, 1));
        pos.step(&'\n');
        assert_eq!(pos, Position::place(3, 0));
    }

    #[test]
    fn ordering_positions() {
        assert!(Position::place(1, 9) < Position::place(2, 1));
        assert!(Position::place(3, 4) > Position::place(3, 2));
        assert_eq!(
            Position::place(3, 4).partial_cmp(&Position::place(3, 4)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn train_car_tracks_line_start() {
        let mut tc = TrainCar::new("ab\ncd");
        assert_eq!(tc.locate(), Position::place(1, 0));
        tc.consume();
        assert_eq!(tc.locate(), Position::place(1, 1));
        tc.consume();
        tc.consume();
        // newline resets the column against the new line start
        assert_eq!(tc.locate(), Position::place(2, 0));
        assert_eq!(tc.consume(), Some('c'));
        assert_eq!(tc.locate(), Position::place(2, 1));
        assert_eq!(tc.peek(), Some(&'d'));
        assert_eq!(tc.peek_nth(1), None);
    }

    #[test]
    fn train_car_rewinds() {
        let mut tc = TrainCar::new("12#ff\nx");
        let mark = tc.checkpoint();
        while tc.consume().is_some() {}
        assert_eq!(tc.is_empty(), true);
        assert_eq!(tc.locate(), Position::place(2, 1));
        tc.restore(mark);
        assert_eq!(tc.locate(), Position::place(1, 0));
        assert_eq!(tc.remaining(), "12#ff\nx");
    }

    #[test]
    fn span_display() {
        let mut span = Span::new(Position::place(4, 2));
        assert_eq!(span.to_string(), ":4:2");
        span.set_end(Position::place(6, 11));
        assert_eq!(span.to_string(), ":4:2-6:11");
        assert_eq!(span.end(), Some(&Position::place(6, 11)));
    }
}
