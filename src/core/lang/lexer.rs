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

//! Character-level helpers shared by the source scanners.

use std::iter::Peekable;

/// Walks a stream of characters one at a time with single-character lookahead.
pub struct TrainCar<T>
where
    T: Iterator<Item = char>,
{
    contents: Peekable<T>,
}

impl<T> TrainCar<T>
where
    T: Iterator<Item = char>,
{
    pub fn new(s: T) -> Self {
        Self {
            contents: s.peekable(),
        }
    }

    /// Takes the next char in the iterator, if a char exists.
    pub fn consume(&mut self) -> Option<char> {
        self.contents.next()
    }

    /// References the next char in the iterator, if it exists.
    pub fn peek(&mut self) -> Option<&char> {
        self.contents.peek()
    }

    /// Consumes the next char only if it is equal to `c`.
    pub fn consume_if(&mut self, c: char) -> bool {
        match self.peek() == Some(&c) {
            true => {
                self.consume();
                true
            }
            false => false,
        }
    }
}

pub mod char_set {
    pub const DOUBLE_QUOTE: char = '\"';
    pub const STAR: char = '*';
    pub const DASH: char = '-';
    pub const FWDSLASH: char = '/';
    pub const UNDERLINE: char = '_';
    pub const PAREN_L: char = '(';
    pub const PAREN_R: char = ')';

    /// Checks if `c` is a digit according to VHDL-2008 LRM p225.
    pub fn is_digit(c: &char) -> bool {
        c.is_ascii_digit()
    }

    /// Checks if `c` is a letter. Only the ASCII subset is accepted for basic
    /// identifiers in interface declarations.
    pub fn is_letter(c: &char) -> bool {
        c.is_ascii_alphabetic()
    }

    /// Checks if `c` may appear after the first character of a basic identifier.
    pub fn is_identifier_char(c: &char) -> bool {
        is_letter(c) || is_digit(c) || c == &UNDERLINE
    }

    /// Checks if the character is a seperator according to VHDL-2019 LRM p259.
    pub fn is_separator(c: &char) -> bool {
        // whitespace: space, nbsp
        c == &'\u{0020}' || c == &'\u{00A0}' ||
        // format-effectors: ht (\t), vt, cr (\r), lf (\n), ff
        c == &'\u{0009}' || c == &'\u{000B}' || c == &'\u{000D}' || c == &'\u{000A}' || c == &'\u{000C}'
    }
}
