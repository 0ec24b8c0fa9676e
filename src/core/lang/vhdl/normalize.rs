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

//! Comment stripping and whitespace collapsing.
//!
//! Comment markers are recognized everywhere, including inside string literals.
//! A `--` within a quoted default value will truncate the rest of that line.

use crate::core::lang::lexer::char_set;
use crate::core::lang::lexer::TrainCar;

/// Removes line comments (`--`) and delimited comments (`/* */`), then
/// collapses every run of whitespace into a single space.
///
/// Each comment is replaced by a separator so tokens on either side never join
/// together, which keeps the function idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut train = TrainCar::new(text.chars());
    // only write a space once a non-space char is waiting behind it
    let mut pending_space = false;

    while let Some(c) = train.consume() {
        if c == char_set::DASH && train.peek() == Some(&char_set::DASH) {
            skip_line_comment(&mut train);
            pending_space = true;
        } else if c == char_set::FWDSLASH && train.peek() == Some(&char_set::STAR) {
            train.consume();
            skip_delimited_comment(&mut train);
            pending_space = true;
        } else if char_set::is_separator(&c) {
            pending_space = true;
        } else {
            if pending_space == true && result.is_empty() == false {
                result.push(' ');
            }
            pending_space = false;
            result.push(c);
        }
    }
    result
}

/// Consumes characters up to and including the next newline.
fn skip_line_comment<T: Iterator<Item = char>>(train: &mut TrainCar<T>) {
    while let Some(c) = train.consume() {
        if c == '\n' {
            break;
        }
    }
}

/// Consumes characters up to and including the closing `*/`. An unterminated
/// comment runs to the end of the text.
fn skip_delimited_comment<T: Iterator<Item = char>>(train: &mut TrainCar<T>) {
    while let Some(c) = train.consume() {
        if c == char_set::STAR && train.consume_if(char_set::FWDSLASH) == true {
            break;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SRC_1: &str = r#"
-- a simple counter
library ieee;
use ieee.std_logic_1164.all;   -- logic types

entity counter is
    generic ( WIDTH : integer := 8 );  /* bus width */
    port (
        clk : in  std_logic;
        /* multi
           line */
        q   : out std_logic_vector(WIDTH-1 downto 0)
    );
end entity counter;
"#;

    #[test]
    fn strips_comments_and_collapses() {
        assert_eq!(
            normalize(SRC_1),
            "library ieee; use ieee.std_logic_1164.all; entity counter is generic ( WIDTH : integer := 8 ); port ( clk : in std_logic; q : out std_logic_vector(WIDTH-1 downto 0) ); end entity counter;"
        );
    }

    #[test]
    fn idempotent() {
        let samples = [
            SRC_1,
            "a -/**/- b",
            "a/**/b",
            "x -- trailing",
            "  \t\n leading and trailing \r\n ",
            "/* unterminated",
            "a */ b",
            "- - -",
            "a--b\nc",
            "/**/-/**/-/**/",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn comments_never_join_tokens() {
        assert_eq!(normalize("a/**/b"), "a b");
        assert_eq!(normalize("a -/**/- b"), "a - - b");
        assert_eq!(normalize("a--b\nc"), "a c");
    }

    #[test]
    fn empty_and_comment_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("-- only a comment"), "");
        assert_eq!(normalize("/* only */"), "");
    }

    #[test]
    fn markers_inside_strings_are_stripped() {
        // known limitation: no string awareness
        assert_eq!(normalize("x := \"a--b\";\ny"), "x := \"a y");
    }
}
