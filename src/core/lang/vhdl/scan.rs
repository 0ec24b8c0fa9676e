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

//! Nesting-aware text scanning over normalized source.
//!
//! Every search here tracks parenthesis depth and double-quoted strings, so a
//! separator or keyword only counts when it sits at depth 0 outside a string.

use crate::core::lang::lexer::char_set;

/// Walks `text` yielding `(byte index, char)` for chars at parenthesis depth 0
/// that are outside of string literals. Parentheses themselves are reported
/// only when they open from or close back to depth 0.
fn top_level(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut depth: usize = 0;
    let mut in_str = false;
    text.char_indices().filter_map(move |(i, c)| {
        if in_str == true {
            if c == char_set::DOUBLE_QUOTE {
                in_str = false;
            }
            return None;
        }
        match c {
            char_set::DOUBLE_QUOTE => {
                in_str = true;
                None
            }
            char_set::PAREN_L => {
                depth += 1;
                match depth == 1 {
                    true => Some((i, c)),
                    false => None,
                }
            }
            char_set::PAREN_R => {
                // unbalanced closers are reported at depth 0
                depth = depth.saturating_sub(1);
                match depth == 0 {
                    true => Some((i, c)),
                    false => None,
                }
            }
            _ => match depth == 0 {
                true => Some((i, c)),
                false => None,
            },
        }
    })
}

/// Splits `text` on every `sep` that sits at parenthesis depth 0.
///
/// Pieces are trimmed. Empty pieces are kept so callers can decide whether a
/// blank declaration is an error.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in top_level(text) {
        if c == sep {
            pieces.push(text[start..i].trim());
            start = i + c.len_utf8();
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Finds the byte index of the first `sep` at depth 0, if one exists.
pub fn find_top_level(text: &str, sep: char) -> Option<usize> {
    top_level(text).find(|(_, c)| c == &sep).map(|(i, _)| i)
}

/// Finds the first `:` at depth 0 that is not the start of a `:=` assignment.
pub fn find_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    top_level(text)
        .find(|(i, c)| c == &':' && bytes.get(i + 1) != Some(&b'='))
        .map(|(i, _)| i)
}

/// Finds the first `:=` at depth 0.
pub fn find_assignment(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    top_level(text)
        .find(|(i, c)| c == &':' && bytes.get(i + 1) == Some(&b'='))
        .map(|(i, _)| i)
}

/// Checks that the word at `text[start..end]` is not glued to identifier
/// characters on either side.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.map_or(true, |c| char_set::is_identifier_char(&c) == false)
        && after.map_or(true, |c| char_set::is_identifier_char(&c) == false)
}

/// Finds the byte index of `keyword` as a whole word at depth 0, starting the
/// search at byte `from`. Matching is case-insensitive.
pub fn find_keyword(text: &str, keyword: &str, from: usize) -> Option<usize> {
    let rest = &text[from..];
    let len = keyword.len();
    top_level(rest)
        .filter(|(i, _)| {
            rest.get(*i..*i + len)
                .map_or(false, |w| w.eq_ignore_ascii_case(keyword))
        })
        .map(|(i, _)| i)
        .find(|i| is_whole_word(rest, *i, *i + len))
        .map(|i| i + from)
}

/// Given the byte index of an opening parenthesis, returns the byte index of
/// its matching closing parenthesis.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    if text[open..].starts_with(char_set::PAREN_L) == false {
        return None;
    }
    let mut depth: usize = 0;
    let mut in_str = false;
    for (i, c) in text[open..].char_indices() {
        if in_str == true {
            if c == char_set::DOUBLE_QUOTE {
                in_str = false;
            }
            continue;
        }
        match c {
            char_set::DOUBLE_QUOTE => in_str = true,
            char_set::PAREN_L => depth += 1,
            char_set::PAREN_R => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => (),
        }
    }
    None
}

/// Reads the identifier-like word beginning at byte `from` after skipping
/// leading whitespace. Returns the word and the byte index just past it.
pub fn next_word(text: &str, from: usize) -> Option<(&str, usize)> {
    let rest = &text[from..];
    let start = from + (rest.len() - rest.trim_start().len());
    let len = text[start..]
        .char_indices()
        .find(|(_, c)| char_set::is_identifier_char(c) == false)
        .map(|(i, _)| i)
        .unwrap_or(text.len() - start);
    match len {
        0 => None,
        _ => Some((&text[start..start + len], start + len)),
    }
}

/// Locates `<keyword> ( ... )` at depth 0 and returns the text between the
/// parentheses. Returns `Ok(None)` when the keyword is absent, and an error
/// reason when it is not followed by a balanced parenthesized list.
pub fn find_clause<'a>(body: &'a str, keyword: &str) -> Result<Option<&'a str>, &'static str> {
    let start = match find_keyword(body, keyword, 0) {
        Some(i) => i,
        None => return Ok(None),
    };
    let open = skip_space(body, start + keyword.len());
    if body[open..].starts_with(char_set::PAREN_L) == false {
        return Err("expected '(' after keyword");
    }
    match matching_paren(body, open) {
        Some(close) => Ok(Some(body[open + 1..close].trim())),
        None => Err("missing closing ')'"),
    }
}

/// Removes a leading `word` (case-insensitive) from `text`, returning the
/// remainder. Returns `None` when `text` does not begin with that word.
pub fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let (found, end) = next_word(text, 0)?;
    match found.eq_ignore_ascii_case(word) {
        true => Some(text[end..].trim_start()),
        false => None,
    }
}

/// Skips whitespace beginning at byte `from` and returns the index of the
/// next non-whitespace char (or the end of `text`).
pub fn skip_space(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    from + (rest.len() - rest.trim_start().len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_respects_parentheses() {
        let text = "a : in std_logic; b : in std_logic_vector(f(1;2) downto 0); c : out bit";
        assert_eq!(
            split_top_level(text, ';'),
            vec![
                "a : in std_logic",
                "b : in std_logic_vector(f(1;2) downto 0)",
                "c : out bit"
            ]
        );
        assert_eq!(split_top_level("x, y ,z", ','), vec!["x", "y", "z"]);
        assert_eq!(split_top_level("a;", ';'), vec!["a", ""]);
    }

    #[test]
    fn split_respects_strings() {
        assert_eq!(
            split_top_level("s : string := \"a;b\"; t : bit", ';'),
            vec!["s : string := \"a;b\"", "t : bit"]
        );
    }

    #[test]
    fn colon_versus_assignment() {
        assert_eq!(find_colon("N : integer := 4"), Some(2));
        assert_eq!(find_colon("N := 4"), None);
        assert_eq!(find_assignment("N : integer := 4"), Some(12));
        assert_eq!(find_assignment("v : t(a := 1)"), None);
    }

    #[test]
    fn keywords_are_whole_words() {
        assert_eq!(find_keyword("TOTAL-1 downto 0", "to", 0), None);
        assert_eq!(find_keyword("TOTAL-1 DOWNTO 0", "downto", 0), Some(8));
        assert_eq!(find_keyword("0 to N", "to", 0), Some(2));
        assert_eq!(find_keyword("f(a to b) to c", "to", 0), Some(10));
        assert_eq!(find_keyword("port_a port", "port", 0), Some(7));
        assert_eq!(find_keyword("end x; end y;", "end", 1), Some(7));
    }

    #[test]
    fn parens_match() {
        let text = "port (a : in bit_vector(3 downto 0)); end";
        let open = text.find('(').unwrap();
        assert_eq!(matching_paren(text, open), Some(35));
        assert_eq!(matching_paren("(a", 0), None);
        assert_eq!(matching_paren("a", 0), None);
    }

    #[test]
    fn clauses() {
        let body = "generic ( N : integer := 4 ); port (a : in bit);";
        assert_eq!(find_clause(body, "generic"), Ok(Some("N : integer := 4")));
        assert_eq!(find_clause(body, "port"), Ok(Some("a : in bit")));
        assert_eq!(find_clause("port (a : in bit);", "generic"), Ok(None));
        assert!(find_clause("generic N : integer;", "generic").is_err());
        assert!(find_clause("port (a : in bit;", "port").is_err());
    }

    #[test]
    fn words() {
        assert_eq!(next_word("  entity foo is", 0), Some(("entity", 8)));
        assert_eq!(next_word("entity foo is", 6), Some(("foo", 10)));
        assert_eq!(next_word(" ;", 0), None);
        assert_eq!(skip_space("a   b", 1), 4);
        assert_eq!(strip_word("SIGNAL a, b", "signal"), Some("a, b"));
        assert_eq!(strip_word("signals", "signal"), None);
    }
}
