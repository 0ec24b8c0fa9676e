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

use super::error::VhdlError;
use super::scan;

/// Byte offsets of an `entity <name> is` header.
struct Header<'a> {
    name: &'a str,
    /// index just past the `is` keyword
    body_start: usize,
}

/// Finds the next `entity <name> is` header at or after byte `from`.
///
/// Other uses of the keyword, such as `end entity foo;` or a direct
/// instantiation `entity work.foo`, are passed over.
fn next_header(text: &str, from: usize) -> Option<Header> {
    let mut cursor = from;
    while let Some(i) = scan::find_keyword(text, "entity", cursor) {
        cursor = i + "entity".len();
        if let Some((name, end)) = scan::next_word(text, cursor) {
            if let Some((is, body_start)) = scan::next_word(text, end) {
                if is.eq_ignore_ascii_case("is") == true {
                    return Some(Header { name, body_start });
                }
            }
        }
    }
    None
}

/// Locates the single entity declaration in normalized `text`.
///
/// Returns the entity's name and the text between `is` and the closing `end`.
pub fn extract(text: &str) -> Result<(String, String), VhdlError> {
    let header = next_header(text, 0).ok_or(VhdlError::EntityNotFound)?;

    let end = scan::find_keyword(text, "end", header.body_start).ok_or(VhdlError::EntityNotFound)?;
    let body = text[header.body_start..end].trim();

    // read the closing statement: end [entity] [name] ;
    let mut cursor = end + "end".len();
    let mut closing = None;
    if let Some((word, next)) = scan::next_word(text, cursor) {
        if word.eq_ignore_ascii_case("entity") == true {
            cursor = next;
            closing = scan::next_word(text, cursor);
        } else {
            closing = Some((word, next));
        }
    }
    if let Some((word, next)) = closing {
        if word.eq_ignore_ascii_case(header.name) == false {
            return Err(VhdlError::NameMismatch(
                header.name.to_string(),
                word.to_string(),
            ));
        }
        cursor = next;
    }
    let semi = scan::skip_space(text, cursor);
    if text[semi..].starts_with(';') == false {
        return Err(VhdlError::EntityNotFound);
    }

    // count any further declarations in the same input
    let mut count = 1;
    let mut from = semi + 1;
    while let Some(h) = next_header(text, from) {
        count += 1;
        from = h.body_start;
    }
    match count {
        1 => Ok((header.name.to_string(), body.to_string())),
        _ => Err(VhdlError::MultipleEntities(count)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_entity_and_body() {
        let text = "library ieee; entity counter is port ( clk : in std_logic ); end entity counter; architecture rtl of counter is begin end architecture;";
        let (name, body) = extract(text).unwrap();
        assert_eq!(name, "counter");
        assert_eq!(body, "port ( clk : in std_logic );");
    }

    #[test]
    fn closing_forms() {
        for close in ["end;", "end entity;", "end foo;", "END ENTITY FOO;", "end entity foo ;"] {
            let text = format!("entity foo is port ( a : in bit ); {}", close);
            assert_eq!(extract(&text).unwrap().0, "foo", "failed on {:?}", close);
        }
    }

    #[test]
    fn mismatched_name() {
        assert_eq!(
            extract("entity foo is port ( a : in bit ); end bar;"),
            Err(VhdlError::NameMismatch(
                String::from("foo"),
                String::from("bar")
            ))
        );
        assert_eq!(
            extract("entity foo is end entity bar;"),
            Err(VhdlError::NameMismatch(
                String::from("foo"),
                String::from("bar")
            ))
        );
    }

    #[test]
    fn not_found() {
        assert_eq!(extract(""), Err(VhdlError::EntityNotFound));
        assert_eq!(
            extract("architecture rtl of foo is begin end;"),
            Err(VhdlError::EntityNotFound)
        );
        assert_eq!(
            extract("entity foo is port ( a : in bit );"),
            Err(VhdlError::EntityNotFound)
        );
        assert_eq!(
            extract("entity foo is end foo"),
            Err(VhdlError::EntityNotFound)
        );
    }

    #[test]
    fn keywords_inside_names_are_ignored() {
        let text = "entity ender is port ( end_flag : in bit ); end ender;";
        let (name, body) = extract(text).unwrap();
        assert_eq!(name, "ender");
        assert_eq!(body, "port ( end_flag : in bit );");
    }

    #[test]
    fn instantiation_is_not_a_header() {
        let text = "entity top is end top; architecture a of top is begin u0 : entity work.sub port map ( x => y ); end a;";
        assert_eq!(extract(text).unwrap().0, "top");
    }

    #[test]
    fn multiple_entities() {
        let text = "entity a is end a; entity b is end b; entity c is end;";
        assert_eq!(extract(text), Err(VhdlError::MultipleEntities(3)));
    }
}
