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
use super::identifier::Identifier;
use super::scan;
use std::str::FromStr;

/// A compile-time parameter of an entity.
///
/// The type is free text since generics may use any type visible to the
/// entity, such as `integer`, `time` or `string`.
#[derive(Debug, Clone, PartialEq)]
pub struct Generic {
    name: Identifier,
    data_type: String,
    default_value: Option<String>,
}

impl Generic {
    pub fn new(name: Identifier, data_type: &str, default_value: Option<&str>) -> Self {
        Self {
            name,
            data_type: data_type.to_string(),
            default_value: default_value.map(|s| s.to_string()),
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

/// Collects every generic declared in an entity `body`.
///
/// Returns an empty list when there is no `generic` clause.
pub fn parse_generics(body: &str) -> Result<Vec<Generic>, VhdlError> {
    let clause = match scan::find_clause(body, "generic") {
        Ok(Some(c)) => c,
        Ok(None) => return Ok(Vec::new()),
        Err(reason) => {
            return Err(VhdlError::MalformedGeneric(
                String::from("generic"),
                reason.to_string(),
            ))
        }
    };
    let mut generics = Vec::new();
    for decl in scan::split_top_level(clause, ';') {
        if decl.is_empty() == true {
            continue;
        }
        generics.append(&mut parse_declaration(decl)?);
    }
    Ok(generics)
}

/// Parses `[constant] names : type [:= default]` into one generic per name.
fn parse_declaration(decl: &str) -> Result<Vec<Generic>, VhdlError> {
    let malformed = |reason: String| VhdlError::MalformedGeneric(decl.to_string(), reason);

    let colon = scan::find_colon(decl).ok_or_else(|| malformed(String::from("missing ':'")))?;
    let names = &decl[..colon];
    let names = scan::strip_word(names, "constant").unwrap_or(names);
    let rest = &decl[colon + 1..];

    let (data_type, default_value) = match scan::find_assignment(rest) {
        Some(i) => {
            let value = rest[i + 2..].trim();
            if value.is_empty() == true {
                return Err(malformed(String::from("missing default value after ':='")));
            }
            (rest[..i].trim(), Some(value))
        }
        None => (rest.trim(), None),
    };
    if data_type.is_empty() == true {
        return Err(malformed(String::from("missing type")));
    }

    scan::split_top_level(names, ',')
        .into_iter()
        .map(|n| match Identifier::from_str(n) {
            Ok(id) => Ok(Generic::new(id, data_type, default_value)),
            Err(e) => Err(malformed(format!("invalid name {:?}: {}", n, e))),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_generic_clause() {
        assert_eq!(parse_generics("port ( a : in bit );"), Ok(Vec::new()));
    }

    #[test]
    fn single_and_multi_name() {
        let body = "generic ( WIDTH : integer := 8; constant A, B : natural; T : time := 10 ns ); port ( a : in bit );";
        let gens = parse_generics(body).unwrap();
        assert_eq!(gens.len(), 4);
        assert_eq!(gens[0].name().as_str(), "WIDTH");
        assert_eq!(gens[0].data_type(), "integer");
        assert_eq!(gens[0].default_value(), Some("8"));
        assert_eq!(gens[1].name().as_str(), "A");
        assert_eq!(gens[2].name().as_str(), "B");
        assert_eq!(gens[2].data_type(), "natural");
        assert_eq!(gens[2].default_value(), None);
        assert_eq!(gens[3].default_value(), Some("10 ns"));
    }

    #[test]
    fn nested_defaults_keep_semicolons() {
        let body = "generic ( S : string := \"a;b\"; V : bit_vector(1 downto 0) := (others => '0') );";
        let gens = parse_generics(body).unwrap();
        assert_eq!(gens.len(), 2);
        assert_eq!(gens[0].default_value(), Some("\"a;b\""));
        assert_eq!(gens[1].data_type(), "bit_vector(1 downto 0)");
        assert_eq!(gens[1].default_value(), Some("(others => '0')"));
    }

    #[test]
    fn malformed_generics() {
        assert_eq!(
            parse_generics("generic ( N integer );"),
            Err(VhdlError::MalformedGeneric(
                String::from("N integer"),
                String::from("missing ':'")
            ))
        );
        assert_eq!(
            parse_generics("generic ( N : );").unwrap_err().kind(),
            "MalformedGeneric"
        );
        assert_eq!(
            parse_generics("generic ( N : integer := );").unwrap_err().kind(),
            "MalformedGeneric"
        );
        assert_eq!(
            parse_generics("generic ( 2N : integer );").unwrap_err().kind(),
            "MalformedGeneric"
        );
        assert_eq!(
            parse_generics("generic N : integer;").unwrap_err().kind(),
            "MalformedGeneric"
        );
    }
}
