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

use super::datatype::DataType;
use super::error::VhdlError;
use super::identifier::Identifier;
use super::range::{self, Range};
use super::scan;
use crate::core::lang::lexer::char_set;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    In,
    Out,
    InOut,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inout",
        }
    }

    /// Checks if the testbench is able to drive this port.
    pub fn is_input(&self) -> bool {
        match self {
            Self::In | Self::InOut => true,
            Self::Out => false,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "inout" => Ok(Self::InOut),
            _ => Err(format!("unsupported port mode {:?}", s)),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directional signal in an entity's interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    name: Identifier,
    mode: Mode,
    data_type: DataType,
    width: Option<Range>,
    default_value: Option<String>,
}

impl Port {
    /// Creates a new port.
    ///
    /// Errors when a vector type is missing its range or a scalar type carries
    /// one.
    pub fn new(
        name: Identifier,
        mode: Mode,
        data_type: DataType,
        width: Option<Range>,
        default_value: Option<&str>,
    ) -> Result<Self, VhdlError> {
        match (data_type.is_vector(), &width) {
            (true, None) => {
                return Err(VhdlError::InvalidWidthSpecification(
                    name.to_string(),
                    format!("{} requires a range", data_type),
                ))
            }
            (false, Some(_)) => {
                return Err(VhdlError::InvalidWidthSpecification(
                    name.to_string(),
                    format!("{} cannot have a range", data_type),
                ))
            }
            _ => (),
        }
        Ok(Self {
            name,
            mode,
            data_type,
            width,
            default_value: default_value.map(|s| s.to_string()),
        })
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn width(&self) -> Option<&Range> {
        self.width.as_ref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Writes the subtype indication as it appears in a declaration, such as
    /// `std_logic_vector(7 downto 0)`.
    pub fn type_indication(&self) -> String {
        match &self.width {
            Some(r) => format!("{}({})", self.data_type, r),
            None => self.data_type.to_string(),
        }
    }
}

/// Collects every port declared in an entity `body`.
///
/// Returns an empty list when there is no `port` clause.
pub fn parse_ports(body: &str) -> Result<Vec<Port>, VhdlError> {
    let clause = match scan::find_clause(body, "port") {
        Ok(Some(c)) => c,
        Ok(None) => return Ok(Vec::new()),
        Err(reason) => {
            return Err(VhdlError::MalformedPort(
                String::from("port"),
                reason.to_string(),
            ))
        }
    };
    let mut ports = Vec::new();
    for decl in scan::split_top_level(clause, ';') {
        if decl.is_empty() == true {
            continue;
        }
        ports.append(&mut parse_declaration(decl)?);
    }
    Ok(ports)
}

/// Parses `[signal] names : [mode] type[(range)] [:= default]` into one port
/// per name.
fn parse_declaration(decl: &str) -> Result<Vec<Port>, VhdlError> {
    let malformed = |reason: String| VhdlError::MalformedPort(decl.to_string(), reason);

    let colon = scan::find_colon(decl).ok_or_else(|| malformed(String::from("missing ':'")))?;
    let names = &decl[..colon];
    let names = scan::strip_word(names, "signal").unwrap_or(names);
    let names = scan::split_top_level(names, ',')
        .into_iter()
        .map(|n| {
            Identifier::from_str(n).map_err(|e| malformed(format!("invalid name {:?}: {}", n, e)))
        })
        .collect::<Result<Vec<Identifier>, VhdlError>>()?;
    // used to attach context to type errors
    let first = names
        .first()
        .map(|n| n.to_string())
        .unwrap_or_default();

    let rest = &decl[colon + 1..];
    let (subtype, default_value) = match scan::find_assignment(rest) {
        Some(i) => {
            let value = rest[i + 2..].trim();
            if value.is_empty() == true {
                return Err(malformed(String::from("missing default value after ':='")));
            }
            (rest[..i].trim(), Some(value))
        }
        None => (rest.trim(), None),
    };

    // determine the mode; an omitted mode is 'in'
    let (word, end) =
        scan::next_word(subtype, 0).ok_or_else(|| malformed(String::from("missing type")))?;
    let (mode, type_start) = match Mode::from_str(word) {
        Ok(m) => (m, end),
        Err(e) => match DataType::from_str(word).is_ok() {
            true => (Mode::In, 0),
            // another word follows, so this one was meant as a mode
            false => match scan::next_word(subtype, end).is_some() {
                true => return Err(malformed(e)),
                false => return Err(VhdlError::UnsupportedDataType(word.to_string(), first)),
            },
        },
    };

    let (type_name, type_end) = scan::next_word(subtype, type_start)
        .ok_or_else(|| malformed(String::from("missing type")))?;
    let data_type = DataType::from_str(type_name)
        .map_err(|_| VhdlError::UnsupportedDataType(type_name.to_string(), first.clone()))?;

    // read an optional range constraint
    let after = scan::skip_space(subtype, type_end);
    let (width, tail) = match subtype[after..].starts_with(char_set::PAREN_L) {
        true => {
            let close = scan::matching_paren(subtype, after)
                .ok_or_else(|| malformed(String::from("missing closing ')'")))?;
            let r = range::parse_range(&subtype[after + 1..close]).map_err(|e| match e {
                VhdlError::InvalidWidthSpecification(_, reason) => {
                    VhdlError::InvalidWidthSpecification(decl.to_string(), reason)
                }
                _ => e,
            })?;
            (Some(r), subtype[close + 1..].trim())
        }
        false => (None, subtype[after..].trim()),
    };
    if tail.is_empty() == false {
        return match scan::strip_word(tail, "range").is_some() {
            true => Err(VhdlError::UnsupportedDataType(
                subtype[type_start..].trim().to_string(),
                first,
            )),
            false => Err(malformed(format!("unexpected text {:?}", tail))),
        };
    }

    names
        .into_iter()
        .map(|n| Port::new(n, mode, data_type, width.clone(), default_value))
        .collect::<Result<Vec<Port>, VhdlError>>()
        .map_err(|e| match e {
            VhdlError::InvalidWidthSpecification(_, reason) => {
                VhdlError::InvalidWidthSpecification(decl.to_string(), reason)
            }
            _ => e,
        })
}
