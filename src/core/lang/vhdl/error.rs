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

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VhdlError {
    #[error("no entity declaration found")]
    EntityNotFound,
    #[error("entity {0:?} is closed with mismatched name {1:?}")]
    NameMismatch(String, String),
    #[error("found {0} entity declarations but exactly one is supported per input")]
    MultipleEntities(usize),
    #[error("malformed generic declaration {0:?}: {1}")]
    MalformedGeneric(String, String),
    #[error("malformed port declaration {0:?}: {1}")]
    MalformedPort(String, String),
    #[error("invalid width specification {0:?}: {1}")]
    InvalidWidthSpecification(String, String),
    #[error("unsupported data type {0:?} for port {1:?}")]
    UnsupportedDataType(String, String),
    #[error("port {0:?} is declared more than once")]
    DuplicatePort(String),
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),
}

impl VhdlError {
    /// Names the kind of error, independent of its context.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EntityNotFound => "EntityNotFound",
            Self::NameMismatch(..) => "NameMismatch",
            Self::MultipleEntities(_) => "MultipleEntities",
            Self::MalformedGeneric(..) => "MalformedGeneric",
            Self::MalformedPort(..) => "MalformedPort",
            Self::InvalidWidthSpecification(..) => "InvalidWidthSpecification",
            Self::UnsupportedDataType(..) => "UnsupportedDataType",
            Self::DuplicatePort(_) => "DuplicatePort",
            Self::InvalidIdentifier(_) => "InvalidIdentifier",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = VhdlError::NameMismatch(String::from("foo"), String::from("bar"));
        assert_eq!(
            e.to_string(),
            "entity \"foo\" is closed with mismatched name \"bar\""
        );
        assert_eq!(e.kind(), "NameMismatch");

        let e = VhdlError::MalformedGeneric(String::from("N integer"), String::from("missing ':'"));
        assert_eq!(
            e.to_string(),
            "malformed generic declaration \"N integer\": missing ':'"
        );
    }
}
