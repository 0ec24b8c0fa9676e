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

use crate::core::lang::vhdl::error::VhdlError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BenchError {
    #[error("interchange record is missing required field {0:?}")]
    MissingInterchangeField(String),
    #[error("interchange record is malformed: {0}")]
    MalformedRecord(String),
    #[error("cannot generate code for {0:?}: {1}")]
    UnsupportedDataTypeForCodeGen(String, String),
    #[error(transparent)]
    Vhdl(#[from] VhdlError),
}

impl BenchError {
    /// Names the kind of error, independent of its context.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInterchangeField(_) => "MissingInterchangeField",
            Self::MalformedRecord(_) => "MalformedRecord",
            Self::UnsupportedDataTypeForCodeGen(..) => "UnsupportedDataTypeForCodeGen",
            Self::Vhdl(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wraps_parse_errors() {
        let e = BenchError::from(VhdlError::EntityNotFound);
        assert_eq!(e.kind(), "EntityNotFound");
        assert_eq!(e.to_string(), "no entity declaration found");
        assert_eq!(
            BenchError::MissingInterchangeField(String::from("vhdl_entity.ports")).to_string(),
            "interchange record is missing required field \"vhdl_entity.ports\""
        );
    }
}
