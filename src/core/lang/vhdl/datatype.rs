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
use std::str::FromStr;

/// The port data types understood by the parser and the bench generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    StdLogic,
    StdULogic,
    Bit,
    Boolean,
    Integer,
    Natural,
    Positive,
    StdLogicVector,
    StdULogicVector,
    BitVector,
    Signed,
    Unsigned,
}

/// How a data type is driven by a testbench.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A single logic bit (`std_logic`, `std_ulogic`, `bit`).
    Bit,
    Boolean,
    /// Integer subtypes.
    Numeric,
    /// An array of bits that requires a range.
    Vector,
}

impl DataType {
    /// Every supported type, in the order reported by the interchange record.
    pub const ALL: [DataType; 12] = [
        Self::StdLogic,
        Self::StdULogic,
        Self::Bit,
        Self::Boolean,
        Self::Integer,
        Self::Natural,
        Self::Positive,
        Self::StdLogicVector,
        Self::StdULogicVector,
        Self::BitVector,
        Self::Signed,
        Self::Unsigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StdLogic => "std_logic",
            Self::StdULogic => "std_ulogic",
            Self::Bit => "bit",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Natural => "natural",
            Self::Positive => "positive",
            Self::StdLogicVector => "std_logic_vector",
            Self::StdULogicVector => "std_ulogic_vector",
            Self::BitVector => "bit_vector",
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::StdLogic | Self::StdULogic | Self::Bit => Kind::Bit,
            Self::Boolean => Kind::Boolean,
            Self::Integer | Self::Natural | Self::Positive => Kind::Numeric,
            Self::StdLogicVector
            | Self::StdULogicVector
            | Self::BitVector
            | Self::Signed
            | Self::Unsigned => Kind::Vector,
        }
    }

    /// Checks if the type must carry a range.
    pub fn is_vector(&self) -> bool {
        self.kind() == Kind::Vector
    }

    /// Checks if the type is a single bit or a boolean.
    pub fn is_scalar_bit(&self) -> bool {
        match self.kind() {
            Kind::Bit | Kind::Boolean => true,
            _ => false,
        }
    }

    /// Lists the lowercase names of every supported type.
    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownType(pub String);

impl FromStr for DataType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or(UnknownType(s.to_string()))
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
