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

use crate::core::lang::lexer::char_set;
use crate::core::lang::lexer::TrainCar;
use serde_derive::Serialize;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

/// A VHDL basic identifier.
///
/// The original spelling is kept for display, while comparisons ignore case.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Access the identifier as it was originally written.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Lowercase form used for keyword-like matching.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// Appends `ext` to the end of the identifier.
    pub fn into_extension(&self, ext: &str) -> Identifier {
        Self(self.0.clone() + ext)
    }
}

#[derive(Debug, PartialEq)]
pub enum IdentifierError {
    Empty,
    InvalidFirstChar(char),
    InvalidChar(char),
    DoubleUnderline,
    TrailingUnderline,
}

impl std::error::Error for IdentifierError {}

impl Display for IdentifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty identifier"),
            Self::InvalidFirstChar(c) => {
                write!(f, "first character must be letter but found \'{}\'", c)
            }
            Self::InvalidChar(c) => write!(f, "invalid character \'{}\'", c),
            Self::DoubleUnderline => write!(f, "consecutive underlines are not allowed"),
            Self::TrailingUnderline => write!(f, "cannot end with an underline"),
        }
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = TrainCar::new(s.chars());
        // verify the first character was a letter
        match chars.consume() {
            Some(c) => match char_set::is_letter(&c) {
                true => (),
                false => return Err(Self::Err::InvalidFirstChar(c)),
            },
            None => return Err(Self::Err::Empty),
        }
        let mut prev_underline = false;
        while let Some(c) = chars.consume() {
            if char_set::is_identifier_char(&c) == false {
                return Err(Self::Err::InvalidChar(c));
            }
            let is_underline = c == char_set::UNDERLINE;
            if is_underline && prev_underline {
                return Err(Self::Err::DoubleUnderline);
            }
            prev_underline = is_underline;
        }
        match prev_underline {
            true => Err(Self::Err::TrailingUnderline),
            false => Ok(Self(s.to_string())),
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
