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
use std::fmt::Display;
use std::str::FromStr;

/// One end of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Int(u64),
    /// An expression kept exactly as written, such as `DATA_WIDTH-1`.
    Expr(String),
}

impl Bound {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Expr(_) => None,
        }
    }
}

impl From<&str> for Bound {
    fn from(s: &str) -> Self {
        let s = s.trim();
        match s.is_empty() == false && s.chars().all(|c| c.is_ascii_digit()) {
            true => match s.parse::<u64>() {
                Ok(n) => Self::Int(n),
                Err(_) => Self::Expr(s.to_string()),
            },
            false => Self::Expr(s.to_string()),
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Expr(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Downto,
    To,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Downto => "downto",
            Self::To => "to",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "downto" => Ok(Self::Downto),
            "to" => Ok(Self::To),
            _ => Err(format!("unknown range direction {:?}", s)),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The index range of a vector, as in `7 downto 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    left: Bound,
    right: Bound,
    direction: Direction,
}

impl Range {
    pub fn new(left: Bound, right: Bound, direction: Direction) -> Self {
        Self {
            left,
            right,
            direction,
        }
    }

    pub fn left(&self) -> &Bound {
        &self.left
    }

    pub fn right(&self) -> &Bound {
        &self.right
    }

    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    /// Number of elements covered by the range, when both bounds are integers
    /// and the count fits in a `u64`.
    pub fn width(&self) -> Option<u64> {
        let l = self.left.as_int()?;
        let r = self.right.as_int()?;
        l.abs_diff(r).checked_add(1)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.direction, self.right)
    }
}

/// Parses the text between a vector type's parentheses.
///
/// Accepts `<bound> downto <bound>`, `<bound> to <bound>`, or a pair of
/// integers `a, b` whose direction is inferred from their order.
pub fn parse_range(expr: &str) -> Result<Range, VhdlError> {
    let expr = expr.trim();
    let invalid = |reason: &str| {
        VhdlError::InvalidWidthSpecification(expr.to_string(), reason.to_string())
    };
    if expr.is_empty() == true {
        return Err(invalid("empty range"));
    }

    for dir in [Direction::Downto, Direction::To] {
        let keyword = dir.as_str();
        if let Some(i) = scan::find_keyword(expr, keyword, 0) {
            let left = expr[..i].trim();
            let right = expr[i + keyword.len()..].trim();
            if left.is_empty() || right.is_empty() {
                return Err(invalid("missing bound"));
            }
            return Ok(Range::new(Bound::from(left), Bound::from(right), dir));
        }
    }

    // fall back to a pair of plain integers
    let pair = scan::split_top_level(expr, ',');
    if pair.len() == 2 {
        if let (Bound::Int(l), Bound::Int(r)) = (Bound::from(pair[0]), Bound::from(pair[1])) {
            let dir = match l >= r {
                true => Direction::Downto,
                false => Direction::To,
            };
            return Ok(Range::new(Bound::Int(l), Bound::Int(r), dir));
        }
    }
    Err(invalid("expected 'downto' or 'to'"))
}
