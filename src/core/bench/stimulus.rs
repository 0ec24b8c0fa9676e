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

//! Input values applied to the unit under test.
//!
//! Single-bit and boolean data inputs are driven together through a table of
//! combinations. Every other input gets its own sequence chosen by type.

use super::classify::Classification;
use crate::core::lang::vhdl::datatype::{DataType, Kind};
use crate::core::lang::vhdl::entity::Entity;
use crate::core::lang::vhdl::port::Port;
use crate::core::lang::vhdl::range::Bound;
use std::fmt::Display;

/// A value assigned to a port during one step of stimulus.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// A logic bit, `'0'` or `'1'`.
    Bit(bool),
    Bool(bool),
    Int(i64),
    /// A bit string literal written most significant bit first.
    Literal(String),
    /// Every element set to the same bit, `(others => 'x')`.
    Fill(bool),
    /// All elements cleared except the one at the given index.
    SetBit(Bound),
}

impl Value {
    /// Creates the logic value of `b` that fits a scalar port of type `dt`.
    pub fn logic(dt: &DataType, b: bool) -> Self {
        match dt.kind() {
            Kind::Boolean => Self::Bool(b),
            _ => Self::Bit(b),
        }
    }

    /// Checks if the value can be assigned to a port of type `dt`.
    pub fn fits(&self, dt: &DataType) -> bool {
        match (self, dt.kind()) {
            (Self::Bit(_), Kind::Bit) => true,
            (Self::Bool(_), Kind::Boolean) => true,
            (Self::Int(n), Kind::Numeric) => match dt {
                DataType::Natural => *n >= 0,
                DataType::Positive => *n >= 1,
                _ => true,
            },
            (Self::Literal(_), Kind::Vector) => true,
            (Self::Fill(_), Kind::Vector) => true,
            (Self::SetBit(_), Kind::Vector) => true,
            _ => false,
        }
    }
}

/// Time to wait after applying a value, in nanoseconds.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Delay(u64);

impl Delay {
    pub fn new(ns: u64) -> Self {
        Self(ns)
    }

    pub fn as_ns(&self) -> u64 {
        self.0
    }
}

impl Display for Delay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ns", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Step {
    value: Value,
    settle: Delay,
}

impl Step {
    pub fn new(value: Value, settle: Delay) -> Self {
        Self { value, settle }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn settle(&self) -> &Delay {
        &self.settle
    }
}

/// Rows of values driven onto a set of ports at the same time.
#[derive(Debug, PartialEq, Clone)]
pub struct Combinations {
    /// Indices of the driven ports, in declaration order.
    ports: Vec<usize>,
    /// One value per port for each row.
    rows: Vec<Vec<Value>>,
    settle: Delay,
}

impl Combinations {
    pub fn ports(&self) -> &Vec<usize> {
        &self.ports
    }

    pub fn rows(&self) -> &Vec<Vec<Value>> {
        &self.rows
    }

    pub fn settle(&self) -> &Delay {
        &self.settle
    }
}

/// Everything the stimulus process applies, in order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Stimulus {
    combinations: Option<Combinations>,
    /// Port index and the sequence applied to it.
    sequences: Vec<(usize, Vec<Step>)>,
}

impl Stimulus {
    pub fn new(combinations: Option<Combinations>, sequences: Vec<(usize, Vec<Step>)>) -> Self {
        Self {
            combinations,
            sequences,
        }
    }

    pub fn combinations(&self) -> Option<&Combinations> {
        self.combinations.as_ref()
    }

    pub fn sequences(&self) -> &Vec<(usize, Vec<Step>)> {
        &self.sequences
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_none() && self.sequences.is_empty()
    }
}

/// Limits on how many combinations are enumerated.
#[derive(Debug, PartialEq, Clone)]
pub struct Limits {
    /// Largest number of ports that are enumerated exhaustively.
    pub exhaustive_limit: usize,
    /// Largest number of rows emitted in an exhaustive table.
    pub max_combinations: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            exhaustive_limit: 8,
            max_combinations: 16,
        }
    }
}

/// Creates the sequence applied to a single input `port`.
pub fn synthesize(port: &Port, settle: Delay) -> Vec<Step> {
    let dt = port.data_type();
    let values = match dt.kind() {
        Kind::Bit | Kind::Boolean => vec![
            Value::logic(dt, false),
            Value::logic(dt, true),
            Value::logic(dt, false),
        ],
        Kind::Numeric => match dt {
            DataType::Positive => vec![Value::Int(1), Value::Int(10), Value::Int(100)],
            _ => vec![Value::Int(0), Value::Int(1), Value::Int(10), Value::Int(100)],
        },
        Kind::Vector => match port.width().and_then(|r| r.width()) {
            Some(w) if w <= 64 => vector_literals(w as usize),
            // width is unknown until elaboration
            _ => vec![
                Value::Fill(false),
                Value::SetBit(
                    port.width()
                        .map(|r| r.right().clone())
                        .unwrap_or(Bound::Int(0)),
                ),
                Value::Fill(true),
                Value::Fill(false),
            ],
        },
    };
    values.into_iter().map(|v| Step::new(v, settle)).collect()
}

/// Creates the fixed set of literals for a vector of `width` bits.
fn vector_literals(width: usize) -> Vec<Value> {
    let mask = match width {
        64 => u64::MAX,
        _ => (1u64 << width) - 1,
    };
    [
        0,
        1,
        1u64 << (width - 1),
        mask,
        0x5555_5555_5555_5555 & mask,
        0xAAAA_AAAA_AAAA_AAAA & mask,
    ]
    .into_iter()
    .map(|v| Value::Literal(format!("{:0w$b}", v, w = width)))
    .collect()
}

/// Creates the rows driven onto `ports` together.
///
/// Up to `exhaustive_limit` ports are enumerated (bit `j` of row `i` drives
/// port `j`), keeping at most `max_combinations` rows. Beyond the limit only
/// all-zeros, all-ones, and an alternating pattern are used.
fn combine(entity: &Entity, ports: Vec<usize>, limits: &Limits, settle: Delay) -> Combinations {
    let n = ports.len();
    let types: Vec<&DataType> = ports.iter().map(|i| entity.ports()[*i].data_type()).collect();
    let row = |f: &dyn Fn(usize) -> bool| -> Vec<Value> {
        types
            .iter()
            .enumerate()
            .map(|(j, dt)| Value::logic(dt, f(j)))
            .collect()
    };

    let rows = match n <= limits.exhaustive_limit {
        true => {
            let total = 1usize
                .checked_shl(n as u32)
                .unwrap_or(usize::MAX)
                .min(limits.max_combinations);
            (0..total).map(|i| row(&|j| i.checked_shr(j as u32).unwrap_or(0) & 1 == 1)).collect()
        }
        false => vec![
            row(&|_| false),
            row(&|_| true),
            row(&|j| j % 2 == 0),
        ],
    };
    Combinations {
        ports,
        rows,
        settle,
    }
}

/// Creates the stimulus for every input of `entity` other than the clock and
/// the reset. Output ports are never driven.
pub fn synthesize_all(
    entity: &Entity,
    classes: &Classification,
    limits: &Limits,
    settle: Delay,
) -> Stimulus {
    let inputs: Vec<usize> = entity
        .ports()
        .iter()
        .enumerate()
        .filter(|(i, p)| p.mode().is_input() && classes.is_control(*i) == false)
        .map(|(i, _)| i)
        .collect();

    let (scalars, others): (Vec<usize>, Vec<usize>) = inputs
        .into_iter()
        .partition(|i| entity.ports()[*i].data_type().is_scalar_bit());

    let combinations = match scalars.is_empty() {
        true => None,
        false => Some(combine(entity, scalars, limits, settle)),
    };
    let sequences: Vec<(usize, Vec<Step>)> = others
        .into_iter()
        .map(|i| (i, synthesize(&entity.ports()[i], settle)))
        .collect();

    log::debug!(
        "synthesized {} combination(s) and {} port sequence(s)",
        combinations.as_ref().map_or(0, |c| c.rows.len()),
        sequences.len()
    );
    Stimulus::new(combinations, sequences)
}
