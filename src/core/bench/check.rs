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

//! Compatibility of an existing testbench with an entity.

use crate::core::lang::lexer::char_set;
use crate::core::lang::lexer::TrainCar;
use crate::core::lang::vhdl::entity::Entity;
use crate::core::lang::vhdl::normalize::normalize;
use std::fmt::Display;

/// A reference to the entity that a testbench does not make.
#[derive(Debug, PartialEq)]
pub enum Missing {
    /// No component declaration and no direct entity instantiation.
    Component,
    Instance,
    /// The port never appears in a named association.
    Port(String),
}

impl Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Component => write!(f, "no component declaration"),
            Self::Instance => write!(f, "no instance"),
            Self::Port(p) => write!(f, "port {:?} is not mapped", p),
        }
    }
}

/// Splits VHDL text into lowercase words and the few delimiters that matter
/// for finding instances. String literals are skipped.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut train = TrainCar::new(text.chars());
    let mut word = String::new();
    while let Some(c) = train.consume() {
        if char_set::is_identifier_char(&c) {
            word.push(c.to_ascii_lowercase());
            continue;
        }
        if word.is_empty() == false {
            tokens.push(std::mem::take(&mut word));
        }
        match c {
            char_set::DOUBLE_QUOTE => while train.consume().is_some_and(|d| d != c) {},
            ':' => match train.consume_if('=') {
                true => tokens.push(String::from(":=")),
                false => tokens.push(String::from(":")),
            },
            '=' if train.consume_if('>') => tokens.push(String::from("=>")),
            '<' if train.consume_if('=') => tokens.push(String::from("<=")),
            '.' | ';' | char_set::PAREN_L | char_set::PAREN_R => tokens.push(c.to_string()),
            _ => (),
        }
    }
    if word.is_empty() == false {
        tokens.push(word);
    }
    tokens
}

/// Lists what `bench` lacks to drive `entity`, in the order component,
/// instance, then ports in declaration order.
///
/// An instance is `<label> : [component] <name>` or
/// `<label> : entity <library>.<name>`. Ports count as connected only when
/// named in an association (`<port> =>`).
pub fn check(entity: &Entity, bench: &str) -> Vec<Missing> {
    let tokens = tokenize(&normalize(bench));
    let name = entity.name().as_str().to_ascii_lowercase();
    let at = |i: usize| tokens.get(i).map(|t| t.as_str());

    let declared = (0..tokens.len()).any(|i| {
        at(i) == Some("component")
            && at(i + 1) == Some(name.as_str())
            && i.checked_sub(1).and_then(|j| at(j)).map_or(true, |t| t != ":" && t != "end")
    });
    let mut instance = false;
    let mut direct = false;
    for i in (0..tokens.len()).filter(|i| at(*i) == Some(":")) {
        match (at(i + 1), at(i + 2)) {
            (Some("component"), Some(n)) | (Some(n), _) if n == name => instance = true,
            (Some("entity"), _) if at(i + 3) == Some(".") && at(i + 4) == Some(name.as_str()) => {
                instance = true;
                direct = true;
            }
            _ => (),
        }
    }

    let mut missing = Vec::new();
    if declared == false && direct == false {
        missing.push(Missing::Component);
    }
    if instance == false {
        missing.push(Missing::Instance);
    }
    entity
        .ports()
        .iter()
        .filter(|p| {
            let port = p.name().as_str().to_ascii_lowercase();
            tokens
                .windows(2)
                .any(|w| w[0] == port && w[1] == "=>")
                == false
        })
        .for_each(|p| missing.push(Missing::Port(p.name().to_string())));
    missing
}
