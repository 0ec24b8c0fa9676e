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

pub mod datatype;
pub mod entity;
pub mod error;
pub mod extract;
pub mod format;
pub mod generic;
pub mod identifier;
pub mod interface;
pub mod normalize;
pub mod port;
pub mod range;

mod scan;

use entity::Entity;
use error::VhdlError;

/// Parses the single entity declared in VHDL source `text`.
///
/// Comments are removed before the entity is located, then the generic and
/// port clauses are read in declaration order. The first malformed
/// declaration aborts the parse.
pub fn parse(text: &str) -> Result<Entity, VhdlError> {
    let text = normalize::normalize(text);
    let (name, body) = extract::extract(&text)?;
    log::debug!("found entity {:?}", name);

    let generics = generic::parse_generics(&body)?;
    let ports = port::parse_ports(&body)?;
    log::debug!(
        "entity {:?} declares {} generic(s) and {} port(s)",
        name,
        generics.len(),
        ports.len()
    );
    Entity::new(&name, generics, ports)
}
