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
use super::format::VhdlFormat;
use super::generic::Generic;
use super::identifier::Identifier;
use super::interface::InterfaceDeclarations;
use super::port::Port;
use std::collections::HashSet;
use std::str::FromStr;

/// The interface of a hardware module: its name, generics, and ports.
///
/// An `Entity` can only be built through [Entity::new], which checks that
/// the name is a valid identifier and that no generic or port name repeats.
/// Declaration order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: Identifier,
    generics: Vec<Generic>,
    ports: Vec<Port>,
}

impl Entity {
    pub fn new(name: &str, generics: Vec<Generic>, ports: Vec<Port>) -> Result<Self, VhdlError> {
        let name =
            Identifier::from_str(name).map_err(|_| VhdlError::InvalidIdentifier(name.to_string()))?;

        let mut seen = HashSet::new();
        for g in &generics {
            if seen.insert(g.name()) == false {
                return Err(VhdlError::MalformedGeneric(
                    g.name().to_string(),
                    String::from("name is declared more than once"),
                ));
            }
        }
        let mut seen = HashSet::new();
        for p in &ports {
            if seen.insert(p.name()) == false {
                return Err(VhdlError::DuplicatePort(p.name().to_string()));
            }
        }
        Ok(Self {
            name,
            generics,
            ports,
        })
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn generics(&self) -> &Vec<Generic> {
        &self.generics
    }

    pub fn ports(&self) -> &Vec<Port> {
        &self.ports
    }

    /// Checks if any port or generic already uses `name`, ignoring case.
    pub fn is_taken(&self, name: &str) -> bool {
        self.ports
            .iter()
            .map(|p| p.name())
            .chain(self.generics.iter().map(|g| g.name()))
            .any(|n| n.as_str().eq_ignore_ascii_case(name))
            || self.name.as_str().eq_ignore_ascii_case(name)
    }

    /// Generates VHDL component code from the entity at indentation `depth`.
    pub fn into_component(&self, fmt: &VhdlFormat, depth: usize) -> String {
        let mut result = format!("{}component {}\n", fmt.indent(depth), self.name);
        if self.generics.is_empty() == false {
            result.push_str(
                &InterfaceDeclarations::from_generics(&self.generics).to_interface_part_string(
                    "generic",
                    fmt,
                    depth + 1,
                ),
            );
            result.push('\n');
        }
        if self.ports.is_empty() == false {
            result.push_str(
                &InterfaceDeclarations::from_ports(&self.ports).to_interface_part_string(
                    "port",
                    fmt,
                    depth + 1,
                ),
            );
            result.push('\n');
        }
        result.push_str(&format!("{}end component;\n", fmt.indent(depth)));
        result
    }

    /// Generates VHDL instantiation code from the entity, labeled `inst`.
    ///
    /// Every generic and port is associated with an identically named
    /// constant or signal.
    pub fn into_instance(&self, inst: &str, fmt: &VhdlFormat, depth: usize) -> String {
        let mut result = format!("{}{} : {}", fmt.indent(depth), inst, self.name);
        if self.generics.is_empty() == false {
            result.push('\n');
            result.push_str(
                &InterfaceDeclarations::from_generics(&self.generics).to_instantiation_part(
                    "generic",
                    fmt,
                    depth + 1,
                ),
            );
        }
        if self.ports.is_empty() == false {
            result.push('\n');
            result.push_str(
                &InterfaceDeclarations::from_ports(&self.ports).to_instantiation_part(
                    "port",
                    fmt,
                    depth + 1,
                ),
            );
        }
        result.push_str(";\n");
        result
    }
}
