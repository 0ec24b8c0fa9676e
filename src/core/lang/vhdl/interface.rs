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

// @note: interface_signal_declaration ::= [signal] identifier_list : [ mode ] subtype_indication [ bus ] [ := static_expression ]

use super::format::VhdlFormat;
use super::generic::Generic;
use super::port::{Mode, Port};

/// A single entry of a generic or port list, ready to be written out as VHDL.
#[derive(Debug, PartialEq, Clone)]
pub struct InterfaceDeclaration {
    identifier: String,
    mode: Option<Mode>,
    datatype: String,
    expr: Option<String>,
}

impl InterfaceDeclaration {
    pub fn from_generic(g: &Generic) -> Self {
        Self {
            identifier: g.name().to_string(),
            mode: None,
            datatype: g.data_type().to_string(),
            expr: g.default_value().map(|s| s.to_string()),
        }
    }

    pub fn from_port(p: &Port) -> Self {
        Self {
            identifier: p.name().to_string(),
            mode: Some(*p.mode()),
            datatype: p.type_indication(),
            expr: p.default_value().map(|s| s.to_string()),
        }
    }

    /// Replaces the right-hand side of the declaration's assignment.
    pub fn with_expr(mut self, expr: Option<String>) -> Self {
        self.expr = expr;
        self
    }

    /// Computes the whitespace that follows the identifier.
    fn padding(&self, offset: usize, aligned: bool, extra: u8) -> String {
        let width = match aligned {
            true => offset - self.identifier.len() + extra as usize,
            false => extra as usize,
        };
        " ".repeat(width)
    }

    fn assignment(&self) -> String {
        match &self.expr {
            Some(e) => format!(" := {}", e),
            None => String::new(),
        }
    }

    fn into_interface_string(&self, fmt: &VhdlFormat, offset: usize) -> String {
        let mode = match &self.mode {
            Some(m) => format!("{} ", m),
            None => String::new(),
        };
        format!(
            "{}{}: {}{}{}",
            self.identifier,
            self.padding(offset, fmt.is_auto_type_aligned(), fmt.get_type_offset()),
            mode,
            self.datatype,
            self.assignment()
        )
    }

    /// Creates a declaration string to be copied into architecture declaration parts.
    ///
    /// Note: `offset` is used for padding after the identifier string and before ':'.
    fn into_declaration_string(&self, keyword: &str, fmt: &VhdlFormat, offset: usize) -> String {
        format!(
            "{} {}{}: {}{};",
            keyword,
            self.identifier,
            self.padding(offset, fmt.is_auto_type_aligned(), fmt.get_type_offset()),
            self.datatype,
            self.assignment()
        )
    }

    /// Creates an association line to be copied into an instance's map.
    fn into_instance_string(&self, fmt: &VhdlFormat, offset: usize) -> String {
        format!(
            "{}{}=> {}",
            self.identifier,
            self.padding(
                offset,
                fmt.is_auto_mapping_aligned(),
                fmt.get_mapping_offset()
            ),
            self.identifier
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct InterfaceDeclarations(Vec<InterfaceDeclaration>);

impl InterfaceDeclarations {
    pub fn new(inner: Vec<InterfaceDeclaration>) -> Self {
        Self(inner)
    }

    pub fn from_generics(generics: &[Generic]) -> Self {
        Self(generics.iter().map(InterfaceDeclaration::from_generic).collect())
    }

    pub fn from_ports(ports: &[Port]) -> Self {
        Self(ports.iter().map(InterfaceDeclaration::from_port).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Determines the length of the longest identifier.
    pub fn longest_identifier(&self) -> usize {
        self.0
            .iter()
            .map(|d| d.identifier.len())
            .max()
            .unwrap_or(0)
    }

    /// Creates a `generic (...)` or `port (...)` clause at indentation `depth`.
    ///
    /// Items are separated by `;` and the last item has no terminator.
    pub fn to_interface_part_string(&self, keyword: &str, fmt: &VhdlFormat, depth: usize) -> String {
        let offset = self.longest_identifier();
        let items = self
            .0
            .iter()
            .map(|d| format!("{}{}", fmt.indent(depth + 1), d.into_interface_string(fmt, offset)))
            .collect::<Vec<String>>();
        format!(
            "{}{} (\n{}\n{});",
            fmt.indent(depth),
            keyword,
            items.join(";\n"),
            fmt.indent(depth)
        )
    }

    /// Creates one declaration per item, each on its own line.
    pub fn to_declaration_part_string(&self, keyword: &str, fmt: &VhdlFormat, depth: usize) -> String {
        let offset = self.longest_identifier();
        self.0
            .iter()
            .map(|d| {
                format!(
                    "{}{}\n",
                    fmt.indent(depth),
                    d.into_declaration_string(keyword, fmt, offset)
                )
            })
            .collect()
    }

    /// Creates a `generic map (...)` or `port map (...)` association list.
    ///
    /// Items are separated by `,` and the last item has no separator.
    pub fn to_instantiation_part(&self, keyword: &str, fmt: &VhdlFormat, depth: usize) -> String {
        let offset = self.longest_identifier();
        let items = self
            .0
            .iter()
            .map(|d| format!("{}{}", fmt.indent(depth + 1), d.into_instance_string(fmt, offset)))
            .collect::<Vec<String>>();
        format!(
            "{}{} map (\n{}\n{})",
            fmt.indent(depth),
            keyword,
            items.join(",\n"),
            fmt.indent(depth)
        )
    }
}
