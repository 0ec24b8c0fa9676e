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

//! The JSON interchange record that carries a parsed entity between tools.

use crate::core::bench::error::BenchError;
use crate::core::lang::vhdl::datatype::DataType;
use crate::core::lang::vhdl::entity::Entity;
use crate::core::lang::vhdl::error::VhdlError;
use crate::core::lang::vhdl::generic::Generic;
use crate::core::lang::vhdl::identifier::Identifier;
use crate::core::lang::vhdl::port::{Mode, Port};
use crate::core::lang::vhdl::range::{Bound, Direction, Range};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

pub const PARSER_VERSION: &str = "1.0";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    vhdl_entity: EntityRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct EntityRecord {
    name: String,
    #[serde(default)]
    generics: Vec<GenericRecord>,
    ports: Vec<PortRecord>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct GenericRecord {
    name: String,
    data_type: String,
    default_value: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct PortRecord {
    name: String,
    direction: String,
    data_type: String,
    width: Option<WidthRecord>,
    default_value: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct WidthRecord {
    left: String,
    right: String,
    direction: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    parser_version: String,
    #[serde(default)]
    supported_types: Vec<String>,
}

impl Metadata {
    pub fn parser_version(&self) -> &str {
        &self.parser_version
    }
}

impl From<&Entity> for Record {
    fn from(entity: &Entity) -> Self {
        Self {
            vhdl_entity: EntityRecord {
                name: entity.name().to_string(),
                generics: entity
                    .generics()
                    .iter()
                    .map(|g| GenericRecord {
                        name: g.name().to_string(),
                        data_type: g.data_type().to_string(),
                        default_value: g.default_value().map(|s| s.to_string()),
                    })
                    .collect(),
                ports: entity
                    .ports()
                    .iter()
                    .map(|p| PortRecord {
                        name: p.name().to_string(),
                        direction: p.mode().to_string(),
                        data_type: p.data_type().to_string(),
                        width: p.width().map(|r| WidthRecord {
                            left: r.left().to_string(),
                            right: r.right().to_string(),
                            direction: r.direction().to_string(),
                        }),
                        default_value: p.default_value().map(|s| s.to_string()),
                    })
                    .collect(),
            },
            metadata: Some(Metadata {
                parser_version: String::from(PARSER_VERSION),
                supported_types: DataType::supported()
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

impl Record {
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Rebuilds the entity described by the record.
    ///
    /// The entity goes through the same validation as a freshly parsed one.
    pub fn into_entity(self) -> Result<Entity, BenchError> {
        let generics = self
            .vhdl_entity
            .generics
            .into_iter()
            .map(|g| {
                let name = parse_name(&g.name)?;
                Ok(Generic::new(name, &g.data_type, g.default_value.as_deref()))
            })
            .collect::<Result<Vec<Generic>, VhdlError>>()?;

        let ports = self
            .vhdl_entity
            .ports
            .into_iter()
            .map(|p| {
                let name = parse_name(&p.name)?;
                let mode = Mode::from_str(&p.direction)
                    .map_err(|e| VhdlError::MalformedPort(p.name.clone(), e))?;
                let data_type = DataType::from_str(&p.data_type)
                    .map_err(|_| VhdlError::UnsupportedDataType(p.data_type.clone(), p.name.clone()))?;
                let width = match p.width {
                    Some(w) => {
                        let dir = Direction::from_str(&w.direction).map_err(|e| {
                            VhdlError::InvalidWidthSpecification(p.name.clone(), e)
                        })?;
                        if w.left.trim().is_empty() || w.right.trim().is_empty() {
                            return Err(VhdlError::InvalidWidthSpecification(
                                p.name.clone(),
                                String::from("missing bound"),
                            ));
                        }
                        Some(Range::new(
                            Bound::from(w.left.as_str()),
                            Bound::from(w.right.as_str()),
                            dir,
                        ))
                    }
                    None => None,
                };
                Port::new(name, mode, data_type, width, p.default_value.as_deref())
            })
            .collect::<Result<Vec<Port>, VhdlError>>()?;

        Ok(Entity::new(&self.vhdl_entity.name, generics, ports)?)
    }
}

fn parse_name(name: &str) -> Result<Identifier, VhdlError> {
    Identifier::from_str(name).map_err(|_| VhdlError::InvalidIdentifier(name.to_string()))
}

/// Writes the interchange record for `entity` as pretty-printed JSON.
pub fn to_json(entity: &Entity) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Record::from(entity))
}

/// Reads an interchange record and rebuilds its entity.
///
/// `vhdl_entity`, `vhdl_entity.name` and `vhdl_entity.ports` must be present;
/// `generics` and `metadata` are optional.
pub fn from_json(text: &str) -> Result<Entity, BenchError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| BenchError::MalformedRecord(e.to_string()))?;

    let entity = value
        .get("vhdl_entity")
        .ok_or(BenchError::MissingInterchangeField(String::from("vhdl_entity")))?;
    for field in ["name", "ports"] {
        if entity.get(field).map_or(true, |v| v.is_null()) {
            return Err(BenchError::MissingInterchangeField(format!(
                "vhdl_entity.{}",
                field
            )));
        }
    }

    let record: Record =
        serde_json::from_value(value).map_err(|e| BenchError::MalformedRecord(e.to_string()))?;
    if let Some(meta) = record.metadata() {
        if meta.parser_version() != PARSER_VERSION {
            log::warn!(
                "record was written by parser version {} (expected {})",
                meta.parser_version(),
                PARSER_VERSION
            );
        }
    }
    record.into_entity()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::lang::vhdl;

    const P_1: &str = r#"
entity counter is
    generic ( WIDTH : integer := 8 );
    port (
        clk : in std_logic;
        rst : in std_logic;
        en  : in std_logic;
        q   : out std_logic_vector(WIDTH-1 downto 0)
    );
end entity counter;
"#;

    #[test]
    fn record_shape() {
        let entity = vhdl::parse(P_1).unwrap();
        let json: Value = serde_json::from_str(&to_json(&entity).unwrap()).unwrap();
        let e = &json["vhdl_entity"];
        assert_eq!(e["name"], "counter");
        assert_eq!(e["generics"].as_array().unwrap().len(), 1);
        assert_eq!(e["generics"][0]["default_value"], "8");
        assert_eq!(e["ports"].as_array().unwrap().len(), 4);
        assert_eq!(e["ports"][0]["width"], Value::Null);
        assert_eq!(e["ports"][0]["default_value"], Value::Null);
        assert_eq!(e["ports"][3]["direction"], "out");
        assert_eq!(e["ports"][3]["width"]["left"], "WIDTH-1");
        assert_eq!(e["ports"][3]["width"]["right"], "0");
        assert_eq!(e["ports"][3]["width"]["direction"], "downto");
        assert_eq!(json["metadata"]["parser_version"], "1.0");
        assert_eq!(json["metadata"]["supported_types"][0], "std_logic");
    }

    #[test]
    fn read_back_entity() {
        let entity = vhdl::parse(P_1).unwrap();
        let text = to_json(&entity).unwrap();
        assert_eq!(from_json(&text), Ok(entity));
    }

    #[test]
    fn optional_sections() {
        let text = r#"{"vhdl_entity": {"name": "foo", "ports": [
            {"name": "a", "direction": "in", "data_type": "std_logic"}
        ]}}"#;
        let e = from_json(text).unwrap();
        assert_eq!(e.generics().len(), 0);
        assert_eq!(e.ports().len(), 1);
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            from_json("{}"),
            Err(BenchError::MissingInterchangeField(String::from(
                "vhdl_entity"
            )))
        );
        assert_eq!(
            from_json(r#"{"vhdl_entity": {"ports": []}}"#),
            Err(BenchError::MissingInterchangeField(String::from(
                "vhdl_entity.name"
            )))
        );
        assert_eq!(
            from_json(r#"{"vhdl_entity": {"name": "foo"}}"#),
            Err(BenchError::MissingInterchangeField(String::from(
                "vhdl_entity.ports"
            )))
        );
    }

    #[test]
    fn invalid_contents_are_rejected() {
        assert_eq!(from_json("not json").unwrap_err().kind(), "MalformedRecord");
        let text = r#"{"vhdl_entity": {"name": "foo", "ports": [
            {"name": "a", "direction": "in", "data_type": "std_logic_vector"}
        ]}}"#;
        assert_eq!(
            from_json(text).unwrap_err().kind(),
            "InvalidWidthSpecification"
        );
        let text = r#"{"vhdl_entity": {"name": "foo", "ports": [
            {"name": "a", "direction": "buffer", "data_type": "bit"}
        ]}}"#;
        assert_eq!(from_json(text).unwrap_err().kind(), "MalformedPort");
        let text = r#"{"vhdl_entity": {"name": "foo", "ports": [
            {"name": "a", "direction": "in", "data_type": "bit"},
            {"name": "A", "direction": "out", "data_type": "bit"}
        ]}}"#;
        assert_eq!(from_json(text).unwrap_err().kind(), "DuplicatePort");
    }
}
