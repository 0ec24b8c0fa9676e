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

use super::classify::Classification;
use super::error::BenchError;
use super::stimulus::{Delay, Stimulus, Value};
use crate::core::config::{Bench, Config};
use crate::core::lang::vhdl::datatype::{DataType, Kind};
use crate::core::lang::vhdl::entity::Entity;
use crate::core::lang::vhdl::format::VhdlFormat;
use crate::core::lang::vhdl::generic::Generic;
use crate::core::lang::vhdl::interface::{InterfaceDeclaration, InterfaceDeclarations};
use crate::core::lang::vhdl::port::{Mode, Port};

const DONE_FLAG: &str = "tb_done";

/// Writes `value` as a VHDL expression for a signal of type `dt`.
fn render(value: &Value, dt: &DataType, name: &str) -> Result<String, BenchError> {
    if value.fits(dt) == false {
        return Err(BenchError::UnsupportedDataTypeForCodeGen(
            dt.to_string(),
            format!("value {:?} does not fit port {:?}", value, name),
        ));
    }
    Ok(match value {
        Value::Bit(b) => format!("'{}'", *b as u8),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Literal(s) => format!("\"{}\"", s),
        Value::Fill(b) => format!("(others => '{}')", *b as u8),
        // cleared first, then the single bit is set
        Value::SetBit(_) => String::from("(others => '0')"),
    })
}

/// Writes the assignment of `value` onto `port` as one or more statements.
fn assign(port: &Port, value: &Value, fmt: &VhdlFormat, depth: usize) -> Result<String, BenchError> {
    let name = port.name();
    let rhs = render(value, port.data_type(), name.as_str())?;
    let mut result = format!("{}{} <= {};\n", fmt.indent(depth), name, rhs);
    if let Value::SetBit(index) = value {
        result.push_str(&format!("{}{}({}) <= '1';\n", fmt.indent(depth), name, index));
    }
    Ok(result)
}

fn wait_for(delay: &Delay, fmt: &VhdlFormat, depth: usize) -> String {
    format!("{}wait for {};\n", fmt.indent(depth), delay)
}

/// Finds a name based on `base` that no port, generic, or the entity uses.
fn unique_name(entity: &Entity, base: &str) -> String {
    let mut name = base.to_string();
    let mut i = 0;
    while entity.is_taken(&name) {
        i += 1;
        name = format!("{}_{}", base, i);
    }
    name
}

/// Determines a value for a constant of the type written as `data_type`.
fn placeholder(data_type: &str) -> Option<String> {
    let base = data_type
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let constrained = data_type.contains('(');
    let value = match base.as_str() {
        "integer" | "natural" => "0",
        "positive" => "1",
        "boolean" => "false",
        "std_logic" | "std_ulogic" | "bit" => "'0'",
        "time" => "0 ns",
        "real" => "0.0",
        "string" => "\"\"",
        "std_logic_vector" | "std_ulogic_vector" | "bit_vector" | "signed" | "unsigned"
            if constrained =>
        {
            "(others => '0')"
        }
        _ => return None,
    };
    Some(value.to_string())
}

fn constant_value(g: &Generic, config: &Config) -> Result<String, BenchError> {
    if let Some(v) = config.get_generic(g.name().as_str()) {
        return Ok(v.to_string());
    }
    if let Some(v) = g.default_value() {
        return Ok(v.to_string());
    }
    placeholder(g.data_type()).ok_or(BenchError::UnsupportedDataTypeForCodeGen(
        g.data_type().to_string(),
        format!(
            "generic {:?} has no default value; set one under [generics]",
            g.name().as_str()
        ),
    ))
}

/// The value a port's signal starts at before any stimulus.
fn initial_value(port: &Port) -> Result<Option<String>, BenchError> {
    let dt = port.data_type();
    let value = match port.mode() {
        Mode::Out => return Ok(None),
        Mode::InOut => match dt {
            DataType::StdLogic | DataType::StdULogic => return Ok(Some(String::from("'Z'"))),
            DataType::StdLogicVector
            | DataType::StdULogicVector
            | DataType::Signed
            | DataType::Unsigned => return Ok(Some(String::from("(others => 'Z')"))),
            _ => default_value(dt),
        },
        Mode::In => match port.default_value() {
            Some(v) => return Ok(Some(v.to_string())),
            None => default_value(dt),
        },
    };
    Ok(Some(render(&value, dt, port.name().as_str())?))
}

fn default_value(dt: &DataType) -> Value {
    match dt.kind() {
        Kind::Bit | Kind::Boolean => Value::logic(dt, false),
        Kind::Numeric => match dt {
            DataType::Positive => Value::Int(1),
            _ => Value::Int(0),
        },
        Kind::Vector => Value::Fill(false),
    }
}

/// Creates the text of the testbench for `entity`.
///
/// Sections are written in a fixed order: header, libraries, testbench
/// entity, architecture declarations, the unit under test, then the clock,
/// reset and stimulus processes.
pub fn assemble(
    entity: &Entity,
    classes: &Classification,
    stimulus: &Stimulus,
    config: &Config,
) -> Result<String, BenchError> {
    let fmt = config.get_vhdl_formatting();
    let bench = config.get_bench();
    let tb_name = format!("{}{}", entity.name(), bench.get_suffix());
    let arch = bench.get_architecture_name();
    if let Some(clash) = entity
        .ports()
        .iter()
        .map(|p| p.name())
        .chain(entity.generics().iter().map(|g| g.name()))
        .find(|n| n.as_str().eq_ignore_ascii_case(entity.name().as_str()))
    {
        return Err(BenchError::UnsupportedDataTypeForCodeGen(
            clash.to_string(),
            format!(
                "name is shared with entity {:?} and would hide its component",
                entity.name().as_str()
            ),
        ));
    }
    let done = unique_name(entity, DONE_FLAG);
    let inst = unique_name(entity, bench.get_instance_name());

    let mut result = String::new();
    result.push_str(&format!(
        "-- Testbench for entity '{}'.\n-- Generated by tbgen {}.\n\n",
        entity.name(),
        env!("CARGO_PKG_VERSION")
    ));
    result.push_str("library ieee;\nuse ieee.std_logic_1164.all;\nuse ieee.numeric_std.all;\n\n");
    result.push_str(&format!("entity {} is\nend entity {};\n\n", tb_name, tb_name));
    result.push_str(&format!("architecture {} of {} is\n", arch, tb_name));

    // constants
    if entity.generics().is_empty() == false {
        let constants = entity
            .generics()
            .iter()
            .map(|g| {
                Ok(InterfaceDeclaration::from_generic(g).with_expr(Some(constant_value(g, config)?)))
            })
            .collect::<Result<Vec<InterfaceDeclaration>, BenchError>>()?;
        result.push_str(
            &InterfaceDeclarations::new(constants).to_declaration_part_string("constant", &fmt, 1),
        );
        result.push('\n');
    }

    result.push_str(&entity.into_component(&fmt, 1));
    result.push('\n');

    // signals
    if entity.ports().is_empty() == false {
        let signals = entity
            .ports()
            .iter()
            .map(|p| Ok(InterfaceDeclaration::from_port(p).with_expr(initial_value(p)?)))
            .collect::<Result<Vec<InterfaceDeclaration>, BenchError>>()?;
        result.push_str(
            &InterfaceDeclarations::new(signals).to_declaration_part_string("signal", &fmt, 1),
        );
    }
    result.push_str(&format!(
        "{}signal {} : boolean := false;\n",
        fmt.indent(1),
        done
    ));
    result.push_str("begin\n\n");

    result.push_str(&entity.into_instance(&inst, &fmt, 1));

    if let Some(i) = classes.clock() {
        result.push('\n');
        result.push_str(&clock_process(entity, &entity.ports()[i], &done, &bench, &fmt)?);
    }
    if let Some(i) = classes.reset() {
        result.push('\n');
        result.push_str(&reset_process(
            entity,
            &entity.ports()[i],
            classes.is_reset_active_low(),
            &bench,
            &fmt,
        )?);
    }
    result.push('\n');
    result.push_str(&stimulus_process(entity, classes, stimulus, &done, &fmt)?);

    result.push_str(&format!("\nend architecture {};\n", arch));
    Ok(result)
}

fn clock_process(
    entity: &Entity,
    clk: &Port,
    done: &str,
    bench: &Bench,
    fmt: &VhdlFormat,
) -> Result<String, BenchError> {
    let half = bench.get_clock_half_period();
    let dt = clk.data_type();
    let mut result = format!(
        "{}{} : process\n{}begin\n",
        fmt.indent(1),
        unique_name(entity, "clock_process"),
        fmt.indent(1)
    );
    result.push_str(&format!("{}while not {} loop\n", fmt.indent(2), done));
    result.push_str(&assign(clk, &Value::logic(dt, false), fmt, 3)?);
    result.push_str(&wait_for(&half, fmt, 3));
    result.push_str(&assign(clk, &Value::logic(dt, true), fmt, 3)?);
    result.push_str(&wait_for(&half, fmt, 3));
    result.push_str(&format!("{}end loop;\n", fmt.indent(2)));
    result.push_str(&format!("{}wait;\n{}end process;\n", fmt.indent(2), fmt.indent(1)));
    Ok(result)
}

fn reset_process(
    entity: &Entity,
    rst: &Port,
    active_low: bool,
    bench: &Bench,
    fmt: &VhdlFormat,
) -> Result<String, BenchError> {
    let dt = rst.data_type();
    let mut result = format!(
        "{}{} : process\n{}begin\n",
        fmt.indent(1),
        unique_name(entity, "reset_process"),
        fmt.indent(1)
    );
    result.push_str(&assign(rst, &Value::logic(dt, !active_low), fmt, 2)?);
    result.push_str(&wait_for(&bench.get_reset_duration(), fmt, 2));
    result.push_str(&assign(rst, &Value::logic(dt, active_low), fmt, 2)?);
    result.push_str(&format!("{}wait;\n{}end process;\n", fmt.indent(2), fmt.indent(1)));
    Ok(result)
}

fn stimulus_process(
    entity: &Entity,
    classes: &Classification,
    stimulus: &Stimulus,
    done: &str,
    fmt: &VhdlFormat,
) -> Result<String, BenchError> {
    let ports = entity.ports();
    let mut result = format!(
        "{}{} : process\n{}begin\n",
        fmt.indent(1),
        unique_name(entity, "stimulus_process"),
        fmt.indent(1)
    );

    if let Some(i) = classes.reset() {
        let rst = &ports[i];
        let released = render(
            &Value::logic(rst.data_type(), classes.is_reset_active_low()),
            rst.data_type(),
            rst.name().as_str(),
        )?;
        result.push_str(&format!(
            "{}wait until {} = {};\n",
            fmt.indent(2),
            rst.name(),
            released
        ));
    }

    if let Some(combos) = stimulus.combinations() {
        for (n, row) in combos.rows().iter().enumerate() {
            result.push_str(&format!("{}-- combination {}\n", fmt.indent(2), n));
            for (i, value) in combos.ports().iter().zip(row.iter()) {
                result.push_str(&assign(&ports[*i], value, fmt, 2)?);
            }
            result.push_str(&wait_for(combos.settle(), fmt, 2));
        }
    }

    for (i, steps) in stimulus.sequences() {
        let port = &ports[*i];
        result.push_str(&format!("{}-- sequence for {}\n", fmt.indent(2), port.name()));
        for step in steps {
            result.push_str(&assign(port, step.value(), fmt, 2)?);
            result.push_str(&wait_for(step.settle(), fmt, 2));
        }
    }

    result.push_str(&format!("{}{} <= true;\n", fmt.indent(2), done));
    result.push_str(&format!("{}wait;\n{}end process;\n", fmt.indent(2), fmt.indent(1)));
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::bench::stimulus::Step;
    use crate::core::lang::vhdl;
    use crate::core::lang::vhdl::range::Bound;
    use std::str::FromStr;

    fn entity(text: &str) -> Entity {
        vhdl::parse(text).unwrap()
    }

    #[test]
    fn renders_values() {
        assert_eq!(render(&Value::Bit(true), &DataType::StdLogic, "a").unwrap(), "'1'");
        assert_eq!(render(&Value::Bool(false), &DataType::Boolean, "a").unwrap(), "false");
        assert_eq!(render(&Value::Int(10), &DataType::Natural, "a").unwrap(), "10");
        assert_eq!(
            render(&Value::Literal(String::from("0101")), &DataType::Unsigned, "a").unwrap(),
            "\"0101\""
        );
        assert_eq!(
            render(&Value::Fill(true), &DataType::BitVector, "a").unwrap(),
            "(others => '1')"
        );
        assert_eq!(
            render(&Value::Int(0), &DataType::Positive, "a")
                .unwrap_err()
                .kind(),
            "UnsupportedDataTypeForCodeGen"
        );
    }

    #[test]
    fn set_bit_is_two_statements() {
        let e = entity("entity e is port ( d : in std_logic_vector(WIDTH-1 downto 0) ); end;");
        let text = assign(
            &e.ports()[0],
            &Value::SetBit(Bound::Int(0)),
            &VhdlFormat::new(),
            2,
        )
        .unwrap();
        assert_eq!(text, "    d <= (others => '0');\n    d(0) <= '1';\n");
    }

    #[test]
    fn placeholders() {
        assert_eq!(placeholder("integer"), Some(String::from("0")));
        assert_eq!(placeholder("POSITIVE"), Some(String::from("1")));
        assert_eq!(placeholder("integer range 0 to 7"), Some(String::from("0")));
        assert_eq!(placeholder("time"), Some(String::from("0 ns")));
        assert_eq!(
            placeholder("std_logic_vector(3 downto 0)"),
            Some(String::from("(others => '0')"))
        );
        assert_eq!(placeholder("std_logic_vector"), None);
        assert_eq!(placeholder("my_record_t"), None);
    }

    #[test]
    fn constants_prefer_configuration() {
        let e = entity(
            "entity e is generic ( A : integer := 4; B : natural; C : my_t ); port ( x : in bit ); end;",
        );
        let cfg = Config::from_str("[generics]\na = \"16\"\n").unwrap();
        assert_eq!(constant_value(&e.generics()[0], &cfg).unwrap(), "16");
        assert_eq!(constant_value(&e.generics()[1], &cfg).unwrap(), "0");
        assert_eq!(
            constant_value(&e.generics()[2], &cfg).unwrap_err().kind(),
            "UnsupportedDataTypeForCodeGen"
        );
        let cfg = Config::from_str("[generics]\nC = \"IDLE\"\n").unwrap();
        assert_eq!(constant_value(&e.generics()[2], &cfg).unwrap(), "IDLE");
    }

    #[test]
    fn initial_values() {
        let e = entity(
            "entity e is port ( a : in std_logic := '1'; b : in natural; c : inout std_logic_vector(3 downto 0); d : inout bit; y : out bit ); end;",
        );
        let init = |i: usize| initial_value(&e.ports()[i]).unwrap();
        assert_eq!(init(0), Some(String::from("'1'")));
        assert_eq!(init(1), Some(String::from("0")));
        assert_eq!(init(2), Some(String::from("(others => 'Z')")));
        assert_eq!(init(3), Some(String::from("'0'")));
        assert_eq!(init(4), None);
    }

    #[test]
    fn done_flag_avoids_port_names() {
        let e = entity("entity e is port ( tb_done : out boolean; tb_done_1 : in bit ); end;");
        assert_eq!(unique_name(&e, DONE_FLAG), "tb_done_2");
    }

    #[test]
    fn instance_label_avoids_port_names() {
        let e = entity("entity e is port ( uut : in bit; y : out bit ); end;");
        let text = assemble(&e, &Classification::default(), &Stimulus::default(), &Config::new())
            .unwrap();
        assert!(text.contains("  signal uut : bit := '0';\n"));
        assert!(text.contains("  uut_1 : e\n"));
        assert_eq!(text.contains("  uut : e"), false);
    }

    #[test]
    fn names_shared_with_entity_are_rejected() {
        let e = entity("entity e is port ( E : in bit ); end;");
        let err = assemble(&e, &Classification::default(), &Stimulus::default(), &Config::new())
            .unwrap_err();
        assert_eq!(err.kind(), "UnsupportedDataTypeForCodeGen");
        let e = entity("entity e is generic ( e : integer := 1 ); end;");
        assert!(
            assemble(&e, &Classification::default(), &Stimulus::default(), &Config::new()).is_err()
        );
    }

    #[test]
    fn value_mismatch_is_reported() {
        let e = entity("entity e is port ( n : in integer ); end;");
        let stimulus = Stimulus::new(
            None,
            vec![(0, vec![Step::new(Value::Literal(String::from("1")), Delay::new(10))])],
        );
        let err = assemble(&e, &Classification::default(), &stimulus, &Config::new()).unwrap_err();
        assert_eq!(err.kind(), "UnsupportedDataTypeForCodeGen");
    }

    #[test]
    fn empty_entity() {
        let e = entity("entity e is end entity;");
        let text = assemble(&e, &Classification::default(), &Stimulus::default(), &Config::new())
            .unwrap();
        assert!(text.contains("entity e_tb is\nend entity e_tb;"));
        assert!(text.contains("  component e\n  end component;\n"));
        assert!(text.contains("  uut : e;\n"));
        assert!(text.contains("    tb_done <= true;\n    wait;\n"));
        assert!(text.ends_with("end architecture sim;\n"));
    }
}
