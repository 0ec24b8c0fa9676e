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

//! Testbench generation from a parsed entity.

pub mod check;
pub mod classify;
pub mod error;
pub mod stimulus;
pub mod template;

use crate::core::config::Config;
use crate::core::lang::vhdl::entity::Entity;
use error::BenchError;

/// Creates the testbench source code that exercises `entity`.
pub fn generate(entity: &Entity, config: &Config) -> Result<String, BenchError> {
    let classes = classify::classify(entity.ports());
    let stimulus = stimulus::synthesize_all(
        entity,
        &classes,
        &config.get_limits(),
        config.get_bench().get_settle_delay(),
    );
    if stimulus.is_empty() == true {
        log::info!("entity {} has no data inputs to drive", entity.name());
    }
    let text = template::assemble(entity, &classes, &stimulus, config)?;
    log::debug!(
        "generated testbench for {} ({} lines)",
        entity.name(),
        text.lines().count()
    );
    Ok(text)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::lang::vhdl;
    use crate::core::lang::vhdl::error::VhdlError;
    use crate::core::record;
    use std::collections::HashSet;
    use std::str::FromStr;

    const P_1: &str = r#"
library ieee;
use ieee.std_logic_1164.all;

-- A simple counter.
entity counter is
    generic (
        WIDTH : integer := 8
    );
    port (
        clk : in std_logic;
        rst : in std_logic;
        en  : in std_logic; -- count enable
        q   : out std_logic_vector(WIDTH-1 downto 0)
    );
end entity counter;

architecture rtl of counter is
begin
end architecture rtl;
"#;

    const P_2: &str = r#"
entity mux is
    port (
        a, b : in std_logic;
        sel  : in bit;
        y    : out std_logic
    );
end mux;
"#;

    const P_3: &str = r#"
entity sync is
    port (
        clock : in std_logic;
        rst_n : in std_logic;
        d     : in std_logic_vector(7 downto 0);
        w     : in unsigned(DATA_WIDTH-1 downto 0);
        n     : in natural;
        z     : inout std_logic
    );
end entity;
"#;

    fn count(text: &str, pattern: &str) -> usize {
        text.matches(pattern).count()
    }

    #[test]
    fn counter_end_to_end() {
        let entity = vhdl::parse(P_1).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&record::to_json(&entity).unwrap()).unwrap();
        assert_eq!(json["vhdl_entity"]["generics"].as_array().unwrap().len(), 1);
        assert_eq!(json["vhdl_entity"]["ports"].as_array().unwrap().len(), 4);

        let tb = generate(&entity, &Config::new()).unwrap();
        // one clock process and one active-high reset process
        assert_eq!(count(&tb, "clock_process : process"), 1);
        assert_eq!(count(&tb, "reset_process : process"), 1);
        assert!(tb.contains("    rst <= '1';\n    wait for 20 ns;\n    rst <= '0';\n"));
        assert!(tb.contains("wait until rst = '0';"));
        // en toggles
        assert!(tb.contains("    en <= '0';\n    wait for 10 ns;\n"));
        assert!(tb.contains("    en <= '1';\n    wait for 10 ns;\n"));
        // outputs are never driven
        assert_eq!(count(&tb, "q <="), 0);
        assert_eq!(count(&tb, "clk <="), 2);
    }

    #[test]
    fn counter_layout() {
        let entity = vhdl::parse(P_1).unwrap();
        let tb = generate(&entity, &Config::new()).unwrap();
        assert!(tb.starts_with("-- Testbench for entity 'counter'.\n"));
        assert!(tb.contains("entity counter_tb is\nend entity counter_tb;\n"));
        assert!(tb.contains("architecture sim of counter_tb is\n  constant WIDTH : integer := 8;\n"));
        assert!(tb.contains(
            "  component counter\n    generic (\n      WIDTH : integer := 8\n    );\n    port (\n      clk : in std_logic;\n      rst : in std_logic;\n      en  : in std_logic;\n      q   : out std_logic_vector(WIDTH-1 downto 0)\n    );\n  end component;\n"
        ));
        assert!(tb.contains("  signal clk : std_logic := '0';\n"));
        assert!(tb.contains("  signal q   : std_logic_vector(WIDTH-1 downto 0);\n"));
        assert!(tb.contains("  signal tb_done : boolean := false;\n"));
        assert!(tb.contains(
            "  uut : counter\n    generic map (\n      WIDTH => WIDTH\n    )\n    port map (\n      clk => clk,\n      rst => rst,\n      en  => en,\n      q   => q\n    );\n"
        ));
        assert!(tb.contains("    while not tb_done loop\n      clk <= '0';\n      wait for 5 ns;\n"));
        assert!(tb.contains("    tb_done <= true;\n    wait;\n  end process;\n"));
        assert!(tb.ends_with("end architecture sim;\n"));
        // the order of sections is fixed
        let pos = |s: &str| tb.find(s).unwrap();
        assert!(pos("library ieee;") < pos("entity counter_tb"));
        assert!(pos("constant WIDTH") < pos("component counter"));
        assert!(pos("component counter") < pos("signal clk"));
        assert!(pos("uut : counter") < pos("clock_process"));
        assert!(pos("clock_process") < pos("reset_process"));
        assert!(pos("reset_process") < pos("stimulus_process"));
    }

    #[test]
    fn no_trailing_separators() {
        let entity = vhdl::parse(P_1).unwrap();
        let tb = generate(&entity, &Config::new()).unwrap();
        assert_eq!(tb.contains(";\n    );"), false);
        assert_eq!(tb.contains(",\n    )"), false);
        assert_eq!(tb.contains(";\n  );"), false);
    }

    #[test]
    fn three_scalar_inputs_are_exhaustive() {
        let entity = vhdl::parse(P_2).unwrap();
        let tb = generate(&entity, &Config::new()).unwrap();
        assert_eq!(count(&tb, "-- combination "), 8);
        assert_eq!(count(&tb, "clock_process"), 0);
        assert_eq!(count(&tb, "reset_process"), 0);
        // every block drives a distinct pattern
        let blocks: HashSet<&str> = tb
            .split("-- combination ")
            .skip(1)
            .map(|b| b.split_once('\n').map(|(_, rest)| rest).unwrap_or(b))
            .map(|b| b.split("wait for").next().unwrap())
            .collect();
        assert_eq!(blocks.len(), 8);
        assert_eq!(count(&tb, "y <="), 0);
    }

    #[test]
    fn active_low_reset_and_vectors() {
        let entity = vhdl::parse(P_3).unwrap();
        let tb = generate(&entity, &Config::new()).unwrap();
        assert!(tb.contains("    rst_n <= '0';\n    wait for 20 ns;\n    rst_n <= '1';\n"));
        assert!(tb.contains("wait until rst_n = '1';"));
        assert_eq!(count(&tb, "clock <= '1';"), 1);
        // numeric width uses literals with bit 7 alone set
        assert!(tb.contains("    d <= \"10000000\";\n"));
        // symbolic width is driven structurally
        assert!(tb.contains("    w <= (others => '0');\n    w(0) <= '1';\n"));
        assert!(tb.contains("    w <= (others => '1');\n"));
        let w_lines: Vec<&str> = tb.lines().filter(|l| l.trim_start().starts_with("w <=")).collect();
        assert_eq!(w_lines.iter().any(|l| l.contains('"')), false);
        assert!(tb.contains("    n <= 100;\n"));
        // inout starts at high impedance and is then driven like an input
        assert!(tb.contains("  signal z     : std_logic := 'Z';\n"));
        assert!(tb.contains("    z <= '1';\n"));
        // width expressions are copied verbatim
        assert_eq!(count(&tb, "DATA_WIDTH-1 downto 0"), 2);
    }

    #[test]
    fn configuration_is_applied() {
        let cfg = Config::from_str(
            r#"
[bench]
clock-half-period = 4
settle-delay = 2
instance-name = "dut"
architecture-name = "bench"
suffix = "_test"

[generics]
width = "16"

[format]
tab-size = 4
"#,
        )
        .unwrap();
        let entity = vhdl::parse(P_1).unwrap();
        let tb = generate(&entity, &cfg).unwrap();
        assert!(tb.contains("entity counter_test is"));
        assert!(tb.contains("architecture bench of counter_test is"));
        assert!(tb.contains("    constant WIDTH : integer := 16;\n"));
        assert!(tb.contains("    dut : counter\n"));
        assert!(tb.contains("wait for 4 ns;"));
        assert!(tb.contains("        en <= '1';\n        wait for 2 ns;\n"));
    }

    #[test]
    fn oversized_vector_is_driven_structurally() {
        let entity = vhdl::parse(
            "entity big is port ( d : in std_logic_vector(18446744073709551615 downto 0) ); end;",
        )
        .unwrap();
        let tb = generate(&entity, &Config::new()).unwrap();
        assert!(tb.contains("    d <= (others => '0');\n    d(0) <= '1';\n"));
    }

    #[test]
    fn large_exhaustive_limit() {
        let decls: Vec<String> = (0..70).map(|i| format!("i{} : in bit", i)).collect();
        let text = format!("entity wide is port ( {} ); end;", decls.join("; "));
        let cfg = Config::from_str("[stimulus]\nexhaustive-limit = 100\n").unwrap();
        let tb = generate(&vhdl::parse(&text).unwrap(), &cfg).unwrap();
        assert_eq!(count(&tb, "-- combination "), 16);
    }

    #[test]
    fn generate_from_record() {
        let entity = vhdl::parse(P_1).unwrap();
        let restored = record::from_json(&record::to_json(&entity).unwrap()).unwrap();
        assert_eq!(
            generate(&restored, &Config::new()).unwrap(),
            generate(&entity, &Config::new()).unwrap()
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let entity = vhdl::parse(P_3).unwrap();
        let cfg = Config::new();
        assert_eq!(generate(&entity, &cfg), generate(&entity, &cfg));
    }

    #[test]
    fn mismatched_name_is_rejected() {
        let text = "entity foo is port ( a : in bit ); end bar;";
        assert_eq!(
            vhdl::parse(text),
            Err(VhdlError::NameMismatch(String::from("foo"), String::from("bar")))
        );
    }
}
