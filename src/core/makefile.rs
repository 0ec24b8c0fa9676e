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

use std::path::PathBuf;

pub const MAKEFILE: &str = "Makefile";

/// A GHDL build recipe for simulating a testbench.
#[derive(Debug, PartialEq)]
pub struct Makefile {
    entity_name: String,
    sources: Vec<PathBuf>,
    output_dir: PathBuf,
    top: String,
}

impl Makefile {
    /// Creates a recipe that analyzes `sources` in order and runs `top`.
    pub fn new(entity_name: &str, sources: Vec<PathBuf>, output_dir: PathBuf, top: &str) -> Self {
        Self {
            entity_name: entity_name.to_string(),
            sources,
            output_dir,
            top: top.to_string(),
        }
    }
}

impl std::fmt::Display for Makefile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources = self
            .sources
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(
            f,
            "\
# Makefile for simulating the testbench of entity '{}'

GHDL ?= ghdl
GHDL_FLAGS ?= --std=08

VHDL_SOURCES = {}
TOPLEVEL = {}
SIM_BUILD = {}

.PHONY: all analyze elaborate run clean

all: run

analyze:
\tmkdir -p $(SIM_BUILD)
\t$(GHDL) -a $(GHDL_FLAGS) --workdir=$(SIM_BUILD) $(VHDL_SOURCES)

elaborate: analyze
\t$(GHDL) -e $(GHDL_FLAGS) --workdir=$(SIM_BUILD) $(TOPLEVEL)

run: elaborate
\t$(GHDL) -r $(GHDL_FLAGS) --workdir=$(SIM_BUILD) $(TOPLEVEL) --vcd=$(SIM_BUILD)/$(TOPLEVEL).vcd

clean::
\trm -rf $(SIM_BUILD)
\trm -rf *.o
\trm -rf *.vcd
\trm -f results.xml
\trm -f $(TOPLEVEL)
",
            self.entity_name,
            sources,
            self.top,
            self.output_dir.display(),
        )
    }
}
