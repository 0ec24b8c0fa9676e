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

pub const HELP: &str = r#"Tbgen generates VHDL testbenches from entity declarations.

Usage:
    tbgen [options] <command>

Commands:
    parse                 read an entity into an interchange record
    generate              write a testbench for an entity
    run                   generate a testbench and simulate it
    check                 verify that a testbench instantiates an entity

Options:
    --config <path>       configuration file to load
    --color <when>        coloring: auto, always, never
    --verbose, -v         report each step as it happens
    --version             print version information and exit
    --help, -h            print help information

Use 'tbgen <command> --help' for more information about a command."#;
