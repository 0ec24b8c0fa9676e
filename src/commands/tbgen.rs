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

use crate::commands::check::Check;
use crate::commands::generate::Generate;
use crate::commands::helps::tbgen;
use crate::commands::parse::Parse;
use crate::commands::run::Run;
use crate::core::context::Context;
use crate::error::{Error, Hint};
use crate::util::environment::{Environment, NO_COLOR, TBGEN_LOG};
use crate::util::logger::Logger;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// When to write colored output.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Sets the coloring for the rest of the program. `Auto` turns color off
    /// when `no_color` is set and otherwise leaves the decision to the terminal.
    pub fn apply(&self, no_color: bool) {
        match self {
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
            Self::Auto => {
                if no_color == true {
                    colored::control::set_override(false)
                }
            }
        }
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(Error::InvalidColorMode(s.to_string(), Hint::ColorModes)),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Tbgen {
    version: bool,
    verbose: bool,
    color: Option<ColorMode>,
    config: Option<PathBuf>,
    command: Option<TbgenSubcommand>,
}

impl Command for Tbgen {
    fn interpret(cli: &mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(tbgen::HELP))?;
        Ok(Tbgen {
            // Flags
            version: cli.check(Arg::flag("version"))?,
            verbose: cli.check(Arg::flag("verbose").switch('v'))?,
            // Options
            color: cli.get(Arg::option("color").value("when"))?,
            config: cli.get(Arg::option("config").value("path"))?,
            // Subcommands
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // set the coloring mode before anything is written
        self.color
            .unwrap_or(ColorMode::Auto)
            .apply(Environment::read(NO_COLOR).is_some());
        Logger::init(Logger::level(
            self.verbose,
            Environment::read(TBGEN_LOG).as_deref(),
        ));

        if self.version == true {
            println!("tbgen {}", VERSION);
            return Ok(());
        }

        match self.command {
            Some(command) => {
                let context = Context::new()
                    .retain_options(self.verbose)
                    .current_dir()?
                    .config(self.config.as_ref())?;
                command.execute(&context)
            }
            None => {
                println!("{}", tbgen::HELP);
                Ok(())
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum TbgenSubcommand {
    Parse(Parse),
    Generate(Generate),
    Run(Run),
    Check(Check),
}

impl Subcommand<Context> for TbgenSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli.select(&["parse", "generate", "run", "check"])?.as_ref() {
            "parse" => Ok(TbgenSubcommand::Parse(Parse::interpret(cli)?)),
            "generate" => Ok(TbgenSubcommand::Generate(Generate::interpret(cli)?)),
            "run" => Ok(TbgenSubcommand::Run(Run::interpret(cli)?)),
            "check" => Ok(TbgenSubcommand::Check(Check::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, c: &Context) -> proc::Result {
        match self {
            TbgenSubcommand::Parse(sub) => sub.execute(c),
            TbgenSubcommand::Generate(sub) => sub.execute(c),
            TbgenSubcommand::Run(sub) => sub.execute(c),
            TbgenSubcommand::Check(sub) => sub.execute(c),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn color_modes() {
        assert_eq!(ColorMode::from_str("auto"), Ok(ColorMode::Auto));
        assert_eq!(ColorMode::from_str("ALWAYS"), Ok(ColorMode::Always));
        assert_eq!(ColorMode::from_str("never"), Ok(ColorMode::Never));
        assert_eq!(
            ColorMode::from_str("sometimes"),
            Err(Error::InvalidColorMode(
                String::from("sometimes"),
                Hint::ColorModes
            ))
        );
    }
}
