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

use super::generate::load_entity;
use crate::commands::helps::parse;
use crate::core::context::Context;
use crate::core::lang::SourceKind;
use crate::core::record;
use crate::error::{Error, Hint};
use crate::util::filesystem;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct Parse {
    file: PathBuf,
    output: Option<PathBuf>,
}

impl Subcommand<Context> for Parse {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(parse::HELP))?;
        Ok(Parse {
            output: cli.get(Arg::option("output").switch('o').value("path"))?,
            file: cli.require(Arg::positional("file"))?,
        })
    }

    fn execute(self, _: &Context) -> proc::Result {
        // records are already parsed
        if SourceKind::detect(&self.file) != Some(SourceKind::Vhdl) {
            return Err(Error::UnsupportedInputFile(self.file, Hint::SourceOnly))?;
        }
        let (entity, _) = load_entity(&self.file)?;
        let json = record::to_json(&entity)?;
        match &self.output {
            Some(path) => filesystem::write_atomic(path, &json)?,
            None => println!("{}", json),
        }
        Ok(())
    }
}
