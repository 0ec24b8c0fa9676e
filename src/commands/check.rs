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
use crate::commands::helps::check;
use crate::core::bench::check::{self as compat, Missing};
use crate::core::context::Context;
use crate::core::lang::vhdl::entity::Entity;
use crate::error::{Error, LastError};
use crate::util::anyerror::{CodeFault, Fault};
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
pub struct Check {
    file: PathBuf,
    bench: PathBuf,
}

impl Subcommand<Context> for Check {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(check::HELP))?;
        Ok(Check {
            file: cli.require(Arg::positional("file"))?,
            bench: cli.require(Arg::positional("bench"))?,
        })
    }

    fn execute(self, _: &Context) -> proc::Result {
        let (entity, _) = load_entity(&self.file)?;
        verify(&entity, &self.bench)?;
        println!(
            "testbench {:?} is compatible with entity {}",
            self.bench,
            entity.name()
        );
        Ok(())
    }
}

/// Reads the testbench at `bench` and fails when it lacks any reference to
/// `entity`, listing every one that is missing.
fn verify(entity: &Entity, bench: &Path) -> Result<(), Fault> {
    let text = std::fs::read_to_string(bench)
        .map_err(|e| CodeFault(Some(bench.display().to_string()), Box::new(e)))?;
    let missing: Vec<Missing> = compat::check(entity, &text);
    if missing.is_empty() == false {
        let reasons: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
        return Err(Error::IncompatibleBench(
            bench.to_path_buf(),
            entity.name().to_string(),
            LastError(reasons.join("; ")),
        ))?;
    }
    log::info!("testbench {:?} references every port of {}", bench, entity.name());
    Ok(())
}
