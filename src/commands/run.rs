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

use super::generate::{load_entity, render_bench, save, top_name};
use crate::commands::helps::run;
use crate::core::context::Context;
use crate::core::lang::SourceKind;
use crate::core::record;
use crate::core::target::Process;
use crate::error::{Error, Hint};
use crate::util::anyerror::{AnyError, Fault};
use crate::util::environment::Environment;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::{Path, PathBuf};

const DEFAULT_OUT_DIR: &str = "build";

#[derive(Debug, PartialEq)]
pub struct Run {
    file: PathBuf,
    out_dir: Option<PathBuf>,
    command: Option<String>,
}

impl Subcommand<Context> for Run {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(run::HELP))?;
        Ok(Run {
            out_dir: cli.get(Arg::option("out-dir").value("dir"))?,
            command: cli.get(Arg::option("command").value("cmd"))?,
            file: cli.require(Arg::positional("file"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let (entity, kind) = load_entity(&self.file)?;
        let config = c.get_config();

        // render every file before writing any of them
        let top = top_name(&entity, config);
        let bench_file = format!("{}.vhd", top);
        let mut files = vec![
            (bench_file.clone(), render_bench(&entity, config)?),
            (format!("{}.json", entity.name()), record::to_json(&entity)?),
        ];
        if kind == SourceKind::Vhdl {
            let name = source_copy_name(&self.file, &files)?;
            files.push((name, std::fs::read_to_string(&self.file)?));
        }

        let out_dir = c
            .get_root()
            .join(self.out_dir.unwrap_or(PathBuf::from(DEFAULT_OUT_DIR)));
        save(&out_dir, &files)?;
        let out_dir = std::fs::canonicalize(&out_dir)?;

        let env = Environment::new()
            .from_bench(
                entity.name().as_str(),
                &top,
                &out_dir.join(&bench_file),
                &out_dir,
            )
            .from_config(config);

        let sim = config.get_simulator().root(c.get_root().clone());
        if c.is_verbose() == true {
            env.iter().for_each(|e| log::info!("{:?}", e));
        }
        let report = sim.execute(&self.command, &out_dir, &env)?;
        report.display();
        report.into_result()?;
        Ok(())
    }
}

/// Names the copy of the source `file` placed beside the generated `files`.
///
/// The comparison ignores case so the copy never replaces a generated file on
/// a case-insensitive filesystem.
fn source_copy_name(file: &Path, files: &[(String, String)]) -> Result<String, Fault> {
    let name = file
        .file_name()
        .ok_or(AnyError(format!("path {:?} has no file name", file)))?
        .to_string_lossy()
        .to_string();
    match files.iter().find(|(f, _)| f.eq_ignore_ascii_case(&name)) {
        Some((f, _)) => Err(Error::OutputNameCollision(
            file.to_path_buf(),
            f.clone(),
            Hint::RenameSource,
        ))?,
        None => Ok(name),
    }
}
