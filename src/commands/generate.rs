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

use crate::commands::helps::generate;
use crate::core::bench;
use crate::core::config::Config;
use crate::core::context::Context;
use crate::core::lang::vhdl::{self, entity::Entity};
use crate::core::lang::SourceKind;
use crate::core::makefile::{Makefile, MAKEFILE};
use crate::core::record;
use crate::error::{Error, Hint, LastError};
use crate::util::anyerror::{CodeFault, Fault};
use crate::util::filesystem;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::{Path, PathBuf};

/// Directory, relative to the makefile, where GHDL keeps its build files.
const SIM_BUILD: &str = "sim";

#[derive(Debug, PartialEq)]
pub struct Generate {
    file: PathBuf,
    out_dir: Option<PathBuf>,
    json: bool,
    makefile: bool,
}

impl Subcommand<Context> for Generate {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(generate::HELP))?;
        Ok(Generate {
            // Flags
            json: cli.check(Arg::flag("json"))?,
            makefile: cli.check(Arg::flag("makefile"))?,
            // Options
            out_dir: cli.get(Arg::option("out-dir").value("dir"))?,
            file: cli.require(Arg::positional("file"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let (entity, kind) = load_entity(&self.file)?;
        let text = render_bench(&entity, c.get_config())?;

        let dir = match &self.out_dir {
            Some(d) => d,
            None => {
                if self.json == true || self.makefile == true {
                    log::warn!("ignoring \"--json\" and \"--makefile\" without \"--out-dir\"");
                }
                print!("{}", text);
                return Ok(());
            }
        };

        let top = top_name(&entity, c.get_config());
        let bench_file = format!("{}.vhd", top);
        let mut files = Vec::new();
        if self.json == true {
            files.push((format!("{}.json", entity.name()), record::to_json(&entity)?));
        }
        if self.makefile == true {
            let mut sources = Vec::new();
            match kind {
                SourceKind::Vhdl => sources.push(std::fs::canonicalize(&self.file)?),
                SourceKind::Record => log::warn!(
                    "makefile does not list the source of entity {} when reading a record",
                    entity.name()
                ),
            }
            sources.push(PathBuf::from(&bench_file));
            let mf = Makefile::new(
                entity.name().as_str(),
                sources,
                PathBuf::from(SIM_BUILD),
                &top,
            );
            files.push((String::from(MAKEFILE), mf.to_string()));
        }
        files.insert(0, (bench_file, text));

        for path in save(dir, &files)? {
            println!("{}", path.display());
        }
        Ok(())
    }
}

/// Reads the entity described by `file`, either VHDL source code or an
/// interchange record.
pub fn load_entity(file: &Path) -> Result<(Entity, SourceKind), Fault> {
    let kind = SourceKind::detect(file).ok_or(Error::UnsupportedInputFile(
        file.to_path_buf(),
        Hint::InputExtensions,
    ))?;
    let source = file.display().to_string();
    let text = std::fs::read_to_string(file)
        .map_err(|e| CodeFault(Some(source.clone()), Box::new(e)))?;
    let entity = match kind {
        SourceKind::Vhdl => vhdl::parse(&text).map_err(|e| CodeFault(Some(source), Box::new(e)))?,
        SourceKind::Record => {
            record::from_json(&text).map_err(|e| CodeFault(Some(source), Box::new(e)))?
        }
    };
    log::info!("read entity {} from {:?}", entity.name(), file);
    Ok((entity, kind))
}

/// Creates the testbench text for `entity`.
pub fn render_bench(entity: &Entity, config: &Config) -> Result<String, Error> {
    bench::generate(entity, config).map_err(|e| {
        Error::GenerationFailed(entity.name().to_string(), LastError(e.to_string()))
    })
}

/// Names the testbench entity created for `entity`.
pub fn top_name(entity: &Entity, config: &Config) -> String {
    format!("{}{}", entity.name(), config.get_bench().get_suffix())
}

/// Writes each (file name, contents) pair into `dir`.
///
/// Every file is rendered before this is called, so a failure never leaves
/// behind a partially written file.
pub fn save(dir: &Path, files: &[(String, String)]) -> Result<Vec<PathBuf>, Fault> {
    std::fs::create_dir_all(dir)?;
    files
        .iter()
        .map(|(name, contents)| {
            let path = dir.join(name);
            filesystem::write_atomic(&path, contents)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const P_1: &str = r#"
entity adder is
    generic ( N : positive := 4 );
    port (
        a, b : in unsigned(N-1 downto 0);
        sum  : out unsigned(N downto 0)
    );
end entity adder;
"#;

    #[test]
    fn load_from_source_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("adder.vhd");
        std::fs::write(&src, P_1).unwrap();
        let (entity, kind) = load_entity(&src).unwrap();
        assert_eq!(kind, SourceKind::Vhdl);
        assert_eq!(entity.ports().len(), 3);

        let rec = dir.path().join("adder.json");
        std::fs::write(&rec, record::to_json(&entity).unwrap()).unwrap();
        let (restored, kind) = load_entity(&rec).unwrap();
        assert_eq!(kind, SourceKind::Record);
        assert_eq!(restored, entity);
    }

    #[test]
    fn load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("adder.txt");
        std::fs::write(&txt, P_1).unwrap();
        assert!(load_entity(&txt)
            .unwrap_err()
            .to_string()
            .contains("is not a supported input"));

        let bad = dir.path().join("bad.vhd");
        std::fs::write(&bad, "entity foo is port ( a : in bit ); end bar;").unwrap();
        let err = load_entity(&bad).unwrap_err().to_string();
        assert!(err.starts_with("failed to read file"));
        assert!(err.contains("bad.vhd"));
        assert!(err.contains("foo"));

        assert!(load_entity(&dir.path().join("missing.vhd")).is_err());
    }

    #[test]
    fn save_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("build");
        let paths = save(
            &out,
            &[
                (String::from("a_tb.vhd"), String::from("-- bench\n")),
                (String::from("a.json"), String::from("{}")),
            ],
        )
        .unwrap();
        assert_eq!(paths, vec![out.join("a_tb.vhd"), out.join("a.json")]);
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "{}");
    }

    #[test]
    fn names_follow_configuration() {
        let (entity, _) = {
            let dir = tempfile::tempdir().unwrap();
            let src = dir.path().join("adder.vhd");
            std::fs::write(&src, P_1).unwrap();
            load_entity(&src).unwrap()
        };
        assert_eq!(top_name(&entity, &Config::new()), "adder_tb");
        let text = render_bench(&entity, &Config::new()).unwrap();
        assert!(text.contains("constant N : positive := 4;"));
    }
}
