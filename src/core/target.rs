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

use crate::error::{Error, Hint, LastError};
use crate::util::anyerror::Fault;
use crate::util::environment::Environment;
use crate::util::filesystem;
use colored::Colorize;
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The external program that simulates a generated testbench.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Simulator {
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(skip_serializing, skip_deserializing)]
    root: Option<PathBuf>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            command: String::from("bash"),
            args: vec![String::from("scripts/run_simulation.sh")],
            root: None,
        }
    }
}

impl Simulator {
    /// Sets the root directory from where the command should reference paths from.
    pub fn root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }
}

impl std::fmt::Display for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.command,
            self.args
                .iter()
                .fold(String::new(), |x, y| { x + "\"" + &y + "\" " })
                .trim_end()
        )
    }
}

/// What a finished process wrote and how it exited.
#[derive(Debug, PartialEq)]
pub struct Report {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

impl Report {
    pub fn get_stdout(&self) -> &str {
        &self.stdout
    }

    pub fn get_code(&self) -> Option<i32> {
        self.code
    }

    /// Writes the captured streams and the exit status to the console.
    pub fn display(&self) {
        if self.stdout.is_empty() == false {
            print!("{}", self.stdout);
        }
        if self.stderr.is_empty() == false {
            eprint!("{}", self.stderr);
        }
        match self.code {
            Some(0) => println!("{}: exit code 0", "info".green()),
            Some(n) => println!("{}: exit code {}", "info".yellow(), n),
            None => println!("{}: no exit code (terminated by signal)", "info".yellow()),
        }
    }

    /// Maps a failed exit into an error.
    pub fn into_result(self) -> Result<Self, Error> {
        match self.code {
            Some(0) => Ok(self),
            Some(num) => Err(Error::ChildProcErrorCode(num)),
            None => Err(Error::ChildProcTerminated),
        }
    }
}

pub trait Process {
    fn get_root(&self) -> Option<&PathBuf>;

    fn get_command(&self) -> &String;

    fn get_args(&self) -> Vec<&String>;

    /// Runs the given `command` with the set `args` from the directory `cwd`
    /// and waits for it to exit.
    ///
    /// Relative paths in the command and arguments are resolved against the
    /// process root when they exist there.
    fn execute(
        &self,
        overloaded_command: &Option<String>,
        cwd: &Path,
        env: &Environment,
    ) -> Result<Report, Fault> {
        let command = match overloaded_command {
            Some(c) => c,
            None => self.get_command(),
        };

        let (command, args) = match self.get_root() {
            Some(root) => (
                filesystem::resolve_rel_path(root, command.to_string()),
                self.get_args()
                    .iter()
                    .map(|f| filesystem::resolve_rel_path(root, f.to_string()))
                    .collect::<Vec<String>>(),
            ),
            None => (
                command.to_string(),
                self.get_args().into_iter().cloned().collect(),
            ),
        };

        log::info!(
            "running: {} {}",
            command,
            args.iter()
                .fold(String::new(), |x, y| x + "\"" + &y + "\" ")
                .trim_end()
        );
        let output = filesystem::invoke(cwd, &command, &args, env).map_err(|e| {
            Error::SimulatorProcFailed(LastError(e.to_string()), Hint::SimulatorConfig)
        })?;

        Ok(Report {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        })
    }
}

impl Process for Simulator {
    fn get_root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    fn get_command(&self) -> &String {
        &self.command
    }

    fn get_args(&self) -> Vec<&String> {
        self.args.iter().collect()
    }
}
