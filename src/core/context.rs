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

use crate::core::config::Config;
use crate::util::anyerror::Fault;
use crate::util::environment::{Environment, TBGEN_CONFIG};
use std::env;
use std::path::PathBuf;

/// Shared state handed to every subcommand.
#[derive(Debug)]
pub struct Context {
    root: PathBuf,
    config: Config,
    verbose: bool,
}

impl Context {
    pub fn new() -> Context {
        Context {
            root: PathBuf::new(),
            config: Config::new(),
            verbose: false,
        }
    }

    pub fn retain_options(mut self, verbose: bool) -> Context {
        self.verbose = verbose;
        self
    }

    /// Sets the directory that relative paths in the configuration are
    /// resolved against, the current working directory.
    pub fn current_dir(mut self) -> Result<Context, ContextError> {
        self.root = env::current_dir().map_err(|e| {
            ContextError(format!("failed to get current directory: {}", e))
        })?;
        Ok(self)
    }

    /// Loads the configuration from `path`, falling back to the locations
    /// searched by [Config::resolve].
    pub fn config(mut self, path: Option<&PathBuf>) -> Result<Context, Fault> {
        self.config = Config::resolve(path, Environment::read(TBGEN_CONFIG))?;
        Ok(self)
    }

    /// Access the configuration data.
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_root(&self) -> &PathBuf {
        &self.root
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug)]
pub struct ContextError(String);

impl std::error::Error for ContextError {}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "[bench]\nsuffix = \"_sim\"\n").unwrap();
        let c = Context::new()
            .retain_options(true)
            .current_dir()
            .unwrap()
            .config(Some(&path))
            .unwrap();
        assert_eq!(c.get_config().get_bench().get_suffix(), "_sim");
        assert_eq!(c.is_verbose(), true);
        assert_eq!(c.get_root(), &env::current_dir().unwrap());
    }
}
