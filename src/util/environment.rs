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
use std::collections::btree_set::BTreeSet;
use std::collections::btree_set::Iter;
use std::hash::Hash;
use std::path::Path;

#[derive(Eq)]
pub struct EnvVar {
    key: String,
    value: String,
}

impl PartialEq for EnvVar {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Ord for EnvVar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for EnvVar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for EnvVar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // only hash by the key name
        self.key.hash(state);
    }
}

impl EnvVar {
    pub fn with(key: &str, value: &str) -> Self {
        Self::new().key(key).value(value)
    }

    pub fn new() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Sets the environment key.
    pub fn key(mut self, s: &str) -> Self {
        // normalize the key name upon entry
        self.key = s.to_ascii_uppercase().replace('-', "_");
        self
    }

    /// Sets the environment value.
    pub fn value(mut self, s: &str) -> Self {
        self.value = s.to_owned();
        self
    }

    pub fn get_key(&self) -> &str {
        &self.key
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

impl std::fmt::Display for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// The variables handed to the simulator process.
pub struct Environment(BTreeSet<EnvVar>);

impl Environment {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, var: EnvVar) -> bool {
        self.0.insert(var)
    }

    /// Adds `var`, replacing any existing variable with the same key.
    pub fn overwrite(mut self, var: EnvVar) -> Self {
        self.0.replace(var);
        self
    }

    pub fn iter(&self) -> Iter<'_, EnvVar> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&EnvVar> {
        self.0.get(&EnvVar::new().key(key))
    }

    /// Loads the variables that describe the testbench being run.
    pub fn from_bench(self, entity: &str, top: &str, bench: &Path, out_dir: &Path) -> Self {
        self.overwrite(EnvVar::with(ENTITY_NAME, entity))
            .overwrite(EnvVar::with(TBGEN_TOP, top))
            .overwrite(EnvVar::with(TBGEN_BENCH, &bench.display().to_string()))
            .overwrite(EnvVar::with(TBGEN_OUT_DIR, &out_dir.display().to_string()))
    }

    /// Loads an `Environment` struct from a `Config` document.
    ///
    /// It searches the `[env]` table and collects all env variables. Entries
    /// never replace variables that are already set.
    pub fn from_config(mut self, config: &Config) -> Self {
        if let Some(map) = config.get_env() {
            map.iter().for_each(|(key, val)| {
                if self.insert(EnvVar::with(key, val)) == false {
                    log::warn!("ignoring [env] entry {:?}; the name is reserved", key);
                }
            });
        }
        self
    }

    pub fn read(key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        }
    }
}

pub const NO_COLOR: &str = "NO_COLOR";
pub const TBGEN_CONFIG: &str = "TBGEN_CONFIG";
pub const TBGEN_LOG: &str = "TBGEN_LOG";

pub const ENTITY_NAME: &str = "ENTITY_NAME";
pub const TBGEN_TOP: &str = "TBGEN_TOP";
pub const TBGEN_BENCH: &str = "TBGEN_BENCH";
pub const TBGEN_OUT_DIR: &str = "TBGEN_OUT_DIR";
