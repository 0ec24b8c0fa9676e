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

use crate::core::bench::stimulus::{Delay, Limits};
use crate::core::lang::vhdl::format::VhdlFormat;
use crate::core::target::Simulator;
use crate::error::{Error, LastError};
use crate::util::anyerror::Fault;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "tbgen.toml";

pub trait FromFile: FromStr
where
    Self: Sized,
{
    fn from_file(path: &Path) -> Result<Self, Fault>;
}

/// Timing and naming of the generated testbench.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bench {
    /// A zero period would never let simulation time advance.
    #[serde(rename = "clock-half-period")]
    clock_half_period: Option<NonZeroU64>,
    #[serde(rename = "settle-delay")]
    settle_delay: Option<u64>,
    #[serde(rename = "reset-duration")]
    reset_duration: Option<u64>,
    #[serde(rename = "instance-name")]
    instance_name: Option<String>,
    #[serde(rename = "architecture-name")]
    architecture_name: Option<String>,
    suffix: Option<String>,
}

impl Bench {
    pub fn get_clock_half_period(&self) -> Delay {
        Delay::new(self.clock_half_period.map_or(5, |n| n.get()))
    }

    pub fn get_settle_delay(&self) -> Delay {
        Delay::new(self.settle_delay.unwrap_or(10))
    }

    pub fn get_reset_duration(&self) -> Delay {
        Delay::new(self.reset_duration.unwrap_or(20))
    }

    pub fn get_instance_name(&self) -> &str {
        self.instance_name.as_deref().unwrap_or("uut")
    }

    pub fn get_architecture_name(&self) -> &str {
        self.architecture_name.as_deref().unwrap_or("sim")
    }

    pub fn get_suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or("_tb")
    }
}

/// Bounds on how much stimulus is enumerated.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StimulusSettings {
    #[serde(rename = "exhaustive-limit")]
    exhaustive_limit: Option<usize>,
    #[serde(rename = "max-combinations")]
    max_combinations: Option<usize>,
}

impl StimulusSettings {
    pub fn get_limits(&self) -> Limits {
        let default = Limits::default();
        Limits {
            exhaustive_limit: self.exhaustive_limit.unwrap_or(default.exhaustive_limit),
            max_combinations: self.max_combinations.unwrap_or(default.max_combinations),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    bench: Option<Bench>,
    stimulus: Option<StimulusSettings>,
    format: Option<VhdlFormat>,
    /// Values for the testbench constants, keyed by generic name.
    generics: Option<BTreeMap<String, String>>,
    simulator: Option<Simulator>,
    env: Option<BTreeMap<String, String>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from the first location that applies:
    /// `path`, then the `TBGEN_CONFIG` environment variable, then
    /// `tbgen.toml` in the current directory. Defaults are used when no file
    /// is found.
    pub fn resolve(path: Option<&PathBuf>, env_path: Option<String>) -> Result<Self, Fault> {
        let explicit = path.cloned().or(env_path.map(PathBuf::from));
        match explicit {
            Some(p) => Self::from_file(&p),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                match local.is_file() {
                    true => Self::from_file(&local),
                    false => {
                        log::debug!("no configuration file found; using defaults");
                        Ok(Self::new())
                    }
                }
            }
        }
    }

    pub fn get_bench(&self) -> Bench {
        self.bench.clone().unwrap_or_default()
    }

    pub fn get_limits(&self) -> Limits {
        self.stimulus.clone().unwrap_or_default().get_limits()
    }

    pub fn get_vhdl_formatting(&self) -> VhdlFormat {
        let mut fmt = self.format.clone().unwrap_or_default();
        fmt.merge(Some(VhdlFormat::new()));
        fmt
    }

    /// Looks up the configured value for a generic, ignoring case.
    pub fn get_generic(&self, name: &str) -> Option<&str> {
        self.generics
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_simulator(&self) -> Simulator {
        self.simulator.clone().unwrap_or_default()
    }

    pub fn get_env(&self) -> Option<&BTreeMap<String, String>> {
        self.env.as_ref()
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl FromFile for Config {
    fn from_file(path: &Path) -> Result<Self, Fault> {
        // verify the path exists
        if path.is_file() == false {
            return Err(Error::ConfigInvalid(
                path.to_path_buf(),
                LastError(String::from("file does not exist")),
            ))?;
        }
        let contents = std::fs::read_to_string(&path)?;
        log::info!("loading configuration from {:?}", path);
        match Self::from_str(&contents) {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::ConfigInvalid(
                path.to_path_buf(),
                LastError(e.to_string()),
            ))?,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::target::Process;

    const C_0: &str = r#"
# This is a blank configuration file.
"#;

    const C_1: &str = r#"
[bench]
clock-half-period = 4
suffix = "_bench"

[stimulus]
max-combinations = 32

[format]
tab-size = 4

[generics]
WIDTH = "16"

[simulator]
command = "python"
args = ["sim.py", "--wave"]

[env]
GHDL_STD = "08"
"#;

    #[test]
    fn parse_empty_config() {
        let cfg = Config::from_str(C_0).unwrap();
        assert_eq!(cfg, Config::new());
        let bench = cfg.get_bench();
        assert_eq!(bench.get_clock_half_period(), Delay::new(5));
        assert_eq!(bench.get_settle_delay(), Delay::new(10));
        assert_eq!(bench.get_reset_duration(), Delay::new(20));
        assert_eq!(bench.get_instance_name(), "uut");
        assert_eq!(bench.get_architecture_name(), "sim");
        assert_eq!(bench.get_suffix(), "_tb");
        assert_eq!(cfg.get_limits(), Limits::default());
        assert_eq!(cfg.get_vhdl_formatting().get_tab_size(), 2);
    }

    #[test]
    fn parse_basic_config() {
        let cfg = Config::from_str(C_1).unwrap();
        assert_eq!(cfg.get_bench().get_clock_half_period(), Delay::new(4));
        assert_eq!(cfg.get_bench().get_suffix(), "_bench");
        assert_eq!(cfg.get_limits().max_combinations, 32);
        assert_eq!(cfg.get_limits().exhaustive_limit, 8);
        assert_eq!(cfg.get_vhdl_formatting().get_tab_size(), 4);
        assert_eq!(cfg.get_generic("width"), Some("16"));
        assert_eq!(cfg.get_generic("DEPTH"), None);
        assert_eq!(cfg.get_simulator().get_command(), "python");
        assert_eq!(cfg.get_env().unwrap().get("GHDL_STD").unwrap(), "08");
    }

    #[test]
    fn zero_clock_period_is_rejected() {
        assert!(Config::from_str("[bench]\nclock-half-period = 0\n").is_err());
        assert!(Config::from_str("[bench]\nsettle-delay = 0\n").is_ok());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tbgen.toml");
        std::fs::write(&path, "[bench]\nclock-half-period = 0\n").unwrap();
        assert!(Config::resolve(Some(&path), None)
            .unwrap_err()
            .to_string()
            .starts_with("invalid configuration file"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_str("[bench]\nclock = 4\n").is_err());
        assert!(Config::from_str("[unknown]\n").is_err());
    }

    #[test]
    fn resolve_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, C_1).unwrap();
        let cfg = Config::resolve(Some(&path), None).unwrap();
        assert_eq!(cfg.get_bench().get_suffix(), "_bench");

        let cfg = Config::resolve(None, Some(path.display().to_string())).unwrap();
        assert_eq!(cfg.get_generic("WIDTH"), Some("16"));

        let missing = dir.path().join("missing.toml");
        assert!(Config::resolve(Some(&missing), None).is_err());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[bench]\nnope = 1\n").unwrap();
        assert!(Config::resolve(Some(&bad), None)
            .unwrap_err()
            .to_string()
            .contains("bad.toml"));
    }
}
