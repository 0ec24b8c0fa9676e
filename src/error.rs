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

use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration file {0:?}: {1}")]
    ConfigInvalid(PathBuf, LastError),
    #[error("file {0:?} is not a supported input{1}")]
    UnsupportedInputFile(PathBuf, Hint),
    #[error("failed to generate testbench for entity {0:?}: {1}")]
    GenerationFailed(String, LastError),
    #[error("invalid value {0:?} for option \"--color\"{1}")]
    InvalidColorMode(String, Hint),
    #[error("exited with error code: {0}")]
    ChildProcErrorCode(i32),
    #[error("terminated by signal")]
    ChildProcTerminated,
    #[error("failed to execute simulator process: {0}{1}")]
    SimulatorProcFailed(LastError, Hint),
    #[error("testbench {0:?} is not compatible with entity {1:?}: {2}")]
    IncompatibleBench(PathBuf, String, LastError),
    #[error("source file {0:?} has the same name as the generated file {1:?}{2}")]
    OutputNameCollision(PathBuf, String, Hint),
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = match s.split_whitespace().next() {
            Some(w) => w,
            None => return s,
        };
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    InputExtensions,
    SourceOnly,
    ColorModes,
    SimulatorConfig,
    RenameSource,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InputExtensions => {
                "expecting VHDL source (.vhd, .vhdl) or an interchange record (.json)"
            }
            Self::SourceOnly => "expecting VHDL source (.vhd, .vhdl)",
            Self::ColorModes => "possible values are \"auto\", \"always\", and \"never\"",
            Self::SimulatorConfig => {
                "set the command to run under [simulator] in the configuration file or pass \"--command\""
            }
            Self::RenameSource => {
                "rename the source file or change the suffix under [bench] in the configuration file"
            }
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}
