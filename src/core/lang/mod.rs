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

pub mod lexer;
pub mod vhdl;

use std::path::Path;

/// The kinds of files accepted as input.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SourceKind {
    /// VHDL source code (`.vhd`, `.vhdl`).
    Vhdl,
    /// An interchange record written by `tbgen parse` (`.json`).
    Record,
}

impl SourceKind {
    /// Determines the kind of `file` from its extension, ignoring case.
    pub fn detect(file: &Path) -> Option<Self> {
        let ext = file.extension()?.to_str()?.to_lowercase();
        match ext.as_ref() {
            "vhd" | "vhdl" => Some(Self::Vhdl),
            "json" => Some(Self::Record),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detect_kind() {
        assert_eq!(SourceKind::detect(Path::new("a/b.vhd")), Some(SourceKind::Vhdl));
        assert_eq!(SourceKind::detect(Path::new("B.VHDL")), Some(SourceKind::Vhdl));
        assert_eq!(SourceKind::detect(Path::new("r.json")), Some(SourceKind::Record));
        assert_eq!(SourceKind::detect(Path::new("x.v")), None);
        assert_eq!(SourceKind::detect(Path::new("noext")), None);
    }
}
