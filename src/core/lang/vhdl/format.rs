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

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Layout settings for generated VHDL code.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VhdlFormat {
    #[serde(rename = "tab-size")]
    tab_size: Option<u8>,
    #[serde(rename = "type-auto-alignment")]
    type_auto_alignment: Option<bool>,
    #[serde(rename = "type-offset")]
    type_offset: Option<u8>,
    #[serde(rename = "mapping-auto-alignment")]
    mapping_auto_alignment: Option<bool>,
    #[serde(rename = "mapping-offset")]
    mapping_offset: Option<u8>,
}

impl VhdlFormat {
    pub fn new() -> Self {
        Self {
            tab_size: Some(2),
            type_auto_alignment: Some(true),
            type_offset: Some(1),
            mapping_auto_alignment: Some(true),
            mapping_offset: Some(1),
        }
    }

    pub fn get_tab_size(&self) -> u8 {
        self.tab_size.unwrap_or(2)
    }

    /// Creates the whitespace for one level of indentation.
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.get_tab_size() as usize * level)
    }

    pub fn is_auto_type_aligned(&self) -> bool {
        self.type_auto_alignment.unwrap_or(true)
    }

    pub fn get_type_offset(&self) -> u8 {
        self.type_offset.unwrap_or(1)
    }

    pub fn is_auto_mapping_aligned(&self) -> bool {
        self.mapping_auto_alignment.unwrap_or(true)
    }

    pub fn get_mapping_offset(&self) -> u8 {
        self.mapping_offset.unwrap_or(1)
    }

    /// Merges any populated data from `rhs` into attributes that do not already
    /// have data defined in `self`.
    pub fn merge(&mut self, rhs: Option<Self>) -> () {
        if let Some(rhs) = rhs {
            if self.tab_size.is_some() == false {
                self.tab_size = rhs.tab_size
            }
            if self.type_auto_alignment.is_some() == false {
                self.type_auto_alignment = rhs.type_auto_alignment
            }
            if self.type_offset.is_some() == false {
                self.type_offset = rhs.type_offset
            }
            if self.mapping_auto_alignment.is_some() == false {
                self.mapping_auto_alignment = rhs.mapping_auto_alignment
            }
            if self.mapping_offset.is_some() == false {
                self.mapping_offset = rhs.mapping_offset
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        let fmt: VhdlFormat = toml::from_str("tab-size = 4").unwrap();
        assert_eq!(fmt.get_tab_size(), 4);
        assert_eq!(fmt.indent(2), "        ");
        assert_eq!(fmt.is_auto_type_aligned(), true);
        assert_eq!(fmt.get_mapping_offset(), 1);
    }

    #[test]
    fn merge_keeps_local_values() {
        let mut local: VhdlFormat = toml::from_str("type-auto-alignment = false").unwrap();
        local.merge(Some(VhdlFormat::new()));
        assert_eq!(local.is_auto_type_aligned(), false);
        assert_eq!(local.get_tab_size(), 2);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<VhdlFormat>("tabsize = 4").is_err());
    }
}
