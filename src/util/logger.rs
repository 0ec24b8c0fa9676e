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
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::str::FromStr;

/// Writes log records to stderr with a colored level prefix.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Decides the most detailed level to display.
    ///
    /// A valid level named in `env` takes priority over `verbose`.
    pub fn level(verbose: bool, env: Option<&str>) -> LevelFilter {
        if let Some(lvl) = env.and_then(|s| LevelFilter::from_str(s).ok()) {
            return lvl;
        }
        match verbose {
            true => LevelFilter::Info,
            false => LevelFilter::Warn,
        }
    }

    /// Installs the logger; later calls only update the level.
    pub fn init(level: LevelFilter) {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    }

    fn prefix(level: Level) -> String {
        match level {
            Level::Error => "error".red().bold().to_string(),
            Level::Warn => "warning".yellow().bold().to_string(),
            Level::Info => "info".green().to_string(),
            Level::Debug => "debug".blue().to_string(),
            Level::Trace => "trace".dimmed().to_string(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) == false {
            return;
        }
        match record.level() {
            Level::Debug | Level::Trace => eprintln!(
                "{}: [{}] {}",
                Self::prefix(record.level()),
                record.target(),
                record.args()
            ),
            _ => eprintln!("{}: {}", Self::prefix(record.level()), record.args()),
        }
    }

    fn flush(&self) {}
}
