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

use crate::util::anyerror::Fault;
use crate::util::environment::Environment;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::NamedTempFile;

/// Resolves a relative path into a full path if given relative to some `root` path.
///
/// Paths that do not exist under `root` are left untouched, so bare program
/// names keep resolving through the search path.
pub fn resolve_rel_path(root: &PathBuf, s: String) -> String {
    let resolved_path = root.join(&s);
    if Path::exists(&resolved_path) == true {
        if PathBuf::from(&s).is_relative() == true {
            // write out full path
            resolved_path.display().to_string()
        } else {
            s
        }
    } else {
        s
    }
}

/// Writes `contents` to `path` so that the file is either fully written or
/// left untouched.
///
/// The data first goes to a temporary file in the same directory, which then
/// replaces `path`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), Fault> {
    let dir = match path.parent() {
        Some(p) if p.as_os_str().is_empty() == false => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)?;
    log::info!("wrote {:?}", path);
    Ok(())
}

/// Runs `command` with `args` from the directory `root` and waits for it to
/// exit, capturing its stdout and stderr.
pub fn invoke(
    root: &Path,
    command: &str,
    args: &[String],
    env: &Environment,
) -> std::io::Result<Output> {
    log::debug!("invoking {:?} {:?} in {:?}", command, args, root);
    std::process::Command::new(command)
        .args(args)
        .envs(env.iter().map(|e| (e.get_key(), e.get_value())))
        .current_dir(root)
        .output()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::environment::EnvVar;

    #[test]
    fn resolve_path_simple() {
        let rel_root = std::env::current_dir().unwrap();
        // expands relative path to full path
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("src/lib.rs")),
            rel_root.join("src/lib.rs").display().to_string()
        );
        // expands relative path to full path
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("./src/lib.rs")),
            rel_root.join("./src/lib.rs").display().to_string()
        );
        // no file or directory named 'bash' at the relative root
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("bash")),
            String::from("bash")
        );
        // not relative
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("/src")),
            String::from("/src")
        );
    }

    #[test]
    fn atomic_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.vhd");
        write_atomic(&path, "first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        // no temporary files are left behind
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn invoke_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::new().overwrite(EnvVar::with("TBGEN_TEST_VALUE", "42"));
        let out = invoke(
            dir.path(),
            "sh",
            &[
                String::from("-c"),
                String::from("echo $TBGEN_TEST_VALUE; echo oops 1>&2; exit 3"),
            ],
            &env,
        )
        .unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "42\n");
        assert_eq!(String::from_utf8_lossy(&out.stderr), "oops\n");
        assert_eq!(out.status.code(), Some(3));
    }
}
