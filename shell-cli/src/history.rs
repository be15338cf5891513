// This file is part of posh, a POSIX-style interactive command shell.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Command history persistence (`spec.md` §6).
//!
//! The file is one command per line, UTF-8, LF-terminated, no
//! escaping. Loading keeps at most [`DEFAULT_LOAD_LIMIT`] most-recent
//! entries; saving caps the on-disk file at [`DEFAULT_SAVE_CAP`]
//! entries, dropping the oldest to fit, via a `_tmp`-suffixed sibling
//! file that is renamed into place once fully written (`spec.md` §6:
//! "a temporary file ... is used during trim-and-rewrite").

use std::io::Write;
use std::path::{Path, PathBuf};

/// `M` in `spec.md` §6: in-memory entries kept after loading.
pub const DEFAULT_LOAD_LIMIT: usize = 1000;
/// `F` in `spec.md` §6: on-disk entries kept after saving.
pub const DEFAULT_SAVE_CAP: usize = 2000;

/// Resolves the history file path once, relative to the process's
/// starting working directory. Not re-resolved after `cd`, since
/// `$PWD` is itself mutable mid-session (`SPEC_FULL.md` §15).
pub fn resolve_path(shell_name: &str) -> PathBuf {
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    dir.join(format!("{shell_name}_history"))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push("_tmp");
    path.with_file_name(name)
}

/// Loads history at startup, keeping only the `limit` most recent
/// entries. Missing or unreadable files yield an empty history rather
/// than an error — a fresh shell with no prior history is not a fault.
pub fn load(path: &Path, limit: usize) -> Vec<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    let mut lines: Vec<String> = contents
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    if lines.len() > limit {
        let skip = lines.len() - limit;
        lines.drain(0..skip);
    }
    lines
}

/// Saves `entries` in chronological order, trimming to `cap` by
/// dropping the oldest entries first.
pub fn save(path: &Path, entries: &[String], cap: usize) -> std::io::Result<()> {
    let trimmed: &[String] = if entries.len() > cap {
        &entries[entries.len() - cap..]
    } else {
        entries
    };

    let tmp_path = tmp_path_for(path);
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        for line in trimmed {
            writeln!(file, "{line}")?;
        }
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("posh_history_test_{name}_{}", std::process::id()))
    }

    #[test]
    fn load_keeps_only_the_most_recent_entries() {
        let path = temp_file("load_limit");
        std::fs::write(&path, "a\nb\nc\nd\n").unwrap();
        let loaded = load(&path, 2);
        assert_eq!(loaded, vec!["c".to_string(), "d".to_string()]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let path = temp_file("missing_does_not_exist");
        let loaded = load(&path, 10);
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_trims_to_cap_and_round_trips() {
        let path = temp_file("save_roundtrip");
        let entries: Vec<String> = (0..5).map(|i| format!("cmd{i}")).collect();
        save(&path, &entries, 3).unwrap();
        let reloaded = load(&path, 10);
        assert_eq!(reloaded, vec!["cmd2", "cmd3", "cmd4"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_leaves_no_tmp_file_behind() {
        let path = temp_file("save_no_tmp_left");
        save(&path, &["only".to_string()], 10).unwrap();
        assert!(!tmp_path_for(&path).exists());
        let _ = std::fs::remove_file(&path);
    }
}
