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

//! The environment store (`spec.md` §4.1, component C1): an ordered
//! mapping of variable name to value, backing both expansion and the
//! `cd`/`export`/`env`/`unset` builtins.
//!
//! Order is insertion order for `get`/`set`/`unset`/`entries`, as
//! `indexmap::IndexMap` gives for free; `export(sorted=true)` re-sorts a
//! copy for display. The store does not distinguish "exported" from
//! "local" variables: every entry is visible to expansion and is passed
//! to child processes, matching the flat single environment the minishell
//! reference implementation this shell's behavior was checked against
//! uses (there is no separate shell-local variable scope in `spec.md`'s
//! data model).

use crate::error::EnvError;
use indexmap::IndexMap;
use std::ffi::CString;

/// `spec.md` §4.1: `Variable names MUST match [A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ordered mapping of variable name to value (`spec.md` §3, §4.1).
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: IndexMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            vars: IndexMap::new(),
        }
    }

    /// Builds an environment from the host process's inherited variables
    /// (`spec.md` §6: "Environment is inherited from the invoking
    /// process").
    pub fn from_host() -> Self {
        let mut env = Environment::new();
        for (name, value) in std::env::vars() {
            // The host environment cannot contain invalid identifiers in
            // practice, but guard anyway rather than panic on exotic entries.
            if is_valid_identifier(&name) {
                env.vars.insert(name, value);
            }
        }
        env
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Inserts or updates `name`. Preserves insertion-order position on
    /// update (`spec.md` §4.1: "preserves order on update").
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), EnvError> {
        if !is_valid_identifier(name) {
            return Err(EnvError::InvalidIdentifier(name.to_string()));
        }
        if let Some(slot) = self.vars.get_mut(name) {
            *slot = value.into();
        } else {
            self.vars.insert(name.to_string(), value.into());
        }
        Ok(())
    }

    /// Removes `name` if present; no-op otherwise (`spec.md` §4.1).
    pub fn unset(&mut self, name: &str) {
        self.vars.shift_remove(name);
    }

    /// Entries in insertion order, for the `env` builtin.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries sorted lexicographically by name, for `export` with no
    /// arguments (`spec.md` §6).
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self.entries().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Renders the environment as `NAME=VALUE\0`-terminated `CString`s
    /// suitable for `execve`'s `envp` (`spec.md` §4.9 passes the
    /// environment through to the spawned process unchanged).
    pub fn to_exec_strings(&self) -> Vec<CString> {
        self.vars
            .iter()
            .filter_map(|(k, v)| CString::new(format!("{k}={v}")).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers() {
        assert!(is_valid_identifier("FOO"));
        assert!(is_valid_identifier("_foo9"));
        assert!(!is_valid_identifier("9foo"));
        assert!(!is_valid_identifier("foo-bar"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn set_get_unset_roundtrip() {
        let mut env = Environment::new();
        env.set("FOO", "bar").unwrap();
        assert_eq!(env.get("FOO"), Some("bar"));
        env.unset("FOO");
        assert_eq!(env.get("FOO"), None);
    }

    #[test]
    fn set_rejects_invalid_name() {
        let mut env = Environment::new();
        assert_eq!(
            env.set("1bad", "x"),
            Err(EnvError::InvalidIdentifier("1bad".to_string()))
        );
    }

    #[test]
    fn update_preserves_insertion_order() {
        let mut env = Environment::new();
        env.set("A", "1").unwrap();
        env.set("B", "2").unwrap();
        env.set("A", "3").unwrap();
        let names: Vec<&str> = env.entries().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(env.get("A"), Some("3"));
    }

    #[test]
    fn unset_preserves_remaining_order() {
        let mut env = Environment::new();
        env.set("A", "1").unwrap();
        env.set("B", "2").unwrap();
        env.set("C", "3").unwrap();
        env.unset("B");
        let names: Vec<&str> = env.entries().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn sorted_entries_orders_lexicographically() {
        let mut env = Environment::new();
        env.set("ZEBRA", "1").unwrap();
        env.set("APPLE", "2").unwrap();
        let sorted = env.sorted_entries();
        assert_eq!(sorted[0].0, "APPLE");
        assert_eq!(sorted[1].0, "ZEBRA");
    }
}
