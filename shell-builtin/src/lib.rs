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

//! The seven builtins of `spec.md` §6, plus [`dispatch`], the registry
//! the executor consults to decide builtin-vs-external (`spec.md` §4.9).

pub mod cd;
pub mod common;
pub mod echo;
pub mod env;
pub mod exit;
pub mod export;
pub mod pwd;
pub mod unset;

pub use common::{Context, Outcome};

/// True iff `name` names one of the seven builtins. The executor uses
/// this to decide, before forking, whether a single-stage pipeline runs
/// in-process (`spec.md` §4.9).
pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "cd" | "echo" | "env" | "exit" | "export" | "pwd" | "unset"
    )
}

/// Runs the named builtin, or returns `None` if `name` is not a
/// builtin (in which case the caller should fall back to path
/// resolution and `exec`).
pub fn dispatch(name: &str, args: &[String], ctx: &mut Context) -> Option<Outcome> {
    match name {
        "cd" => Some(cd::main(ctx, args)),
        "echo" => Some(echo::main(ctx, args)),
        "env" => Some(env::main(ctx, args)),
        "exit" => Some(exit::main(ctx, args)),
        "export" => Some(export::main(ctx, args)),
        "pwd" => Some(pwd::main(ctx, args)),
        "unset" => Some(unset::main(ctx, args)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn recognizes_all_seven_builtins() {
        for name in ["cd", "echo", "env", "exit", "export", "pwd", "unset"] {
            assert!(is_builtin(name));
        }
        assert!(!is_builtin("ls"));
    }

    #[test]
    fn dispatch_returns_none_for_external_commands() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        assert!(dispatch("ls", &[], &mut ctx).is_none());
    }
}
