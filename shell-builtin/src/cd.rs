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

//! `cd` built-in.
//!
//! # Synopsis
//!
//! ```text
//! cd [directory|-]
//! ```
//!
//! With no argument, changes to `$HOME`. With `-`, changes to `$OLDPWD`
//! and echoes the new working directory. `$PWD` and `$OLDPWD` are
//! updated on every successful change (`spec.md` §6).

use crate::common::{write_stderr, Context, Outcome, MISUSE};

pub fn main(ctx: &mut Context, args: &[String]) -> Outcome {
    if args.len() > 1 {
        write_stderr("cd: too many arguments");
        return Outcome::status(MISUSE);
    }

    let (target, announce) = if args.is_empty() {
        match ctx.env.get("HOME") {
            Some(home) => (home.to_string(), false),
            None => {
                write_stderr("cd: HOME not set");
                return Outcome::status(1);
            }
        }
    } else if args[0] == "-" {
        match ctx.env.get("OLDPWD") {
            Some(old) => (old.to_string(), true),
            None => {
                write_stderr("cd: OLDPWD not set");
                return Outcome::status(1);
            }
        }
    } else {
        (args[0].clone(), false)
    };

    let previous = std::env::current_dir().ok();

    if let Err(e) = std::env::set_current_dir(&target) {
        write_stderr(&format!("cd: {target}: {e}"));
        return Outcome::status(1);
    }

    if let Some(previous) = previous {
        let _ = ctx.env.set("OLDPWD", previous.to_string_lossy().into_owned());
    }
    let _ = ctx.env.set("PWD", target.clone());

    if announce {
        println!("{target}");
    }

    Outcome::success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn rejects_more_than_one_argument() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(&mut ctx, &["a".to_string(), "b".to_string()]);
        assert_eq!(outcome.exit_status, MISUSE);
    }

    #[test]
    fn no_args_without_home_fails() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(&mut ctx, &[]);
        assert_eq!(outcome.exit_status, 1);
    }

    #[test]
    fn dash_without_oldpwd_fails() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(&mut ctx, &["-".to_string()]);
        assert_eq!(outcome.exit_status, 1);
    }

    #[test]
    fn changes_to_tmp_and_updates_pwd() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(&mut ctx, &["/tmp".to_string()]);
        assert_eq!(outcome, Outcome::success());
        assert_eq!(ctx.env.get("PWD"), Some("/tmp"));
    }
}
