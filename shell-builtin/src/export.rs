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

//! `export` built-in.
//!
//! With no arguments, prints every variable sorted by name,
//! `declare -x NAME="VALUE"` style. With one or more `NAME[=VALUE]`
//! arguments: `NAME=VALUE` sets the value; a bare `NAME` marks it
//! present, creating it with an empty value if it did not already
//! exist. Since this shell's environment store makes no
//! exported/local distinction, "marking" a name that already exists is
//! a no-op (`spec.md` §6, §4.1).
//!
//! An invalid name among the arguments reports an error and sets exit
//! status 1, but the remaining arguments are still processed
//! (`spec.md` §6: "invalid names → code 1 with message, other args
//! still processed").

use crate::common::{write_stderr, Context, Outcome};
use shell_env::is_valid_identifier;

fn print_sorted(ctx: &Context) {
    for (name, value) in ctx.env.sorted_entries() {
        println!("declare -x {name}=\"{value}\"");
    }
}

pub fn main(ctx: &mut Context, args: &[String]) -> Outcome {
    if args.is_empty() {
        print_sorted(ctx);
        return Outcome::success();
    }

    let mut exit_status = 0;
    for arg in args {
        let (name, value) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (arg.as_str(), None),
        };

        if !is_valid_identifier(name) {
            write_stderr(&format!("export: `{name}': not a valid identifier"));
            exit_status = 1;
            continue;
        }

        match value {
            Some(value) => {
                let _ = ctx.env.set(name, value);
            }
            None if ctx.env.get(name).is_none() => {
                let _ = ctx.env.set(name, "");
            }
            None => {}
        }
    }
    Outcome::status(exit_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn sets_name_equals_value() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(&mut ctx, &["FOO=bar".to_string()]);
        assert_eq!(outcome, Outcome::success());
        assert_eq!(ctx.env.get("FOO"), Some("bar"));
    }

    #[test]
    fn bare_name_creates_empty_value_if_absent() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        main(&mut ctx, &["FOO".to_string()]);
        assert_eq!(ctx.env.get("FOO"), Some(""));
    }

    #[test]
    fn bare_name_preserves_existing_value() {
        let mut env = Environment::new();
        env.set("FOO", "kept").unwrap();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        main(&mut ctx, &["FOO".to_string()]);
        assert_eq!(ctx.env.get("FOO"), Some("kept"));
    }

    #[test]
    fn invalid_name_reports_error_but_continues() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(
            &mut ctx,
            &["1bad=x".to_string(), "GOOD=y".to_string()],
        );
        assert_eq!(outcome.exit_status, 1);
        assert_eq!(ctx.env.get("GOOD"), Some("y"));
    }
}
