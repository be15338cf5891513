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

//! `unset` built-in: removes each named variable from the environment
//! (`spec.md` §6). Removing a name that is absent is a no-op, matching
//! `Environment::unset`.

use crate::common::{Context, Outcome};

pub fn main(ctx: &mut Context, args: &[String]) -> Outcome {
    for name in args {
        ctx.env.unset(name);
    }
    Outcome::success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn removes_named_variables() {
        let mut env = Environment::new();
        env.set("A", "1").unwrap();
        env.set("B", "2").unwrap();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        let outcome = main(&mut ctx, &["A".to_string()]);
        assert_eq!(outcome, Outcome::success());
        assert_eq!(ctx.env.get("A"), None);
        assert_eq!(ctx.env.get("B"), Some("2"));
    }

    #[test]
    fn unsetting_absent_name_is_a_no_op() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        assert_eq!(main(&mut ctx, &["GHOST".to_string()]), Outcome::success());
    }
}
