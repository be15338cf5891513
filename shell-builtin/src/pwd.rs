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

//! `pwd` built-in: prints the value of `$PWD` (`spec.md` §6). Unlike a
//! POSIX-complete `pwd`, there is no `-L`/`-P` distinction or
//! recomputation against the filesystem; `$PWD` is the single source of
//! truth the `cd` built-in maintains.

use crate::common::{write_stderr, Context, Outcome};

pub fn main(ctx: &mut Context, _args: &[String]) -> Outcome {
    match ctx.env.get("PWD") {
        Some(pwd) => {
            println!("{pwd}");
            Outcome::success()
        }
        None => {
            write_stderr("pwd: PWD not set");
            Outcome::status(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn prints_pwd() {
        let mut env = Environment::new();
        env.set("PWD", "/srv").unwrap();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        assert_eq!(main(&mut ctx, &[]), Outcome::success());
    }

    #[test]
    fn fails_when_unset() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        assert_eq!(main(&mut ctx, &[]).exit_status, 1);
    }
}
