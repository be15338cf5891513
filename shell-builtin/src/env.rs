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

//! `env` built-in: prints the environment in insertion order, one
//! `NAME=VALUE` per line (`spec.md` §6).

use crate::common::{Context, Outcome};

pub fn main(ctx: &mut Context, _args: &[String]) -> Outcome {
    for (name, value) in ctx.env.entries() {
        println!("{name}={value}");
    }
    Outcome::success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn always_succeeds() {
        let mut env = Environment::new();
        env.set("A", "1").unwrap();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        assert_eq!(main(&mut ctx, &[]), Outcome::success());
    }
}
