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

//! `exit` built-in.
//!
//! Takes no arguments (`spec.md` §6). Does not terminate the process
//! itself; it reports [`Outcome::request_exit`] and carries the
//! last-foreground exit status forward, leaving history persistence and
//! the actual process exit to the caller that owns those resources.

use crate::common::{Context, Outcome};

pub fn main(ctx: &mut Context, _args: &[String]) -> Outcome {
    Outcome {
        exit_status: ctx.last_status,
        request_exit: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    #[test]
    fn requests_exit_with_last_status() {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 42,
        };
        let outcome = main(&mut ctx, &[]);
        assert_eq!(outcome.exit_status, 42);
        assert!(outcome.request_exit);
    }
}
