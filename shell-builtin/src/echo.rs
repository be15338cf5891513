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

//! `echo` built-in: writes its arguments separated by single spaces,
//! followed by a newline unless a leading `-n` suppresses it
//! (`spec.md` §6).

use crate::common::{Context, Outcome};

pub fn main(_ctx: &mut Context, args: &[String]) -> Outcome {
    let (suppress_newline, words) = match args.first() {
        Some(first) if first == "-n" => (true, &args[1..]),
        _ => (false, args),
    };

    print!("{}", words.join(" "));
    if !suppress_newline {
        println!();
    }

    Outcome::success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::Environment;

    fn run(args: &[&str]) -> Outcome {
        let mut env = Environment::new();
        let mut ctx = Context {
            env: &mut env,
            last_status: 0,
        };
        main(
            &mut ctx,
            &args.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn always_succeeds() {
        assert_eq!(run(&["hello", "world"]), Outcome::success());
        assert_eq!(run(&["-n", "hi"]), Outcome::success());
        assert_eq!(run(&[]), Outcome::success());
    }
}
