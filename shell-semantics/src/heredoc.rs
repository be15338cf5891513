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

//! The here-doc engine (`spec.md` §4.7, component C7): collects lines
//! from the user until a delimiter, optionally expanding each, and
//! delivers the result as a read-only input file descriptor.

use crate::expander::expand_line;
use shell_env::{Environment, System};
use std::io::Write;
use std::os::unix::io::RawFd;

/// Supplies the lines a here-doc body is collected from. In the
/// interactive shell this reads from the terminal with the `> `
/// continuation prompt (`spec.md` §4.7 step 2); tests use an in-memory
/// stand-in.
pub trait HeredocInput {
    /// Returns the next line (without its trailing newline), or `None`
    /// on end-of-input.
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

/// Error collecting a here-doc body: the stage must abort with exit
/// status 1 (`spec.md` §4.7: "On read error or user end-of-input during
/// collection").
#[derive(Debug)]
pub struct HeredocAborted;

/// Collects one here-doc body terminated by `delimiter`, writing
/// (optionally expanded) lines into a fresh pipe, and returns the read
/// end for the executor to use as the stage's stdin.
///
/// `expand_body` mirrors `RedirectionKind::HereDoc::expand_body`: true
/// iff the delimiter word appeared fully unquoted.
pub fn collect(
    delimiter: &str,
    expand_body: bool,
    input: &mut dyn HeredocInput,
    env: &Environment,
    last_status: i32,
    system: &dyn System,
) -> Result<RawFd, HeredocAborted> {
    let (read_fd, write_fd) = system.pipe().map_err(|_| HeredocAborted)?;
    // SAFETY: write_fd was just returned by `System::pipe` and is not
    // used elsewhere until this function closes or hands it off.
    let mut write_file = unsafe { shell_env::real_system::file_from_raw_fd(write_fd) };

    loop {
        match input.read_line("> ") {
            Ok(Some(line)) => {
                if line == delimiter {
                    break;
                }
                let line = if expand_body {
                    expand_line(&line, env, last_status)
                } else {
                    line
                };
                if writeln!(write_file, "{line}").is_err() {
                    drop(write_file);
                    system.close(read_fd);
                    return Err(HeredocAborted);
                }
            }
            Ok(None) => {
                drop(write_file);
                system.close(read_fd);
                return Err(HeredocAborted);
            }
            Err(_) => {
                drop(write_file);
                system.close(read_fd);
                return Err(HeredocAborted);
            }
        }
    }
    drop(write_file);
    Ok(read_fd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_env::RealSystem;
    use std::io::Read;

    struct ScriptedInput {
        lines: std::collections::VecDeque<Option<String>>,
    }

    impl HeredocInput for ScriptedInput {
        fn read_line(&mut self, _prompt: &str) -> std::io::Result<Option<String>> {
            Ok(self.lines.pop_front().flatten())
        }
    }

    #[test]
    fn collects_until_delimiter_without_expansion() {
        let sys = RealSystem::new();
        let mut input = ScriptedInput {
            lines: vec![Some("$HOME".to_string()), Some("END".to_string())]
                .into_iter()
                .collect(),
        };
        let env = Environment::new();
        let fd = collect("END", false, &mut input, &env, 0, &sys).unwrap();
        let mut file = unsafe { shell_env::real_system::file_from_raw_fd(fd) };
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        assert_eq!(out, "$HOME\n");
    }

    #[test]
    fn expands_each_line_when_unquoted() {
        let sys = RealSystem::new();
        let mut env = Environment::new();
        env.set("NAME", "world").unwrap();
        let mut input = ScriptedInput {
            lines: vec![Some("hello $NAME".to_string()), Some("EOF".to_string())]
                .into_iter()
                .collect(),
        };
        let fd = collect("EOF", true, &mut input, &env, 0, &sys).unwrap();
        let mut file = unsafe { shell_env::real_system::file_from_raw_fd(fd) };
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn eof_before_delimiter_aborts() {
        let sys = RealSystem::new();
        let env = Environment::new();
        let mut input = ScriptedInput {
            lines: vec![Some("partial".to_string()), None].into_iter().collect(),
        };
        let result = collect("END", false, &mut input, &env, 0, &sys);
        assert!(result.is_err());
    }
}
