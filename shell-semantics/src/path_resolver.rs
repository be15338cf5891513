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

//! The path resolver (`spec.md` §4.8, component C8): resolves a bare
//! command name against `PATH`, or passes through absolute/relative
//! paths unchanged.

use shell_env::{Environment, System};
use std::path::{Path, PathBuf};

/// Outcome of [`resolve`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// A path to try: either a name containing `/`, passed through
    /// unchanged since `spec.md` §4.8 leaves its executability to the OS
    /// `exec` call, or a `PATH` entry that was confirmed executable.
    Found(PathBuf),
    /// A bare name (no `/`) that no `PATH` directory has as an
    /// executable regular file.
    NotFound,
}

/// Resolves `name` per `spec.md` §4.8.
pub fn resolve(name: &str, env: &Environment, system: &dyn System) -> Resolution {
    if name.contains('/') {
        // `spec.md` §4.8: "pass through absolute/relative paths";
        // executability is decided by the OS `exec` call, not here, so a
        // non-executable target surfaces as `EACCES` -> 126 at `exec`
        // time rather than a pre-judged 127.
        return Resolution::Found(PathBuf::from(name));
    }

    let path_var = env.get("PATH").unwrap_or("");
    for dir in path_var.split(':') {
        let dir = if dir.is_empty() { "." } else { dir };
        let candidate: PathBuf = Path::new(dir).join(name);
        if system.is_executable_file(&candidate) {
            return Resolution::Found(candidate);
        }
    }
    Resolution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// A minimal fake `System` that only implements the one method this
    /// module calls, so these tests do not touch the real filesystem.
    struct FakeSystem {
        executables: RefCell<HashSet<PathBuf>>,
    }

    impl shell_env::System for FakeSystem {
        fn is_executable_file(&self, path: &Path) -> bool {
            self.executables.borrow().contains(path)
        }
        fn open(&self, _: &Path, _: shell_env::OpenMode) -> std::io::Result<std::fs::File> {
            unimplemented!()
        }
        fn pipe(&self) -> nix::Result<(std::os::unix::io::RawFd, std::os::unix::io::RawFd)> {
            unimplemented!()
        }
        fn dup2(&self, _: std::os::unix::io::RawFd, _: std::os::unix::io::RawFd) -> nix::Result<()> {
            unimplemented!()
        }
        fn dup(&self, _: std::os::unix::io::RawFd) -> nix::Result<std::os::unix::io::RawFd> {
            unimplemented!()
        }
        fn close(&self, _: std::os::unix::io::RawFd) {}
        unsafe fn fork(&self) -> nix::Result<nix::unistd::ForkResult> {
            unimplemented!()
        }
        fn execve(
            &self,
            _: &std::ffi::CStr,
            _: &[std::ffi::CString],
            _: &[std::ffi::CString],
        ) -> nix::Result<std::convert::Infallible> {
            unimplemented!()
        }
        fn waitpid(&self, _: Option<nix::unistd::Pid>) -> nix::Result<nix::sys::wait::WaitStatus> {
            unimplemented!()
        }
        fn install_shell_signal_handlers(&self) {}
        fn reset_child_signal_handlers(&self) {}
        fn take_interrupted(&self) -> bool {
            false
        }
    }

    fn fake_with(paths: &[&str]) -> FakeSystem {
        FakeSystem {
            executables: RefCell::new(paths.iter().map(PathBuf::from).collect()),
        }
    }

    #[test]
    fn absolute_path_passes_through() {
        let sys = fake_with(&["/bin/ls"]);
        let env = Environment::new();
        assert_eq!(
            resolve("/bin/ls", &env, &sys),
            Resolution::Found(PathBuf::from("/bin/ls"))
        );
    }

    #[test]
    fn relative_path_with_slash_passes_through_without_being_searched() {
        // `./ls` is not present in `fake_with`'s executable set, but a
        // name containing `/` is never checked here: the OS `exec` call
        // decides, per `spec.md` §4.8.
        let sys = fake_with(&["/bin/ls"]);
        let env = Environment::new();
        assert_eq!(
            resolve("./ls", &env, &sys),
            Resolution::Found(PathBuf::from("./ls"))
        );
    }

    #[test]
    fn bare_name_is_found_on_path() {
        let sys = fake_with(&["/usr/bin/grep"]);
        let mut env = Environment::new();
        env.set("PATH", "/bin:/usr/bin").unwrap();
        assert_eq!(
            resolve("grep", &env, &sys),
            Resolution::Found(PathBuf::from("/usr/bin/grep"))
        );
    }

    #[test]
    fn bare_name_not_on_path_is_not_found() {
        let sys = fake_with(&["/usr/bin/grep"]);
        let mut env = Environment::new();
        env.set("PATH", "/bin").unwrap();
        assert_eq!(resolve("grep", &env, &sys), Resolution::NotFound);
    }
}
