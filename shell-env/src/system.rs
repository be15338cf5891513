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

//! The `System` trait abstracts the OS primitives the executor (C9) and
//! path resolver (C8) need: forking, `exec`, pipes, `dup2`, opening files
//! for redirection, and waiting for children.
//!
//! The seam exists so `shell-semantics`'s control-flow (fork/pipe/dup2
//! ordering, redirection application order, exit-status decoding) can be
//! exercised in tests without spawning real processes, the same reason
//! the teacher codebase behind this shell's design keeps its own
//! `System` trait rather than calling `nix`/`libc` directly from the
//! executor.

use nix::sys::wait::WaitStatus;
use nix::unistd::{ForkResult, Pid};
use std::ffi::{CStr, CString};
use std::fs::File;
use std::os::unix::io::RawFd;
use std::path::Path;

/// Which direction a file should be opened for, mirroring
/// `RedirectionKind` but without the here-doc variant (here-docs never
/// open a file; they hand the executor an already-open read end of a
/// pipe, see `shell-semantics::heredoc`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpenMode {
    Read,
    WriteTruncate,
    WriteAppend,
}

/// OS-facing operations the executor and path resolver depend on.
pub trait System {
    /// True iff `path` names an existing, executable regular file
    /// (`spec.md` §4.8).
    fn is_executable_file(&self, path: &Path) -> bool;

    /// Opens `path` in the given mode for a redirection (`spec.md` §4.9).
    fn open(&self, path: &Path, mode: OpenMode) -> std::io::Result<File>;

    /// Creates an anonymous pipe, returning `(read_fd, write_fd)`.
    fn pipe(&self) -> nix::Result<(RawFd, RawFd)>;

    /// Duplicates `oldfd` onto `newfd`, closing `newfd` first if open.
    fn dup2(&self, oldfd: RawFd, newfd: RawFd) -> nix::Result<()>;

    /// Duplicates `fd` onto the lowest available descriptor. Used to save
    /// a copy of stdin/stdout/stderr before an in-process builtin
    /// redirection, so the executor can restore it afterwards
    /// (`spec.md` §4.9: "apply redirections on a saved copy of
    /// stdin/stdout ... restore the saved descriptors").
    fn dup(&self, fd: RawFd) -> nix::Result<RawFd>;

    /// Closes a raw file descriptor, ignoring `EBADF`.
    fn close(&self, fd: RawFd);

    /// Forks the process. Caller is responsible for doing only
    /// async-signal-safe work between `fork` and `execve`/`_exit` in the
    /// child, per the usual POSIX restriction.
    ///
    /// # Safety
    /// Forking a multi-threaded process is unsafe in general; this shell
    /// is single-threaded (`spec.md` §5) and the only fork point is this
    /// call, so the restriction is trivially satisfied here.
    unsafe fn fork(&self) -> nix::Result<ForkResult>;

    /// Replaces the current process image. Only returns on error.
    fn execve(&self, path: &CStr, args: &[CString], envp: &[CString]) -> nix::Result<std::convert::Infallible>;

    /// Waits for any child, blocking until one changes state.
    fn waitpid(&self, pid: Option<Pid>) -> nix::Result<WaitStatus>;

    /// Installs the signal dispositions described in `spec.md` §4.10 for
    /// the shell's own process: SIGINT sets a flag rather than
    /// terminating, SIGQUIT is ignored.
    fn install_shell_signal_handlers(&self);

    /// Resets SIGINT and SIGQUIT to their default disposition. Called in
    /// a forked child immediately before `exec` so external programs run
    /// with ordinary signal behavior (`spec.md` §4.10: "the child
    /// inherits default signal disposition").
    fn reset_child_signal_handlers(&self);

    /// True iff a SIGINT has been delivered to the shell process since
    /// the last call to [`take_interrupted`](System::take_interrupted).
    /// atomically clears the flag.
    fn take_interrupted(&self) -> bool;
}
