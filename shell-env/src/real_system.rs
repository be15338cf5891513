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

//! [`RealSystem`]: the [`System`] implementation that actually talks to
//! the operating system via `nix`/`libc`.

use crate::system::{OpenMode, System};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::sys::wait::WaitStatus;
use nix::unistd::{self, AccessFlags, ForkResult, Pid};
use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::fs::{File, OpenOptions};
use std::os::unix::fs::MetadataExt;
use std::os::unix::io::{FromRawFd, RawFd};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by [`handle_sigint`] when the shell process receives SIGINT
/// outside of the line-editor's own key handling (`spec.md` §4.10).
static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_signum: libc::c_int) {
    SIGINT_RECEIVED.store(true, Ordering::SeqCst);
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

fn is_executable(path: &Path) -> bool {
    unistd::access(path, AccessFlags::X_OK).is_ok()
}

/// `System` implementation backed by real OS calls.
///
/// `RealSystem` holds no state of its own beyond what the kernel tracks;
/// the interrupted flag lives in a static because signal handlers cannot
/// capture `self`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealSystem;

impl RealSystem {
    pub fn new() -> Self {
        RealSystem
    }
}

impl System for RealSystem {
    fn is_executable_file(&self, path: &Path) -> bool {
        is_regular_file(path) && is_executable(path)
    }

    fn open(&self, path: &Path, mode: OpenMode) -> std::io::Result<File> {
        let mut opts = OpenOptions::new();
        match mode {
            OpenMode::Read => {
                opts.read(true);
            }
            OpenMode::WriteTruncate => {
                opts.write(true).create(true).truncate(true);
            }
            OpenMode::WriteAppend => {
                opts.write(true).create(true).append(true);
            }
        }
        opts.open(path)
    }

    fn pipe(&self) -> nix::Result<(RawFd, RawFd)> {
        let (read_end, write_end) = unistd::pipe()?;
        Ok((read_end, write_end))
    }

    fn dup2(&self, oldfd: RawFd, newfd: RawFd) -> nix::Result<()> {
        unistd::dup2(oldfd, newfd)?;
        Ok(())
    }

    fn dup(&self, fd: RawFd) -> nix::Result<RawFd> {
        unistd::dup(fd)
    }

    fn close(&self, fd: RawFd) {
        let _ = unistd::close(fd);
    }

    unsafe fn fork(&self) -> nix::Result<ForkResult> {
        unistd::fork()
    }

    fn execve(&self, path: &CStr, args: &[CString], envp: &[CString]) -> nix::Result<Infallible> {
        loop {
            match unistd::execve(path, args, envp) {
                Err(nix::Error::EINTR) => continue,
                Err(e) => return Err(e),
                // execve never returns Ok.
            }
        }
    }

    fn waitpid(&self, pid: Option<Pid>) -> nix::Result<WaitStatus> {
        nix::sys::wait::waitpid(pid, None)
    }

    fn install_shell_signal_handlers(&self) {
        let int_action = SigAction::new(
            SigHandler::Handler(handle_sigint),
            SaFlags::empty(),
            SigSet::empty(),
        );
        let quit_action = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
        // SAFETY: the handlers above do only async-signal-safe work
        // (a single atomic store).
        unsafe {
            let _ = signal::sigaction(Signal::SIGINT, &int_action);
            let _ = signal::sigaction(Signal::SIGQUIT, &quit_action);
        }
    }

    fn reset_child_signal_handlers(&self) {
        let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
        // SAFETY: SigDfl requires no handler-side invariants.
        unsafe {
            let _ = signal::sigaction(Signal::SIGINT, &default);
            let _ = signal::sigaction(Signal::SIGQUIT, &default);
        }
    }

    fn take_interrupted(&self) -> bool {
        SIGINT_RECEIVED.swap(false, Ordering::SeqCst)
    }
}

/// Wraps a raw, already-open file descriptor as a [`File`] for callers
/// that obtained it from [`System::pipe`] or a `dup`'d stdio slot.
///
/// # Safety
/// `fd` must be a valid, open, uniquely-owned file descriptor.
pub unsafe fn file_from_raw_fd(fd: RawFd) -> File {
    File::from_raw_fd(fd)
}
