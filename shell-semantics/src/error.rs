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

//! Errors raised by the [executor](crate::executor). Every variant here
//! is recoverable per `spec.md` §7: the executor turns each into an
//! exit status and a `stderr` message rather than propagating a panic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{program}: command not found")]
    CommandNotFound { program: String },

    #[error("{program}: Permission denied")]
    PermissionDenied { program: String },

    #[error("{target}: {source}")]
    RedirectionFailed {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("here-document aborted before delimiter")]
    HeredocAborted,

    #[error("fork failed: {0}")]
    ForkFailed(#[source] nix::Error),

    #[error("pipe failed: {0}")]
    PipeFailed(#[source] nix::Error),

    #[error("wait failed: {0}")]
    WaitFailed(#[source] nix::Error),
}

impl ExecError {
    /// The exit status this error maps to per `spec.md` §7's error
    /// taxonomy. Every variant here is a stage-abort condition with
    /// status 1, except the two the path resolver / `exec` itself
    /// distinguish by errno.
    pub fn exit_status(&self) -> i32 {
        match self {
            ExecError::CommandNotFound { .. } => 127,
            ExecError::PermissionDenied { .. } => 126,
            ExecError::RedirectionFailed { .. }
            | ExecError::HeredocAborted
            | ExecError::ForkFailed(_)
            | ExecError::PipeFailed(_)
            | ExecError::WaitFailed(_) => 1,
        }
    }
}
