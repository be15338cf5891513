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

//! The CLI crate's top-level error type (`SPEC_FULL.md` §12): aggregates
//! the other crates' error types for the rare irrecoverable path
//! (`spec.md` §7's "out-of-memory / irrecoverable initialization
//! failure" row). Every recoverable error (syntax, command-not-found,
//! redirection failure, ...) is handled inline in the prompt loop and
//! never reaches here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not initialize the line editor: {0}")]
    EditorInit(#[from] rustyline::error::ReadlineError),
}
