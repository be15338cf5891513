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

//! Expander, here-doc engine, path resolver, executor, and signal
//! coordinator: the execution half of the posh shell's input processing
//! pipeline. This crate reads the AST `shell-syntax` builds and drives
//! the OS seam `shell-env` exposes; it performs no lexing or parsing of
//! its own.

pub mod error;
pub mod executor;
pub mod expander;
pub mod heredoc;
pub mod path_resolver;
pub mod signals;
pub mod status;

pub use error::ExecError;
pub use executor::{execute, ExecResult};
pub use expander::{expand_line, expand_word};
pub use heredoc::{HeredocAborted, HeredocInput};
pub use path_resolver::{resolve, Resolution};
pub use status::decode_wait_status;
