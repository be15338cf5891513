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

//! Errors raised by the [environment store](crate::environment).

use thiserror::Error;

/// Error returned by [`Environment::set`](crate::environment::Environment::set).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EnvError {
    /// The name does not match `[A-Za-z_][A-Za-z0-9_]*` (`spec.md` §4.1).
    #[error("'{0}': not a valid identifier")]
    InvalidIdentifier(String),
}
