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

//! The environment store (C1) and the `System` trait that abstracts the
//! host OS for the rest of the shell.

pub mod environment;
pub mod error;
pub mod real_system;
pub mod system;

pub use environment::{is_valid_identifier, Environment};
pub use error::EnvError;
pub use real_system::RealSystem;
pub use system::{OpenMode, System};
