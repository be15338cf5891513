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

//! Errors raised by the [syntax validator](crate::validator) and
//! [parser](crate::parser).

use thiserror::Error;

/// A syntax error detected after lexing but before (or during) AST
/// construction. Corresponds to the "Syntax" row of `spec.md` §7: the shell
/// records exit code 258 and discards the line.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A `|` appears at the start of a pipeline.
    #[error("syntax error near unexpected token '|'")]
    LeadingPipe,

    /// Two `|` tokens appear with no stage between them.
    #[error("syntax error near unexpected token '|'")]
    EmptyStage,

    /// A `|` remains at the end of a token stream the completion loop
    /// should already have resolved. Reaching the validator in this state
    /// is treated as a hard error rather than silently dropped.
    #[error("syntax error near unexpected token '|'")]
    TrailingPipe,

    /// A redirection operator (`<`, `>`, `>>`, `<<`) has no word following
    /// it to act as its target.
    #[error("syntax error near unexpected token '{op}'")]
    DanglingRedirection { op: &'static str },
}
