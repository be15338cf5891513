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

//! Lexer, syntax validator, and parser for the posh shell's command
//! language: the text-to-tree half of the input processing pipeline
//! described in `spec.md`. This crate performs no I/O and no expansion;
//! it turns one line of source text into a [`ast::Pipeline`] or a
//! [`error::SyntaxError`].

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod validator;

pub use ast::{Command, Pipeline, Redirection, RedirectionKind, Word, WordSegment};
pub use error::SyntaxError;
pub use lexer::{tokenize, LexOutput};
pub use parser::parse;
pub use token::{QuoteClass, Token, TokenKind};

/// Convenience wrapper used by the [input completion loop](crate) (C3):
/// lexes `input` and reports whether the result needs more input before
/// a [`Pipeline`] can be built from it.
///
/// `spec.md` §4.3: incomplete means `quote_depth > 0` OR
/// `ends_with_pipe == true`.
pub fn needs_more_input(out: &LexOutput) -> bool {
    out.quote_depth > 0 || out.ends_with_pipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_more_input_on_unclosed_quote() {
        let out = tokenize("echo \"hi");
        assert!(needs_more_input(&out));
    }

    #[test]
    fn needs_more_input_on_trailing_pipe() {
        let out = tokenize("ls |");
        assert!(needs_more_input(&out));
    }

    #[test]
    fn complete_line_does_not_need_more_input() {
        let out = tokenize("echo hi");
        assert!(!needs_more_input(&out));
    }
}
