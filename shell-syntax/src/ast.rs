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

//! The abstract syntax tree built by the [parser](crate::parser).
//!
//! The top-level value is a [`Pipeline`]: `spec.md` §3 notes that richer
//! trees are not produced because operators other than `|` are out of
//! scope. The AST owns its [`Word`] segment strings exclusively; nothing
//! else borrows from the token stream once parsing completes.

use crate::token::QuoteClass;

/// One quote-tagged segment of a [`Word`], carrying its own substitution
/// eligibility.
#[derive(Clone, Debug, PartialEq)]
pub struct WordSegment {
    pub text: String,
    pub quote_class: QuoteClass,
}

/// A logical command argument or program name, built from one or more
/// adjacent tokens (`spec.md` §3).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Word {
    pub segments: Vec<WordSegment>,
}

impl Word {
    pub fn push(&mut self, text: impl Into<String>, quote_class: QuoteClass) {
        self.segments.push(WordSegment {
            text: text.into(),
            quote_class,
        });
    }

    /// True if any constituent segment was quoted (single or double). Used
    /// by here-doc delimiters to decide `expand_body` (`spec.md` §4.5).
    pub fn has_any_quoted_segment(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.quote_class != QuoteClass::Bare)
    }

    /// The word's literal source text, quote characters stripped, used as
    /// the here-doc delimiter to compare collected lines against.
    pub fn literal(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Direction of a [`Redirection`].
#[derive(Clone, Debug, PartialEq)]
pub enum RedirectionKind {
    /// `< file`
    In,
    /// `> file`
    Out,
    /// `>> file`
    Append,
    /// `<< delim`
    HereDoc {
        /// True iff `delim` appeared unquoted in the source, so the
        /// here-doc engine should expand each collected line.
        expand_body: bool,
    },
}

/// A `(direction, target-word)` pair attached to a [`Command`].
#[derive(Clone, Debug, PartialEq)]
pub struct Redirection {
    pub kind: RedirectionKind,
    pub target: Word,
}

/// One stage of a [`Pipeline`]: a program name plus arguments and
/// redirections. Invariant: a command node never owns child command nodes
/// (`spec.md` §3).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Command {
    pub program: Word,
    pub args: Vec<Word>,
    pub redirections: Vec<Redirection>,
}

/// A non-empty ordered list of [`Command`] stages (`spec.md` §3). Length 1
/// is a degenerate pipeline; every intermediate stage's stdout feeds the
/// next stage's stdin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pipeline {
    pub stages: Vec<Command>,
}

impl Pipeline {
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
