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

//! Token types produced by the [lexer](crate::lexer).
//!
//! A [`Token`] is the unit the lexer emits and the parser consumes. Its
//! [`QuoteClass`] records what kind of quoting (if any) produced it, which
//! the expander later consults to decide whether `$name` inside the token's
//! lexeme should be substituted.

/// The syntactic category of a [`Token`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// Unquoted word text.
    Word,
    /// Text that appeared between matching `'` characters.
    SingleQuoted,
    /// Text that appeared between matching `"` characters.
    DoubleQuoted,
    /// A `$name` parameter expansion.
    Expansion(String),
    /// The `$?` special parameter.
    ExitStatus,
    /// `|`
    Pipe,
    /// `<`
    RedirIn,
    /// `>`
    RedirOut,
    /// `>>`
    RedirAppend,
    /// `<<`
    HereDoc,
}

impl TokenKind {
    /// True for the token kinds that may participate in building a [`Word`](crate::ast::Word)
    /// (§3 of the specification: `Word | SingleQuoted | DoubleQuoted | Expansion | ExitStatus`).
    pub fn is_word_constituent(&self) -> bool {
        matches!(
            self,
            TokenKind::Word
                | TokenKind::SingleQuoted
                | TokenKind::DoubleQuoted
                | TokenKind::Expansion(_)
                | TokenKind::ExitStatus
        )
    }
}

/// The quoting context a word segment was produced under.
///
/// Governs whether the expander performs substitution on the segment: bare
/// and double-quoted segments expand, single-quoted segments never do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuoteClass {
    Bare,
    Single,
    Double,
}

/// One lexical token, as emitted by the [lexer](crate::lexer::Lexer).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal text as it appeared, without surrounding quote
    /// characters for quoted kinds.
    pub lexeme: String,
    /// True iff this token abuts the previous one with no intervening
    /// whitespace or operator, so the parser should glue it onto the
    /// current word rather than start a new one.
    pub adjacent: bool,
    /// Quote class to record on a word segment built from this token.
    pub quote_class: QuoteClass,
}

impl Token {
    /// Builds a token. `quote_class` is supplied by the lexer, which alone
    /// knows the quoting context the token was scanned under (a plain
    /// `TokenKind` is not enough: an `Expansion` token scanned while inside
    /// a double-quoted run still counts as [`QuoteClass::Double`]).
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, adjacent: bool, quote_class: QuoteClass) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            adjacent,
            quote_class,
        }
    }
}
