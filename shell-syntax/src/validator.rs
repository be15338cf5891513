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

//! The syntax validator (`spec.md` §4.4): rejects structurally invalid
//! token sequences before the parser builds an AST from them.
//!
//! By the time this runs, the [input completion loop](crate) has already
//! resolved unclosed quotes and dangling pipes by reading more input, so a
//! trailing pipe surviving to here is a hard error rather than a
//! continuation prompt.

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

/// Validates a completed token sequence, returning the first violation
/// found (in source order).
pub fn validate(tokens: &[Token]) -> Result<(), SyntaxError> {
    if let Some(first) = tokens.first() {
        if first.kind == TokenKind::Pipe {
            return Err(SyntaxError::LeadingPipe);
        }
    }

    let mut iter = tokens.iter().enumerate().peekable();
    while let Some((i, tok)) = iter.next() {
        match &tok.kind {
            TokenKind::Pipe => {
                if i + 1 >= tokens.len() {
                    return Err(SyntaxError::TrailingPipe);
                }
                if tokens[i + 1].kind == TokenKind::Pipe {
                    return Err(SyntaxError::EmptyStage);
                }
            }
            TokenKind::RedirIn
            | TokenKind::RedirOut
            | TokenKind::RedirAppend
            | TokenKind::HereDoc => {
                let op = operator_lexeme(&tok.kind);
                match tokens.get(i + 1) {
                    Some(next) if next.kind.is_word_constituent() => {}
                    _ => return Err(SyntaxError::DanglingRedirection { op }),
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn operator_lexeme(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::RedirIn => "<",
        TokenKind::RedirOut => ">",
        TokenKind::RedirAppend => ">>",
        TokenKind::HereDoc => "<<",
        _ => unreachable!("operator_lexeme called on a non-operator token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn validate_str(s: &str) -> Result<(), SyntaxError> {
        let out = tokenize(s);
        validate(&out.tokens)
    }

    #[test]
    fn accepts_simple_pipeline() {
        assert!(validate_str("echo hi | tr a-z A-Z").is_ok());
    }

    #[test]
    fn rejects_leading_pipe() {
        assert_eq!(validate_str("| echo hi"), Err(SyntaxError::LeadingPipe));
    }

    #[test]
    fn rejects_adjacent_pipes() {
        assert_eq!(validate_str("echo hi || wc"), Err(SyntaxError::EmptyStage));
    }

    #[test]
    fn rejects_dangling_redirection() {
        assert_eq!(
            validate_str("echo hi >"),
            Err(SyntaxError::DanglingRedirection { op: ">" })
        );
    }

    #[test]
    fn dangling_redirection_before_pipe_is_rejected() {
        let out = tokenize("cat < | wc");
        assert_eq!(
            validate(&out.tokens),
            Err(SyntaxError::DanglingRedirection { op: "<" })
        );
    }
}
