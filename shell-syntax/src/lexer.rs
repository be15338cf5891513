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

//! The lexer (`spec.md` §4.2): segments one input line into a flat
//! [`Token`] sequence, tracking quote nesting as it goes.
//!
//! The lexer never fails on its own; an unclosed quote or a trailing `|`
//! is reported back through [`LexOutput`] so the [input completion
//! loop](crate) can re-prompt and re-lex (`spec.md` §4.3 deliberately
//! re-lexes the whole buffer from scratch rather than resuming mid-state,
//! so this module exposes a single pure function rather than a
//! resumable struct).

use crate::token::{QuoteClass, Token, TokenKind};

/// Output of [`tokenize`].
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    /// Depth of the quote-context stack at end of input. Zero means the
    /// quoting was balanced.
    pub quote_depth: usize,
    /// True iff the last token is `Pipe`, i.e. the line dangles a pipe.
    pub ends_with_pipe: bool,
    /// The innermost still-open quote character, if `quote_depth > 0`.
    /// Lets the [input completion loop](crate) (C3) pick `SQUOTE> ` vs
    /// `DQUOTE> ` without re-deriving the quote stack itself.
    pub open_quote: Option<char>,
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans `input` into a token sequence. Pure function: the same input
/// always produces the same output, which is what lets the completion
/// loop re-lex the whole buffer from scratch every time it grows.
pub fn tokenize(input: &str) -> LexOutput {
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0usize;
    let mut tokens = Vec::new();
    let mut quote_stack: Vec<char> = Vec::new();
    // True iff the previous character consumed was *not* whitespace and
    // did not end in a flush, i.e. the next token, if any, touches the
    // previous one with no intervening whitespace.
    let mut touching_prev = false;
    let mut word_buf = String::new();

    macro_rules! flush_word {
        () => {
            if !word_buf.is_empty() {
                tokens.push(Token::new(
                    TokenKind::Word,
                    std::mem::take(&mut word_buf),
                    touching_prev,
                    QuoteClass::Bare,
                ));
                touching_prev = true;
            }
        };
    }

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            ' ' | '\t' | '\n' => {
                flush_word!();
                pos += 1;
                touching_prev = false;
            }
            '|' => {
                flush_word!();
                tokens.push(Token::new(TokenKind::Pipe, "|", touching_prev, QuoteClass::Bare));
                touching_prev = true;
                pos += 1;
            }
            '>' => {
                flush_word!();
                if chars.get(pos + 1) == Some(&'>') {
                    tokens.push(Token::new(
                        TokenKind::RedirAppend,
                        ">>",
                        touching_prev,
                        QuoteClass::Bare,
                    ));
                    pos += 2;
                } else {
                    tokens.push(Token::new(TokenKind::RedirOut, ">", touching_prev, QuoteClass::Bare));
                    pos += 1;
                }
                touching_prev = true;
            }
            '<' => {
                flush_word!();
                if chars.get(pos + 1) == Some(&'<') {
                    tokens.push(Token::new(TokenKind::HereDoc, "<<", touching_prev, QuoteClass::Bare));
                    pos += 2;
                } else {
                    tokens.push(Token::new(TokenKind::RedirIn, "<", touching_prev, QuoteClass::Bare));
                    pos += 1;
                }
                touching_prev = true;
            }
            '\'' => {
                flush_word!();
                quote_stack.push('\'');
                pos += 1;
                let start_touching = touching_prev;
                let mut body = String::new();
                let mut closed = false;
                while pos < chars.len() {
                    if chars[pos] == '\'' {
                        quote_stack.pop();
                        pos += 1;
                        closed = true;
                        break;
                    }
                    body.push(chars[pos]);
                    pos += 1;
                }
                if closed {
                    tokens.push(Token::new(
                        TokenKind::SingleQuoted,
                        body,
                        start_touching,
                        QuoteClass::Single,
                    ));
                    touching_prev = true;
                } else {
                    // Unclosed: quote_stack retains the push; report via
                    // quote_depth and stop scanning this run.
                    break;
                }
            }
            '"' => {
                flush_word!();
                quote_stack.push('"');
                pos += 1;
                let start_touching = touching_prev;
                let mut first = true;
                let mut any_emitted = false;
                let mut body = String::new();
                let mut closed = false;
                loop {
                    match chars.get(pos) {
                        None => break,
                        Some('"') => {
                            quote_stack.pop();
                            pos += 1;
                            closed = true;
                            break;
                        }
                        Some('$') => {
                            // A chunk of plain text before the '$' becomes its
                            // own token unless it is empty: an empty chunk here
                            // is just a split artifact, not a real word part.
                            if !body.is_empty() {
                                tokens.push(Token::new(
                                    TokenKind::DoubleQuoted,
                                    std::mem::take(&mut body),
                                    if first { start_touching } else { true },
                                    QuoteClass::Double,
                                ));
                                any_emitted = true;
                                first = false;
                            }
                            pos += 1;
                            let adj = if first { start_touching } else { true };
                            first = false;
                            let (tok, new_pos) = scan_expansion(&chars, pos, QuoteClass::Double, adj);
                            pos = new_pos;
                            tokens.push(tok);
                            any_emitted = true;
                        }
                        Some(ch) => {
                            body.push(*ch);
                            pos += 1;
                        }
                    }
                }
                if closed {
                    if !body.is_empty() || !any_emitted {
                        tokens.push(Token::new(
                            TokenKind::DoubleQuoted,
                            body,
                            if first { start_touching } else { true },
                            QuoteClass::Double,
                        ));
                    }
                    touching_prev = true;
                } else {
                    // Unclosed double quote: stop, let caller see quote_depth > 0.
                    break;
                }
            }
            '$' => {
                flush_word!();
                pos += 1;
                let (tok, new_pos) = scan_expansion(&chars, pos, QuoteClass::Bare, touching_prev);
                pos = new_pos;
                tokens.push(tok);
                touching_prev = true;
            }
            other => {
                if word_buf.is_empty() {
                    // starting a new word: adjacency already recorded in touching_prev
                }
                word_buf.push(other);
                pos += 1;
            }
        }
    }
    flush_word!();

    let ends_with_pipe = matches!(tokens.last(), Some(t) if t.kind == TokenKind::Pipe);

    LexOutput {
        tokens,
        quote_depth: quote_stack.len(),
        ends_with_pipe,
        open_quote: quote_stack.last().copied(),
    }
}

/// Scans a `$...` expansion starting just after the `$` at `pos`. Returns
/// the token and the position just past what was consumed.
fn scan_expansion(chars: &[char], pos: usize, quote_class: QuoteClass, adjacent: bool) -> (Token, usize) {
    match chars.get(pos) {
        Some('?') => (
            Token::new(TokenKind::ExitStatus, "?", adjacent, quote_class),
            pos + 1,
        ),
        Some(&c) if is_name_start(c) => {
            let start = pos;
            let mut end = pos + 1;
            while let Some(&c) = chars.get(end) {
                if is_name_continue(c) {
                    end += 1;
                } else {
                    break;
                }
            }
            let name: String = chars[start..end].iter().collect();
            (
                Token::new(TokenKind::Expansion(name.clone()), name, adjacent, quote_class),
                end,
            )
        }
        _ => (
            Token::new(TokenKind::Word, "$", adjacent, quote_class),
            pos,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(out: &LexOutput) -> Vec<&TokenKind> {
        out.tokens.iter().map(|t| &t.kind).collect()
    }

    #[test]
    fn lexes_simple_command() {
        let out = tokenize("echo hello");
        assert_eq!(out.quote_depth, 0);
        assert!(!out.ends_with_pipe);
        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.tokens[0].lexeme, "echo");
        assert_eq!(out.tokens[1].lexeme, "hello");
        assert!(!out.tokens[1].adjacent);
    }

    #[test]
    fn pipe_is_its_own_token() {
        let out = tokenize("ls | wc -l");
        assert_eq!(
            kinds(&out),
            vec![
                &TokenKind::Word,
                &TokenKind::Pipe,
                &TokenKind::Word,
                &TokenKind::Word
            ]
        );
    }

    #[test]
    fn redirection_operators() {
        let out = tokenize("cmd < in > out >> app");
        assert_eq!(
            kinds(&out),
            vec![
                &TokenKind::Word,
                &TokenKind::RedirIn,
                &TokenKind::Word,
                &TokenKind::RedirOut,
                &TokenKind::Word,
                &TokenKind::RedirAppend,
                &TokenKind::Word,
            ]
        );
    }

    #[test]
    fn heredoc_operator_is_two_chars() {
        let out = tokenize("cat <<EOF");
        assert_eq!(kinds(&out), vec![&TokenKind::Word, &TokenKind::HereDoc, &TokenKind::Word]);
    }

    #[test]
    fn adjacency_concatenates_quotes_and_expansions() {
        // echo hi"$x"lo
        let out = tokenize("echo hi\"$x\"lo");
        assert_eq!(out.tokens[0].lexeme, "echo");
        assert!(!out.tokens[1].adjacent); // "hi"
        assert_eq!(out.tokens[1].lexeme, "hi");
        assert!(out.tokens[2].adjacent); // Expansion(x)
        assert_eq!(out.tokens[2].kind, TokenKind::Expansion("x".to_string()));
        assert!(out.tokens[3].adjacent); // "lo"
        assert_eq!(out.tokens[3].lexeme, "lo");
    }

    #[test]
    fn single_quote_is_literal() {
        let out = tokenize("echo '$x and \"y\"'");
        assert_eq!(out.tokens[1].kind, TokenKind::SingleQuoted);
        assert_eq!(out.tokens[1].lexeme, "$x and \"y\"");
    }

    #[test]
    fn empty_quotes_still_emit_a_token() {
        let out = tokenize("echo ''");
        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.tokens[1].kind, TokenKind::SingleQuoted);
        assert_eq!(out.tokens[1].lexeme, "");

        let out = tokenize("echo \"\"");
        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.tokens[1].kind, TokenKind::DoubleQuoted);
        assert_eq!(out.tokens[1].lexeme, "");
    }

    #[test]
    fn unclosed_single_quote_is_reported() {
        let out = tokenize("echo 'hi");
        assert_eq!(out.quote_depth, 1);
    }

    #[test]
    fn unclosed_double_quote_is_reported() {
        let out = tokenize("echo \"hi");
        assert_eq!(out.quote_depth, 1);
    }

    #[test]
    fn trailing_pipe_is_reported() {
        let out = tokenize("ls |");
        assert!(out.ends_with_pipe);
    }

    #[test]
    fn exit_status_expansion() {
        let out = tokenize("echo $?");
        assert_eq!(out.tokens[1].kind, TokenKind::ExitStatus);
    }

    #[test]
    fn dollar_not_followed_by_name_is_literal() {
        let out = tokenize("echo $ ");
        assert_eq!(out.tokens[1].kind, TokenKind::Word);
        assert_eq!(out.tokens[1].lexeme, "$");
    }
}
