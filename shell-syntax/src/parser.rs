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

//! The parser (`spec.md` §4.5): folds a validated token sequence into a
//! [`Pipeline`] AST. Expansion is deliberately deferred to execution time
//! (`spec.md` §4.5: "so that `$?` sees the most recent command's exit").

use crate::ast::{Command, Pipeline, Redirection, RedirectionKind, Word};
use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};
use crate::validator;

/// Validates and parses a token sequence into a [`Pipeline`].
pub fn parse(tokens: &[Token]) -> Result<Pipeline, SyntaxError> {
    validator::validate(tokens)?;
    if tokens.is_empty() {
        return Ok(Pipeline::default());
    }

    let mut stages = Vec::new();
    for stage_tokens in tokens.split(|t| t.kind == TokenKind::Pipe) {
        stages.push(parse_stage(stage_tokens));
    }
    Ok(Pipeline { stages })
}

/// Parses one pipeline stage: a run of tokens between `Pipe`s (or the
/// sequence boundary), per `spec.md` §4.5 step 2.
fn parse_stage(tokens: &[Token]) -> Command {
    let mut command = Command::default();
    let mut words: Vec<Word> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        match &tok.kind {
            TokenKind::RedirIn | TokenKind::RedirOut | TokenKind::RedirAppend | TokenKind::HereDoc => {
                // The validator guarantees a word-constituent token follows.
                let target_tokens = &tokens[i + 1..];
                let (target, consumed) = take_word(target_tokens);
                let kind = match &tok.kind {
                    TokenKind::RedirIn => RedirectionKind::In,
                    TokenKind::RedirOut => RedirectionKind::Out,
                    TokenKind::RedirAppend => RedirectionKind::Append,
                    TokenKind::HereDoc => RedirectionKind::HereDoc {
                        expand_body: !target.has_any_quoted_segment(),
                    },
                    _ => unreachable!(),
                };
                command.redirections.push(Redirection { kind, target });
                i += 1 + consumed;
            }
            _ if tok.kind.is_word_constituent() => {
                let (word, consumed) = take_word(&tokens[i..]);
                words.push(word);
                i += consumed;
            }
            _ => {
                // Pipe cannot appear here (already split on); nothing else
                // is a valid stage token.
                i += 1;
            }
        }
    }

    let mut words = words.into_iter();
    if let Some(program) = words.next() {
        command.program = program;
    }
    command.args = words.collect();
    command
}

/// Consumes one logical [`Word`] from the front of `tokens`: the first
/// word-constituent token, plus every immediately following token whose
/// `adjacent` bit is set (`spec.md` §4.5: "a token whose adjacency=false
/// starts a new word; adjacency=true appends to the current word").
/// Returns the word and how many tokens were consumed.
fn take_word(tokens: &[Token]) -> (Word, usize) {
    let mut word = Word::default();
    let mut consumed = 0;
    for (idx, tok) in tokens.iter().enumerate() {
        if idx > 0 && !tok.adjacent {
            break;
        }
        if !tok.kind.is_word_constituent() {
            break;
        }
        word.push(tok.lexeme.clone(), tok.quote_class);
        consumed = idx + 1;
    }
    (word, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::token::QuoteClass;

    fn parse_str(s: &str) -> Pipeline {
        let out = tokenize(s);
        parse(&out.tokens).expect("valid syntax")
    }

    #[test]
    fn single_stage_pipeline() {
        let pipeline = parse_str("echo hello world");
        assert_eq!(pipeline.stages.len(), 1);
        let stage = &pipeline.stages[0];
        assert_eq!(stage.program.literal(), "echo");
        assert_eq!(stage.args.len(), 2);
        assert_eq!(stage.args[0].literal(), "hello");
        assert_eq!(stage.args[1].literal(), "world");
    }

    #[test]
    fn multi_stage_pipeline() {
        let pipeline = parse_str("echo hi | tr a-z A-Z | wc -l");
        assert_eq!(pipeline.stages.len(), 3);
        assert_eq!(pipeline.stages[0].program.literal(), "echo");
        assert_eq!(pipeline.stages[1].program.literal(), "tr");
        assert_eq!(pipeline.stages[2].program.literal(), "wc");
    }

    #[test]
    fn redirections_attach_to_stage() {
        let pipeline = parse_str("tr a-z A-Z > out.txt");
        let stage = &pipeline.stages[0];
        assert_eq!(stage.redirections.len(), 1);
        assert_eq!(stage.redirections[0].target.literal(), "out.txt");
        assert!(matches!(stage.redirections[0].kind, RedirectionKind::Out));
    }

    #[test]
    fn redirection_before_program_name_still_attaches() {
        let pipeline = parse_str("> out.txt echo hi");
        let stage = &pipeline.stages[0];
        assert_eq!(stage.redirections.len(), 1);
        assert_eq!(stage.program.literal(), "echo");
        assert_eq!(stage.args[0].literal(), "hi");
    }

    #[test]
    fn last_redirection_of_same_direction_wins_but_all_attach() {
        let pipeline = parse_str("echo hi > a.txt > b.txt");
        let stage = &pipeline.stages[0];
        assert_eq!(stage.redirections.len(), 2);
        assert_eq!(stage.redirections[1].target.literal(), "b.txt");
    }

    #[test]
    fn heredoc_unquoted_delimiter_expands_body() {
        let pipeline = parse_str("cat <<EOF");
        let stage = &pipeline.stages[0];
        match &stage.redirections[0].kind {
            RedirectionKind::HereDoc { expand_body } => assert!(*expand_body),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn heredoc_quoted_delimiter_suppresses_expansion() {
        let pipeline = parse_str("cat <<'EOF'");
        let stage = &pipeline.stages[0];
        match &stage.redirections[0].kind {
            RedirectionKind::HereDoc { expand_body } => assert!(!*expand_body),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn adjacency_concatenates_into_one_word() {
        let pipeline = parse_str("echo hi\"$x\"lo");
        let stage = &pipeline.stages[0];
        assert_eq!(stage.args.len(), 1);
        let segs = &stage.args[0].segments;
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].text, "hi");
        assert_eq!(segs[0].quote_class, QuoteClass::Bare);
        assert_eq!(segs[2].text, "lo");
    }

    #[test]
    fn empty_pipeline_is_noop() {
        let out = tokenize("   ");
        let pipeline = parse(&out.tokens).unwrap();
        assert!(pipeline.is_empty());
    }
}
