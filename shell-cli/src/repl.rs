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

//! The input completion loop (`spec.md` §4.3, component C3): re-prompts
//! the user for continuation when the just-lexed line is structurally
//! incomplete, then re-lexes the concatenated buffer from scratch.
//!
//! Line editing, history navigation, and SIGINT-at-the-prompt handling
//! are `rustyline`'s job (`DefaultEditor` in the teacher's same
//! line-editor crate); this module owns only the re-prompt/concatenate/
//! re-lex cycle `spec.md` describes.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use shell_syntax::{needs_more_input, tokenize, LexOutput};

/// What one call to [`read_pipeline_source`] produced.
pub enum PipelineSource {
    /// A structurally complete buffer, ready for the syntax validator
    /// and parser.
    Complete(String),
    /// The user signaled end-of-input (Ctrl-D) while a line was
    /// complete and empty, i.e. at the primary prompt: the REPL should
    /// exit.
    Eof,
    /// The user signaled end-of-input or interrupt while continuing an
    /// incomplete line (`spec.md` §4.3 step 4: "abandoned with the
    /// `Interrupted` error"). The partial buffer is discarded.
    Abandoned,
}

fn continuation_prompt(out: &LexOutput) -> &'static str {
    if out.quote_depth > 0 {
        match out.open_quote {
            Some('\'') => "SQUOTE> ",
            Some('"') => "DQUOTE> ",
            _ => "QUOTE> ",
        }
    } else {
        "PIPE> "
    }
}

/// Reads one logical input line, re-prompting for continuation until
/// the lexed result is structurally complete (`spec.md` §4.3).
///
/// `primary_prompt` is shown for the first line only; continuation
/// prompts are chosen from the incomplete lex result each iteration.
pub fn read_pipeline_source(editor: &mut DefaultEditor, primary_prompt: &str) -> PipelineSource {
    let mut buffer = match editor.readline(primary_prompt) {
        Ok(line) => line,
        Err(ReadlineError::Eof) => return PipelineSource::Eof,
        Err(ReadlineError::Interrupted) => return PipelineSource::Complete(String::new()),
        Err(_) => return PipelineSource::Eof,
    };

    loop {
        let out = tokenize(&buffer);
        if !needs_more_input(&out) {
            return PipelineSource::Complete(buffer);
        }

        let prompt = continuation_prompt(&out);
        let separator = if out.quote_depth > 0 { "\n" } else { " " };
        match editor.readline(prompt) {
            Ok(more) => {
                buffer.push_str(separator);
                buffer.push_str(&more);
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                return PipelineSource::Abandoned;
            }
            Err(_) => return PipelineSource::Abandoned,
        }
    }
}

/// Adapts a [`DefaultEditor`] to [`shell_semantics::HeredocInput`]: the
/// here-doc engine reads lines the same way the completion loop does,
/// with its own `> ` continuation prompt (`spec.md` §4.7 step 2).
pub struct EditorHeredocInput<'a> {
    pub editor: &'a mut DefaultEditor,
}

impl<'a> shell_semantics::HeredocInput for EditorHeredocInput<'a> {
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::Other, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_prompt_picks_squote_and_dquote() {
        let out = tokenize("echo 'hi");
        assert_eq!(continuation_prompt(&out), "SQUOTE> ");
        let out = tokenize("echo \"hi");
        assert_eq!(continuation_prompt(&out), "DQUOTE> ");
        let out = tokenize("ls |");
        assert_eq!(continuation_prompt(&out), "PIPE> ");
    }
}
