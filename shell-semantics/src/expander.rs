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

//! The expander (`spec.md` §4.6, component C6): turns a [`Word`] into a
//! single string argument by substituting `$name` and `$?` references,
//! subject to each segment's quote class.
//!
//! Word-splitting on whitespace of expansion results is explicitly out of
//! scope (`spec.md` §4.6): an expanded value containing spaces stays one
//! argument.

use shell_env::Environment;
use shell_syntax::{QuoteClass, Word};

/// Expands every `$name`/`$?` occurrence in `text` using `lookup`,
/// matching the scan rule shared by bare and double-quoted segments
/// (`spec.md` §4.6: "same as bare").
fn expand_bare_text(text: &str, env: &Environment, last_status: i32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '$' {
            if chars.get(i + 1) == Some(&'?') {
                out.push_str(&last_status.to_string());
                i += 2;
                continue;
            }
            if let Some(&c) = chars.get(i + 1) {
                if c.is_ascii_alphabetic() || c == '_' {
                    let start = i + 1;
                    let mut end = start + 1;
                    while let Some(&c) = chars.get(end) {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            end += 1;
                        } else {
                            break;
                        }
                    }
                    let name: String = chars[start..end].iter().collect();
                    if let Some(value) = env.get(&name) {
                        out.push_str(value);
                    }
                    i = end;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Expands one [`Word`] into a single argument string (`spec.md` §4.6).
///
/// Per-segment rules:
/// - Bare/Double: scan for `$`, substitute.
/// - Single: literal, no substitution.
///
/// All segment results are concatenated in source order; an empty result
/// still participates (it does not drop the argument).
pub fn expand_word(word: &Word, env: &Environment, last_status: i32) -> String {
    let mut out = String::new();
    for segment in &word.segments {
        match segment.quote_class {
            QuoteClass::Single => out.push_str(&segment.text),
            QuoteClass::Bare | QuoteClass::Double => {
                out.push_str(&expand_bare_text(&segment.text, env, last_status));
            }
        }
    }
    out
}

/// Expands a bare line of text (used by the here-doc engine for
/// unquoted-delimiter bodies, `spec.md` §4.7 step 2).
pub fn expand_line(line: &str, env: &Environment, last_status: i32) -> String {
    expand_bare_text(line, env, last_status)
}
