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

//! `posh`: the interactive shell binary. Wires the prompt loop (C3),
//! history persistence, signal installation, and per-line dispatch into
//! `shell-syntax`/`shell-semantics`/`shell-builtin` (`spec.md` §2's
//! dataflow, `SPEC_FULL.md` §10's crate layout).
//!
//! `spec.md` §6: "CLI flags: none" — `std::env::args()` is read only to
//! be ignored.

mod error;
mod history;
mod logging;
mod repl;

use error::CliError;
use rustyline::DefaultEditor;
use shell_env::{Environment, RealSystem};
use shell_semantics::signals;
use shell_syntax::{parse, tokenize};

const SHELL_NAME: &str = "posh";
const PRIMARY_PROMPT: &str = "posh$> ";

/// `spec.md` §6: "`SHLVL` ... incremented at startup; created as `1` if
/// absent". `SPEC_FULL.md` §15: a non-numeric or missing value resets
/// to `1` rather than erroring.
fn bump_shlvl(env: &mut Environment) {
    let next = env
        .get("SHLVL")
        .and_then(|v| v.parse::<u32>().ok())
        .map_or(1, |v| v.saturating_add(1));
    let _ = env.set("SHLVL", next.to_string());
}

fn run() -> Result<i32, CliError> {
    // `spec.md` §6: "CLI flags: none" — any extra arguments are ignored.
    let _ = std::env::args();

    logging::init();

    let system = RealSystem::new();
    signals::install(&system);

    let mut env = Environment::from_host();
    bump_shlvl(&mut env);

    let history_path = history::resolve_path(SHELL_NAME);
    let mut entries = history::load(&history_path, history::DEFAULT_LOAD_LIMIT);
    tracing::info!(count = entries.len(), path = %history_path.display(), "loaded history");

    let mut editor = DefaultEditor::new()?;
    for line in &entries {
        let _ = editor.add_history_entry(line.as_str());
    }

    let mut last_status = 0i32;

    loop {
        match repl::read_pipeline_source(&mut editor, PRIMARY_PROMPT) {
            repl::PipelineSource::Eof => break,
            repl::PipelineSource::Abandoned => {
                println!();
                continue;
            }
            repl::PipelineSource::Complete(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                entries.push(line.clone());
                let _ = editor.add_history_entry(line.as_str());

                let lexed = tokenize(&line);
                match parse(&lexed.tokens) {
                    Ok(pipeline) => {
                        tracing::debug!(stages = pipeline.stages.len(), "parsed pipeline");
                        let mut heredoc_input = repl::EditorHeredocInput { editor: &mut editor };
                        let result = shell_semantics::execute(
                            &pipeline,
                            &mut env,
                            last_status,
                            &mut heredoc_input,
                            &system,
                        );
                        last_status = result.status;
                        if result.request_exit {
                            break;
                        }
                    }
                    Err(e) => {
                        eprintln!("{SHELL_NAME}: {e}");
                        tracing::warn!(error = %e, "syntax error");
                        last_status = 258;
                    }
                }
            }
        }
    }

    if let Err(e) = history::save(&history_path, &entries, history::DEFAULT_SAVE_CAP) {
        tracing::warn!(error = %e, "failed to save history");
    }

    Ok(last_status)
}

fn main() {
    match run() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("{SHELL_NAME}: {e}");
            std::process::exit(1);
        }
    }
}
