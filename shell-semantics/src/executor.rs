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

//! The executor (`spec.md` §4.9, component C9): walks a [`Pipeline`],
//! sets up pipes, forks, applies redirections, dispatches builtin vs
//! external, and collects the pipeline's exit status.

use crate::error::ExecError;
use crate::heredoc::{self, HeredocInput};
use crate::path_resolver::{self, Resolution};
use crate::signals;
use crate::status::decode_wait_status;
use crate::expander;
use shell_env::{Environment, OpenMode, System};
use shell_syntax::{Command, Pipeline, Redirection, RedirectionKind};
use std::ffi::CString;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

/// What running a [`Pipeline`] produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExecResult {
    /// The new value of `$?`.
    pub status: i32,
    /// Set when an in-process `exit` ran (only possible for a
    /// single-stage builtin pipeline, `spec.md` §5's ordering
    /// guarantee). The caller — the session that owns history — is
    /// responsible for acting on this.
    pub request_exit: bool,
}

impl ExecResult {
    fn status(status: i32) -> Self {
        ExecResult {
            status,
            request_exit: false,
        }
    }
}

/// Runs one [`Pipeline`] to completion (`spec.md` §4.9).
///
/// `env` is mutated in place only when a single-stage pipeline's
/// program name is a builtin; every other path (external programs,
/// builtins inside a multi-stage pipeline) mutates only the forked
/// child's copy, matching `spec.md` §5: "environment mutations by a
/// builtin are visible to subsequent commands in the same line only if
/// that builtin ran in-process".
pub fn execute(
    pipeline: &Pipeline,
    env: &mut Environment,
    last_status: i32,
    heredoc_input: &mut dyn HeredocInput,
    system: &dyn System,
) -> ExecResult {
    if pipeline.is_empty() {
        return ExecResult::status(last_status);
    }

    if pipeline.stages.len() == 1 {
        let program = expander::expand_word(&pipeline.stages[0].program, env, last_status);
        if shell_builtin::is_builtin(&program) {
            return run_builtin_in_process(
                &program,
                &pipeline.stages[0],
                env,
                last_status,
                heredoc_input,
                system,
            );
        }
    }

    ExecResult::status(run_forked_pipeline(pipeline, env, last_status, heredoc_input, system))
}

/// Indices, within `redirs`, of the redirection that ultimately governs
/// fd 0 and fd 1 respectively: the *last* occurrence targeting each
/// descriptor (`spec.md` §4.5: "last wins for file direction").
fn winning_redirection_indices(redirs: &[Redirection]) -> (Option<usize>, Option<usize>) {
    let mut in0 = None;
    let mut out1 = None;
    for (i, r) in redirs.iter().enumerate() {
        match r.kind {
            RedirectionKind::In | RedirectionKind::HereDoc { .. } => in0 = Some(i),
            RedirectionKind::Out | RedirectionKind::Append => out1 = Some(i),
        }
    }
    (in0, out1)
}

/// Collects every here-doc in `redirs`, in source order, discarding all
/// but the one that wins fd 0 (`spec.md` §4.7: "the last one wins;
/// earlier ones are still fully consumed from the user then
/// discarded"). Returns one slot per redirection, populated only at the
/// winning index.
fn collect_heredocs(
    redirs: &[Redirection],
    winning_in0: Option<usize>,
    heredoc_input: &mut dyn HeredocInput,
    env: &Environment,
    last_status: i32,
    system: &dyn System,
) -> Result<Vec<Option<RawFd>>, ExecError> {
    let mut fds = vec![None; redirs.len()];
    for (i, r) in redirs.iter().enumerate() {
        if let RedirectionKind::HereDoc { expand_body } = r.kind {
            let delimiter = r.target.literal();
            let fd = heredoc::collect(&delimiter, expand_body, heredoc_input, env, last_status, system)
                .map_err(|_| ExecError::HeredocAborted)?;
            if Some(i) == winning_in0 {
                fds[i] = Some(fd);
            } else {
                system.close(fd);
            }
        }
    }
    Ok(fds)
}

/// Applies `redirs` onto the process's real fd 0/1, in source order.
/// Every occurrence is opened (and, for non-winning ones, immediately
/// closed again without being wired up) so that file-creation/
/// truncation side effects happen exactly as written, even though only
/// the winning occurrence actually changes what the stage reads or
/// writes (`spec.md` §4.5, §4.9).
fn apply_redirections(
    redirs: &[Redirection],
    heredoc_fds: &[Option<RawFd>],
    winning_in0: Option<usize>,
    winning_out1: Option<usize>,
    env: &Environment,
    last_status: i32,
    system: &dyn System,
) -> Result<(), ExecError> {
    for (i, r) in redirs.iter().enumerate() {
        match &r.kind {
            RedirectionKind::In => {
                let target = expander::expand_word(&r.target, env, last_status);
                let file = system
                    .open(Path::new(&target), OpenMode::Read)
                    .map_err(|source| ExecError::RedirectionFailed { target: target.clone(), source })?;
                if Some(i) == winning_in0 {
                    let _ = system.dup2(file.as_raw_fd(), 0);
                }
            }
            RedirectionKind::Out => {
                let target = expander::expand_word(&r.target, env, last_status);
                let file = system
                    .open(Path::new(&target), OpenMode::WriteTruncate)
                    .map_err(|source| ExecError::RedirectionFailed { target: target.clone(), source })?;
                if Some(i) == winning_out1 {
                    let _ = system.dup2(file.as_raw_fd(), 1);
                }
            }
            RedirectionKind::Append => {
                let target = expander::expand_word(&r.target, env, last_status);
                let file = system
                    .open(Path::new(&target), OpenMode::WriteAppend)
                    .map_err(|source| ExecError::RedirectionFailed { target: target.clone(), source })?;
                if Some(i) == winning_out1 {
                    let _ = system.dup2(file.as_raw_fd(), 1);
                }
            }
            RedirectionKind::HereDoc { .. } => {
                if Some(i) == winning_in0 {
                    if let Some(fd) = heredoc_fds[i] {
                        let _ = system.dup2(fd, 0);
                        system.close(fd);
                    }
                }
            }
        }
    }
    Ok(())
}

struct SavedStdio {
    stdin: RawFd,
    stdout: RawFd,
    stderr: RawFd,
}

fn save_stdio(system: &dyn System) -> Option<SavedStdio> {
    let stdin = system.dup(0).ok()?;
    let stdout = system.dup(1).ok()?;
    let stderr = system.dup(2).ok()?;
    Some(SavedStdio { stdin, stdout, stderr })
}

fn restore_stdio(system: &dyn System, saved: SavedStdio) {
    let _ = system.dup2(saved.stdin, 0);
    let _ = system.dup2(saved.stdout, 1);
    let _ = system.dup2(saved.stderr, 2);
    system.close(saved.stdin);
    system.close(saved.stdout);
    system.close(saved.stderr);
}

/// `spec.md` §4.9: "Single-stage pipeline with builtin name: apply
/// redirections on a saved copy of stdin/stdout, invoke the builtin
/// body directly (no fork), restore the saved descriptors, propagate
/// the builtin's return code."
fn run_builtin_in_process(
    program: &str,
    command: &Command,
    env: &mut Environment,
    last_status: i32,
    heredoc_input: &mut dyn HeredocInput,
    system: &dyn System,
) -> ExecResult {
    tracing::trace!(builtin = program, "running builtin in-process");
    let args: Vec<String> = command
        .args
        .iter()
        .map(|w| expander::expand_word(w, env, last_status))
        .collect();

    let (winning_in0, winning_out1) = winning_redirection_indices(&command.redirections);
    let heredoc_fds = match collect_heredocs(
        &command.redirections,
        winning_in0,
        heredoc_input,
        env,
        last_status,
        system,
    ) {
        Ok(fds) => fds,
        Err(e) => {
            eprintln!("posh: {e}");
            return ExecResult::status(e.exit_status());
        }
    };

    let saved = match save_stdio(system) {
        Some(saved) => saved,
        None => {
            eprintln!("posh: cannot save standard descriptors");
            return ExecResult::status(1);
        }
    };

    if let Err(e) = apply_redirections(
        &command.redirections,
        &heredoc_fds,
        winning_in0,
        winning_out1,
        env,
        last_status,
        system,
    ) {
        eprintln!("posh: {e}");
        restore_stdio(system, saved);
        return ExecResult::status(e.exit_status());
    }

    let mut ctx = shell_builtin::Context { env, last_status };
    let outcome = shell_builtin::dispatch(program, &args, &mut ctx)
        .expect("caller already checked shell_builtin::is_builtin");

    restore_stdio(system, saved);

    ExecResult {
        status: outcome.exit_status,
        request_exit: outcome.request_exit,
    }
}

/// Maps an `execve` failure to the exit status and message `spec.md`
/// §7 calls for: 126 for a permission problem, 127 if the resolved
/// path vanished between resolution and `exec`, 126 for anything else.
fn execve_error_status(error: nix::Error, program: &str) -> i32 {
    match error {
        nix::Error::EACCES => {
            eprintln!("posh: {program}: Permission denied");
            126
        }
        nix::Error::ENOENT => {
            eprintln!("posh: {program}: No such file or directory");
            127
        }
        other => {
            eprintln!("posh: {program}: {other}");
            126
        }
    }
}

fn to_cstrings(program: &CString, args: &[String]) -> Vec<CString> {
    let mut out = vec![program.clone()];
    out.extend(args.iter().filter_map(|a| CString::new(a.as_str()).ok()));
    out
}

/// `spec.md` §4.9: the single-stage-external and multi-stage cases
/// share one algorithm, differing only in how many pipes are created
/// (zero vs N-1). Every stage is forked even if it is already known to
/// fail (command not found, heredoc aborted) so the pipe plumbing for
/// neighboring stages is never left dangling.
fn run_forked_pipeline(
    pipeline: &Pipeline,
    env: &mut Environment,
    last_status: i32,
    heredoc_input: &mut dyn HeredocInput,
    system: &dyn System,
) -> i32 {
    let stage_count = pipeline.stages.len();
    let mut pipes: Vec<(RawFd, RawFd)> = Vec::with_capacity(stage_count.saturating_sub(1));
    for _ in 0..stage_count.saturating_sub(1) {
        match system.pipe() {
            Ok(p) => pipes.push(p),
            Err(e) => {
                for (r, w) in &pipes {
                    system.close(*r);
                    system.close(*w);
                }
                eprintln!("posh: pipe failed: {e}");
                return 1;
            }
        }
    }

    let mut children = Vec::with_capacity(stage_count);

    for (i, stage) in pipeline.stages.iter().enumerate() {
        let program = expander::expand_word(&stage.program, env, last_status);
        let args: Vec<String> = stage
            .args
            .iter()
            .map(|w| expander::expand_word(w, env, last_status))
            .collect();
        let is_builtin = shell_builtin::is_builtin(&program);
        tracing::trace!(stage = i, program = program.as_str(), is_builtin, "forking stage");

        let mut precomputed_exit = None;
        let resolved_path = if is_builtin {
            None
        } else {
            match path_resolver::resolve(&program, env, system) {
                Resolution::Found(path) => {
                    tracing::debug!(program = program.as_str(), resolved = %path.display(), "resolved executable");
                    Some(path)
                }
                Resolution::NotFound => {
                    eprintln!("posh: {program}: command not found");
                    precomputed_exit = Some(127);
                    None
                }
            }
        };

        let (winning_in0, winning_out1) = winning_redirection_indices(&stage.redirections);
        let heredoc_fds = if precomputed_exit.is_some() {
            vec![None; stage.redirections.len()]
        } else {
            match collect_heredocs(
                &stage.redirections,
                winning_in0,
                heredoc_input,
                env,
                last_status,
                system,
            ) {
                Ok(fds) => fds,
                Err(e) => {
                    eprintln!("posh: {e}");
                    precomputed_exit = Some(e.exit_status());
                    vec![None; stage.redirections.len()]
                }
            }
        };

        // SAFETY: this shell is single-threaded (`spec.md` §5); the
        // child below only dup2s, closes fds, and execs/exits before
        // returning to any shared state.
        match unsafe { system.fork() } {
            Ok(nix::unistd::ForkResult::Child) => {
                signals::reset_for_child(system);

                if i > 0 {
                    let (read_fd, _) = pipes[i - 1];
                    let _ = system.dup2(read_fd, 0);
                }
                if i < stage_count - 1 {
                    let (_, write_fd) = pipes[i];
                    let _ = system.dup2(write_fd, 1);
                }
                for (r, w) in &pipes {
                    system.close(*r);
                    system.close(*w);
                }

                if let Some(code) = precomputed_exit {
                    std::process::exit(code);
                }

                if let Err(e) = apply_redirections(
                    &stage.redirections,
                    &heredoc_fds,
                    winning_in0,
                    winning_out1,
                    env,
                    last_status,
                    system,
                ) {
                    eprintln!("posh: {e}");
                    std::process::exit(e.exit_status());
                }

                if is_builtin {
                    let mut ctx = shell_builtin::Context { env, last_status };
                    let outcome = shell_builtin::dispatch(&program, &args, &mut ctx)
                        .expect("checked is_builtin above");
                    std::process::exit(outcome.exit_status);
                }

                let path = resolved_path.expect("not_found case already exited above");
                let cprogram = match CString::new(path.to_string_lossy().into_owned()) {
                    Ok(c) => c,
                    Err(_) => std::process::exit(126),
                };
                let cargs = to_cstrings(&cprogram, &args);
                let cenvp = env.to_exec_strings();
                match system.execve(&cprogram, &cargs, &cenvp) {
                    Ok(infallible) => match infallible {},
                    Err(e) => std::process::exit(execve_error_status(e, &program)),
                }
            }
            Ok(nix::unistd::ForkResult::Parent { child }) => {
                children.push(child);
            }
            Err(e) => {
                eprintln!("posh: fork failed: {e}");
            }
        }
    }

    for (r, w) in &pipes {
        system.close(*r);
        system.close(*w);
    }

    let mut status = 1;
    let last_index = children.len().saturating_sub(1);
    for (idx, child) in children.iter().enumerate() {
        loop {
            match system.waitpid(Some(*child)) {
                Ok(wait_status) => {
                    if idx == last_index {
                        status = decode_wait_status(wait_status);
                    }
                    break;
                }
                Err(nix::Error::EINTR) => continue,
                Err(e) => {
                    eprintln!("posh: wait failed: {e}");
                    break;
                }
            }
        }
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_syntax::{parse, tokenize};

    fn pipeline_of(src: &str) -> Pipeline {
        let out = tokenize(src);
        parse(&out.tokens).unwrap()
    }

    #[test]
    fn winning_indices_pick_the_last_occurrence_per_direction() {
        let pipeline = pipeline_of("cmd < a < b > c >> d");
        let redirs = &pipeline.stages[0].redirections;
        let (in0, out1) = winning_redirection_indices(redirs);
        assert_eq!(in0, Some(1));
        assert_eq!(out1, Some(3));
    }

    #[test]
    fn heredoc_participates_in_the_fd0_group() {
        let pipeline = pipeline_of("cmd < a << END");
        let redirs = &pipeline.stages[0].redirections;
        let (in0, _) = winning_redirection_indices(redirs);
        assert_eq!(in0, Some(1));
    }

    #[test]
    fn empty_pipeline_is_a_no_op() {
        let pipeline = Pipeline::default();
        let mut env = Environment::new();
        struct NoInput;
        impl HeredocInput for NoInput {
            fn read_line(&mut self, _: &str) -> std::io::Result<Option<String>> {
                Ok(None)
            }
        }
        let mut input = NoInput;
        let system = shell_env::RealSystem::new();
        let result = execute(&pipeline, &mut env, 7, &mut input, &system);
        assert_eq!(result, ExecResult::status(7));
    }

    #[test]
    fn single_builtin_stage_mutates_environment_in_process() {
        let pipeline = pipeline_of("export FOO=bar");
        let mut env = Environment::new();
        struct NoInput;
        impl HeredocInput for NoInput {
            fn read_line(&mut self, _: &str) -> std::io::Result<Option<String>> {
                Ok(None)
            }
        }
        let mut input = NoInput;
        let system = shell_env::RealSystem::new();
        let result = execute(&pipeline, &mut env, 0, &mut input, &system);
        assert_eq!(result.status, 0);
        assert_eq!(env.get("FOO"), Some("bar"));
    }
}
