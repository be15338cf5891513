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

//! The signal coordinator (`spec.md` §4.10, component C10).
//!
//! Installation and restoration of the actual dispositions live on
//! [`System`] (`shell-env::RealSystem` is the only place a signal
//! handler can actually be registered); this module is the shell-wide
//! policy that calls into that seam at the two points the spec cares
//! about: once at startup, and once per forked child right before
//! `exec`.
//!
//! At the prompt, SIGINT is handled entirely by the line editor
//! (`rustyline` reports `Err(ReadlineError::Interrupted)` instead of the
//! process receiving a real signal while it owns the terminal); this
//! module's handler only matters while a foreground pipeline is
//! running, per `spec.md` §4.10: "the shell itself still catches SIGINT
//! ... it does not interrupt the wait".

use shell_env::System;

/// Installs the shell process's SIGINT/SIGQUIT dispositions. Call once
/// at startup, before the first prompt is drawn.
pub fn install(system: &dyn System) {
    system.install_shell_signal_handlers();
}

/// Resets SIGINT/SIGQUIT to default disposition. Call in a forked child
/// immediately before `exec`, never in the shell's own process
/// (`spec.md` §4.10: "the child inherits default signal disposition").
pub fn reset_for_child(system: &dyn System) {
    system.reset_child_signal_handlers();
}

/// Clears and returns whether SIGINT arrived since the last call. The
/// executor polls this after `wait` returns so a `Ctrl-C` during a
/// foreground pipeline is observable without the wait itself being
/// interrupted.
pub fn take_interrupted(system: &dyn System) -> bool {
    system.take_interrupted()
}
