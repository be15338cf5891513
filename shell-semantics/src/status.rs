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

//! Decodes a reaped child's `WaitStatus` into the integer exit status
//! `$?` takes on (`spec.md` §4.9 "Status decoding").

use nix::sys::wait::WaitStatus;

/// Normal exit yields the exit code; killed-by-signal yields `128 + s`
/// (`spec.md` §4.9). A status this shell's own executor did not expect
/// (stopped/continued, reported only when the caller passed `WUNTRACED`
/// or `WCONTINUED`, neither of which this executor requests) falls back
/// to 1 rather than panicking.
pub fn decode_wait_status(status: WaitStatus) -> i32 {
    match status {
        WaitStatus::Exited(_, code) => code,
        WaitStatus::Signaled(_, signal, _) => 128 + signal as i32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;
    use nix::unistd::Pid;

    #[test]
    fn normal_exit_is_the_exit_code() {
        let status = WaitStatus::Exited(Pid::from_raw(1), 3);
        assert_eq!(decode_wait_status(status), 3);
    }

    #[test]
    fn signal_kill_is_128_plus_signal() {
        let status = WaitStatus::Signaled(Pid::from_raw(1), Signal::SIGKILL, false);
        assert_eq!(decode_wait_status(status), 128 + Signal::SIGKILL as i32);
    }
}
