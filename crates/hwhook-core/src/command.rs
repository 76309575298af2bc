//! Command templating, the command runner seam and status translation.
//!
//! The open command is the configured template followed by the discovered
//! parameters, `"<opencmd> <format> <rate> <channels>\n"`. The close command
//! is the configured template, run verbatim. Neither is shell-escaped: the
//! templates come from operator configuration.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::HardwareParameters;

/// Size of the command line buffer, terminator included.
///
/// Rendered lines keep at most `MAX_COMMAND_LEN - 1` bytes.
pub const MAX_COMMAND_LEN: usize = 1000;

/// Render the open command for a set of discovered parameters.
///
/// # Example
///
/// ```rust
/// use hwhook_core::{HardwareParameters, render_open_command};
///
/// let params = HardwareParameters::new("S16_LE", 48000, 2);
/// let line = render_open_command("/bin/echo", &params);
/// assert_eq!(line, "/bin/echo S16_LE 48000 2\n");
/// ```
pub fn render_open_command(template: &str, params: &HardwareParameters) -> String {
    let mut line = format!(
        "{} {} {} {}\n",
        template, params.format, params.rate, params.channels
    );
    truncate_to_bound(&mut line);
    line
}

/// Render the close command. The template is used as-is, bounded like the
/// open command.
pub fn render_close_command(template: &str) -> String {
    let mut line = template.to_string();
    truncate_to_bound(&mut line);
    line
}

/// Truncate `line` to the command buffer bound on a character boundary.
fn truncate_to_bound(line: &mut String) {
    let limit = MAX_COMMAND_LEN - 1;
    if line.len() <= limit {
        return;
    }
    let mut cut = limit;
    while !line.is_char_boundary(cut) {
        cut -= 1;
    }
    line.truncate(cut);
}

/// Translate a raw runner status into the hook's signed convention.
///
/// A positive exit status is negated; zero and negative codes pass through.
///
/// ```rust
/// use hwhook_core::translate_status;
///
/// assert_eq!(translate_status(2), -2);
/// assert_eq!(translate_status(0), 0);
/// assert_eq!(translate_status(-12), -12);
/// ```
pub fn translate_status(status: i32) -> i32 {
    if status > 0 { -status } else { status }
}

/// Synchronous command executor.
///
/// `run` blocks until the command exits and returns an OS-style status:
/// zero on success, the positive exit code on failure, or a negative error
/// code when the command could not be started. There is no timeout.
pub trait CommandRunner {
    /// Execute one command line.
    fn run(&self, command_line: &str) -> i32;
}

impl<T: CommandRunner + ?Sized> CommandRunner for Box<T> {
    fn run(&self, command_line: &str) -> i32 {
        (**self).run(command_line)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command_line: &str) -> i32 {
        (**self).run(command_line)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for Rc<T> {
    fn run(&self, command_line: &str) -> i32 {
        (**self).run(command_line)
    }
}

/// Runner that records every command line instead of executing it.
///
/// Statuses are served from a script in order; once the script is exhausted
/// the fallback status is returned.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<String>>,
    script: RefCell<VecDeque<i32>>,
    fallback: i32,
}

impl RecordingRunner {
    /// Runner that reports success for every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that reports `status` for every command.
    pub fn with_status(status: i32) -> Self {
        Self {
            fallback: status,
            ..Self::default()
        }
    }

    /// Queue statuses for the next calls, in order.
    pub fn script(self, statuses: impl IntoIterator<Item = i32>) -> Self {
        self.script.borrow_mut().extend(statuses);
        self
    }

    /// Command lines received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of commands received so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command_line: &str) -> i32 {
        self.calls.borrow_mut().push(command_line.to_string());
        self.script.borrow_mut().pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_command_renders_in_positional_order() {
        let params = HardwareParameters::new("S16_LE", 48000, 2);
        let line = render_open_command("/bin/echo", &params);
        assert_eq!(line, "/bin/echo S16_LE 48000 2\n");
        assert_eq!(line.trim_end(), "/bin/echo S16_LE 48000 2");
    }

    #[test]
    fn open_command_with_sentinels() {
        let line = render_open_command("notify", &HardwareParameters::default());
        assert_eq!(line, "notify  -1 -1\n");
    }

    #[test]
    fn close_command_is_verbatim() {
        assert_eq!(
            render_close_command("pkill -f 'arecord -D hw:Loopback,1'"),
            "pkill -f 'arecord -D hw:Loopback,1'"
        );
    }

    #[test]
    fn templates_are_not_escaped() {
        let params = HardwareParameters::new("S16_LE", 44100, 2);
        let line = render_open_command("echo $HOME;", &params);
        assert!(line.starts_with("echo $HOME; "));
    }

    #[test]
    fn long_lines_are_truncated() {
        let template = "x".repeat(2000);
        let line = render_open_command(&template, &HardwareParameters::new("S16_LE", 48000, 2));
        assert_eq!(line.len(), MAX_COMMAND_LEN - 1);
        assert!(!line.ends_with('\n'));

        let close = render_close_command(&template);
        assert_eq!(close.len(), MAX_COMMAND_LEN - 1);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut line = "é".repeat(MAX_COMMAND_LEN);
        truncate_to_bound(&mut line);
        assert!(line.len() <= MAX_COMMAND_LEN - 1);
        assert!(line.chars().all(|c| c == 'é'));
    }

    #[test]
    fn translate_negates_positive_exit() {
        assert_eq!(translate_status(1), -1);
        assert_eq!(translate_status(2), -2);
        assert_eq!(translate_status(127), -127);
    }

    #[test]
    fn translate_passes_through_non_positive() {
        assert_eq!(translate_status(0), 0);
        assert_eq!(translate_status(-22), -22);
    }

    #[test]
    fn recording_runner_serves_script_then_fallback() {
        let runner = RecordingRunner::with_status(3).script([0, -5]);
        assert_eq!(runner.run("a"), 0);
        assert_eq!(runner.run("b"), -5);
        assert_eq!(runner.run("c"), 3);
        assert_eq!(runner.calls(), vec!["a", "b", "c"]);
        assert_eq!(runner.call_count(), 3);
    }
}
