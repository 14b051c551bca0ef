//! Entry point shared by every hook binary.
//!
//! A hook must never fail the tool it observes: malformed input and handler
//! errors end in a silent, successful exit.

use crate::debug::log_decision;
use crate::input::HookInput;
use crate::output::HookOutput;
use std::io::Write;

/// Handler outcome: the advisory to emit, if any.
pub type HookResult = anyhow::Result<Option<String>>;

/// Read stdin, run `handler`, and print its advisory.
pub fn run_hook(hook_name: &str, handler: impl FnOnce(&HookInput) -> HookResult) {
    let input = match HookInput::from_stdin() {
        Ok(input) => input,
        Err(e) => {
            log_decision(hook_name, "", "skip", &format!("unreadable input: {}", e));
            return;
        }
    };

    let _ = dispatch(hook_name, &input, handler, &mut std::io::stdout().lock());
}

/// Run `handler` against parsed input and write any advisory to `out`.
///
/// Returns whether an advisory was written.
pub fn dispatch(
    hook_name: &str,
    input: &HookInput,
    handler: impl FnOnce(&HookInput) -> HookResult,
    out: &mut impl Write,
) -> bool {
    match handler(input) {
        Ok(Some(message)) => {
            log_decision(hook_name, input.command(), "advise", "advisory emitted");
            HookOutput::message(message).write_to(out).is_ok()
        }
        Ok(None) => {
            log_decision(hook_name, input.command(), "silent", "no rule matched");
            false
        }
        Err(e) => {
            log_decision(hook_name, input.command(), "error", &format!("{:#}", e));
            false
        }
    }
}
