pub mod checkpoint;
pub mod enable;
pub mod hold;
pub mod jobmove;

use crate::client::dispatch::{DispatchError, Dispatched};
use crate::client::output::outputs::Output;

/// Outcome of a command over all of its arguments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub succeeded: usize,
    pub failed: usize,
    last_exit_code: i32,
}

impl CommandSummary {
    fn record(&mut self, result: &Result<Dispatched, DispatchError>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(error) => {
                self.failed += 1;
                self.last_exit_code = error.exit_code();
            }
        }
    }

    /// `0` when every argument succeeded, otherwise the code of the last failure.
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            self.last_exit_code
        }
    }
}

/// Runs `operation` for every argument, reporting each outcome.
///
/// A failing argument never stops the processing of the following ones.
pub fn for_each_argument<F>(
    printer: &dyn Output,
    command: &str,
    arguments: &[String],
    mut operation: F,
) -> CommandSummary
where
    F: FnMut(&str) -> Result<Dispatched, DispatchError>,
{
    let mut summary = CommandSummary::default();
    for argument in arguments {
        let result = operation(argument);
        match &result {
            Ok(dispatched) => printer.print_dispatch_done(command, argument, dispatched),
            Err(error) => printer.print_dispatch_error(command, argument, error),
        }
        summary.record(&result);
    }
    summary
}
