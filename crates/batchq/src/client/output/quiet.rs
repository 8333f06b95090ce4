use crate::client::dispatch::{DispatchError, Dispatched};
use crate::client::output::common::format_diagnostic;
use crate::client::output::outputs::Output;

#[derive(Default)]
pub struct Quiet;

impl Output for Quiet {
    fn print_dispatch_done(&self, _command: &str, _argument: &str, _dispatched: &Dispatched) {}

    fn print_dispatch_error(&self, command: &str, argument: &str, error: &DispatchError) {
        eprintln!("{}", format_diagnostic(command, argument, error));
    }
}
