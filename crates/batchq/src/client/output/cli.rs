use colored::Colorize;

use crate::client::dispatch::{DispatchError, Dispatched};
use crate::client::output::common::format_diagnostic;
use crate::client::output::outputs::Output;

#[derive(Default)]
pub struct CliOutput;

impl Output for CliOutput {
    fn print_dispatch_done(&self, command: &str, argument: &str, dispatched: &Dispatched) {
        if dispatched.located {
            log::info!(
                "{command}: {argument}: done on server {} after the job moved",
                dispatched.server
            );
        } else {
            log::debug!("{command}: {argument}: done on server {}", dispatched.server);
        }
    }

    fn print_dispatch_error(&self, command: &str, argument: &str, error: &DispatchError) {
        eprintln!("{}", format_diagnostic(command, argument, error).red());
    }
}
