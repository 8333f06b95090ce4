use crate::client::dispatch::{DispatchError, Dispatched};

#[derive(clap::ValueEnum, Clone)]
pub enum Outputs {
    CLI,
    JSON,
    Quiet,
}

pub trait Output {
    /// One argument of `command` succeeded.
    fn print_dispatch_done(&self, command: &str, argument: &str, dispatched: &Dispatched);
    /// One argument of `command` failed.
    fn print_dispatch_error(&self, command: &str, argument: &str, error: &DispatchError);
}
