use clap::Parser;

use diswire::PBS_BATCH_SERVICE_PORT;

use crate::client::output::outputs::Outputs;
use crate::common::utils::time::ArgDuration;

#[derive(clap::ValueEnum, Clone)]
pub enum ColorPolicy {
    /// Use colors if the stderr is detected to be a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Batch server contacted when a job or destination does not name one
    #[arg(long, env = "PBS_DEFAULT", help_heading("GLOBAL OPTIONS"))]
    pub server: Option<String>,

    /// Port of the batch server service
    #[arg(
        long,
        env = "PBS_BATCH_SERVICE_PORT",
        default_value_t = PBS_BATCH_SERVICE_PORT,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub port: u16,

    /// Time limit of a single read or write on a server connection
    #[arg(
        long,
        env = "PBS_IO_TIMEOUT",
        default_value = "30s",
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub timeout: ArgDuration,

    /// Time limit for establishing a server connection
    #[arg(
        long,
        default_value = "10s",
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub connect_timeout: ArgDuration,

    /// Sets console color policy
    #[arg(
        long,
        default_value_t = ColorPolicy::Auto,
        value_enum,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub colors: ColorPolicy,

    /// Sets output formatting
    #[arg(
        long,
        env = "BATCHQ_OUTPUT_MODE",
        default_value_t = Outputs::CLI,
        value_enum,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(
        long,
        env = "BATCHQ_DEBUG",
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub debug: bool,
}
