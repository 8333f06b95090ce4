use clap::Parser;

use batchq::client::commands::hold::{HoldOpts, command_hold};
use batchq::client::globalsettings::make_global_settings;
use batchq::common::cli::CommonOpts;
use batchq::common::setup::setup_logging;

/// Places holds on batch jobs
#[derive(Parser)]
#[command(
    name = "qhold",
    version(batchq::BATCHQ_VERSION),
    help_expected(true),
    disable_help_flag(true)
)]
struct QholdOptions {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(flatten)]
    opts: HoldOpts,

    /// Print help (`-h` selects hold types)
    #[arg(long, action = clap::ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

fn main() {
    let options = QholdOptions::parse();
    setup_logging(options.common.debug);

    let gsettings = make_global_settings(options.common);
    let summary = command_hold(&gsettings, options.opts);
    std::process::exit(summary.exit_code());
}
