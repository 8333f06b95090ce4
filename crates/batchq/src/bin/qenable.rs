use clap::Parser;

use batchq::client::commands::enable::{EnableOpts, command_enable};
use batchq::client::globalsettings::make_global_settings;
use batchq::common::cli::CommonOpts;
use batchq::common::setup::setup_logging;

/// Enables batch queues to accept jobs
#[derive(Parser)]
#[command(
    name = "qenable",
    version(batchq::BATCHQ_VERSION),
    help_expected(true)
)]
struct QenableOptions {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(flatten)]
    opts: EnableOpts,
}

fn main() {
    let options = QenableOptions::parse();
    setup_logging(options.common.debug);

    let gsettings = make_global_settings(options.common);
    let summary = command_enable(&gsettings, options.opts);
    std::process::exit(summary.exit_code());
}
