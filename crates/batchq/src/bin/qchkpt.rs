use clap::Parser;

use batchq::client::commands::checkpoint::{CheckpointOpts, command_checkpoint};
use batchq::client::globalsettings::make_global_settings;
use batchq::common::cli::CommonOpts;
use batchq::common::setup::setup_logging;

/// Checkpoints running batch jobs
#[derive(Parser)]
#[command(
    name = "qchkpt",
    version(batchq::BATCHQ_VERSION),
    help_expected(true)
)]
struct QchkptOptions {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(flatten)]
    opts: CheckpointOpts,
}

fn main() {
    let options = QchkptOptions::parse();
    setup_logging(options.common.debug);

    let gsettings = make_global_settings(options.common);
    let summary = command_checkpoint(&gsettings, options.opts);
    std::process::exit(summary.exit_code());
}
