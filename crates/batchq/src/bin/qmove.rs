use clap::Parser;

use batchq::client::commands::jobmove::{MoveOpts, command_move};
use batchq::client::globalsettings::make_global_settings;
use batchq::common::cli::CommonOpts;
use batchq::common::setup::setup_logging;

/// Moves batch jobs to another queue or server
#[derive(Parser)]
#[command(
    name = "qmove",
    version(batchq::BATCHQ_VERSION),
    help_expected(true)
)]
struct QmoveOptions {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(flatten)]
    opts: MoveOpts,
}

fn main() {
    let options = QmoveOptions::parse();
    setup_logging(options.common.debug);

    let gsettings = make_global_settings(options.common);
    let summary = command_move(&gsettings, options.opts);
    std::process::exit(summary.exit_code());
}
