use clap::Parser;

use diswire::batch::{BatchRequest, RequestBody};

use crate::client::commands::{CommandSummary, for_each_argument};
use crate::client::connector::Connector;
use crate::client::dispatch::ServerDispatcher;
use crate::client::globalsettings::GlobalSettings;
use crate::client::locate::JobLocator;
use crate::client::output::outputs::Output;

#[derive(Parser)]
pub struct CheckpointOpts {
    /// Jobs to checkpoint
    #[arg(required = true)]
    pub jobs: Vec<String>,
}

pub fn checkpoint_request(user: &str, job_id: &str) -> BatchRequest {
    BatchRequest::new(
        user,
        RequestBody::CheckpointJob {
            job_id: job_id.to_string(),
        },
    )
}

pub fn checkpoint_jobs<C: Connector, L: JobLocator>(
    dispatcher: &mut ServerDispatcher<C, L>,
    printer: &dyn Output,
    user: &str,
    opts: &CheckpointOpts,
) -> CommandSummary {
    for_each_argument(printer, "qchkpt", &opts.jobs, |job| {
        dispatcher.dispatch_job(job, |job_id| checkpoint_request(user, job_id))
    })
}

pub fn command_checkpoint(gsettings: &GlobalSettings, opts: CheckpointOpts) -> CommandSummary {
    let mut dispatcher = gsettings.dispatcher();
    checkpoint_jobs(&mut dispatcher, gsettings.printer(), gsettings.user(), &opts)
}
