use clap::Parser;

use diswire::batch::{BatchRequest, RequestBody};

use crate::client::commands::{CommandSummary, for_each_argument};
use crate::client::connector::Connector;
use crate::client::dispatch::ServerDispatcher;
use crate::client::globalsettings::GlobalSettings;
use crate::client::locate::JobLocator;
use crate::client::output::outputs::Output;
use crate::common::jobid::Destination;

#[derive(Parser)]
pub struct MoveOpts {
    /// Where to move the jobs: `queue`, `queue@server` or `@server`
    pub destination: Destination,

    /// Jobs to move
    #[arg(required = true)]
    pub jobs: Vec<String>,
}

pub fn move_request(user: &str, job_id: &str, destination: &Destination) -> BatchRequest {
    BatchRequest::new(
        user,
        RequestBody::MoveJob {
            job_id: job_id.to_string(),
            destination: destination.to_string(),
        },
    )
}

pub fn move_jobs<C: Connector, L: JobLocator>(
    dispatcher: &mut ServerDispatcher<C, L>,
    printer: &dyn Output,
    user: &str,
    opts: &MoveOpts,
) -> CommandSummary {
    for_each_argument(printer, "qmove", &opts.jobs, |job| {
        dispatcher.dispatch_job(job, |job_id| {
            move_request(user, job_id, &opts.destination)
        })
    })
}

pub fn command_move(gsettings: &GlobalSettings, opts: MoveOpts) -> CommandSummary {
    let mut dispatcher = gsettings.dispatcher();
    move_jobs(&mut dispatcher, gsettings.printer(), gsettings.user(), &opts)
}
