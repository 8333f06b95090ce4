use clap::Parser;

use diswire::batch::{Attribute, BatchRequest, ManagerCommand, ManagerObject, RequestBody};

use crate::client::commands::{CommandSummary, for_each_argument};
use crate::client::connector::Connector;
use crate::client::dispatch::{DispatchError, ServerDispatcher};
use crate::client::globalsettings::GlobalSettings;
use crate::client::locate::JobLocator;
use crate::client::output::outputs::Output;
use crate::common::jobid::Destination;

pub const ATTR_ENABLED: &str = "enabled";

#[derive(Parser)]
pub struct EnableOpts {
    /// Queues to enable: `queue`, `queue@server`, or `@server` for every queue of a server
    #[arg(required = true)]
    pub destinations: Vec<String>,
}

pub fn enable_request(user: &str, queue: &str) -> BatchRequest {
    BatchRequest::new(
        user,
        RequestBody::Manager {
            command: ManagerCommand::Set,
            object: ManagerObject::Queue,
            name: queue.to_string(),
            attributes: vec![Attribute::set(ATTR_ENABLED, "True")],
        },
    )
}

pub fn enable_queues<C: Connector, L: JobLocator>(
    dispatcher: &mut ServerDispatcher<C, L>,
    printer: &dyn Output,
    user: &str,
    opts: &EnableOpts,
) -> CommandSummary {
    for_each_argument(printer, "qenable", &opts.destinations, |argument| {
        let destination = Destination::parse(argument).map_err(DispatchError::from)?;
        let request = enable_request(user, destination.queue().unwrap_or(""));
        dispatcher.dispatch_request(argument, destination.server(), &request)
    })
}

pub fn command_enable(gsettings: &GlobalSettings, opts: EnableOpts) -> CommandSummary {
    let mut dispatcher = gsettings.dispatcher();
    enable_queues(&mut dispatcher, gsettings.printer(), gsettings.user(), &opts)
}
