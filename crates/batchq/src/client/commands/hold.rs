use anyhow::bail;
use clap::Parser;

use diswire::batch::{Attribute, BatchRequest, RequestBody};

use crate::client::commands::{CommandSummary, for_each_argument};
use crate::client::connector::Connector;
use crate::client::dispatch::ServerDispatcher;
use crate::client::globalsettings::GlobalSettings;
use crate::client::locate::JobLocator;
use crate::client::output::outputs::Output;

pub const ATTR_HOLD_TYPES: &str = "Hold_Types";

#[derive(Parser)]
#[command(disable_help_flag(true))]
pub struct HoldOpts {
    /// Hold types to place: any of `u` (user), `o` (operator) and `s` (system),
    /// or `n` for none
    #[arg(short = 'h', long, default_value = "u", value_parser = parse_hold_types)]
    pub hold_types: String,

    /// Jobs to hold
    #[arg(required = true)]
    pub jobs: Vec<String>,
}

fn parse_hold_types(value: &str) -> anyhow::Result<String> {
    if value.is_empty() {
        bail!("Hold types cannot be empty");
    }
    if let Some(invalid) = value.chars().find(|c| !"uosn".contains(*c)) {
        bail!("Invalid hold type '{invalid}', expected one of u, o, s or n");
    }
    if value.len() > 1 && value.contains('n') {
        bail!("Hold type 'n' cannot be combined with other hold types");
    }
    Ok(value.to_string())
}

pub fn hold_request(user: &str, job_id: &str, hold_types: &str) -> BatchRequest {
    BatchRequest::new(
        user,
        RequestBody::HoldJob {
            job_id: job_id.to_string(),
            attributes: vec![Attribute::set(ATTR_HOLD_TYPES, hold_types)],
        },
    )
}

pub fn hold_jobs<C: Connector, L: JobLocator>(
    dispatcher: &mut ServerDispatcher<C, L>,
    printer: &dyn Output,
    user: &str,
    opts: &HoldOpts,
) -> CommandSummary {
    for_each_argument(printer, "qhold", &opts.jobs, |job| {
        dispatcher.dispatch_job(job, |job_id| hold_request(user, job_id, &opts.hold_types))
    })
}

pub fn command_hold(gsettings: &GlobalSettings, opts: HoldOpts) -> CommandSummary {
    let mut dispatcher = gsettings.dispatcher();
    hold_jobs(&mut dispatcher, gsettings.printer(), gsettings.user(), &opts)
}

#[cfg(test)]
mod tests {
    use diswire::batch::{BatchReply, PBSE_BADSTATE, PBSE_UNKJOBID};

    use super::*;
    use crate::client::output::quiet::Quiet;
    use crate::tests::utils::{Scripted, ScriptedConnector, ScriptedLocator};

    fn opts(args: &[&str]) -> HoldOpts {
        let mut argv = vec!["qhold"];
        argv.extend_from_slice(args);
        HoldOpts::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_hold_types() {
        assert_eq!(opts(&["42"]).hold_types, "u");
        assert_eq!(opts(&["-h", "uos", "42"]).hold_types, "uos");
        assert_eq!(opts(&["-h", "n", "42"]).hold_types, "n");
        assert!(HoldOpts::try_parse_from(["qhold", "-h", "x", "42"]).is_err());
        assert!(HoldOpts::try_parse_from(["qhold", "-h", "un", "42"]).is_err());
        assert!(HoldOpts::try_parse_from(["qhold"]).is_err());
    }

    #[test]
    fn test_hold_request() {
        let request = hold_request("alice", "42.serverA", "uo");
        assert_eq!(
            request.body,
            RequestBody::HoldJob {
                job_id: "42.serverA".to_string(),
                attributes: vec![Attribute::set("Hold_Types", "uo")],
            }
        );
    }

    #[test]
    fn test_partial_failure_continues() {
        let connector = ScriptedConnector::new(vec![
            Scripted::Reply(BatchReply::success()),
            Scripted::Reply(BatchReply::error(PBSE_BADSTATE, None)),
        ]);
        let mut dispatcher =
            ServerDispatcher::new(connector.clone(), ScriptedLocator::new(vec![]), "serverD");
        let summary = hold_jobs(
            &mut dispatcher,
            &Quiet,
            "alice",
            &opts(&["42.serverA", "bad", "43"]),
        );
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.exit_code(), (PBSE_BADSTATE % 256) as i32);
        assert_eq!(connector.connects(), vec!["serverA", "serverD"]);
        assert_eq!(
            connector.requests(),
            vec![
                hold_request("alice", "42.serverA", "u"),
                hold_request("alice", "43.serverD", "u")
            ]
        );
    }

    #[test]
    fn test_hold_follows_moved_job() {
        let connector = ScriptedConnector::new(vec![
            Scripted::Reply(BatchReply::error(PBSE_UNKJOBID, None)),
            Scripted::Reply(BatchReply::success()),
        ]);
        let mut dispatcher = ServerDispatcher::new(
            connector.clone(),
            ScriptedLocator::new(vec![Some("serverB")]),
            "serverD",
        );
        let summary = hold_jobs(&mut dispatcher, &Quiet, "alice", &opts(&["42.serverA"]));
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(connector.connects(), vec!["serverA", "serverB"]);
    }
}
