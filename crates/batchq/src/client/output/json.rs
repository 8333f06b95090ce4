use serde::Serialize;

use crate::client::dispatch::{DispatchError, Dispatched};
use crate::client::output::outputs::Output;

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print(&self, data: serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        );
    }
}

#[derive(Serialize)]
struct DispatchRecord<'a> {
    command: &'a str,
    argument: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    located: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
}

fn error_server(error: &DispatchError) -> Option<&str> {
    match error {
        DispatchError::MalformedInput(_) => None,
        DispatchError::ConnectFailure { server, .. }
        | DispatchError::TransportTimeout { server, .. }
        | DispatchError::ProtocolViolation { server, .. }
        | DispatchError::Overflow { server, .. }
        | DispatchError::UnknownJob { server, .. }
        | DispatchError::ServerRejected { server, .. } => Some(server.as_str()),
    }
}

fn done_record<'a>(
    command: &'a str,
    argument: &'a str,
    dispatched: &'a Dispatched,
) -> DispatchRecord<'a> {
    DispatchRecord {
        command,
        argument,
        success: true,
        server: Some(dispatched.server.as_str()),
        located: Some(dispatched.located),
        error: None,
        exit_code: None,
    }
}

fn error_record<'a>(
    command: &'a str,
    argument: &'a str,
    error: &'a DispatchError,
) -> DispatchRecord<'a> {
    DispatchRecord {
        command,
        argument,
        success: false,
        server: error_server(error),
        located: None,
        error: Some(error.to_string()),
        exit_code: Some(error.exit_code()),
    }
}

impl Output for JsonOutput {
    fn print_dispatch_done(&self, command: &str, argument: &str, dispatched: &Dispatched) {
        self.print(serde_json::json!(done_record(command, argument, dispatched)));
    }

    fn print_dispatch_error(&self, command: &str, argument: &str, error: &DispatchError) {
        self.print(serde_json::json!(error_record(command, argument, error)));
    }
}
