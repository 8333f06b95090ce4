use crate::client::dispatch::DispatchError;

/// The line reported for a failed argument: `<command>: <argument>: <reason>`.
pub fn format_diagnostic(command: &str, argument: &str, error: &DispatchError) -> String {
    format!("{command}: {argument}: {error}")
}
