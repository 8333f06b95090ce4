//! Resolution of the default batch server.
//!
//! The server given on the command line (or in `PBS_DEFAULT`) wins. Otherwise the first entry
//! of the `server_name` file in the server home directory is used, and the local host name as
//! a last resort.

use std::path::{Path, PathBuf};

use crate::common::error::error;
use crate::common::utils::network::get_hostname;

pub const SERVER_HOME_ENV: &str = "PBS_SERVER_HOME";
pub const DEFAULT_SERVER_HOME: &str = "/var/spool/torque";
const SERVER_NAME_FILE: &str = "server_name";

pub fn default_server_home() -> PathBuf {
    std::env::var_os(SERVER_HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVER_HOME))
}

/// Reads the first server listed in `<home>/server_name`.
///
/// The file may list several comma separated servers, only the first one is used.
pub fn read_server_name_file(home: &Path) -> crate::Result<String> {
    let path = home.join(SERVER_NAME_FILE);
    let content = std::fs::read_to_string(&path)?;
    match content
        .lines()
        .next()
        .and_then(|line| line.split(',').next())
        .map(str::trim)
    {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => error(format!("File {} does not name a server", path.display())),
    }
}

pub fn resolve_default_server(explicit: Option<String>, home: &Path) -> String {
    if let Some(server) = explicit.filter(|server| !server.trim().is_empty()) {
        return server.trim().to_string();
    }
    match read_server_name_file(home) {
        Ok(server) => server,
        Err(error) => {
            log::debug!("Cannot read default server name: {error}");
            get_hostname(None)
        }
    }
}
