use std::io::IsTerminal;

use diswire::transport::{ChannelPolicy, ReadMode};
use diswire::codec::DEFAULT_MAX_STRING_LENGTH;

use crate::client::connector::TcpConnector;
use crate::client::dispatch::ServerDispatcher;
use crate::client::locate::ServerLocator;
use crate::client::output::cli::CliOutput;
use crate::client::output::json::JsonOutput;
use crate::client::output::outputs::{Output, Outputs};
use crate::client::output::quiet::Quiet;
use crate::common::cli::{ColorPolicy, CommonOpts};
use crate::common::serverdef::{default_server_home, resolve_default_server};
use crate::common::utils::network::get_username;

pub type TcpDispatcher = ServerDispatcher<TcpConnector, ServerLocator<TcpConnector>>;

pub struct GlobalSettings {
    server: String,
    port: u16,
    policy: ChannelPolicy,
    user: String,
    printer: Box<dyn Output>,
}

impl GlobalSettings {
    pub fn new(
        server: String,
        port: u16,
        policy: ChannelPolicy,
        user: String,
        printer: Box<dyn Output>,
    ) -> Self {
        GlobalSettings {
            server,
            port,
            policy,
            user,
            printer,
        }
    }

    pub fn default_server(&self) -> &str {
        &self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn channel_policy(&self) -> &ChannelPolicy {
        &self.policy
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn printer(&self) -> &dyn Output {
        self.printer.as_ref()
    }

    pub fn dispatcher(&self) -> TcpDispatcher {
        let connector = TcpConnector::new(self.port, self.policy);
        let locator = ServerLocator::new(connector.clone(), &self.user);
        ServerDispatcher::new(connector, locator, &self.server)
    }
}

pub fn make_global_settings(opts: CommonOpts) -> GlobalSettings {
    let server = resolve_default_server(opts.server, &default_server_home());
    log::debug!("Default server: {server}");

    let policy = ChannelPolicy {
        io_timeout: opts.timeout.unpack(),
        connect_timeout: opts.connect_timeout.unpack(),
        read_mode: ReadMode::Bounded,
        max_string_length: DEFAULT_MAX_STRING_LENGTH,
    };

    // Create Printer
    let printer: Box<dyn Output> = match opts.output_mode {
        Outputs::CLI => {
            // Diagnostics go to stderr, so that is the stream whose terminal matters
            match opts.colors {
                ColorPolicy::Always => colored::control::set_override(true),
                ColorPolicy::Never => colored::control::set_override(false),
                ColorPolicy::Auto => {
                    colored::control::set_override(std::io::stderr().is_terminal())
                }
            }
            Box::<CliOutput>::default()
        }
        Outputs::JSON => Box::<JsonOutput>::default(),
        Outputs::Quiet => Box::<Quiet>::default(),
    };

    GlobalSettings::new(server, opts.port, policy, get_username(), printer)
}
