pub mod commands;
pub mod connector;
pub mod dispatch;
pub mod globalsettings;
pub mod locate;
pub mod output;
pub mod utils;
