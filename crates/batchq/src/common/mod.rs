pub mod cli;
pub mod error;
pub mod jobid;
pub mod parser;
pub mod serverdef;
pub mod setup;
pub mod utils;
