pub mod cli;
mod common;
pub use common::format_diagnostic;
pub mod json;
pub mod outputs;
pub mod quiet;
