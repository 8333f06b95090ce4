pub mod client;
pub mod common;

#[cfg(test)]
pub(crate) mod tests;

pub type Error = crate::common::error::BatchqError;
pub type Result<T> = std::result::Result<T, Error>;

// Reexports
pub use diswire;

pub const BATCHQ_VERSION: &str = {
    match option_env!("BATCHQ_BUILD_VERSION") {
        Some(version) => version,
        None => const_format::concatcp!(env!("CARGO_PKG_VERSION"), "-dev"),
    }
};
