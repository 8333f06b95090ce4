pub mod batch;
pub mod codec;
pub(crate) mod common;
pub mod transport;

#[cfg(test)]
pub mod tests;
