pub mod channel;
pub mod frame;
