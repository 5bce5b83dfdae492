pub mod source;
pub mod transport;
