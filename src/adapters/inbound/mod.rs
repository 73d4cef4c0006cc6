pub mod line_protocol;

pub use line_protocol::*;
