pub mod directory;
pub mod landmark;
pub mod ports;

pub use directory::*;
pub use landmark::*;
pub use ports::*;
