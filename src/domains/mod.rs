pub mod destinations;
pub mod logger;
pub mod navigation;

pub use destinations::*;
pub use logger::*;
pub use navigation::*;
