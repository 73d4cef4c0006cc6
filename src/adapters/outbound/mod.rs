pub mod buffered_logger;
pub mod console_logger;
pub mod destination_publisher;
pub mod file_logger;
pub mod landmark_file;
pub mod multi_logger;
pub mod recording_logger;
pub mod simulated_executor;

pub use buffered_logger::*;
pub use console_logger::*;
pub use destination_publisher::*;
pub use file_logger::*;
pub use landmark_file::*;
pub use multi_logger::*;
pub use recording_logger::*;
pub use simulated_executor::*;
