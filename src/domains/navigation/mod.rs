pub mod actors;
pub mod controller;
pub mod events;
pub mod ports;
pub mod projections;
pub mod queue;
pub mod types;

pub use actors::*;
pub use controller::*;
pub use events::*;
pub use ports::*;
pub use projections::*;
pub use queue::*;
pub use types::*;
