pub mod destination_service;
pub mod event_observer;
pub mod goal_sender_service;

pub use destination_service::*;
pub use event_observer::*;
pub use goal_sender_service::*;
