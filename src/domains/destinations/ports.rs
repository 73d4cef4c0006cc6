use crate::common::DomainResult;

use super::landmark::DestinationList;

/// Port for reading the raw landmark records.
pub trait LandmarkSource: Send + Sync {
    /// Returns `None` when the source does not exist.
    fn read_landmarks(&self) -> DomainResult<Option<String>>;

    /// Human-readable location of the source, for log messages.
    fn describe(&self) -> String;
}

/// Port through which destination responses leave the service.
pub trait DestinationPublisher: Send + Sync {
    fn publish(&self, list: DestinationList) -> DomainResult<()>;
}
