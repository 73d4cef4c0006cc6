use tokio::sync::mpsc;

use crate::common::{DomainError, DomainResult};
use crate::domains::destinations::{DestinationList, DestinationPublisher};

/// Publishes destination responses onto a tokio channel; whoever owns the
/// receiver forwards them to the transport.
pub struct ChannelDestinationPublisher {
    sender: mpsc::Sender<DestinationList>,
}

impl ChannelDestinationPublisher {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DestinationList>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl DestinationPublisher for ChannelDestinationPublisher {
    fn publish(&self, list: DestinationList) -> DomainResult<()> {
        self.sender
            .try_send(list)
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to publish destinations: {}", e)))
    }
}
