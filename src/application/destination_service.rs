// Destination Service - answers destination list requests
use std::sync::Arc;
use crate::common::DomainResult;
use crate::domains::destinations::{DestinationDirectory, DestinationList, DestinationPublisher, DestinationRequest};
use crate::domains::DynLogger;

pub struct DestinationService {
    directory: Arc<DestinationDirectory>,
    publisher: Arc<dyn DestinationPublisher>,
    logger: DynLogger,
}

impl DestinationService {
    pub fn new(directory: Arc<DestinationDirectory>, publisher: Arc<dyn DestinationPublisher>, logger: DynLogger) -> Self {
        Self { directory, publisher, logger }
    }

    /// Publish the full destination list. The request payload is only logged.
    pub fn handle_request(&self, request: &DestinationRequest) -> DomainResult<DestinationList> {
        self.logger.info(&format!("Request for destination list: {}", request.data));
        let list = self.directory.destination_list();
        self.publisher.publish(list.clone())?;
        Ok(list)
    }
}
