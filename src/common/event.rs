use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event raised by a domain component and exported to observers.
pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    /// Identifier of the component that raised the event.
    fn source_id(&self) -> &str;
    /// Submission this event belongs to, if any.
    fn submission_id(&self) -> Option<u64> {
        None
    }
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Serialized form of a [`DomainEvent`] as written to the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    /// Position in the stream, starting at 1.
    pub sequence: u64,
    pub stream: String,
    pub source_id: String,
    pub event_type: String,
    pub submission_id: Option<u64>,
    pub payload: serde_json::Value,
    pub metadata: EventMetadata,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    pub process: String,
    pub process_id: u32,
}

impl EventMetadata {
    pub fn for_process(process: &str) -> Self {
        Self {
            process: process.to_string(),
            process_id: std::process::id(),
        }
    }
}

impl EventEnvelope {
    pub fn wrap<E: DomainEvent + Serialize>(
        event: &E,
        stream: &str,
        sequence: u64,
        metadata: EventMetadata,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: Uuid::new_v4(),
            sequence,
            stream: stream.to_string(),
            source_id: event.source_id().to_string(),
            event_type: event.event_type().to_string(),
            submission_id: event.submission_id(),
            payload: serde_json::to_value(event)?,
            metadata,
            occurred_at: event.occurred_at(),
        })
    }
}
