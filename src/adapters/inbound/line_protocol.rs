use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::application::GoalSenderService;
use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::domains::destinations::DestinationRequest;

/// One line of the text transport:
///
/// ```text
/// goal <x> <y>
/// destinations [payload...]
/// status
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Goal { x: f64, y: f64 },
    Destinations(DestinationRequest),
    Status,
}

/// `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> DomainResult<Option<InboundMessage>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "goal" => {
            let coords: Vec<&str> = rest.split_whitespace().collect();
            let [x, y] = coords.as_slice() else {
                return Err(DomainError::InvalidCommand {
                    reason: format!("expected 'goal <x> <y>', got '{}'", line),
                });
            };
            Ok(Some(InboundMessage::Goal {
                x: parse_coordinate(x)?,
                y: parse_coordinate(y)?,
            }))
        }
        "destinations" => Ok(Some(InboundMessage::Destinations(DestinationRequest {
            data: rest.to_string(),
        }))),
        "status" => Ok(Some(InboundMessage::Status)),
        other => Err(DomainError::InvalidCommand {
            reason: format!("unknown command '{}'", other),
        }),
    }
}

fn parse_coordinate(token: &str) -> DomainResult<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::InvalidCommand {
            reason: format!("'{}' is not a finite coordinate", token),
        })
}

/// Feed every line of `reader` to the service until EOF.
///
/// Bad lines are logged and skipped. Returns the number of messages handled.
pub async fn serve_lines<R>(reader: R, service: &GoalSenderService) -> ApplicationResult<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| DomainError::InfrastructureError(format!("Failed to read input: {}", e)))?
    {
        let message = match parse_line(&line) {
            Ok(Some(message)) => message,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping input line: {}", e);
                continue;
            }
        };

        match message {
            InboundMessage::Goal { x, y } => service.handle_goal(x, y).await?,
            InboundMessage::Destinations(request) => {
                if let Err(e) = service.handle_destination_request(&request) {
                    warn!("Destination request failed: {}", e);
                }
            }
            InboundMessage::Status => {
                let status = service.status().await?;
                info!(
                    state = ?status.state,
                    in_flight = ?status.in_flight,
                    queued = status.queue_len(),
                    "Dispatcher status"
                );
            }
        }
        handled += 1;
    }

    Ok(handled)
}
