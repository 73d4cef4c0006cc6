use std::error::Error;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use goal_sender::adapters::inbound::serve_lines;
use goal_sender::adapters::outbound::{
    init_buffered_logger, init_combined_logger, init_console_logger, ChannelDestinationPublisher,
    FilesystemLandmarkSource, SimulatedExecutor,
};
use goal_sender::application::{observe_events, wait_for_executor, DestinationService, GoalSenderService};
use goal_sender::domains::destinations::DestinationDirectory;
use goal_sender::domains::navigation::{DispatchActor, NavigationExecutor};
use goal_sender::domains::DynLogger;
use goal_sender::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path)?;

    // Initialize tracing; the `log` facade is left to fast_log
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting goal sender");
    info!("Executor: {}, frame: {}", config.executor.name, config.dispatch.frame_id);

    let logger: DynLogger = match &config.logging.file {
        Some(path) => init_combined_logger(path, &config.logging.level),
        None => init_console_logger(),
    };
    let logger: DynLogger = match config.logging.buffer_capacity {
        Some(capacity) => init_buffered_logger(logger, capacity) as DynLogger,
        None => logger,
    };

    let source = FilesystemLandmarkSource::new(&config.destinations.landmarks_path);
    let directory = Arc::new(DestinationDirectory::load(&source, &logger)?);
    for landmark in directory.landmarks() {
        debug!("Landmark {}", landmark);
    }

    info!("Initializing the navigation executor...");
    let executor: Arc<dyn NavigationExecutor> =
        Arc::new(SimulatedExecutor::new(&config.simulator, logger.clone()));
    wait_for_executor(executor.as_ref(), &config.executor, &logger).await?;

    let (event_sender, event_receiver) = mpsc::channel(config.dispatch.event_capacity.max(1));
    let observer = tokio::spawn(observe_events(event_receiver));

    let (dispatch, dispatch_task) = DispatchActor::spawn(
        executor,
        config.dispatch.pose_builder(),
        config.dispatch.command_capacity,
        Some(event_sender),
        logger.clone(),
    );

    let (publisher, mut responses) = ChannelDestinationPublisher::new(16);
    let responder = tokio::spawn(async move {
        while let Some(list) = responses.recv().await {
            match serde_json::to_string(&list) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to encode destination list: {}", e),
            }
        }
    });

    let destinations = DestinationService::new(directory, Arc::new(publisher), logger.clone());
    let service = GoalSenderService::new(dispatch, destinations, logger.clone());

    info!("Listening for goals on stdin");
    let mut interrupted = false;
    tokio::select! {
        result = serve_lines(BufReader::new(tokio::io::stdin()), &service) => {
            let handled = result?;
            info!(handled, "Input closed, finishing queued goals");
        }
        _ = tokio::signal::ctrl_c() => {
            interrupted = true;
            info!("Interrupted, dropping queued goals");
        }
    }

    drop(service);
    if interrupted {
        dispatch_task.abort();
    }
    if let Err(e) = dispatch_task.await {
        if !e.is_cancelled() {
            return Err(e.into());
        }
    }
    responder.await?;

    let projection = observer.await?;
    info!(
        received = projection.goals_received,
        dispatched = projection.goals_dispatched,
        succeeded = projection.goals_succeeded,
        failed = projection.goals_failed(),
        "Shutting down goal sender"
    );
    log::logger().flush();

    Ok(())
}
