mod support;

use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

use goal_sender::adapters::inbound::{parse_line, serve_lines, InboundMessage};
use goal_sender::adapters::outbound::{
    ChannelDestinationPublisher, FilesystemLandmarkSource, RecordingLogger,
};
use goal_sender::application::{DestinationService, GoalSenderService};
use goal_sender::domains::destinations::{DestinationDirectory, DestinationRequest, LandmarkSource};
use goal_sender::domains::navigation::{DispatchActor, Goal, GoalPoseBuilder};
use goal_sender::domains::DynLogger;
use goal_sender::Config;
use support::ManualExecutor;

#[test]
fn test_filesystem_landmark_source_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("landmarks.txt");
    fs::write(&path, "Kitchen 1.0 2.0\nOffice 3.5 -4.0\n").unwrap();

    let source = FilesystemLandmarkSource::new(&path);
    let logger: DynLogger = RecordingLogger::new();
    let directory = DestinationDirectory::load(&source, &logger).unwrap();

    assert_eq!(directory.names(), vec!["Kitchen".to_string(), "Office".to_string()]);
    assert_eq!(source.describe(), path.display().to_string());
}

#[tokio::test]
async fn test_landmark_path_comes_from_config() {
    let dir = tempdir().unwrap();
    let landmarks = dir.path().join("site_a.txt");
    fs::write(&landmarks, "Dock 7.0 8.0\n").unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("[destinations]\nlandmarks_path = {:?}\n", landmarks.display().to_string()),
    )
    .unwrap();

    let config = Config::from_file(&config_path).await.unwrap();
    let source = FilesystemLandmarkSource::new(&config.destinations.landmarks_path);
    let logger: DynLogger = RecordingLogger::new();
    let directory = DestinationDirectory::load(&source, &logger).unwrap();

    assert_eq!(source.path(), landmarks.as_path());
    assert_eq!(directory.names(), vec!["Dock".to_string()]);
}

#[test]
fn test_filesystem_landmark_source_missing_file() {
    let dir = tempdir().unwrap();
    let source = FilesystemLandmarkSource::new(dir.path().join("nope.txt"));

    assert!(source.read_landmarks().unwrap().is_none());
}

#[test]
fn test_filesystem_landmark_source_unreadable_path() {
    let dir = tempdir().unwrap();
    // A directory exists but cannot be read as a file.
    let source = FilesystemLandmarkSource::new(dir.path());

    assert!(source.read_landmarks().is_err());
}

#[test]
fn test_parse_line() {
    assert_eq!(
        parse_line("goal 1.5 -2").unwrap(),
        Some(InboundMessage::Goal { x: 1.5, y: -2.0 })
    );
    assert_eq!(
        parse_line("  destinations please send  ").unwrap(),
        Some(InboundMessage::Destinations(DestinationRequest {
            data: "please send".to_string()
        }))
    );
    assert_eq!(
        parse_line("destinations").unwrap(),
        Some(InboundMessage::Destinations(DestinationRequest::default()))
    );
    assert_eq!(parse_line("status").unwrap(), Some(InboundMessage::Status));
    assert_eq!(parse_line("   ").unwrap(), None);

    assert!(parse_line("goal 1").is_err());
    assert!(parse_line("goal 1 2 3").is_err());
    assert!(parse_line("goal x 2").is_err());
    assert!(parse_line("goal NaN 2").is_err());
    assert!(parse_line("fly 1 2").is_err());
}

#[tokio::test]
async fn test_serve_lines_routes_messages() {
    let logger: DynLogger = RecordingLogger::new();
    let executor = ManualExecutor::new();
    let (dispatch, _task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        None,
        logger.clone(),
    );
    let directory = Arc::new(DestinationDirectory::parse("A 1 2", &logger));
    let (publisher, mut responses) = ChannelDestinationPublisher::new(4);
    let service = GoalSenderService::new(
        dispatch,
        DestinationService::new(directory, Arc::new(publisher), logger.clone()),
        logger.clone(),
    );

    let input = b"goal 1 2\nbogus\n\ngoal 3 4\ndestinations hi\nstatus\n";
    let handled = serve_lines(&input[..], &service).await.unwrap();

    assert_eq!(handled, 4);
    let status = service.status().await.unwrap();
    assert_eq!(status.pending, vec![Goal::new(1.0, 2.0), Goal::new(3.0, 4.0)]);
    assert_eq!(executor.submitted_goals(), vec![Goal::new(1.0, 2.0)]);
    assert_eq!(responses.recv().await.unwrap().names, vec!["A".to_string()]);
}
