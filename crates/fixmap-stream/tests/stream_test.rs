//! Vector endpoint integration tests.
//!
//! Run with: cargo test --test stream_test -- --ignored

use std::time::Duration;

use fixmap_core::{
    Position, RecordingCanvas, RenderContext, SceneComposer, SceneConfig, Waypoint,
};
use fixmap_stream::{HttpVectorStream, VectorClient};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

fn base_url() -> String {
    std::env::var("FIXMAP_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

fn idspec() -> String {
    std::env::var("FIXMAP_TEST_IDSPEC").unwrap_or_else(|_| "UAL123".to_string())
}

/// Compose a scene that streams vectors, then drain the batch on this thread.
#[tokio::test]
#[ignore]
async fn test_streamed_vectors_reach_canvas() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let stream = HttpVectorStream::new(
        VectorClient::new(&base_url()),
        Handle::current(),
        tx,
        Duration::from_secs(60),
    );

    let mut config = SceneConfig::new(Position::new(37.6, -122.1), 9);
    config.waypoints = vec![Waypoint {
        id: "MENLO".into(),
        position: Position::new(37.4636861, -122.1536583),
    }];
    config.vector_stream_spec = Some(idspec());

    let mut ctx = RenderContext::new(RecordingCanvas::new());
    let report = SceneComposer::new()
        .with_vector_stream(&stream)
        .compose(&config, &mut ctx)
        .expect("compose failed");
    assert!(report.vector_stream_started);

    let batch = tokio::time::timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("timed out waiting for vectors")
        .expect("stream closed");
    let before = ctx.canvas().shapes.len();
    let added = ctx.apply_streamed(batch);
    assert_eq!(ctx.canvas().shapes.len(), before + added);
}

/// Fetch directly and check the payload decodes.
#[tokio::test]
#[ignore]
async fn test_fetch_tracks() {
    let client = VectorClient::new(&base_url());
    let tracks = client
        .fetch_tracks(&idspec())
        .await
        .expect("Failed to fetch tracks");
    assert!(tracks.iter().all(|t| !t.id.is_empty()), "Tracks should carry ids");
}
