//! Background vector fetch wired into scene composition.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use fixmap_core::{
    OverlayError, OverlayResult, Polyline, Position, Rgb, Shape, ShapeStyle, StreamedShapes,
    VectorStream,
};

use crate::cache::TrackCache;
use crate::client::{Track, VectorClient};

const CACHE_MAX_ENTRIES: usize = 64;
const DEFAULT_TRACK_COLOR: Rgb = Rgb::new(0xff, 0x00, 0x00);

/// Vector stream collaborator backed by [`VectorClient`].
///
/// `start` spawns the fetch on the given runtime and returns at once; the
/// converted shapes arrive later on the channel.
pub struct HttpVectorStream {
    client: Arc<VectorClient>,
    runtime: Handle,
    sender: UnboundedSender<StreamedShapes>,
    cache: Arc<TrackCache>,
}

impl HttpVectorStream {
    pub fn new(
        client: VectorClient,
        runtime: Handle,
        sender: UnboundedSender<StreamedShapes>,
        max_age: Duration,
    ) -> Self {
        Self {
            client: Arc::new(client),
            runtime,
            sender,
            cache: Arc::new(TrackCache::new(max_age, CACHE_MAX_ENTRIES)),
        }
    }

    /// Seed the cache, e.g. with tracks loaded from disk.
    pub fn prime(&self, spec: &str, shapes: Vec<Shape>) {
        self.cache.insert(spec, shapes);
    }
}

impl VectorStream for HttpVectorStream {
    fn start(&self, spec: &str) -> OverlayResult<()> {
        validate_spec(spec).map_err(|reason| OverlayError::collaborator(self.name(), reason))?;

        if let Some(shapes) = self.cache.get_fresh(spec) {
            tracing::debug!("vector cache hit for {}", spec);
            return self
                .sender
                .send(StreamedShapes {
                    spec: spec.to_string(),
                    shapes,
                })
                .map_err(|_| OverlayError::collaborator(self.name(), "scene receiver dropped"));
        }

        if self.sender.is_closed() {
            return Err(OverlayError::collaborator(self.name(), "scene receiver dropped"));
        }

        let client = self.client.clone();
        let cache = self.cache.clone();
        let sender = self.sender.clone();
        let spec = spec.to_string();

        self.runtime.spawn(async move {
            let tracks = match client.fetch_tracks(&spec).await {
                Ok(tracks) => tracks,
                Err(err) => {
                    tracing::warn!("vector fetch for {} failed: {:#}", spec, err);
                    return;
                }
            };

            let shapes = tracks_to_shapes(&tracks);
            tracing::info!("fetched {} tracks ({} drawable) for {}", tracks.len(), shapes.len(), spec);

            cache.insert(&spec, shapes.clone());

            if sender.send(StreamedShapes { spec, shapes }).is_err() {
                tracing::debug!("scene closed before vectors arrived");
            }
        });

        Ok(())
    }
}

fn validate_spec(spec: &str) -> Result<(), String> {
    if spec.trim().is_empty() {
        return Err("empty idspec".to_string());
    }
    if spec.chars().any(char::is_whitespace) {
        return Err(format!("idspec {:?} contains whitespace", spec));
    }
    if spec.split(',').any(str::is_empty) {
        return Err(format!("idspec {:?} has an empty entry", spec));
    }
    Ok(())
}

/// Convert fetched tracks to geodesic polylines.
///
/// Tracks with fewer than two usable points are dropped.
pub fn tracks_to_shapes(tracks: &[Track]) -> Vec<Shape> {
    tracks
        .iter()
        .filter_map(|track| {
            let path: Vec<Position> = track
                .points
                .iter()
                .map(|p| Position::new(p.lat, p.lon))
                .filter(|p| p.validate().is_ok())
                .collect();
            if path.len() < 2 {
                tracing::debug!("track {} has {} usable points, skipping", track.id, path.len());
                return None;
            }

            let color = track
                .color
                .as_deref()
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_TRACK_COLOR);

            Some(Shape::Polyline(Polyline {
                path,
                geodesic: true,
                style: ShapeStyle {
                    stroke_color: color,
                    stroke_opacity: 0.6,
                    stroke_weight: 1.0,
                    fill_color: color,
                    fill_opacity: 0.0,
                    z_index: 15,
                },
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TrackPoint;
    use tokio::sync::mpsc;

    fn track(id: &str, color: Option<&str>, points: &[(f64, f64)]) -> Track {
        Track {
            id: id.to_string(),
            color: color.map(str::to_string),
            points: points
                .iter()
                .map(|&(lat, lon)| TrackPoint { lat, lon })
                .collect(),
        }
    }

    #[test]
    fn short_and_offglobe_tracks_are_dropped() {
        let tracks = vec![
            track("UAL1", Some("#00ff00"), &[(37.0, -122.0), (37.5, -122.3)]),
            track("UAL2", None, &[(37.0, -122.0)]),
            track("UAL3", None, &[(37.0, -122.0), (137.0, -122.0)]),
        ];
        let shapes = tracks_to_shapes(&tracks);
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Polyline(line) => {
                assert_eq!(line.path.len(), 2);
                assert_eq!(line.style.stroke_color.to_string(), "#00ff00");
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn bad_color_falls_back_to_default() {
        let shapes = tracks_to_shapes(&[track("X", Some("red"), &[(1.0, 1.0), (2.0, 2.0)])]);
        match &shapes[0] {
            Shape::Polyline(line) => assert_eq!(line.style.stroke_color, DEFAULT_TRACK_COLOR),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn spec_validation() {
        assert!(validate_spec("UAL123@1450000000").is_ok());
        assert!(validate_spec("UAL1,UAL2").is_ok());
        assert!(validate_spec("").is_err());
        assert!(validate_spec("UAL 1").is_err());
        assert!(validate_spec("UAL1,,UAL2").is_err());
    }

    #[tokio::test]
    async fn cached_spec_is_delivered_without_fetch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let stream = HttpVectorStream::new(
            VectorClient::new("http://127.0.0.1:9"),
            Handle::current(),
            tx,
            Duration::from_secs(60),
        );
        let shapes = tracks_to_shapes(&[track("UAL1", None, &[(37.0, -122.0), (37.1, -122.1)])]);
        stream.prime("UAL1", shapes.clone());

        stream.start("UAL1").unwrap();
        let batch = rx.recv().await.unwrap();
        assert_eq!(batch.spec, "UAL1");
        assert_eq!(batch.shapes, shapes);
    }

    #[tokio::test]
    async fn invalid_spec_fails_invocation() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let stream = HttpVectorStream::new(
            VectorClient::new("http://127.0.0.1:9"),
            Handle::current(),
            tx,
            Duration::from_secs(60),
        );
        let err = stream.start("  ").unwrap_err();
        assert!(matches!(err, OverlayError::CollaboratorInvocation { .. }));
    }

    #[tokio::test]
    async fn closed_receiver_fails_invocation() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let stream = HttpVectorStream::new(
            VectorClient::new("http://127.0.0.1:9"),
            Handle::current(),
            tx,
            Duration::from_secs(60),
        );
        assert!(stream.start("UAL1").is_err());
    }
}
