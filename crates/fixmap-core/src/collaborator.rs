//! Optional overlays owned by external collaborators.
//!
//! The composer hands these off and never waits for them. Anything they
//! produce later comes back as [`StreamedShapes`].

use serde::{Deserialize, Serialize};

use crate::canvas::{Marker, MapCanvas, Shape};
use crate::error::{OverlayError, OverlayResult};
use crate::models::{MapPoint, Position};
use crate::registry::WaypointRegistry;

/// Read-only view of the scene passed to collaborators.
pub struct SceneContext<'a> {
    pub center: Position,
    pub zoom: u8,
    pub registry: &'a WaypointRegistry,
}

/// Shapes delivered after an asynchronous fetch completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamedShapes {
    pub spec: String,
    pub shapes: Vec<Shape>,
}

/// Draws its own point markers on the canvas.
pub trait PointOverlay {
    fn name(&self) -> &str {
        "points"
    }

    /// Returns the number of shapes drawn.
    fn render(&self, canvas: &mut dyn MapCanvas, scene: &SceneContext<'_>) -> OverlayResult<usize>;
}

/// Starts retrieval of streamed vector data.
///
/// `start` must return promptly; the actual fetch runs elsewhere.
pub trait VectorStream {
    fn name(&self) -> &str {
        "vectors"
    }

    fn start(&self, spec: &str) -> OverlayResult<()>;
}

/// Point overlay backed by a fixed list of labelled points.
#[derive(Debug, Clone, Default)]
pub struct StaticPointOverlay {
    points: Vec<MapPoint>,
}

impl StaticPointOverlay {
    pub fn new(points: Vec<MapPoint>) -> Self {
        Self { points }
    }
}

impl PointOverlay for StaticPointOverlay {
    fn render(&self, canvas: &mut dyn MapCanvas, _scene: &SceneContext<'_>) -> OverlayResult<usize> {
        // validate first so a bad point leaves nothing half-drawn
        for point in &self.points {
            point.position.validate().map_err(|err| {
                OverlayError::collaborator(self.name(), format!("point {:?}: {}", point.label, err))
            })?;
        }

        for point in &self.points {
            canvas.add_shape(Shape::Marker(Marker {
                position: point.position,
                label: Some(point.label.clone()),
            }));
        }
        Ok(self.points.len())
    }
}
