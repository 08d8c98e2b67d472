//! fixmap core - overlay composition for aeronautical procedure maps
//!
//! Builds fix markers, procedure paths, airspace rings and legend text from a
//! declarative [`SceneConfig`] and draws them through a [`MapCanvas`].

pub mod canvas;
pub mod collaborator;
pub mod composer;
pub mod context;
pub mod error;
pub mod legend;
pub mod models;
pub mod overlay;
pub mod registry;
pub mod tooltip;

pub use canvas::{
    Circle, ControlPosition, MapCanvas, MapStyle, MapView, Marker, Polyline, RecordingCanvas,
    Rectangle, Shape, ShapeId, ShapeStyle, TooltipRecord,
};
pub use collaborator::{PointOverlay, SceneContext, StaticPointOverlay, StreamedShapes, VectorStream};
pub use composer::{Diagnostic, SceneComposer, SceneReport, ShapeCounts, Stage};
pub use context::{PointerEvent, RenderContext};
pub use error::{OverlayError, OverlayResult};
pub use models::{
    AirspaceRing, BoundingBox, MapPoint, Position, Procedure, Rgb, SceneConfig, Waypoint,
};
pub use overlay::{AirspaceOverlay, FixHoverHandler, FixMarkerOverlay, PathRenderer, ShadedRegionOverlay};
pub use registry::WaypointRegistry;
pub use tooltip::{HoverTooltip, TooltipState, TooltipUpdate};
