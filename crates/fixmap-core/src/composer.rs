//! Scene composition: turns a [`SceneConfig`] into map primitives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canvas::{ControlPosition, MapCanvas, MapStyle, MapView};
use crate::collaborator::{PointOverlay, SceneContext, VectorStream};
use crate::context::RenderContext;
use crate::error::{OverlayError, OverlayResult};
use crate::legend::{prepare_legend, LEGEND_CONTROL};
use crate::models::SceneConfig;
use crate::overlay::{AirspaceOverlay, FixMarkerOverlay, PathRenderer, ShadedRegionOverlay};
use crate::registry::WaypointRegistry;

/// Composition step that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Registry,
    Airspace,
    ShadedRegion,
    Procedure,
    PointOverlay,
    VectorStream,
}

/// A failure that was contained to one overlay unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub error: OverlayError,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCounts {
    pub airspace_rings: usize,
    pub shaded_regions: usize,
    pub paths: usize,
    pub points: usize,
    pub fix_markers: usize,
}

/// Result of one composition run.
#[derive(Debug, Clone)]
pub struct SceneReport {
    pub registry: WaypointRegistry,
    pub counts: ShapeCounts,
    pub diagnostics: Vec<Diagnostic>,
    pub legend_injected: bool,
    pub vector_stream_started: bool,
}

impl SceneReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics_for(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.stage == stage)
    }
}

/// Draws a scene in a fixed order: rings, shading, paths, legend, external
/// overlays, then fix markers on top.
#[derive(Default)]
pub struct SceneComposer<'a> {
    points: Option<&'a dyn PointOverlay>,
    vectors: Option<&'a dyn VectorStream>,
}

impl<'a> SceneComposer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point_overlay(mut self, overlay: &'a dyn PointOverlay) -> Self {
        self.points = Some(overlay);
        self
    }

    pub fn with_vector_stream(mut self, stream: &'a dyn VectorStream) -> Self {
        self.vectors = Some(stream);
        self
    }

    /// Compose the scene onto the context's canvas.
    ///
    /// Only an unusable map center is fatal. Every other failure is logged,
    /// recorded in the report and skipped.
    pub fn compose<C: MapCanvas>(
        &self,
        config: &SceneConfig,
        ctx: &mut RenderContext<C>,
    ) -> OverlayResult<SceneReport> {
        config.center.validate()?;

        let mut diagnostics = Vec::new();
        let mut counts = ShapeCounts::default();

        let (registry, registry_errors) = WaypointRegistry::from_waypoints(&config.waypoints);
        for err in registry_errors {
            report(&mut diagnostics, Stage::Registry, err);
        }

        ctx.canvas_mut().init(&MapView {
            center: config.center,
            zoom: config.zoom,
            style: MapStyle::Terrain,
            scale_control: true,
        });
        ctx.canvas_mut()
            .add_control(ControlPosition::TopRight, LEGEND_CONTROL);

        for result in AirspaceOverlay::render(&config.airspace_rings, ctx) {
            match result {
                Ok(_) => counts.airspace_rings += 1,
                Err(err) => report(&mut diagnostics, Stage::Airspace, err),
            }
        }

        if let Some(bounds) = &config.shaded_region {
            match ShadedRegionOverlay::render(bounds, ctx) {
                Ok(_) => counts.shaded_regions += 1,
                Err(err) => report(&mut diagnostics, Stage::ShadedRegion, err),
            }
        }

        let paths = PathRenderer::new(&registry);
        for procedure in &config.procedures {
            match paths.render(procedure, ctx) {
                Ok(line) => {
                    tracing::debug!(
                        "drew {} with {} fixes",
                        procedure.name,
                        line.path.len()
                    );
                    counts.paths += 1;
                }
                Err(err) => report(&mut diagnostics, Stage::Procedure, err),
            }
        }

        let legend_injected = match &config.legend_html {
            Some(markup) => {
                let markup = prepare_legend(markup, config.legend_trusted);
                ctx.canvas_mut().append_control_markup(LEGEND_CONTROL, &markup);
                true
            }
            None => false,
        };

        if config.point_overlay_enabled {
            match self.invoke_points(config, &registry, ctx) {
                Ok(drawn) => counts.points = drawn,
                Err(err) => report(&mut diagnostics, Stage::PointOverlay, err),
            }
        }

        let mut vector_stream_started = false;
        if let Some(spec) = &config.vector_stream_spec {
            match self.invoke_vectors(spec) {
                Ok(()) => vector_stream_started = true,
                Err(err) => report(&mut diagnostics, Stage::VectorStream, err),
            }
        }

        counts.fix_markers = FixMarkerOverlay::render(&registry, ctx).len();

        tracing::info!(
            "composed scene: {} rings, {} paths, {} fixes, {} diagnostics",
            counts.airspace_rings,
            counts.paths,
            counts.fix_markers,
            diagnostics.len()
        );

        Ok(SceneReport {
            registry,
            counts,
            diagnostics,
            legend_injected,
            vector_stream_started,
        })
    }

    fn invoke_points<C: MapCanvas>(
        &self,
        config: &SceneConfig,
        registry: &WaypointRegistry,
        ctx: &mut RenderContext<C>,
    ) -> OverlayResult<usize> {
        let overlay = self
            .points
            .ok_or_else(|| OverlayError::collaborator("points", "no point overlay configured"))?;
        let scene = SceneContext {
            center: config.center,
            zoom: config.zoom,
            registry,
        };
        overlay
            .render(ctx.canvas_mut(), &scene)
            .map_err(|err| wrap_collaborator(overlay.name(), err))
    }

    fn invoke_vectors(&self, spec: &str) -> OverlayResult<()> {
        let stream = self
            .vectors
            .ok_or_else(|| OverlayError::collaborator("vectors", "no vector stream configured"))?;
        stream
            .start(spec)
            .map_err(|err| wrap_collaborator(stream.name(), err))
    }
}

fn wrap_collaborator(name: &str, err: OverlayError) -> OverlayError {
    match err {
        OverlayError::CollaboratorInvocation { .. } => err,
        other => OverlayError::collaborator(name, other),
    }
}

fn report(diagnostics: &mut Vec<Diagnostic>, stage: Stage, error: OverlayError) {
    tracing::warn!("{:?} overlay skipped: {}", stage, error);
    diagnostics.push(Diagnostic {
        stage,
        error,
        at: Utc::now(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{MapCanvas, RecordingCanvas};
    use crate::models::{Position, Procedure, Waypoint};
    use std::cell::RefCell;

    struct FailingPoints;

    impl PointOverlay for FailingPoints {
        fn render(&self, _: &mut dyn MapCanvas, _: &SceneContext<'_>) -> OverlayResult<usize> {
            Err(OverlayError::geometry("boom"))
        }
    }

    #[derive(Default)]
    struct SpyStream {
        started: RefCell<Vec<String>>,
    }

    impl VectorStream for SpyStream {
        fn start(&self, spec: &str) -> OverlayResult<()> {
            self.started.borrow_mut().push(spec.to_string());
            Ok(())
        }
    }

    fn base_config() -> SceneConfig {
        let mut config = SceneConfig::new(Position::new(37.6, -122.1), 9);
        config.waypoints = vec![
            Waypoint { id: "A".into(), position: Position::new(37.0, -122.0) },
            Waypoint { id: "B".into(), position: Position::new(37.1, -122.1) },
        ];
        config
    }

    #[test]
    fn invalid_center_is_fatal() {
        let config = SceneConfig::new(Position::new(120.0, 0.0), 4);
        let mut ctx = RenderContext::new(RecordingCanvas::new());
        assert!(SceneComposer::new().compose(&config, &mut ctx).is_err());
        assert!(ctx.canvas().view.is_none());
    }

    #[test]
    fn markers_are_drawn_last() {
        let mut config = base_config();
        config.procedures = vec![Procedure {
            name: "AB".into(),
            fixes: vec!["A".into(), "B".into()],
            color: "#990099".parse().unwrap(),
        }];
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        SceneComposer::new().compose(&config, &mut ctx).unwrap();
        let shapes = &ctx.canvas().shapes;
        assert!(matches!(shapes[0], crate::canvas::Shape::Polyline(_)));
        assert!(matches!(shapes[1], crate::canvas::Shape::Circle(_)));
        assert!(matches!(shapes[2], crate::canvas::Shape::Circle(_)));
    }

    #[test]
    fn failing_point_overlay_is_reported_not_fatal() {
        let mut config = base_config();
        config.point_overlay_enabled = true;
        let points = FailingPoints;
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        let report = SceneComposer::new()
            .with_point_overlay(&points)
            .compose(&config, &mut ctx)
            .unwrap();
        let diag: Vec<_> = report.diagnostics_for(Stage::PointOverlay).collect();
        assert_eq!(diag.len(), 1);
        assert!(matches!(
            diag[0].error,
            OverlayError::CollaboratorInvocation { .. }
        ));
        assert_eq!(report.counts.fix_markers, 2);
    }

    #[test]
    fn missing_collaborator_is_reported() {
        let mut config = base_config();
        config.vector_stream_spec = Some("UAL123".into());
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        let report = SceneComposer::new().compose(&config, &mut ctx).unwrap();
        assert!(!report.vector_stream_started);
        assert_eq!(report.diagnostics_for(Stage::VectorStream).count(), 1);
    }

    #[test]
    fn vector_stream_gets_spec() {
        let mut config = base_config();
        config.vector_stream_spec = Some("UAL123@1450000000".into());
        let stream = SpyStream::default();
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        let report = SceneComposer::new()
            .with_vector_stream(&stream)
            .compose(&config, &mut ctx)
            .unwrap();
        assert!(report.vector_stream_started);
        assert_eq!(*stream.started.borrow(), vec!["UAL123@1450000000".to_string()]);
    }

    #[test]
    fn duplicate_waypoint_is_reported_and_first_kept() {
        let mut config = base_config();
        config.waypoints.push(Waypoint {
            id: "A".into(),
            position: Position::new(10.0, 10.0),
        });
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        let report = SceneComposer::new().compose(&config, &mut ctx).unwrap();
        assert_eq!(report.diagnostics_for(Stage::Registry).count(), 1);
        assert_eq!(
            report.registry.resolve("A").unwrap(),
            Position::new(37.0, -122.0)
        );
        assert_eq!(report.counts.fix_markers, 2);
    }
}
