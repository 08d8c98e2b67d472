//! Procedure paths.

use crate::canvas::{MapCanvas, Polyline, Shape, ShapeStyle};
use crate::context::RenderContext;
use crate::error::{OverlayError, OverlayResult};
use crate::models::{Position, Procedure, Rgb};
use crate::registry::WaypointRegistry;

const PATH_STROKE_WEIGHT: f64 = 1.0;
const PATH_STROKE_OPACITY: f64 = 0.8;
const PATH_Z_INDEX: i32 = 20;

/// Turns procedures into geodesic polylines through the registry.
pub struct PathRenderer<'a> {
    registry: &'a WaypointRegistry,
}

impl<'a> PathRenderer<'a> {
    pub fn new(registry: &'a WaypointRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every fix of a procedure, in order.
    ///
    /// Stops at the first unknown fix: a procedure draws completely or not
    /// at all.
    pub fn resolve(&self, procedure: &Procedure) -> OverlayResult<Vec<Position>> {
        if procedure.fixes.len() < 2 {
            return Err(OverlayError::geometry(format!(
                "procedure {:?} needs at least two fixes, has {}",
                procedure.name,
                procedure.fixes.len()
            )));
        }

        procedure
            .fixes
            .iter()
            .map(|id| {
                self.registry
                    .resolve(id)
                    .map_err(|_| OverlayError::UnresolvedProcedure {
                        procedure_name: procedure.name.clone(),
                        missing_id: id.clone(),
                    })
            })
            .collect()
    }

    /// Add one polyline for the procedure. Calls are append-only.
    pub fn render<C: MapCanvas>(
        &self,
        procedure: &Procedure,
        ctx: &mut RenderContext<C>,
    ) -> OverlayResult<Polyline> {
        let path = self.resolve(procedure)?;
        let line = Polyline {
            path,
            geodesic: true,
            style: path_style(procedure.color),
        };
        ctx.canvas_mut().add_shape(Shape::Polyline(line.clone()));
        Ok(line)
    }
}

fn path_style(color: Rgb) -> ShapeStyle {
    ShapeStyle {
        stroke_color: color,
        stroke_opacity: PATH_STROKE_OPACITY,
        stroke_weight: PATH_STROKE_WEIGHT,
        fill_color: color,
        fill_opacity: 0.0,
        z_index: PATH_Z_INDEX,
    }
}
