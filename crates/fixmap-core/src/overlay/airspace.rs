//! Controlled-airspace rings.

use crate::canvas::{Circle, MapCanvas, Shape, ShapeId, ShapeStyle};
use crate::context::RenderContext;
use crate::error::OverlayResult;
use crate::models::{AirspaceRing, Rgb};

const RING_STYLE: ShapeStyle = ShapeStyle {
    stroke_color: Rgb::BLUE,
    stroke_opacity: 0.8,
    stroke_weight: 0.3,
    fill_color: Rgb::BLUE,
    fill_opacity: 0.08,
    z_index: 10,
};

pub struct AirspaceOverlay;

impl AirspaceOverlay {
    /// Draw one circle per ring, in declaration order.
    ///
    /// A bad ring only loses itself; the returned vector has one entry per
    /// input ring.
    pub fn render<C: MapCanvas>(
        rings: &[AirspaceRing],
        ctx: &mut RenderContext<C>,
    ) -> Vec<OverlayResult<ShapeId>> {
        rings
            .iter()
            .map(|ring| Self::render_ring(ring, ctx))
            .collect()
    }

    pub fn render_ring<C: MapCanvas>(
        ring: &AirspaceRing,
        ctx: &mut RenderContext<C>,
    ) -> OverlayResult<ShapeId> {
        ring.validate()?;
        Ok(ctx.canvas_mut().add_shape(Shape::Circle(Circle {
            center: ring.center,
            radius_m: ring.radius_m,
            title: None,
            style: RING_STYLE,
        })))
    }
}
