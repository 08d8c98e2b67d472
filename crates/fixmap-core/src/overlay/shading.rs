//! Semi-transparent wash over part of the map.

use crate::canvas::{MapCanvas, Rectangle, Shape, ShapeId, ShapeStyle};
use crate::context::RenderContext;
use crate::error::OverlayResult;
use crate::models::{BoundingBox, Rgb};

const SHADE_STYLE: ShapeStyle = ShapeStyle {
    stroke_color: Rgb::WHITE,
    stroke_opacity: 0.0,
    stroke_weight: 0.0,
    fill_color: Rgb::WHITE,
    fill_opacity: 0.6,
    z_index: 0,
};

pub struct ShadedRegionOverlay;

impl ShadedRegionOverlay {
    pub fn render<C: MapCanvas>(
        bounds: &BoundingBox,
        ctx: &mut RenderContext<C>,
    ) -> OverlayResult<ShapeId> {
        bounds.validate()?;
        Ok(ctx.canvas_mut().add_shape(Shape::Rectangle(Rectangle {
            bounds: *bounds,
            style: SHADE_STYLE,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::models::Position;

    #[test]
    fn draws_rectangle_over_bounds() {
        let bounds = BoundingBox {
            south_west: Position::new(30.0, -130.0),
            north_east: Position::new(45.0, -112.0),
        };
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        ShadedRegionOverlay::render(&bounds, &mut ctx).unwrap();
        let rects: Vec<_> = ctx.canvas().rectangles().collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].bounds, bounds);
        assert_eq!(rects[0].style.fill_opacity, 0.6);
    }

    #[test]
    fn inverted_box_is_rejected() {
        let bounds = BoundingBox {
            south_west: Position::new(45.0, -130.0),
            north_east: Position::new(30.0, -112.0),
        };
        let mut ctx = RenderContext::new(RecordingCanvas::new());

        assert!(ShadedRegionOverlay::render(&bounds, &mut ctx).is_err());
        assert!(ctx.canvas().shapes.is_empty());
    }
}
