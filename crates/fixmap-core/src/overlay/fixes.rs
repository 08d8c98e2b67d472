//! Fix markers with hover tooltips.

use serde::{Deserialize, Serialize};

use crate::canvas::{Circle, MapCanvas, Shape, ShapeId, ShapeStyle};
use crate::context::RenderContext;
use crate::models::{Position, Rgb};
use crate::registry::WaypointRegistry;
use crate::tooltip::{HoverTooltip, TooltipUpdate};

const FIX_RADIUS_M: f64 = 300.0;

const FIX_STYLE: ShapeStyle = ShapeStyle {
    stroke_color: Rgb::new(0x99, 0x00, 0x99),
    stroke_opacity: 1.0,
    stroke_weight: 2.0,
    fill_color: Rgb::new(0x99, 0x00, 0x99),
    fill_opacity: 0.0,
    z_index: 20,
};

/// Hover handler owned by a single marker.
///
/// Holds its own copy of the fix id and position, fixed when the marker is
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixHoverHandler {
    fix_id: String,
    anchor: Position,
}

impl FixHoverHandler {
    pub fn new(fix_id: impl Into<String>, anchor: Position) -> Self {
        Self {
            fix_id: fix_id.into(),
            anchor,
        }
    }

    pub fn fix_id(&self) -> &str {
        &self.fix_id
    }

    pub fn on_enter(&self, tooltip: &mut HoverTooltip) -> TooltipUpdate {
        tooltip.enter(&self.fix_id, self.anchor)
    }

    pub fn on_leave(&self, tooltip: &mut HoverTooltip) -> TooltipUpdate {
        tooltip.leave()
    }
}

pub struct FixMarkerOverlay;

impl FixMarkerOverlay {
    /// One marker per registered fix, each wired to the shared tooltip.
    pub fn render<C: MapCanvas>(
        registry: &WaypointRegistry,
        ctx: &mut RenderContext<C>,
    ) -> Vec<ShapeId> {
        let mut shapes = Vec::with_capacity(registry.len());
        for waypoint in registry.iter() {
            let shape = ctx.canvas_mut().add_shape(Shape::Circle(Circle {
                center: waypoint.position,
                radius_m: FIX_RADIUS_M,
                title: Some(waypoint.id.clone()),
                style: FIX_STYLE,
            }));
            ctx.bind_hover(shape, FixHoverHandler::new(waypoint.id.clone(), waypoint.position));
            shapes.push(shape);
        }
        shapes
    }
}
