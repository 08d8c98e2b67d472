//! Per-scene render state handed to every overlay.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::canvas::{MapCanvas, ShapeId};
use crate::collaborator::StreamedShapes;
use crate::overlay::fixes::FixHoverHandler;
use crate::tooltip::{apply_update, HoverTooltip, TooltipUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Enter,
    Leave,
}

/// Canvas handle, tooltip state and the per-marker hover handlers.
///
/// All of it is touched from the UI thread only; events raised elsewhere must
/// be marshaled back before calling in.
pub struct RenderContext<C: MapCanvas> {
    canvas: C,
    tooltip: HoverTooltip,
    handlers: HashMap<ShapeId, FixHoverHandler>,
}

impl<C: MapCanvas> RenderContext<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            tooltip: HoverTooltip::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn tooltip(&self) -> &HoverTooltip {
        &self.tooltip
    }

    /// Subscribe a shape to pointer events and bind its handler.
    pub fn bind_hover(&mut self, shape: ShapeId, handler: FixHoverHandler) {
        self.canvas.subscribe_pointer(shape);
        self.handlers.insert(shape, handler);
    }

    pub fn handler_for(&self, shape: ShapeId) -> Option<&FixHoverHandler> {
        self.handlers.get(&shape)
    }

    /// Entry point for pointer events forwarded by the map provider.
    ///
    /// Events for shapes without a bound handler are ignored.
    pub fn handle_pointer(&mut self, shape: ShapeId, event: PointerEvent) -> TooltipUpdate {
        let Some(handler) = self.handlers.get(&shape) else {
            tracing::debug!("pointer {:?} on unbound shape {}", event, shape);
            return TooltipUpdate::Unchanged;
        };

        let update = match event {
            PointerEvent::Enter => handler.on_enter(&mut self.tooltip),
            PointerEvent::Leave => handler.on_leave(&mut self.tooltip),
        };
        apply_update(&mut self.canvas, &update);
        update
    }

    /// Draw a batch produced by an asynchronous collaborator.
    pub fn apply_streamed(&mut self, batch: StreamedShapes) -> usize {
        let count = batch.shapes.len();
        for shape in batch.shapes {
            self.canvas.add_shape(shape);
        }
        tracing::debug!("applied {} streamed shapes for {}", count, batch.spec);
        count
    }
}
