//! Pointer event scripts, e.g. `enter:SERFR,enter:MENLO,leave`.

use anyhow::{bail, Result};
use fixmap_core::{MapCanvas, PointerEvent, RenderContext, ShapeId, TooltipUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedEvent {
    Enter(String),
    /// Leave the most recently entered fix
    Leave,
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptedEvent>> {
    let mut events = Vec::new();
    for raw in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match raw.split_once(':') {
            Some(("enter", id)) if !id.is_empty() => events.push(ScriptedEvent::Enter(id.to_string())),
            None if raw == "leave" => events.push(ScriptedEvent::Leave),
            _ => bail!("bad pointer event {:?}, expected enter:<FIX> or leave", raw),
        }
    }
    Ok(events)
}

fn marker_for<C: MapCanvas>(ctx: &RenderContext<C>, subscribed: &[ShapeId], fix_id: &str) -> Option<ShapeId> {
    subscribed
        .iter()
        .copied()
        .find(|&shape| ctx.handler_for(shape).is_some_and(|h| h.fix_id() == fix_id))
}

/// Replay events against the fix markers. Unknown fixes are skipped.
pub fn replay<C: MapCanvas>(
    ctx: &mut RenderContext<C>,
    subscribed: &[ShapeId],
    events: &[ScriptedEvent],
) -> Vec<TooltipUpdate> {
    let mut updates = Vec::with_capacity(events.len());
    let mut last: Option<ShapeId> = None;

    for event in events {
        match event {
            ScriptedEvent::Enter(fix_id) => match marker_for(ctx, subscribed, fix_id) {
                Some(shape) => {
                    last = Some(shape);
                    updates.push(ctx.handle_pointer(shape, PointerEvent::Enter));
                }
                None => tracing::warn!("no marker for fix {}", fix_id),
            },
            ScriptedEvent::Leave => match last {
                Some(shape) => updates.push(ctx.handle_pointer(shape, PointerEvent::Leave)),
                None => tracing::warn!("leave with no marker entered"),
            },
        }
    }
    updates
}
