//! Hover tooltip shared by every fix marker.

use crate::canvas::MapCanvas;
use crate::legend::escape_html;
use crate::models::Position;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    /// No marker has pointer focus
    #[default]
    Idle,
    Focused { fix_id: String, anchor: Position },
}

/// What the canvas has to do after a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipUpdate {
    Show { content: String, anchor: Position },
    Hide,
    Unchanged,
}

/// Single floating label bound to the marker that last got pointer focus.
#[derive(Debug, Clone, Default)]
pub struct HoverTooltip {
    state: TooltipState,
}

impl HoverTooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn active_fix_id(&self) -> Option<&str> {
        match &self.state {
            TooltipState::Focused { fix_id, .. } => Some(fix_id),
            TooltipState::Idle => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match &self.state {
            TooltipState::Focused { anchor, .. } => Some(*anchor),
            TooltipState::Idle => None,
        }
    }

    pub fn enter(&mut self, fix_id: &str, anchor: Position) -> TooltipUpdate {
        if let TooltipState::Focused {
            fix_id: current,
            anchor: current_anchor,
        } = &self.state
        {
            if current == fix_id && *current_anchor == anchor {
                return TooltipUpdate::Unchanged;
            }
        }

        self.state = TooltipState::Focused {
            fix_id: fix_id.to_string(),
            anchor,
        };
        TooltipUpdate::Show {
            content: tooltip_content(fix_id),
            anchor,
        }
    }

    /// Pointer can only be over one marker, so any leave closes the tooltip.
    pub fn leave(&mut self) -> TooltipUpdate {
        match self.state {
            TooltipState::Idle => TooltipUpdate::Unchanged,
            TooltipState::Focused { .. } => {
                self.state = TooltipState::Idle;
                TooltipUpdate::Hide
            }
        }
    }
}

/// Push a tooltip update to the canvas.
pub fn apply_update(canvas: &mut dyn MapCanvas, update: &TooltipUpdate) {
    match update {
        TooltipUpdate::Show { content, anchor } => {
            canvas.show_tooltip(content, *anchor);
            canvas.set_anchor_visible(false);
        }
        TooltipUpdate::Hide => canvas.hide_tooltip(),
        TooltipUpdate::Unchanged => {}
    }
}

fn tooltip_content(fix_id: &str) -> String {
    format!("<b>{}</b>", escape_html(fix_id))
}
