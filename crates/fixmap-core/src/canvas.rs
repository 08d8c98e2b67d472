//! Map provider seam.
//!
//! The tile renderer, projection and pan/zoom live outside this crate. The
//! core only needs the small capability set in [`MapCanvas`]. A
//! [`RecordingCanvas`] is provided for tests and for dumping scenes as JSON.

use serde::{Deserialize, Serialize};

use crate::models::{BoundingBox, Position, Rgb};

/// Handle to a shape previously added to a canvas.
pub type ShapeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    Roadmap,
    Terrain,
    Satellite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Initial view of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Position,
    pub zoom: u8,
    pub style: MapStyle,
    pub scale_control: bool,
}

/// Stroke and fill attributes shared by every shape primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke_color: Rgb,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
    pub fill_color: Rgb,
    pub fill_opacity: f64,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Position,
    pub radius_m: f64,
    /// Display label; fix markers carry their waypoint id here
    pub title: Option<String>,
    pub style: ShapeStyle,
}

/// A connected line; the provider interpolates great circles when `geodesic`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub path: Vec<Position>,
    pub geodesic: bool,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub bounds: BoundingBox,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Position,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Circle(Circle),
    Polyline(Polyline),
    Rectangle(Rectangle),
    Marker(Marker),
}

/// Minimal map provider surface the overlays draw through.
///
/// Implementations only draw; pointer events come back through
/// [`RenderContext::handle_pointer`](crate::context::RenderContext::handle_pointer).
pub trait MapCanvas {
    fn init(&mut self, view: &MapView);

    /// Place a named control container on the map chrome.
    fn add_control(&mut self, position: ControlPosition, control: &str);

    /// Append markup to a control container.
    fn append_control_markup(&mut self, control: &str, markup: &str);

    fn add_shape(&mut self, shape: Shape) -> ShapeId;

    /// Ask the provider to forward enter/leave events for a shape.
    fn subscribe_pointer(&mut self, shape: ShapeId);

    fn show_tooltip(&mut self, content: &str, anchor: Position);

    fn hide_tooltip(&mut self);

    /// Visibility of the floating marker that hosts the tooltip.
    fn set_anchor_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRecord {
    pub id: String,
    pub position: ControlPosition,
    pub markup: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TooltipRecord {
    Show { content: String, anchor: Position },
    Hide,
}

/// Canvas that keeps every call it receives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingCanvas {
    pub view: Option<MapView>,
    pub controls: Vec<ControlRecord>,
    pub shapes: Vec<Shape>,
    pub subscriptions: Vec<ShapeId>,
    pub tooltip_log: Vec<TooltipRecord>,
    pub tooltip_open: bool,
    pub anchor_visible: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Polyline(line) => Some(line),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Rectangle> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Rectangle(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Marker(marker) => Some(marker),
            _ => None,
        })
    }

    pub fn control(&self, id: &str) -> Option<&ControlRecord> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Number of times the tooltip was (re)drawn.
    pub fn tooltip_renders(&self) -> usize {
        self.tooltip_log
            .iter()
            .filter(|r| matches!(r, TooltipRecord::Show { .. }))
            .count()
    }
}

impl MapCanvas for RecordingCanvas {
    fn init(&mut self, view: &MapView) {
        self.view = Some(*view);
    }

    fn add_control(&mut self, position: ControlPosition, control: &str) {
        self.controls.push(ControlRecord {
            id: control.to_string(),
            position,
            markup: Vec::new(),
        });
    }

    fn append_control_markup(&mut self, control: &str, markup: &str) {
        if let Some(record) = self.controls.iter_mut().find(|c| c.id == control) {
            record.markup.push(markup.to_string());
        }
    }

    fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    fn subscribe_pointer(&mut self, shape: ShapeId) {
        self.subscriptions.push(shape);
    }

    fn show_tooltip(&mut self, content: &str, anchor: Position) {
        self.tooltip_open = true;
        self.tooltip_log.push(TooltipRecord::Show {
            content: content.to_string(),
            anchor,
        });
    }

    fn hide_tooltip(&mut self) {
        self.tooltip_open = false;
        self.tooltip_log.push(TooltipRecord::Hide);
    }

    fn set_anchor_visible(&mut self, visible: bool) {
        self.anchor_visible = visible;
    }
}
