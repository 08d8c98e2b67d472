//! Built-in overlay units, drawn by the composer in a fixed order.

pub mod airspace;
pub mod fixes;
pub mod path;
pub mod shading;

pub use airspace::AirspaceOverlay;
pub use fixes::{FixHoverHandler, FixMarkerOverlay};
pub use path::PathRenderer;
pub use shading::ShadedRegionOverlay;
