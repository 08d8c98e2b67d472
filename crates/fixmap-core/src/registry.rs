//! Named fix lookup.

use std::collections::HashMap;

use crate::error::{OverlayError, OverlayResult};
use crate::models::{Position, Waypoint};

/// Lookup table of named fixes, built once when a scene loads.
///
/// Duplicate ids are rejected: the first registration wins and later ones
/// fail with [`OverlayError::DuplicateWaypoint`].
#[derive(Debug, Clone, Default)]
pub struct WaypointRegistry {
    fixes: HashMap<String, Waypoint>,
}

impl WaypointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fix. Ids are case-sensitive.
    pub fn register(&mut self, id: impl Into<String>, position: Position) -> OverlayResult<()> {
        let id = id.into();
        position.validate()?;
        if self.fixes.contains_key(&id) {
            return Err(OverlayError::DuplicateWaypoint { id });
        }
        self.fixes.insert(id.clone(), Waypoint { id, position });
        Ok(())
    }

    /// Build a registry from scene definitions.
    ///
    /// Bad definitions are skipped and returned alongside the registry so one
    /// typo does not take down every other fix.
    pub fn from_waypoints<'a, I>(waypoints: I) -> (Self, Vec<OverlayError>)
    where
        I: IntoIterator<Item = &'a Waypoint>,
    {
        let mut registry = Self::new();
        let mut errors = Vec::new();
        for waypoint in waypoints {
            if let Err(err) = registry.register(waypoint.id.clone(), waypoint.position) {
                errors.push(err);
            }
        }
        (registry, errors)
    }

    pub fn resolve(&self, id: &str) -> OverlayResult<Position> {
        self.fixes
            .get(id)
            .map(|wp| wp.position)
            .ok_or_else(|| OverlayError::UnknownWaypoint { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fixes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Fixes in id order, so marker output is stable between runs.
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        let mut fixes: Vec<&Waypoint> = self.fixes.values().collect();
        fixes.sort_by(|a, b| a.id.cmp(&b.id));
        fixes.into_iter()
    }
}
