//! Fetched-track cache keyed by idspec.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use fixmap_core::Shape;

#[derive(Debug, Clone)]
struct CachedShapes {
    fetched_at: Instant,
    shapes: Vec<Shape>,
}

/// Converted track shapes per idspec, bounded by age and entry count.
#[derive(Debug)]
pub struct TrackCache {
    entries: DashMap<String, CachedShapes>,
    max_age: Duration,
    max_entries: usize,
}

impl TrackCache {
    pub fn new(max_age: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_age,
            max_entries,
        }
    }

    /// Shapes for `spec` if they were fetched within `max_age`.
    pub fn get_fresh(&self, spec: &str) -> Option<Vec<Shape>> {
        let entry = self.entries.get(spec)?;
        if entry.fetched_at.elapsed() > self.max_age {
            return None;
        }
        Some(entry.shapes.clone())
    }

    pub fn insert(&self, spec: &str, shapes: Vec<Shape>) {
        self.insert_at(spec, shapes, Instant::now());
    }

    fn insert_at(&self, spec: &str, shapes: Vec<Shape>, fetched_at: Instant) {
        self.entries
            .insert(spec.to_string(), CachedShapes { fetched_at, shapes });
        self.evict();
    }

    /// Expired idspecs go first; past the cap, the oldest fetches follow.
    fn evict(&self) {
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() <= self.max_age);

        let excess = self.entries.len().saturating_sub(self.max_entries);
        if excess == 0 {
            return;
        }

        let mut by_age: Vec<(String, Instant)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.fetched_at))
            .collect();
        by_age.sort_by_key(|(_, fetched_at)| *fetched_at);
        for (spec, _) in by_age.into_iter().take(excess) {
            tracing::debug!("evicting cached vectors for {}", spec);
            self.entries.remove(&spec);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
