//! fixmap stream - flight vector overlay fetched over HTTP
//!
//! Implements the core's `VectorStream` collaborator: tracks are fetched in
//! the background and handed back to the UI thread through a channel.

pub mod cache;
pub mod client;
pub mod stream;

pub use cache::TrackCache;
pub use client::{Track, TrackPoint, VectorClient};
pub use stream::{tracks_to_shapes, HttpVectorStream};
