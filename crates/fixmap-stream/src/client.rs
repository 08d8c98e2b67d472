//! Flight vector HTTP client.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One point of a flight track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A flight track as served by the vector endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub color: Option<String>,
    pub points: Vec<TrackPoint>,
}

/// HTTP client for the flight vector endpoint.
#[derive(Debug, Clone)]
pub struct VectorClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl VectorClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all tracks matching an idspec (`ID[@time][,ID...]`).
    ///
    /// `GET {base}/fdb/vector?idspec=...` answers with a JSON array of
    /// `{"id", "color"?, "points": [{"lat", "lon"}]}` objects.
    pub async fn fetch_tracks(&self, idspec: &str) -> Result<Vec<Track>> {
        let url = format!("{}/fdb/vector", self.base_url);
        tracing::debug!("fetching vectors for {} from {}", idspec, url);

        let resp = self
            .client
            .get(&url)
            .query(&[("idspec", idspec)])
            .send()
            .await
            .with_context(|| format!("vector request for {} failed", idspec))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("vector endpoint returned {}: {}", status, body);
        }

        let tracks: Vec<Track> = resp
            .json()
            .await
            .context("failed to decode vector response")?;
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = VectorClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn track_color_is_optional() {
        let tracks: Vec<Track> = serde_json::from_str(
            r#"[{"id": "UAL123", "points": [{"lat": 37.0, "lon": -122.0}]}]"#,
        )
        .unwrap();
        assert_eq!(tracks[0].color, None);
        assert_eq!(tracks[0].points.len(), 1);
    }

    #[test]
    fn decodes_vector_payload() {
        let tracks: Vec<Track> = serde_json::from_str(
            r##"[
                {"id": "UAL123@1450000000", "color": "#ff8800",
                 "points": [{"lat": 37.0, "lon": -122.0}, {"lat": 37.5, "lon": -122.3}]},
                {"id": "SWA9", "color": null, "points": []}
            ]"##,
        )
        .unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].color.as_deref(), Some("#ff8800"));
        assert_eq!(tracks[0].points[1], TrackPoint { lat: 37.5, lon: -122.3 });
        assert!(tracks[1].points.is_empty());
        assert!(serde_json::from_str::<Vec<Track>>(r#"[{"id": "X"}]"#).is_err());
    }
}
