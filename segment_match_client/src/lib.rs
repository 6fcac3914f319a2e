pub mod error;

pub use error::{MatchError, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use audience_schema::{MatchSegmentsRequest, MatchSegmentsResponse, Segment};

pub const MATCH_SEGMENTS_PATH: &str = "/api/langgraph/match-segments";

pub struct SegmentMatchClient {
    client: reqwest::Client,
    base_url: String,
    loading: AtomicBool,
}

impl SegmentMatchClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MATCH_SEGMENTS_PATH)
    }

    /// True while a request started through this client is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Ask the service for segments matching a free-text audience description.
    ///
    /// Only one request runs at a time; a second caller gets
    /// [`MatchError::Busy`] instead of queueing.
    pub async fn match_segments(&self, description: &str) -> Result<Vec<Segment>> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(MatchError::Busy);
        }
        let _guard = LoadingGuard(&self.loading);
        self.request(description).await
    }

    /// Same as [`Self::match_segments`] but every failure becomes an empty list.
    pub async fn match_segments_or_empty(&self, description: &str) -> Vec<Segment> {
        match self.match_segments(description).await {
            Ok(segments) => {
                tracing::info!(
                    target: "audience_builder::matching",
                    matched = segments.len(),
                    "match_segments.completed"
                );
                segments
            }
            Err(MatchError::Busy) => {
                tracing::debug!(
                    target: "audience_builder::matching",
                    "match_segments.skipped=busy"
                );
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(
                    target: "audience_builder::matching",
                    endpoint = %self.endpoint(),
                    error = %err,
                    "match_segments.failed"
                );
                Vec::new()
            }
        }
    }

    async fn request(&self, description: &str) -> Result<Vec<Segment>> {
        let body = MatchSegmentsRequest {
            description: description.to_string(),
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MatchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        let parsed: MatchSegmentsResponse = serde_json::from_slice(&bytes)?;
        let mut segments = parsed.matched_segments;
        for segment in &mut segments {
            segment.ensure_key();
        }
        Ok(segments)
    }
}

/// Clears the loading flag even when the request future is dropped early.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
