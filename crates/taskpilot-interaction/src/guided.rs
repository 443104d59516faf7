//! Guided focus-session service.

use crate::http::HttpEndpoint;
use crate::wire::GuidedStartRequest;
use async_trait::async_trait;
use taskpilot_core::config::ClientConfig;
use taskpilot_core::error::Result;
use taskpilot_core::guided::GuidedSnapshot;

/// The backend's guided-session API. Every call returns the full session
/// snapshot; the client never computes transitions itself.
#[async_trait]
pub trait GuidedService: Send + Sync {
    /// Starts a session over tasks matching `labels`, loading the first task.
    async fn start(&self, duration_minutes: u32, labels: &[String]) -> Result<GuidedSnapshot>;

    /// Completes the current task and advances.
    async fn complete(&self, session_id: &str) -> Result<GuidedSnapshot>;

    /// Advances without completing the current task.
    async fn skip(&self, session_id: &str) -> Result<GuidedSnapshot>;
}

/// `GuidedService` over the backend's HTTP API.
#[derive(Clone)]
pub struct HttpGuidedService {
    endpoint: HttpEndpoint,
}

impl HttpGuidedService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoint: HttpEndpoint::new(config),
        }
    }
}

#[async_trait]
impl GuidedService for HttpGuidedService {
    async fn start(&self, duration_minutes: u32, labels: &[String]) -> Result<GuidedSnapshot> {
        let request = GuidedStartRequest {
            duration_minutes,
            labels,
        };
        self.endpoint.post("/guided/start", &request).await
    }

    async fn complete(&self, session_id: &str) -> Result<GuidedSnapshot> {
        self.endpoint
            .post_empty(&format!("/guided/{session_id}/complete"))
            .await
    }

    async fn skip(&self, session_id: &str) -> Result<GuidedSnapshot> {
        self.endpoint
            .post_empty(&format!("/guided/{session_id}/skip"))
            .await
    }
}
