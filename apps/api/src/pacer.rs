//! Cooperative pacing between analyzer kinds.
//!
//! The upstream LLM endpoint is shared and rate-limited; the orchestrator
//! pauses between kinds within a single run. The policy is a trait so tests
//! run without wall-clock delay. Pacing is process-local and does not
//! coordinate across concurrent users.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits out the self-imposed gap before the next upstream call.
    async fn pause(&self);
}

/// Production pacer: a fixed sleep between kinds.
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Test pacer that returns immediately.
#[cfg(test)]
pub struct NoPacer;

#[cfg(test)]
#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self) {}
}
