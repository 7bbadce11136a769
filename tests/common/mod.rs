//! Common test utilities

use async_trait::async_trait;
use findserver::models::Endpoint;
use findserver::prober::{ProbeError, ReachabilityCheck};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Candidates A(1), B(4), C(3), D(2) in declaration order
pub fn candidates(base: &str) -> Vec<Endpoint> {
    vec![
        Endpoint::new(format!("{base}/a"), 1),
        Endpoint::new(format!("{base}/b"), 4),
        Endpoint::new(format!("{base}/c"), 3),
        Endpoint::new(format!("{base}/d"), 2),
    ]
}

/// What a scripted address answers, and after how long
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(u16, Duration),
    Refused(Duration),
}

/// Checker that answers from a fixed script and counts calls
#[derive(Debug, Default)]
pub struct ScriptedChecker {
    replies: HashMap<String, Reply>,
    calls: AtomicUsize,
}

impl ScriptedChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, address: impl Into<String>, reply: Reply) -> Self {
        self.replies.insert(address.into(), reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReachabilityCheck for ScriptedChecker {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn check(&self, address: &str, _timeout: Duration) -> Result<u16, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.replies.get(address) {
            Some(Reply::Status(status, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(*status)
            }
            Some(Reply::Refused(delay)) => {
                tokio::time::sleep(*delay).await;
                Err(ProbeError::Connect(format!("{address}: connection refused")))
            }
            None => Err(ProbeError::Connect(format!("{address}: unknown host"))),
        }
    }
}
