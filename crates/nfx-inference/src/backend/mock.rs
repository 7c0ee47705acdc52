//! Deterministic mock backend for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::InferenceError;
use crate::request::InferenceRequest;
use crate::{InferenceBackend, Result};

/// Mock inference backend returning pre-configured replies without any
/// network calls.
///
/// Replies queued with [`MockBackend::push_reply`] are consumed in order;
/// once the queue is empty the default reply is returned. A failure message
/// set with [`MockBackend::failing`] makes every call error instead.
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_reply: String,
    queued: Arc<Mutex<VecDeque<String>>>,
    failure: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockBackend {
    /// Create a mock that always returns the given reply.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            default_reply: reply.into(),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            failure: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every call fails with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        let mut mock = Self::new("");
        mock.failure = Some(message.into());
        mock
    }

    /// Queue a reply to be returned before the default one.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.queued.lock().unwrap().push_back(reply.into());
    }

    /// Number of `infer` calls made so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl InferenceBackend for MockBackend {
    async fn infer(&self, _request: &InferenceRequest) -> Result<String> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(message) = &self.failure {
            return Err(InferenceError::Transport(message.clone()));
        }

        if let Some(reply) = self.queued.lock().unwrap().pop_front() {
            return Ok(reply);
        }

        Ok(self.default_reply.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_reply() {
        let mock = MockBackend::new("fixed");
        let reply = mock.infer(&InferenceRequest::new("prompt")).await.unwrap();
        assert_eq!(reply, "fixed");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_queued_replies_consumed_in_order() {
        let mock = MockBackend::new("default");
        mock.push_reply("first");
        mock.push_reply("second");

        let request = InferenceRequest::new("prompt");
        assert_eq!(mock.infer(&request).await.unwrap(), "first");
        assert_eq!(mock.infer(&request).await.unwrap(), "second");
        assert_eq!(mock.infer(&request).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockBackend::failing("connection refused");
        let result = mock.infer(&InferenceRequest::new("prompt")).await;
        assert!(matches!(result, Err(InferenceError::Transport(_))));
    }

    #[tokio::test]
    async fn test_clones_share_call_count() {
        let mock = MockBackend::new("reply");
        let clone = mock.clone();

        mock.infer(&InferenceRequest::new("prompt")).await.unwrap();
        assert_eq!(clone.call_count(), 1);
    }
}
