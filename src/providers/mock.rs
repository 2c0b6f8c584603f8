/*!
 * Mock provider implementation for testing and dry runs.
 *
 * This module provides a provider that never touches the network:
 * - `MockProvider::working()` - Always succeeds with tagged text
 * - `MockProvider::intermittent(n)` - Fails every nth call
 * - `MockProvider::fail_on_call(n)` - Fails only the nth call
 * - `MockProvider::flaky(n)` - Fails the first n calls, then succeeds
 * - `MockProvider::failing()` - Always fails with an error
 *
 * Every call is recorded with its arrival time so callers can check
 * ordering and pacing.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing the text with the target language
    Working,
    /// Fails every Nth call
    Intermittent { fail_every: usize },
    /// Fails only the given 1-based call
    FailOnCall { call: usize },
    /// Fails the first N calls, then succeeds
    Flaky { failures: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds with an empty translation
    Empty,
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// One call seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The request as received
    pub request: TranslationRequest,
    /// When the call started
    pub at: Instant,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Call log shared between clones
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslationRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a mock that fails only the given 1-based call
    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create a mock that fails the first `failures` calls
    pub fn flaky(failures: usize) -> Self {
        Self::new(MockBehavior::Flaky { failures })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty translations
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslationRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every call made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Texts of every call made so far, in order
    pub fn requested_texts(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.request.text.clone()).collect()
    }

    /// Tag used by the default response
    pub fn tagged(request: &TranslationRequest) -> String {
        format!("[{}] {}", request.target_language, request.text)
    }

    fn respond(&self, request: &TranslationRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => Self::tagged(request),
        }
    }

    fn simulated_failure(call: usize) -> ProviderError {
        ProviderError::ApiError {
            status_code: 503,
            message: format!("Simulated failure (request #{})", call),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            calls: Arc::clone(&self.calls),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        // 1-based call number
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.lock().push(RecordedCall {
            request: request.clone(),
            at: Instant::now(),
        });

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(request)),

            MockBehavior::Intermittent { fail_every } => {
                if call % fail_every.max(1) == 0 {
                    Err(Self::simulated_failure(call))
                } else {
                    Ok(self.respond(request))
                }
            }

            MockBehavior::FailOnCall { call: failing_call } => {
                if call == failing_call {
                    Err(Self::simulated_failure(call))
                } else {
                    Ok(self.respond(request))
                }
            }

            MockBehavior::Flaky { failures } => {
                if call <= failures {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated connection reset (request #{})",
                        call
                    )))
                } else {
                    Ok(self.respond(request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated provider failure".to_string(),
            )),

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.respond(request))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
