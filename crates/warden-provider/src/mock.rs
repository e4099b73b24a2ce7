//! Scriptable in-memory provider for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use async_trait::async_trait;
use warden_core::ServerStatus;

use crate::error::{ProviderError, Result};
use crate::provider::InstanceProvider;
use crate::types::{Observation, Transition};

/// An [`InstanceProvider`] whose answers are set up front.
///
/// Used by the control and gateway tests to exercise request flows
/// without a vendor backend. Call counters record how often each
/// capability was invoked.
#[derive(Debug, Default)]
pub struct MockProvider {
    observation: Mutex<Observation>,
    transition: Mutex<Transition>,
    fail: Mutex<bool>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    probe_calls: AtomicUsize,
}

impl MockProvider {
    /// Create a mock that observes no instance and fails soft on actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the observation returned by `probe`.
    pub fn set_observation(&self, status: Option<ServerStatus>, address: Option<&str>) {
        *self.observation.lock() = Observation {
            status,
            address: address.map(str::to_string),
        };
    }

    /// Script the transition returned by `start` and `stop`.
    pub fn set_transition(&self, transition: Transition) {
        *self.transition.lock() = transition;
    }

    /// Make every subsequent call fail hard.
    pub fn fail_calls(&self) {
        *self.fail.lock() = true;
    }

    /// Number of `start` calls so far.
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Number of `stop` calls so far.
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// Number of `probe` calls so far.
    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    fn check_fail(&self) -> Result<()> {
        if *self.fail.lock() {
            Err(ProviderError::Api {
                status: 500,
                body: "injected failure".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InstanceProvider for MockProvider {
    async fn start(&self) -> Result<Transition> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.transition.lock().clone())
    }

    async fn stop(&self) -> Result<Transition> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.transition.lock().clone())
    }

    async fn probe(&self) -> Result<Observation> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.observation.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_observation_is_returned() {
        let provider = MockProvider::new();
        provider.set_observation(Some(ServerStatus::Running), Some("203.0.113.1"));

        let observation = provider.probe().await.unwrap();
        assert_eq!(observation.status, Some(ServerStatus::Running));
        assert_eq!(observation.address.as_deref(), Some("203.0.113.1"));
        assert_eq!(provider.probe_calls(), 1);
    }

    #[tokio::test]
    async fn injected_failure_errors_every_call() {
        let provider = MockProvider::new();
        provider.fail_calls();

        assert!(provider.start().await.is_err());
        assert!(provider.probe().await.is_err());
    }
}
