//! Time-boxed vendor session handle.
//!
//! Some vendor SDK sessions amortize connection and auth setup across
//! calls but must not be reused indefinitely. `SessionHandle` caches a
//! lazily-created client and replaces it once its TTL elapses; a handle
//! is never handed out past its expiry.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default session TTL: one hour from creation.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct Slot {
    client: reqwest::Client,
    expires_at: Instant,
}

/// A lazily-created, TTL-boxed HTTP client handle.
///
/// The slot is guarded by a mutex so concurrent request handlers never
/// observe a half-refreshed handle.
pub struct SessionHandle {
    ttl: Duration,
    slot: Mutex<Option<Slot>>,
}

impl SessionHandle {
    /// Create an empty handle with the given TTL.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached client, building a fresh one when the slot is
    /// empty or the cached client has outlived its TTL.
    pub fn get<F>(&self, build: F) -> reqwest::Client
    where
        F: FnOnce() -> reqwest::Client,
    {
        let mut slot = self.slot.lock();
        match slot.as_ref() {
            Some(cached) if Instant::now() < cached.expires_at => cached.client.clone(),
            _ => {
                let client = build();
                *slot = Some(Slot {
                    client: client.clone(),
                    expires_at: Instant::now() + self.ttl,
                });
                client
            }
        }
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
