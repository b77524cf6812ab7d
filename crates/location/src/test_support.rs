//! Deterministic doubles for exercising the provider
//!
//! Not part of the stable API.

use crate::clock::Clock;
use crate::device::{DeviceLocator, PositionError, PositionOptions};
use async_trait::async_trait;
use mazeed_core::store::KeyValueStore;
use mazeed_core::Error;
use mazeed_geo::Coordinate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Start at `now` epoch milliseconds
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Move forward by `by`
    pub fn advance(&self, by: Duration) {
        let by = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.now.fetch_add(by, Ordering::SeqCst);
    }

    /// Jump to `now`
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Locator that replays scripted answers and counts calls
///
/// When the script runs out the last answer repeats.
#[derive(Debug)]
pub struct ScriptedLocator {
    script: Mutex<VecDeque<Result<Coordinate, PositionError>>>,
    last: Mutex<Option<Result<Coordinate, PositionError>>>,
    seen: Mutex<Option<PositionOptions>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedLocator {
    /// Replay `answers` in order
    #[must_use]
    pub fn sequence(answers: Vec<Result<Coordinate, PositionError>>) -> Self {
        Self {
            script: Mutex::new(answers.into()),
            last: Mutex::new(None),
            seen: Mutex::new(None),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always report `coordinate`
    #[must_use]
    pub fn always(coordinate: Coordinate) -> Self {
        Self::sequence(vec![Ok(coordinate)])
    }

    /// Always fail with `error`
    #[must_use]
    pub fn failing(error: PositionError) -> Self {
        Self::sequence(vec![Err(error)])
    }

    /// Sleep `delay` before answering
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of position requests received
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Options passed with the most recent request
    #[must_use]
    pub fn last_options(&self) -> Option<PositionOptions> {
        *self.seen.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn next_answer(&self) -> Result<Coordinate, PositionError> {
        let mut script = self.script.lock().unwrap_or_else(|p| p.into_inner());
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(answer) = script.pop_front() {
            *last = Some(answer);
        }
        last.clone().unwrap_or_else(|| {
            Err(PositionError::PositionUnavailable("empty script".into()))
        })
    }
}

#[async_trait]
impl DeviceLocator for ScriptedLocator {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinate, PositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap_or_else(|p| p.into_inner()) = Some(*options);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_answer()
    }
}

/// Store whose reads succeed with nothing and whose writes always fail
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> mazeed_core::Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> mazeed_core::Result<()> {
        Err(Error::storage(format!("Store is read-only, cannot write {key}")))
    }

    fn remove(&self, _key: &str) -> mazeed_core::Result<bool> {
        Ok(false)
    }
}
