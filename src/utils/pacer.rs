//! Pausing between registry requests.
//!
//! The enricher asks a [`Pacer`] to wait after every completed lookup, so
//! tests can swap the real sleep for a [`RecordingPacer`].

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Suspends the conversion for a requested delay
#[async_trait]
pub trait Pacer: Send + Sync + std::fmt::Debug {
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Records requested delays without waiting. Intended for tests.
#[derive(Debug, Default)]
pub struct RecordingPacer {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }

    /// Sum of all requested delays
    pub fn total(&self) -> Duration {
        self.delays.lock().unwrap().iter().sum()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_recording_pacer() {
        let pacer = RecordingPacer::new();
        pacer.pause(Duration::from_millis(20)).await;
        pacer.pause(Duration::from_millis(5)).await;

        assert_eq!(
            pacer.delays(),
            vec![Duration::from_millis(20), Duration::from_millis(5)]
        );
        assert_eq!(pacer.total(), Duration::from_millis(25));
    }

    #[tokio::test]
    async fn test_sleep_pacer_waits() {
        let start = Instant::now();
        SleepPacer.pause(Duration::from_millis(30)).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_sleep_pacer_zero_delay() {
        let start = Instant::now();
        SleepPacer.pause(Duration::ZERO).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
