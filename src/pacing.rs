//! How long the AI appears to think before its move lands.
//!
//! The pause is cosmetic. It lives behind the [`Pacing`] trait so the table
//! can be driven instantly in tests and batch runs.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, instrument};

/// Supplies the pause between the AI choosing a move and playing it.
#[async_trait]
pub trait Pacing: Send + Sync {
    /// Waits out one thinking pause.
    async fn think(&self);
}

/// Sleeps for a uniformly random duration within fixed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    min: Duration,
    max: Duration,
}

impl ThinkingDelay {
    /// Creates a delay in `[min, max]`. Bounds given in the wrong order are
    /// swapped.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Shortest pause.
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Longest pause.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws one pause length.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1000))
    }
}

#[async_trait]
impl Pacing for ThinkingDelay {
    #[instrument(skip(self))]
    async fn think(&self) {
        let pause = self.sample();
        debug!(?pause, "AI thinking");
        tokio::time::sleep(pause).await;
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pacing for NoPause {
    async fn think(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_bounds() {
        let delay = ThinkingDelay::new(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let pause = delay.sample();
            assert!(pause >= delay.min() && pause <= delay.max());
        }
    }

    #[test]
    fn test_swapped_bounds_are_normalized() {
        let delay = ThinkingDelay::new(Duration::from_millis(30), Duration::from_millis(5));
        assert_eq!(delay.min(), Duration::from_millis(5));
        assert_eq!(delay.max(), Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_think_sleeps_for_fixed_pause() {
        let delay = ThinkingDelay::new(Duration::from_millis(250), Duration::from_millis(250));
        let start = tokio::time::Instant::now();
        delay.think().await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
