//! Game configuration types.
//!
//! Callers configure the engine at startup by providing:
//! - `Timings`: Playback, feedback, settle and polling intervals
//! - `GameConfig`: Alphabet size, seed and timings
//!
//! The engine never hardcodes hardware timing; the defaults reproduce the
//! reference board and can be tuned per playback sink.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Delays the runner spends on the environment's clock.
///
/// None of these affect transition logic; they only pace playback and
/// polling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// How long each sequence symbol is rendered during playback.
    pub show: Duration,

    /// Pause between two playback symbols.
    pub gap: Duration,

    /// Pause after the full sequence has been played, before collecting.
    pub after_playback: Duration,

    /// How long an accepted gesture is echoed back to the player.
    pub feedback: Duration,

    /// Settle delay after each accepted gesture.
    /// Keeps one physical gesture from registering as several symbols.
    pub settle: Duration,

    /// Pause after a round is reproduced, before the next playback.
    pub celebrate: Duration,

    /// Delay between gesture polls while collecting.
    pub poll_interval: Duration,

    /// Delay between start-signal polls (also the attract blink period).
    pub start_poll_interval: Duration,

    /// Per-symbol duration of the intro flourish.
    pub intro_step: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            show: Duration::from_millis(500),
            gap: Duration::from_millis(250),
            after_playback: Duration::from_millis(500),
            feedback: Duration::from_millis(250),
            settle: Duration::from_millis(100),
            celebrate: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(20),
            start_poll_interval: Duration::from_millis(200),
            intro_step: Duration::from_millis(100),
        }
    }
}

impl Timings {
    /// Scale every interval by `factor` (e.g. 0.5 for a fast demo).
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |d: Duration| d.mul_f64(factor);
        Self {
            show: scale(self.show),
            gap: scale(self.gap),
            after_playback: scale(self.after_playback),
            feedback: scale(self.feedback),
            settle: scale(self.settle),
            celebrate: scale(self.celebrate),
            poll_interval: scale(self.poll_interval),
            start_poll_interval: scale(self.start_poll_interval),
            intro_step: scale(self.intro_step),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Alphabet size K (1-255). Symbols are drawn from `[0, K)`.
    pub symbol_count: u8,

    /// Seed for the default symbol source.
    /// Same seed produces the same sequence.
    pub seed: u64,

    /// Playback and polling intervals.
    pub timings: Timings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbol_count: 4,
            seed: 42,
            timings: Timings::default(),
        }
    }
}

impl GameConfig {
    /// Create a config for an alphabet of `symbol_count` symbols.
    pub fn new(symbol_count: u8) -> Self {
        Self {
            symbol_count,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set all timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the settle delay after accepted gestures.
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.timings.settle = settle;
        self
    }

    /// Set the gesture poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.timings.poll_interval = interval;
        self
    }

    /// Check the configuration can drive a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol_count == 0 {
            return Err(ConfigError::EmptyAlphabet);
        }
        if self.timings.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval("gesture"));
        }
        if self.timings.start_poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval("start"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.symbol_count, 4);
        assert_eq!(config.seed, 42);
        assert_eq!(config.timings.show, Duration::from_millis(500));
        assert_eq!(config.timings.settle, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new(6)
            .with_seed(123)
            .with_settle(Duration::from_millis(40))
            .with_poll_interval(Duration::from_millis(5));

        assert_eq!(config.symbol_count, 6);
        assert_eq!(config.seed, 123);
        assert_eq!(config.timings.settle, Duration::from_millis(40));
        assert_eq!(config.timings.poll_interval, Duration::from_millis(5));
    }

    #[test]
    fn test_validate_rejects_empty_alphabet() {
        assert_eq!(GameConfig::new(0).validate(), Err(ConfigError::EmptyAlphabet));
    }

    #[test]
    fn test_validate_rejects_zero_poll() {
        let config = GameConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval("gesture")));

        let mut timings = Timings::default();
        timings.start_poll_interval = Duration::ZERO;
        let config = GameConfig::default().with_timings(timings);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval("start")));
    }

    #[test]
    fn test_scaled_timings() {
        let fast = Timings::default().scaled(0.5);
        assert_eq!(fast.show, Duration::from_millis(250));
        assert_eq!(fast.poll_interval, Duration::from_millis(10));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(5).with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
