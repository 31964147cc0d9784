//! Splitting parameters and their allowed ranges.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DURATION_RANGE: RangeInclusive<u32> = 10..=3600;
pub const WINDOW_RANGE: RangeInclusive<u32> = 1..=60;
pub const THRESHOLD_RANGE: RangeInclusive<i32> = -80..=0;
pub const MIN_SILENCE_RANGE: RangeInclusive<u32> = 50..=10_000;
pub const SPEED_RANGE: RangeInclusive<f64> = 0.5..=10.0;
pub const SPEED_STEP: f64 = 0.05;

/// The five knobs sent to the server with each submission.
///
/// There are no cross-field constraints; each value is only required to sit
/// inside its own range, which the sliders enforce at the control level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Target chunk duration, seconds.
    pub duration_secs: u32,
    /// Silence search window around each cut point, seconds.
    pub window_secs: u32,
    /// Silence threshold, dBFS.
    pub threshold_db: i32,
    /// Minimum silence length, milliseconds.
    pub min_silence_ms: u32,
    /// Playback speed multiplier.
    pub speed: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            duration_secs: 100,
            window_secs: 10,
            threshold_db: -40,
            min_silence_ms: 500,
            speed: 1.40,
        }
    }
}

impl Parameters {
    /// Single log line enumerating all five values with units.
    pub fn summary(&self) -> String {
        format!(
            "Parameters: duration={}s, window={}s, threshold={}dB, min silence={}ms, speed={}x",
            self.duration_secs, self.window_secs, self.threshold_db, self.min_silence_ms, self.speed
        )
    }

    pub fn is_within_limits(&self) -> bool {
        DURATION_RANGE.contains(&self.duration_secs)
            && WINDOW_RANGE.contains(&self.window_secs)
            && THRESHOLD_RANGE.contains(&self.threshold_db)
            && MIN_SILENCE_RANGE.contains(&self.min_silence_ms)
            && SPEED_RANGE.contains(&self.speed)
    }

    /// Clamp every field back into its range. Persisted configs may carry
    /// values written by older builds with different limits.
    pub fn clamp_to_limits(&mut self) {
        self.duration_secs = self
            .duration_secs
            .clamp(*DURATION_RANGE.start(), *DURATION_RANGE.end());
        self.window_secs = self
            .window_secs
            .clamp(*WINDOW_RANGE.start(), *WINDOW_RANGE.end());
        self.threshold_db = self
            .threshold_db
            .clamp(*THRESHOLD_RANGE.start(), *THRESHOLD_RANGE.end());
        self.min_silence_ms = self
            .min_silence_ms
            .clamp(*MIN_SILENCE_RANGE.start(), *MIN_SILENCE_RANGE.end());
        self.speed = self.speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_limits() {
        assert!(Parameters::default().is_within_limits());
    }

    #[test]
    fn summary_lists_all_values_with_units() {
        let params = Parameters::default();
        assert_eq!(
            params.summary(),
            "Parameters: duration=100s, window=10s, threshold=-40dB, min silence=500ms, speed=1.4x"
        );
    }

    #[test]
    fn clamp_pulls_out_of_range_values_back() {
        let mut params = Parameters {
            duration_secs: 9999,
            window_secs: 0,
            threshold_db: 5,
            min_silence_ms: 1,
            speed: 100.0,
        };
        assert!(!params.is_within_limits());
        params.clamp_to_limits();
        assert!(params.is_within_limits());
        assert_eq!(params.duration_secs, 3600);
        assert_eq!(params.window_secs, 1);
        assert_eq!(params.threshold_db, 0);
        assert_eq!(params.min_silence_ms, 50);
        assert_eq!(params.speed, 10.0);
    }

    #[test]
    fn clamp_leaves_valid_values_alone() {
        let mut params = Parameters::default();
        params.clamp_to_limits();
        assert_eq!(params, Parameters::default());
    }
}
