//! Score model: the constants behind every generated cell.
//!
//! A cell's score is `max(0, base_level(day) + time_factor(hour) + noise)`.
//! Defaults:
//!
//! - weekday base 20, weekend base 40 (weekend starts Friday)
//! - evening 18:00-22:00 → +35, daytime 09:00-17:00 → +15, otherwise +5
//! - noise drawn from `[-5, 10)`

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Inclusive hour window with an additive factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    /// First hour of the window (inclusive)
    pub start: u8,
    /// Last hour of the window (inclusive)
    pub end: u8,
    /// Score added for hours inside the window
    pub factor: i32,
}

impl HourWindow {
    pub const fn new(start: u8, end: u8, factor: i32) -> Self {
        Self { start, end, factor }
    }

    /// Whether `hour` falls inside the window. Both ends are inclusive.
    pub fn contains(&self, hour: u8) -> bool {
        (self.start..=self.end).contains(&hour)
    }

    fn overlaps(&self, other: &HourWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::invalid(
                field,
                format!("start hour {} is after end hour {}", self.start, self.end),
            ));
        }
        if self.end > 23 {
            return Err(ValidationError::invalid(
                field,
                format!("end hour {} is outside 0-23", self.end),
            ));
        }
        Ok(())
    }
}

/// Inclusive-exclusive integer range `[low, high)` for per-cell noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseRange {
    pub low: i32,
    pub high: i32,
}

impl NoiseRange {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Whether `value` is a possible draw from this range.
    pub fn contains(&self, value: i32) -> bool {
        (self.low..self.high).contains(&value)
    }
}

impl Default for NoiseRange {
    fn default() -> Self {
        Self::new(-5, 10)
    }
}

/// Which time-of-day bucket an hour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Evening,
    Daytime,
    OffHours,
}

/// Generation constants for the engagement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreModel {
    /// Base level for Monday up to (not including) `weekend_start`
    pub weekday_base: i32,
    /// Base level from `weekend_start` through Sunday
    pub weekend_base: i32,
    /// First day, in Monday-first order, that uses `weekend_base`
    pub weekend_start: Weekday,
    /// Factor for every hour outside both windows
    pub off_hours_factor: i32,
    /// Evening window, checked first
    pub evening: HourWindow,
    /// Daytime window, checked second
    pub daytime: HourWindow,
    /// Per-cell noise range
    pub noise: NoiseRange,
}

impl Default for ScoreModel {
    fn default() -> Self {
        Self {
            weekday_base: 20,
            weekend_base: 40,
            weekend_start: Weekday::Fri,
            off_hours_factor: 5,
            evening: HourWindow::new(18, 22, 35),
            daytime: HourWindow::new(9, 17, 15),
            noise: NoiseRange::default(),
        }
    }
}

impl ScoreModel {
    /// Whether `day` uses the weekend base level.
    pub fn is_weekend(&self, day: Weekday) -> bool {
        day.num_days_from_monday() >= self.weekend_start.num_days_from_monday()
    }

    /// Day-dependent base level.
    pub fn base_level(&self, day: Weekday) -> i32 {
        if self.is_weekend(day) {
            self.weekend_base
        } else {
            self.weekday_base
        }
    }

    /// Classify an hour. Evening is tested before daytime.
    pub fn time_bucket(&self, hour: u8) -> TimeBucket {
        if self.evening.contains(hour) {
            TimeBucket::Evening
        } else if self.daytime.contains(hour) {
            TimeBucket::Daytime
        } else {
            TimeBucket::OffHours
        }
    }

    /// Hour-dependent additive factor.
    pub fn time_factor(&self, hour: u8) -> i32 {
        match self.time_bucket(hour) {
            TimeBucket::Evening => self.evening.factor,
            TimeBucket::Daytime => self.daytime.factor,
            TimeBucket::OffHours => self.off_hours_factor,
        }
    }

    /// Score for one cell given its noise draw, clamped at zero.
    ///
    /// The sum is taken in `i64`, so no combination of `i32` constants can
    /// overflow.
    pub fn score(&self, day: Weekday, hour: u8, noise: i32) -> u32 {
        let raw = i64::from(self.base_level(day))
            + i64::from(self.time_factor(hour))
            + i64::from(noise);
        raw.clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Weekend boost over a weekday at the same hour and noise.
    pub fn weekend_boost(&self) -> i64 {
        i64::from(self.weekend_base) - i64::from(self.weekday_base)
    }

    /// Check the model for internally inconsistent constants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the noise range is empty, a window is
    /// malformed, the two windows overlap, or the factors are not ordered
    /// evening > daytime > off-hours.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.noise.low >= self.noise.high {
            return Err(ValidationError::invalid(
                "model.noise",
                format!(
                    "low ({}) must be below high ({})",
                    self.noise.low, self.noise.high
                ),
            ));
        }

        self.evening.validate("model.evening")?;
        self.daytime.validate("model.daytime")?;

        if self.evening.overlaps(&self.daytime) {
            return Err(ValidationError::invalid(
                "model.daytime",
                "daytime window overlaps the evening window",
            ));
        }

        if !(self.evening.factor > self.daytime.factor
            && self.daytime.factor > self.off_hours_factor)
        {
            return Err(ValidationError::invalid(
                "model",
                "factors must be ordered evening > daytime > off-hours",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evening_edges_inclusive() {
        let model = ScoreModel::default();
        assert_eq!(model.time_bucket(18), TimeBucket::Evening);
        assert_eq!(model.time_bucket(22), TimeBucket::Evening);
        assert_eq!(model.time_bucket(23), TimeBucket::OffHours);
    }

    #[test]
    fn test_daytime_edges_inclusive() {
        let model = ScoreModel::default();
        assert_eq!(model.time_bucket(9), TimeBucket::Daytime);
        assert_eq!(model.time_bucket(17), TimeBucket::Daytime);
        assert_eq!(model.time_bucket(8), TimeBucket::OffHours);
    }

    #[test]
    fn test_time_factors() {
        let model = ScoreModel::default();
        assert_eq!(model.time_factor(20), 35);
        assert_eq!(model.time_factor(12), 15);
        assert_eq!(model.time_factor(3), 5);
    }

    #[test]
    fn test_weekend_starts_friday() {
        let model = ScoreModel::default();
        assert!(!model.is_weekend(Weekday::Thu));
        assert!(model.is_weekend(Weekday::Fri));
        assert!(model.is_weekend(Weekday::Sat));
        assert!(model.is_weekend(Weekday::Sun));
        assert_eq!(model.base_level(Weekday::Mon), 20);
        assert_eq!(model.base_level(Weekday::Sun), 40);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let model = ScoreModel {
            weekday_base: 0,
            off_hours_factor: 0,
            ..ScoreModel::default()
        };
        assert_eq!(model.score(Weekday::Mon, 2, -5), 0);
        assert_eq!(model.score(Weekday::Mon, 2, 4), 4);
    }

    #[test]
    fn test_score_has_no_upper_clamp() {
        let model = ScoreModel {
            weekend_base: 1_000,
            ..ScoreModel::default()
        };
        assert_eq!(model.score(Weekday::Sat, 20, 9), 1_044);
    }

    #[test]
    fn test_extreme_constants_do_not_overflow() {
        let model = ScoreModel {
            weekday_base: i32::MIN,
            weekend_base: i32::MAX,
            ..ScoreModel::default()
        };
        assert_eq!(model.validate(), Ok(()));
        assert_eq!(model.score(Weekday::Sat, 20, 9), i32::MAX as u32 + 44);
        assert_eq!(model.score(Weekday::Mon, 20, -5), 0);
        assert_eq!(model.weekend_boost(), u32::MAX as i64);
    }

    #[test]
    fn test_default_model_is_valid() {
        assert_eq!(ScoreModel::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_noise_range() {
        let model = ScoreModel {
            noise: NoiseRange::new(3, 3),
            ..ScoreModel::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ValidationError::InvalidValue { ref field, .. }) if field == "model.noise"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_windows() {
        let reversed = ScoreModel {
            evening: HourWindow::new(22, 18, 35),
            ..ScoreModel::default()
        };
        assert!(reversed.validate().is_err());

        let past_midnight = ScoreModel {
            evening: HourWindow::new(18, 24, 35),
            ..ScoreModel::default()
        };
        assert!(past_midnight.validate().is_err());

        let overlapping = ScoreModel {
            daytime: HourWindow::new(9, 18, 15),
            ..ScoreModel::default()
        };
        assert!(overlapping.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unordered_factors() {
        let model = ScoreModel {
            off_hours_factor: 20,
            ..ScoreModel::default()
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_noise_range_contains() {
        let range = NoiseRange::default();
        assert!(range.contains(-5));
        assert!(range.contains(9));
        assert!(!range.contains(10));
        assert!(!range.contains(-6));
    }
}
