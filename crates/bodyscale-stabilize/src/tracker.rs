//! Best-estimate tracker - the session's high-water mark

use bodyscale_core::MeasurementRecord;

use crate::WindowScore;

/// Result of offering a window score to the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BestUpdate {
    /// Score did not strictly exceed the current best
    Unchanged,
    Improved {
        record: MeasurementRecord,
        confidence: f64,
        /// This update is the one that crossed the high-confidence threshold
        reached_high_confidence: bool,
    },
}

impl BestUpdate {
    pub fn is_improved(&self) -> bool {
        matches!(self, BestUpdate::Improved { .. })
    }
}

/// Highest-confidence averaged window seen this session
#[derive(Debug, Clone, Default)]
pub struct BestEstimate {
    record: Option<MeasurementRecord>,
    confidence: f64,
    high_confidence: bool,
}

impl BestEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the estimate iff `score` strictly beats it.
    ///
    /// The high-confidence flag is one-way: once raised it stays raised until reset.
    pub fn offer(&mut self, score: &WindowScore, high_confidence_threshold: f64) -> BestUpdate {
        if score.confidence.is_nan() || score.confidence <= self.confidence {
            return BestUpdate::Unchanged;
        }

        self.record = Some(score.average);
        self.confidence = score.confidence;

        let reached_high_confidence =
            !self.high_confidence && self.confidence >= high_confidence_threshold;
        if reached_high_confidence {
            self.high_confidence = true;
        }

        BestUpdate::Improved {
            record: score.average,
            confidence: score.confidence,
            reached_high_confidence,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record(&self) -> Option<&MeasurementRecord> {
        self.record.as_ref()
    }

    /// High-water confidence, 0 when empty
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn high_confidence(&self) -> bool {
        self.high_confidence
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(confidence: f64) -> WindowScore {
        WindowScore {
            average: MeasurementRecord::new(confidence, 55.0, 80.0, 80.0, 70.0, 35.0),
            confidence,
            samples: 10,
        }
    }

    #[test]
    fn test_starts_empty() {
        let best = BestEstimate::new();
        assert!(best.is_empty());
        assert_eq!(best.confidence(), 0.0);
        assert!(!best.high_confidence());
    }

    #[test]
    fn test_strict_improvement_only() {
        let mut best = BestEstimate::new();
        assert!(best.offer(&score(60.0), 95.0).is_improved());
        assert_eq!(best.offer(&score(60.0), 95.0), BestUpdate::Unchanged);
        assert_eq!(best.offer(&score(40.0), 95.0), BestUpdate::Unchanged);
        assert_eq!(best.record().unwrap().arm_l(), 60.0);

        assert!(best.offer(&score(70.0), 95.0).is_improved());
        assert_eq!(best.confidence(), 70.0);
        assert_eq!(best.record().unwrap().arm_l(), 70.0);
    }

    #[test]
    fn test_zero_confidence_never_recorded() {
        let mut best = BestEstimate::new();
        assert_eq!(best.offer(&score(0.0), 95.0), BestUpdate::Unchanged);
        assert!(best.is_empty());
    }

    #[test]
    fn test_high_confidence_crossing_reported_once() {
        let mut best = BestEstimate::new();
        let first = best.offer(&score(96.0), 95.0);
        assert!(matches!(
            first,
            BestUpdate::Improved {
                reached_high_confidence: true,
                ..
            }
        ));
        let second = best.offer(&score(99.0), 95.0);
        assert!(matches!(
            second,
            BestUpdate::Improved {
                reached_high_confidence: false,
                ..
            }
        ));
        assert!(best.high_confidence());
    }

    #[test]
    fn test_clear() {
        let mut best = BestEstimate::new();
        best.offer(&score(99.0), 95.0);
        best.clear();
        assert!(best.is_empty());
        assert_eq!(best.confidence(), 0.0);
        assert!(!best.high_confidence());
    }

    proptest! {
        #[test]
        fn prop_high_water_mark_never_decreases(
            scores in proptest::collection::vec(0.0f64..100.0, 0..100)
        ) {
            let mut best = BestEstimate::new();
            let mut previous = best.confidence();
            for s in scores {
                best.offer(&score(s), 95.0);
                prop_assert!(best.confidence() >= previous);
                previous = best.confidence();
            }
        }
    }
}
