//! Measurement session - owns the buffer and the best estimate
//!
//! `push` and `reset` are the only mutation points. Everything else reads.

use bodyscale_core::{FilterConfig, MeasurementRecord};
use tracing::{debug, info};

use crate::{
    assess, filter_records, BestEstimate, BestUpdate, MeasurementBuffer, ScoreConfig,
    WindowAssessment,
};

/// Everything one push produced
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    /// The record that was pushed
    pub record: MeasurementRecord,
    pub buffered: usize,
    /// Records that survived the filter
    pub accepted: usize,
    pub assessment: WindowAssessment,
    pub best: BestUpdate,
}

/// Read-only view of session state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub buffered: usize,
    pub best_record: Option<MeasurementRecord>,
    pub best_confidence: f64,
    pub high_confidence: bool,
    /// Incremented by every reset
    pub generation: u64,
}

/// Per-session stabilization state
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    buffer: MeasurementBuffer,
    best: BestEstimate,
    config: ScoreConfig,
    generation: u64,
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSession {
    pub fn new() -> Self {
        Self::with_config(ScoreConfig::default())
    }

    pub fn with_config(config: ScoreConfig) -> Self {
        Self::with_buffer(MeasurementBuffer::new(), config)
    }

    pub fn with_buffer(buffer: MeasurementBuffer, config: ScoreConfig) -> Self {
        MeasurementSession {
            buffer,
            best: BestEstimate::new(),
            config,
            generation: 0,
        }
    }

    /// Buffer a record, filter and score the window, and maybe raise the best estimate
    pub fn push(
        &mut self,
        record: MeasurementRecord,
        filter: &FilterConfig,
        reference_height: f64,
    ) -> SessionUpdate {
        self.buffer.push(record);
        let filtered = self.filtered_window(filter, reference_height);
        debug!(
            buffered = self.buffer.len(),
            accepted = filtered.len(),
            "Window filtered"
        );

        let assessment = assess(&filtered, &self.config);
        let best = match &assessment {
            WindowAssessment::Scored(score) => {
                debug!(confidence = score.confidence, "Window scored");
                let update = self.best.offer(score, self.config.high_confidence_threshold);
                if let BestUpdate::Improved {
                    confidence,
                    reached_high_confidence,
                    ..
                } = update
                {
                    info!(confidence, "Best estimate improved");
                    if reached_high_confidence {
                        info!(confidence, "High confidence reached");
                    }
                }
                update
            }
            WindowAssessment::InsufficientData { accepted, required } => {
                debug!(accepted, required, "Insufficient data");
                BestUpdate::Unchanged
            }
        };

        SessionUpdate {
            record,
            buffered: self.buffer.len(),
            accepted: filtered.len(),
            assessment,
            best,
        }
    }

    /// Filtered window over the current buffer; does not mutate anything
    pub fn filtered_window(
        &self,
        filter: &FilterConfig,
        reference_height: f64,
    ) -> Vec<MeasurementRecord> {
        filter_records(self.buffer.iter(), filter, reference_height)
    }

    /// Clear buffer and best estimate together. Idempotent.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.best.clear();
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "Session reset");
    }

    pub fn buffer(&self) -> &MeasurementBuffer {
        &self.buffer
    }

    pub fn best(&self) -> &BestEstimate {
        &self.best
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            buffered: self.buffer.len(),
            best_record: self.best.record().copied(),
            best_confidence: self.best.confidence(),
            high_confidence: self.best.high_confidence(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodyscale_core::{MeasurementConfig, MeasurementField};
    use proptest::prelude::*;

    const HEIGHT: f64 = 170.0;

    fn nominal() -> MeasurementRecord {
        MeasurementRecord::new(55.0, 55.0, 80.0, 80.0, 70.0, 35.0)
    }

    fn filter() -> FilterConfig {
        MeasurementConfig::with_height(HEIGHT).filter_config()
    }

    #[test]
    fn test_ten_identical_records_reach_full_confidence() {
        let mut session = MeasurementSession::new();
        let filter = filter();

        for _ in 0..9 {
            let update = session.push(nominal(), &filter, HEIGHT);
            assert!(matches!(update.assessment, WindowAssessment::InsufficientData { .. }));
            assert_eq!(update.best, BestUpdate::Unchanged);
        }

        let update = session.push(nominal(), &filter, HEIGHT);
        let score = update.assessment.score().unwrap();
        assert_eq!(score.confidence, 100.0);
        assert_eq!(
            update.best,
            BestUpdate::Improved {
                record: nominal(),
                confidence: 100.0,
                reached_high_confidence: true,
            }
        );
        assert_eq!(session.best().record(), Some(&nominal()));
        assert!(session.best().high_confidence());
    }

    #[test]
    fn test_asymmetric_record_excluded() {
        let mut session = MeasurementSession::new();
        let filter = filter();

        let mut last = None;
        for i in 1..=10 {
            let record = if i == 5 {
                nominal().with(MeasurementField::ArmR, 20.0)
            } else {
                nominal()
            };
            last = Some(session.push(record, &filter, HEIGHT));
        }

        let last = last.unwrap();
        assert_eq!(last.buffered, 10);
        assert_eq!(last.accepted, 9);
        assert_eq!(
            last.assessment,
            WindowAssessment::InsufficientData {
                accepted: 9,
                required: 10
            }
        );
        assert!(session.best().is_empty());
    }

    #[test]
    fn test_lower_window_does_not_overwrite_best() {
        let mut session = MeasurementSession::new();
        let filter = filter();
        for _ in 0..10 {
            session.push(nominal(), &filter, HEIGHT);
        }
        assert_eq!(session.best().confidence(), 100.0);

        let update = session.push(nominal().with(MeasurementField::UpBody, 75.0), &filter, HEIGHT);
        assert!(update.assessment.score().unwrap().confidence < 100.0);
        assert_eq!(update.best, BestUpdate::Unchanged);
        assert_eq!(session.best().record(), Some(&nominal()));
    }

    #[test]
    fn test_reset() {
        let mut session = MeasurementSession::new();
        let filter = filter();
        for _ in 0..12 {
            session.push(nominal(), &filter, HEIGHT);
        }

        session.reset();
        let snap = session.snapshot();
        assert_eq!(snap.buffered, 0);
        assert_eq!(snap.best_record, None);
        assert_eq!(snap.best_confidence, 0.0);
        assert!(!snap.high_confidence);
        assert_eq!(snap.generation, 1);

        // Idempotent apart from the generation counter
        session.reset();
        let again = session.snapshot();
        assert_eq!(again.buffered, 0);
        assert_eq!(again.best_record, None);
        assert_eq!(again.generation, 2);
    }

    #[test]
    fn test_filtered_window_is_read_only() {
        let mut session = MeasurementSession::new();
        let filter = filter();
        session.push(nominal(), &filter, HEIGHT);
        session.push(nominal().with(MeasurementField::LegL, 10.0), &filter, HEIGHT);

        assert_eq!(session.filtered_window(&filter, HEIGHT).len(), 1);
        assert_eq!(session.filtered_window(&filter, HEIGHT).len(), 1);
        assert_eq!(session.buffer().len(), 2);
    }

    proptest! {
        #[test]
        fn prop_best_confidence_monotone(
            noise in proptest::collection::vec(-3.0f64..3.0, 1..150)
        ) {
            let mut session = MeasurementSession::new();
            let filter = filter();
            let mut previous = 0.0;
            for n in noise {
                let record =
                    MeasurementRecord::new(55.0 + n, 55.0 + n, 80.0 - n, 80.0 - n, 70.0 + n, 35.0);
                session.push(record, &filter, HEIGHT);
                let now = session.best().confidence();
                prop_assert!(now >= previous);
                previous = now;
            }
        }
    }
}
