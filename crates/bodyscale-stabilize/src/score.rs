//! Window averaging and confidence scoring

use bodyscale_core::{BodyscaleError, BodyscaleResult, MeasurementField, MeasurementRecord};

/// Minimum filtered records before a window is scored
pub const MIN_GOOD_SAMPLES: usize = 10;

/// Average per-field standard deviation (in length units) that maps to 0% confidence
pub const MAX_FIELD_VARIATION: f64 = 10.0;

/// Best-estimate confidence at which the high-confidence cue is raised
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 95.0;

/// Scoring configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreConfig {
    pub min_good_samples: usize,
    /// Normalization constant of the confidence score; tunable, not derived
    pub max_field_variation: f64,
    pub high_confidence_threshold: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            min_good_samples: MIN_GOOD_SAMPLES,
            max_field_variation: MAX_FIELD_VARIATION,
            high_confidence_threshold: HIGH_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Averaged window and its confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowScore {
    pub average: MeasurementRecord,
    /// 0 - 100
    pub confidence: f64,
    /// Number of filtered records the score was computed over
    pub samples: usize,
}

/// Outcome of scoring the filtered window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowAssessment {
    /// Too few accepted records; display-only state
    InsufficientData { accepted: usize, required: usize },
    Scored(WindowScore),
}

impl WindowAssessment {
    pub fn score(&self) -> Option<&WindowScore> {
        match self {
            WindowAssessment::Scored(score) => Some(score),
            WindowAssessment::InsufficientData { .. } => None,
        }
    }

    /// The score, or `InsufficientSamples` when the window is too small
    pub fn into_score(self) -> BodyscaleResult<WindowScore> {
        match self {
            WindowAssessment::Scored(score) => Ok(score),
            WindowAssessment::InsufficientData { accepted, required } => {
                Err(BodyscaleError::InsufficientSamples { accepted, required })
            }
        }
    }
}

/// Per-field arithmetic mean; `None` for an empty window
pub fn average(records: &[MeasurementRecord]) -> Option<MeasurementRecord> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    Some(MeasurementRecord::from_fn(|field| {
        records.iter().map(|r| r.get(field)).sum::<f64>() / n
    }))
}

/// Bessel-corrected standard deviation of one field around `mean`.
/// A single sample divides by 1 instead of 0.
pub fn sample_std_dev(records: &[MeasurementRecord], field: MeasurementField, mean: f64) -> f64 {
    let squares: f64 = records
        .iter()
        .map(|r| {
            let d = r.get(field) - mean;
            d * d
        })
        .sum();
    let denom = records.len().saturating_sub(1).max(1) as f64;
    (squares / denom).sqrt()
}

/// Agreement score in `[0, 100]`: 100 for zero spread, falling linearly to 0
/// at an average per-field standard deviation of `max_field_variation`.
pub fn confidence(
    records: &[MeasurementRecord],
    averages: &MeasurementRecord,
    max_field_variation: f64,
) -> f64 {
    let total: f64 = MeasurementField::all()
        .iter()
        .map(|&field| sample_std_dev(records, field, averages.get(field)))
        .sum();
    let fields = MeasurementField::count() as f64;
    (100.0 - (total / (fields * max_field_variation)) * 100.0).clamp(0.0, 100.0)
}

/// Score a filtered window, or report that it is still too small
pub fn assess(filtered: &[MeasurementRecord], config: &ScoreConfig) -> WindowAssessment {
    let required = config.min_good_samples.max(1);
    match average(filtered) {
        Some(average) if filtered.len() >= required => WindowAssessment::Scored(WindowScore {
            average,
            confidence: confidence(filtered, &average, config.max_field_variation),
            samples: filtered.len(),
        }),
        _ => WindowAssessment::InsufficientData {
            accepted: filtered.len(),
            required,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nominal() -> MeasurementRecord {
        MeasurementRecord::new(55.0, 55.0, 80.0, 80.0, 70.0, 35.0)
    }

    #[test]
    fn test_average() {
        let records = vec![nominal(), nominal().with(MeasurementField::ArmL, 57.0)];
        let avg = average(&records).unwrap();
        assert_eq!(avg.arm_l(), 56.0);
        assert_eq!(avg.leg_r(), 80.0);
        assert!(average(&[]).is_none());
    }

    #[test]
    fn test_identical_window_scores_100() {
        let records = vec![nominal(); 10];
        let avg = average(&records).unwrap();
        assert_eq!(avg, nominal());
        assert_eq!(confidence(&records, &avg, MAX_FIELD_VARIATION), 100.0);
    }

    #[test]
    fn test_bessel_correction() {
        // values 54, 56: mean 55, squared deviations 2, n-1 = 1 => std 1.414
        let records = vec![
            nominal().with(MeasurementField::ArmL, 54.0),
            nominal().with(MeasurementField::ArmL, 56.0),
        ];
        let sd = sample_std_dev(&records, MeasurementField::ArmL, 55.0);
        assert!((sd - 2f64.sqrt()).abs() < 1e-12);

        // single sample divides by 1
        let one = vec![nominal().with(MeasurementField::ArmL, 58.0)];
        assert_eq!(sample_std_dev(&one, MeasurementField::ArmL, 55.0), 3.0);
    }

    #[test]
    fn test_confidence_formula() {
        // Only ArmL varies, std = sqrt(2); 100 - sqrt(2) / 60 * 100
        let records = vec![
            nominal().with(MeasurementField::ArmL, 54.0),
            nominal().with(MeasurementField::ArmL, 56.0),
        ];
        let avg = average(&records).unwrap();
        let expected = 100.0 - 2f64.sqrt() / 60.0 * 100.0;
        assert!((confidence(&records, &avg, 10.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_floor() {
        let records = vec![
            nominal(),
            MeasurementRecord::new(155.0, 155.0, 180.0, 180.0, 170.0, 135.0),
        ];
        let avg = average(&records).unwrap();
        assert_eq!(confidence(&records, &avg, 10.0), 0.0);
    }

    #[test]
    fn test_assess_requires_min_samples() {
        let config = ScoreConfig::default();
        let nine = vec![nominal(); 9];
        assert_eq!(
            assess(&nine, &config),
            WindowAssessment::InsufficientData {
                accepted: 9,
                required: 10
            }
        );

        let ten = vec![nominal(); 10];
        let scored = assess(&ten, &config);
        let score = scored.score().unwrap();
        assert_eq!(score.samples, 10);
        assert_eq!(score.confidence, 100.0);
        assert_eq!(format!("{:.2}", score.confidence), "100.00");
    }

    #[test]
    fn test_into_score() {
        let config = ScoreConfig::default();
        assert_eq!(
            assess(&vec![nominal(); 3], &config).into_score(),
            Err(BodyscaleError::InsufficientSamples {
                accepted: 3,
                required: 10
            })
        );
        let score = assess(&vec![nominal(); 12], &config).into_score().unwrap();
        assert_eq!(score.samples, 12);
    }

    proptest! {
        #[test]
        fn prop_confidence_in_bounds(
            values in proptest::collection::vec(
                (
                    1.0f64..200.0,
                    1.0f64..200.0,
                    1.0f64..200.0,
                    1.0f64..200.0,
                    1.0f64..200.0,
                    1.0f64..200.0,
                ),
                1..60,
            )
        ) {
            let records: Vec<MeasurementRecord> = values
                .iter()
                .map(|v| MeasurementRecord::new(v.0, v.1, v.2, v.3, v.4, v.5))
                .collect();
            let avg = average(&records).unwrap();
            let c = confidence(&records, &avg, MAX_FIELD_VARIATION);
            prop_assert!((0.0..=100.0).contains(&c));
        }

        #[test]
        fn prop_constant_window_is_certain(
            v in (1.0f64..200.0, 1.0f64..200.0, 1.0f64..200.0),
            n in 1usize..60,
        ) {
            let record = MeasurementRecord::new(v.0, v.0, v.1, v.1, v.2, v.2);
            let records = vec![record; n];
            let avg = average(&records).unwrap();
            let c = confidence(&records, &avg, MAX_FIELD_VARIATION);
            prop_assert!((c - 100.0).abs() < 1e-9);
        }
    }
}
