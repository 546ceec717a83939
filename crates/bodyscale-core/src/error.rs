//! Error types for the measurement pipeline

use thiserror::Error;

use crate::MeasurementField;

/// Core measurement errors
///
/// Frame-level variants mean "skip this frame". Configuration variants mean
/// "refuse to process until reconfigured". Nothing here is fatal to a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyscaleError {
    // Frame errors
    #[error("Missing landmark: index {index}")]
    MissingLandmark { index: usize },

    #[error("Landmark {index} below visibility threshold: {visibility} < {threshold}")]
    LowVisibility {
        index: usize,
        visibility: f32,
        threshold: f32,
    },

    #[error("Degenerate scale: apparent height {apparent_height}")]
    DegenerateScale { apparent_height: f32 },

    #[error("Non-finite measurement for {field}")]
    NonFiniteMeasurement { field: MeasurementField },

    // Window errors
    #[error("Insufficient samples: {accepted} accepted, {required} required")]
    InsufficientSamples { accepted: usize, required: usize },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Malformed configuration: {0}")]
    ConfigFormat(String),

    // Lifecycle errors
    #[error("Pipeline is not running")]
    NotRunning,
}

impl BodyscaleError {
    /// Frame-level errors are expected during occlusion and only skip the frame
    pub fn is_frame_skip(&self) -> bool {
        matches!(
            self,
            BodyscaleError::MissingLandmark { .. }
                | BodyscaleError::LowVisibility { .. }
                | BodyscaleError::DegenerateScale { .. }
                | BodyscaleError::NonFiniteMeasurement { .. }
        )
    }

    /// Configuration errors block processing until a valid snapshot is installed
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BodyscaleError::InvalidConfiguration(_) | BodyscaleError::ConfigFormat(_)
        )
    }
}

impl From<serde_json::Error> for BodyscaleError {
    fn from(err: serde_json::Error) -> Self {
        BodyscaleError::ConfigFormat(err.to_string())
    }
}

/// Result type for measurement operations
pub type BodyscaleResult<T> = Result<T, BodyscaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(BodyscaleError::MissingLandmark { index: 7 }.is_frame_skip());
        assert!(BodyscaleError::DegenerateScale {
            apparent_height: 0.0
        }
        .is_frame_skip());
        assert!(!BodyscaleError::NotRunning.is_frame_skip());
        assert!(BodyscaleError::InvalidConfiguration("height".into()).is_configuration());
        assert!(!BodyscaleError::InsufficientSamples {
            accepted: 3,
            required: 10
        }
        .is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = BodyscaleError::NonFiniteMeasurement {
            field: MeasurementField::ArmL,
        };
        assert_eq!(err.to_string(), "Non-finite measurement for ArmL");
    }
}
