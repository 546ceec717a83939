//! Measurement extraction - one landmark frame to one measurement record

use bodyscale_core::{
    check_visible, distance, BodyscaleError, BodyscaleResult, Landmark, LandmarkIndex,
    LandmarkSet, MeasurementMode, MeasurementRecord,
};
use tracing::trace;

use crate::{limb_length, Limb};

/// Minimum visibility for a landmark to be trusted
pub const MIN_VISIBILITY_THRESHOLD: f32 = 0.8;

/// Upward offset from the ear midpoint to the estimated top of the head (normalized units)
pub const HEAD_TOP_OFFSET: f32 = 0.1;

/// Every landmark a frame must show before it is measured
pub const REQUIRED_LANDMARKS: [usize; 17] = [
    LandmarkIndex::Nose as usize,
    LandmarkIndex::LeftShoulder as usize,
    LandmarkIndex::LeftElbow as usize,
    LandmarkIndex::LeftWrist as usize,
    LandmarkIndex::RightShoulder as usize,
    LandmarkIndex::RightElbow as usize,
    LandmarkIndex::RightWrist as usize,
    LandmarkIndex::LeftHip as usize,
    LandmarkIndex::LeftKnee as usize,
    LandmarkIndex::LeftAnkle as usize,
    LandmarkIndex::RightHip as usize,
    LandmarkIndex::RightKnee as usize,
    LandmarkIndex::RightAnkle as usize,
    LandmarkIndex::LeftFoot as usize,
    LandmarkIndex::RightFoot as usize,
    LandmarkIndex::LeftEar as usize,
    LandmarkIndex::RightEar as usize,
];

/// Extractor configuration
#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    pub visibility_threshold: f32,
    pub head_top_offset: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            visibility_threshold: MIN_VISIBILITY_THRESHOLD,
            head_top_offset: HEAD_TOP_OFFSET,
        }
    }
}

/// A measured frame plus the reference points it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: MeasurementRecord,
    /// Known height divided by apparent height
    pub scale_factor: f64,
    /// Head-top to feet-midpoint distance in normalized units
    pub apparent_height: f32,
    pub head_top: Landmark,
    pub feet_midpoint: Landmark,
}

/// Turns landmark frames into measurement records
#[derive(Clone, Debug, Default)]
pub struct MeasurementExtractor {
    config: ExtractorConfig,
}

impl MeasurementExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Estimated top of the head: ear midpoint raised by the head-top offset
    pub fn head_top(&self, landmarks: &LandmarkSet) -> BodyscaleResult<Landmark> {
        let left = role(landmarks, LandmarkIndex::LeftEar)?;
        let right = role(landmarks, LandmarkIndex::RightEar)?;
        Ok(left.midpoint(right).offset_y(-self.config.head_top_offset))
    }

    pub fn feet_midpoint(&self, landmarks: &LandmarkSet) -> BodyscaleResult<Landmark> {
        let left = role(landmarks, LandmarkIndex::LeftFoot)?;
        let right = role(landmarks, LandmarkIndex::RightFoot)?;
        Ok(left.midpoint(right))
    }

    /// Measure one frame.
    ///
    /// Fails with a frame-skip error when a required landmark is missing or
    /// occluded, when the apparent height is zero or non-finite, or when any
    /// derived value is non-finite.
    pub fn extract(
        &self,
        landmarks: &LandmarkSet,
        known_height: f64,
        mode: MeasurementMode,
    ) -> BodyscaleResult<Extraction> {
        if !known_height.is_finite() || known_height <= 0.0 {
            return Err(BodyscaleError::InvalidConfiguration(format!(
                "known height must be positive, got {known_height}"
            )));
        }

        check_visible(landmarks, &REQUIRED_LANDMARKS, self.config.visibility_threshold)?;

        let head_top = self.head_top(landmarks)?;
        let feet_midpoint = self.feet_midpoint(landmarks)?;

        let apparent_height = distance(&head_top, &feet_midpoint);
        if !apparent_height.is_finite() || apparent_height <= 0.0 {
            return Err(BodyscaleError::DegenerateScale { apparent_height });
        }
        let scale_factor = known_height / apparent_height as f64;
        if !scale_factor.is_finite() {
            return Err(BodyscaleError::DegenerateScale { apparent_height });
        }
        trace!(apparent_height, scale_factor, "Scale factor");

        let mid_hips = role(landmarks, LandmarkIndex::LeftHip)?
            .midpoint(role(landmarks, LandmarkIndex::RightHip)?);
        let shoulders = distance(
            role(landmarks, LandmarkIndex::LeftShoulder)?,
            role(landmarks, LandmarkIndex::RightShoulder)?,
        );

        let record = MeasurementRecord::new(
            limb_length(landmarks, &Limb::LeftArm.path(), scale_factor, mode)?,
            limb_length(landmarks, &Limb::RightArm.path(), scale_factor, mode)?,
            limb_length(landmarks, &Limb::LeftLeg.path(), scale_factor, mode)?,
            limb_length(landmarks, &Limb::RightLeg.path(), scale_factor, mode)?,
            distance(&head_top, &mid_hips) as f64 * scale_factor,
            shoulders as f64 * scale_factor,
        );

        if let Some(field) = record.first_non_finite() {
            return Err(BodyscaleError::NonFiniteMeasurement { field });
        }

        Ok(Extraction {
            record,
            scale_factor,
            apparent_height,
            head_top,
            feet_midpoint,
        })
    }

    /// Record only; `None` for any frame that cannot be measured
    pub fn extract_record(
        &self,
        landmarks: &LandmarkSet,
        known_height: f64,
        mode: MeasurementMode,
    ) -> Option<MeasurementRecord> {
        self.extract(landmarks, known_height, mode)
            .ok()
            .map(|e| e.record)
    }
}

fn role(landmarks: &LandmarkSet, role: LandmarkIndex) -> BodyscaleResult<&Landmark> {
    landmarks
        .role(role)
        .ok_or(BodyscaleError::MissingLandmark { index: role.index() })
}
