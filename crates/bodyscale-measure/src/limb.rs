//! Limb length estimator

use bodyscale_core::{
    distance, path_length, resolve, BodyscaleResult, LandmarkIndex, LandmarkSet,
    MeasurementField, MeasurementMode,
};

/// Limbs measured along a three-joint path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Limb {
    pub fn all() -> &'static [Limb] {
        &[Limb::LeftArm, Limb::RightArm, Limb::LeftLeg, Limb::RightLeg]
    }

    /// Joint path, proximal to distal
    pub fn path(self) -> [usize; 3] {
        use LandmarkIndex::*;
        let roles = match self {
            Limb::LeftArm => [LeftShoulder, LeftElbow, LeftWrist],
            Limb::RightArm => [RightShoulder, RightElbow, RightWrist],
            Limb::LeftLeg => [LeftHip, LeftKnee, LeftAnkle],
            Limb::RightLeg => [RightHip, RightKnee, RightAnkle],
        };
        roles.map(LandmarkIndex::index)
    }

    pub fn field(self) -> MeasurementField {
        match self {
            Limb::LeftArm => MeasurementField::ArmL,
            Limb::RightArm => MeasurementField::ArmR,
            Limb::LeftLeg => MeasurementField::LegL,
            Limb::RightLeg => MeasurementField::LegR,
        }
    }
}

/// Physical length of a landmark path.
///
/// `Direct` takes the chord from first to last point; `AnatomicalPath` sums
/// consecutive segments, which is never shorter than the chord. Visibility is
/// the caller's concern; only missing indices are reported.
pub fn limb_length(
    landmarks: &LandmarkSet,
    path: &[usize],
    scale_factor: f64,
    mode: MeasurementMode,
) -> BodyscaleResult<f64> {
    let raw = match mode {
        MeasurementMode::Direct => {
            let points = resolve(landmarks, path)?;
            match (points.first(), points.last()) {
                (Some(first), Some(last)) => distance(first, last),
                _ => 0.0,
            }
        }
        MeasurementMode::AnatomicalPath => path_length(landmarks, path)?,
    };
    Ok(raw as f64 * scale_factor)
}
