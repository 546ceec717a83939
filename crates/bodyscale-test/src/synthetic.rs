//! Synthetic standing figure
//!
//! Arms and legs hang straight down, so direct and anatomical-path lengths
//! agree. Head top sits at y = 0.05 and the feet at y = 0.90, giving an
//! apparent height of 0.85.

use bodyscale_core::{Landmark, LandmarkIndex, LandmarkSet, MeasurementRecord, POSE_LANDMARK_COUNT};

const EAR_Y: f32 = 0.15;
const SHOULDER_Y: f32 = 0.22;
const HIP_Y: f32 = 0.40;
const FEET_Y: f32 = 0.90;
const HEAD_TOP_Y: f32 = EAR_Y - 0.1;

/// Apparent head-top to feet distance of the figure
pub const APPARENT_HEIGHT: f32 = FEET_Y - HEAD_TOP_Y;

const UPPER_ARM: f32 = 0.1375;
const LEG_SEGMENT: f32 = 0.2;
const SHOULDER_HALF_WIDTH: f32 = 0.0875;
const HIP_HALF_WIDTH: f32 = 0.05;

/// Standing figure. At 170 cm: arms 55, legs 80, upper body 70, shoulders 35.
#[derive(Clone, Debug)]
pub struct SyntheticPose {
    visibility: f32,
    left_arm_scale: f32,
    right_arm_scale: f32,
    left_leg_scale: f32,
    right_leg_scale: f32,
    occluded: Vec<LandmarkIndex>,
}

impl Default for SyntheticPose {
    fn default() -> Self {
        Self::standing()
    }
}

impl SyntheticPose {
    pub fn standing() -> Self {
        SyntheticPose {
            visibility: 0.99,
            left_arm_scale: 1.0,
            right_arm_scale: 1.0,
            left_leg_scale: 1.0,
            right_leg_scale: 1.0,
            occluded: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_left_arm_scale(mut self, scale: f32) -> Self {
        self.left_arm_scale = scale;
        self
    }

    pub fn with_right_arm_scale(mut self, scale: f32) -> Self {
        self.right_arm_scale = scale;
        self
    }

    pub fn with_left_leg_scale(mut self, scale: f32) -> Self {
        self.left_leg_scale = scale;
        self
    }

    pub fn with_right_leg_scale(mut self, scale: f32) -> Self {
        self.right_leg_scale = scale;
        self
    }

    /// Report `role` with visibility 0.1
    pub fn occlude(mut self, role: LandmarkIndex) -> Self {
        self.occluded.push(role);
        self
    }

    /// Full 33-landmark frame
    pub fn landmarks(&self) -> LandmarkSet {
        let mut set: LandmarkSet = (0..POSE_LANDMARK_COUNT)
            .map(|_| Landmark::new(0.5, 0.5, 0.0).with_visibility(self.visibility))
            .collect();

        let left_shoulder_x = 0.5 - SHOULDER_HALF_WIDTH;
        let right_shoulder_x = 0.5 + SHOULDER_HALF_WIDTH;
        let left_hip_x = 0.5 - HIP_HALF_WIDTH;
        let right_hip_x = 0.5 + HIP_HALF_WIDTH;
        let left_arm = UPPER_ARM * self.left_arm_scale;
        let right_arm = UPPER_ARM * self.right_arm_scale;
        let left_leg = LEG_SEGMENT * self.left_leg_scale;
        let right_leg = LEG_SEGMENT * self.right_leg_scale;

        use LandmarkIndex::*;
        let placed = [
            (Nose, 0.5, EAR_Y + 0.02),
            (LeftEar, 0.45, EAR_Y),
            (RightEar, 0.55, EAR_Y),
            (LeftShoulder, left_shoulder_x, SHOULDER_Y),
            (RightShoulder, right_shoulder_x, SHOULDER_Y),
            (LeftElbow, left_shoulder_x, SHOULDER_Y + left_arm),
            (RightElbow, right_shoulder_x, SHOULDER_Y + right_arm),
            (LeftWrist, left_shoulder_x, SHOULDER_Y + 2.0 * left_arm),
            (RightWrist, right_shoulder_x, SHOULDER_Y + 2.0 * right_arm),
            (LeftHip, left_hip_x, HIP_Y),
            (RightHip, right_hip_x, HIP_Y),
            (LeftKnee, left_hip_x, HIP_Y + left_leg),
            (RightKnee, right_hip_x, HIP_Y + right_leg),
            (LeftAnkle, left_hip_x, HIP_Y + 2.0 * left_leg),
            (RightAnkle, right_hip_x, HIP_Y + 2.0 * right_leg),
            (LeftFoot, left_hip_x, FEET_Y),
            (RightFoot, right_hip_x, FEET_Y),
        ];
        for (role, x, y) in placed {
            set.set(role.index(), Landmark::new(x, y, 0.0).with_visibility(self.visibility));
        }
        for role in &self.occluded {
            if let Some(landmark) = set.role(*role).copied() {
                set.set(role.index(), Landmark { visibility: Some(0.1), ..landmark });
            }
        }
        set
    }

    /// Measurements the figure should produce for `known_height`
    pub fn expected(&self, known_height: f64) -> MeasurementRecord {
        let scale = known_height / APPARENT_HEIGHT as f64;
        let cm = |normalized: f32| normalized as f64 * scale;
        MeasurementRecord::new(
            cm(2.0 * UPPER_ARM * self.left_arm_scale),
            cm(2.0 * UPPER_ARM * self.right_arm_scale),
            cm(2.0 * LEG_SEGMENT * self.left_leg_scale),
            cm(2.0 * LEG_SEGMENT * self.right_leg_scale),
            cm(HIP_Y - HEAD_TOP_Y),
            cm(2.0 * SHOULDER_HALF_WIDTH),
        )
    }
}
