//! Noisy frame sources
//!
//! Simulates an unsteady detector:
//! - Positional jitter
//! - Occluded landmarks
//! - Frames with no detection

use bodyscale_core::{Landmark, LandmarkIndex, LandmarkSet};
use bodyscale_runtime::{FrameInput, FrameSource};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::SyntheticPose;

/// Detector noise configuration
#[derive(Clone, Debug)]
pub struct NoiseConfig {
    /// Max absolute positional offset per coordinate, normalized units
    pub jitter: f32,
    /// Probability a frame has one occluded landmark (0.0 - 1.0)
    pub occlusion_rate: f64,
    /// Probability a frame has no detection at all (0.0 - 1.0)
    pub dropout_rate: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self::steady()
    }
}

impl NoiseConfig {
    /// No noise at all
    pub fn clean() -> Self {
        NoiseConfig {
            jitter: 0.0,
            occlusion_rate: 0.0,
            dropout_rate: 0.0,
        }
    }

    /// Subject standing still in good light
    pub fn steady() -> Self {
        NoiseConfig {
            jitter: 0.001,
            occlusion_rate: 0.02,
            dropout_rate: 0.01,
        }
    }

    /// Subject moving, partial occlusion
    pub fn shaky() -> Self {
        NoiseConfig {
            jitter: 0.01,
            occlusion_rate: 0.15,
            dropout_rate: 0.1,
        }
    }
}

/// Noise statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoiseStats {
    pub frames: u64,
    pub dropouts: u64,
    pub occlusions: u64,
}

/// Finite stream of noisy frames of one synthetic pose
pub struct NoisySource {
    pose: SyntheticPose,
    config: NoiseConfig,
    rng: StdRng,
    remaining: usize,
    stats: NoiseStats,
}

const OCCLUDABLE: [LandmarkIndex; 10] = [
    LandmarkIndex::LeftElbow,
    LandmarkIndex::RightElbow,
    LandmarkIndex::LeftWrist,
    LandmarkIndex::RightWrist,
    LandmarkIndex::LeftKnee,
    LandmarkIndex::RightKnee,
    LandmarkIndex::LeftAnkle,
    LandmarkIndex::RightAnkle,
    LandmarkIndex::LeftFoot,
    LandmarkIndex::RightFoot,
];

impl NoisySource {
    pub fn new(pose: SyntheticPose, config: NoiseConfig, frames: usize, seed: u64) -> Self {
        NoisySource {
            pose,
            config,
            rng: StdRng::seed_from_u64(seed),
            remaining: frames,
            stats: NoiseStats::default(),
        }
    }

    pub fn stats(&self) -> &NoiseStats {
        &self.stats
    }

    fn jittered(&mut self, landmarks: LandmarkSet) -> LandmarkSet {
        if self.config.jitter <= 0.0 {
            return landmarks;
        }
        let dist = Uniform::new_inclusive(-self.config.jitter, self.config.jitter);
        landmarks
            .iter()
            .map(|l| Landmark {
                x: l.x + dist.sample(&mut self.rng),
                y: l.y + dist.sample(&mut self.rng),
                ..*l
            })
            .collect()
    }

    fn occlude(&mut self, mut landmarks: LandmarkSet) -> LandmarkSet {
        let role = OCCLUDABLE[self.rng.gen_range(0..OCCLUDABLE.len())];
        if let Some(landmark) = landmarks.role(role).copied() {
            trace!(?role, "Occluding landmark");
            landmarks.set(
                role.index(),
                Landmark {
                    visibility: Some(self.rng.gen_range(0.0..0.5)),
                    ..landmark
                },
            );
        }
        landmarks
    }
}

impl FrameSource for NoisySource {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.stats.frames += 1;

        if self.rng.gen_bool(self.config.dropout_rate.clamp(0.0, 1.0)) {
            self.stats.dropouts += 1;
            return Some(FrameInput::NoDetection);
        }

        let mut landmarks = self.jittered(self.pose.landmarks());
        if self.rng.gen_bool(self.config.occlusion_rate.clamp(0.0, 1.0)) {
            self.stats.occlusions += 1;
            landmarks = self.occlude(landmarks);
        }
        Some(FrameInput::Detected(landmarks))
    }
}
