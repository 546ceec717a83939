//! Landmarks - tracked body points from an external pose detector
//!
//! Coordinates are normalized (x, y roughly in 0..1, y grows downward, z is
//! relative depth). Landmarks are read-only to the pipeline.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a full pose landmark set
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Anatomical role of a landmark index (pose landmark scheme, 33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEar = 7,
    RightEar = 8,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftFoot = 31,
    RightFoot = 32,
}

impl LandmarkIndex {
    /// All named roles in index order
    pub fn all() -> &'static [LandmarkIndex] {
        &[
            LandmarkIndex::Nose,
            LandmarkIndex::LeftEar,
            LandmarkIndex::RightEar,
            LandmarkIndex::LeftShoulder,
            LandmarkIndex::RightShoulder,
            LandmarkIndex::LeftElbow,
            LandmarkIndex::RightElbow,
            LandmarkIndex::LeftWrist,
            LandmarkIndex::RightWrist,
            LandmarkIndex::LeftHip,
            LandmarkIndex::RightHip,
            LandmarkIndex::LeftKnee,
            LandmarkIndex::RightKnee,
            LandmarkIndex::LeftAnkle,
            LandmarkIndex::RightAnkle,
            LandmarkIndex::LeftFoot,
            LandmarkIndex::RightFoot,
        ]
    }

    /// Raw index into a landmark set
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single tracked body point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Detector confidence that the point is visible (0.0 - 1.0), if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Visible if no score was reported or the score meets the threshold
    pub fn is_visible(&self, threshold: f32) -> bool {
        match self.visibility {
            None => true,
            Some(v) => v >= threshold,
        }
    }

    /// Point halfway between two landmarks (visibility dropped)
    pub fn midpoint(&self, other: &Landmark) -> Landmark {
        Landmark::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    /// Same point shifted along the vertical axis (negative is up)
    pub fn offset_y(&self, dy: f32) -> Landmark {
        Landmark {
            y: self.y + dy,
            ..*self
        }
    }

    /// Normalized 2D image position
    pub fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Ordered landmarks for one frame, indexed by anatomical role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build from a flat `[x, y, z, ...]` buffer of 33 points (99 values)
    pub fn from_xyz(data: &[f32]) -> Option<Self> {
        if data.len() != POSE_LANDMARK_COUNT * 3 {
            return None;
        }
        let landmarks = data
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        Some(Self { landmarks })
    }

    /// Build from a flat `[x, y, z, visibility, ...]` buffer of 33 points (132 values)
    pub fn from_xyzv(data: &[f32]) -> Option<Self> {
        if data.len() != POSE_LANDMARK_COUNT * 4 {
            return None;
        }
        let landmarks = data
            .chunks_exact(4)
            .map(|c| Landmark::new(c[0], c[1], c[2]).with_visibility(c[3]))
            .collect();
        Some(Self { landmarks })
    }

    /// Get a landmark by raw index
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Get a landmark by anatomical role
    pub fn role(&self, role: LandmarkIndex) -> Option<&Landmark> {
        self.get(role.index())
    }

    /// Replace a landmark in place (no-op when out of range)
    pub fn set(&mut self, index: usize, landmark: Landmark) {
        if let Some(slot) = self.landmarks.get_mut(index) {
            *slot = landmark;
        }
    }

    /// Drop every landmark from `len` onward
    pub fn truncate(&mut self, len: usize) {
        self.landmarks.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }
}

impl FromIterator<Landmark> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
