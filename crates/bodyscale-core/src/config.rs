//! Measurement configuration snapshot
//!
//! Loaded and persisted by an external settings collaborator. The pipeline
//! reads one validated snapshot per processing cycle.

use serde::{Deserialize, Serialize};

use crate::{BodyscaleError, BodyscaleResult, MeasurementCategory};

/// How limb lengths are measured along a joint path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementMode {
    /// Straight chord between the path's first and last landmark
    #[serde(alias = "Direct")]
    Direct,
    /// Sum of joint-to-joint segments; robust to bent limbs
    #[default]
    #[serde(alias = "anatomical-path", alias = "Anatomical Path")]
    AnatomicalPath,
}

/// Acceptable range for a category as fractions of the reference height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRange {
    pub min: f64,
    pub max: f64,
}

impl RatioRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range in physical units for a given reference height
    pub fn bounds(&self, reference_height: f64) -> (f64, f64) {
        (reference_height * self.min, reference_height * self.max)
    }
}

/// Filter parameters derived from a [`MeasurementConfig`], all as fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    pub arm: RatioRange,
    pub leg: RatioRange,
    /// Carried from configuration; range filtering currently uses a fixed torso range
    pub up_body: RatioRange,
    /// Carried from configuration; range filtering currently uses a fixed shoulder range
    pub shoulder: RatioRange,
    /// Maximum left/right relative difference, e.g. 0.08
    pub symmetry_threshold: f64,
}

impl FilterConfig {
    /// Configured range for a category
    pub fn configured(&self, category: MeasurementCategory) -> RatioRange {
        match category {
            MeasurementCategory::Arm => self.arm,
            MeasurementCategory::Leg => self.leg,
            MeasurementCategory::UpBody => self.up_body,
            MeasurementCategory::Shoulder => self.shoulder,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        MeasurementConfig::default().filter_config()
    }
}

/// User-facing configuration. Ratios and the variation threshold are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeasurementConfig {
    /// Subject's true height; sets the unit of every measurement.
    /// Required in a JSON snapshot; [`Default`] uses 170 for programmatic use.
    #[serde(default = "unset_height")]
    pub known_height_cm: f64,
    pub measurement_mode: MeasurementMode,
    pub arm_ratio_min: f64,
    pub arm_ratio_max: f64,
    pub leg_ratio_min: f64,
    pub leg_ratio_max: f64,
    pub up_body_ratio_min: f64,
    pub up_body_ratio_max: f64,
    pub shoulder_ratio_min: f64,
    pub shoulder_ratio_max: f64,
    pub limb_variation_threshold_percent: f64,
}

/// Marks a snapshot that omitted `knownHeightCm`; JSON cannot encode NaN
fn unset_height() -> f64 {
    f64::NAN
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        MeasurementConfig {
            known_height_cm: 170.0,
            measurement_mode: MeasurementMode::AnatomicalPath,
            arm_ratio_min: 30.0,
            arm_ratio_max: 55.0,
            leg_ratio_min: 30.0,
            leg_ratio_max: 55.0,
            up_body_ratio_min: 30.0,
            up_body_ratio_max: 60.0,
            shoulder_ratio_min: 15.0,
            shoulder_ratio_max: 25.0,
            limb_variation_threshold_percent: 8.0,
        }
    }
}

impl MeasurementConfig {
    /// Defaults with a specific reference height
    pub fn with_height(known_height_cm: f64) -> Self {
        MeasurementConfig {
            known_height_cm,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: MeasurementMode) -> Self {
        self.measurement_mode = mode;
        self
    }

    /// Parse a JSON snapshot. `knownHeightCm` is required; absent options
    /// take their defaults.
    pub fn from_json(json: &str) -> BodyscaleResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.known_height_cm.is_nan() {
            return Err(BodyscaleError::InvalidConfiguration(
                "knownHeightCm is required".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> BodyscaleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject snapshots that would produce meaningless measurements
    pub fn validate(&self) -> BodyscaleResult<()> {
        if !self.known_height_cm.is_finite() || self.known_height_cm <= 0.0 {
            return Err(BodyscaleError::InvalidConfiguration(format!(
                "knownHeightCm must be a positive number, got {}",
                self.known_height_cm
            )));
        }

        let pairs = [
            ("arm", self.arm_ratio_min, self.arm_ratio_max),
            ("leg", self.leg_ratio_min, self.leg_ratio_max),
            ("upBody", self.up_body_ratio_min, self.up_body_ratio_max),
            ("shoulder", self.shoulder_ratio_min, self.shoulder_ratio_max),
        ];
        for (name, min, max) in pairs {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
                return Err(BodyscaleError::InvalidConfiguration(format!(
                    "{name} ratio bounds must be non-negative numbers, got {min}..{max}"
                )));
            }
            if min > max {
                return Err(BodyscaleError::InvalidConfiguration(format!(
                    "{name}RatioMin ({min}) exceeds {name}RatioMax ({max})"
                )));
            }
        }

        let t = self.limb_variation_threshold_percent;
        if !t.is_finite() || t < 0.0 {
            return Err(BodyscaleError::InvalidConfiguration(format!(
                "limbVariationThresholdPercent must be a non-negative number, got {t}"
            )));
        }

        Ok(())
    }

    /// Percentages converted to fractions
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            arm: RatioRange::new(self.arm_ratio_min / 100.0, self.arm_ratio_max / 100.0),
            leg: RatioRange::new(self.leg_ratio_min / 100.0, self.leg_ratio_max / 100.0),
            up_body: RatioRange::new(
                self.up_body_ratio_min / 100.0,
                self.up_body_ratio_max / 100.0,
            ),
            shoulder: RatioRange::new(
                self.shoulder_ratio_min / 100.0,
                self.shoulder_ratio_max / 100.0,
            ),
            symmetry_threshold: self.limb_variation_threshold_percent / 100.0,
        }
    }
}
