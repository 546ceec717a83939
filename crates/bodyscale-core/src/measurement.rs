//! Measurement records - one frame's body-segment lengths in physical units

use std::fmt;

use serde::{Deserialize, Serialize};

/// Range-check category of a measurement field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementCategory {
    Arm,
    Leg,
    UpBody,
    Shoulder,
}

/// Named measurement in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementField {
    ArmL,
    ArmR,
    LegL,
    LegR,
    UpBody,
    Shoulder,
}

impl MeasurementField {
    /// All fields in storage order
    pub fn all() -> &'static [MeasurementField] {
        &[
            MeasurementField::ArmL,
            MeasurementField::ArmR,
            MeasurementField::LegL,
            MeasurementField::LegR,
            MeasurementField::UpBody,
            MeasurementField::Shoulder,
        ]
    }

    /// Order used by display tables
    pub fn display_order() -> &'static [MeasurementField] {
        &[
            MeasurementField::LegL,
            MeasurementField::LegR,
            MeasurementField::ArmL,
            MeasurementField::ArmR,
            MeasurementField::Shoulder,
            MeasurementField::UpBody,
        ]
    }

    /// Number of fields
    pub fn count() -> usize {
        6
    }

    pub fn category(self) -> MeasurementCategory {
        match self {
            MeasurementField::ArmL | MeasurementField::ArmR => MeasurementCategory::Arm,
            MeasurementField::LegL | MeasurementField::LegR => MeasurementCategory::Leg,
            MeasurementField::UpBody => MeasurementCategory::UpBody,
            MeasurementField::Shoulder => MeasurementCategory::Shoulder,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MeasurementField::ArmL => "ArmL",
            MeasurementField::ArmR => "ArmR",
            MeasurementField::LegL => "LegL",
            MeasurementField::LegR => "LegR",
            MeasurementField::UpBody => "UpBody",
            MeasurementField::Shoulder => "Shoulder",
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One frame's measurements, in the reference height's units
///
/// Immutable once built: derived records are produced with [`MeasurementRecord::with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    #[serde(rename = "ArmL")]
    arm_l: f64,
    #[serde(rename = "ArmR")]
    arm_r: f64,
    #[serde(rename = "LegL")]
    leg_l: f64,
    #[serde(rename = "LegR")]
    leg_r: f64,
    #[serde(rename = "UpBody")]
    up_body: f64,
    #[serde(rename = "Shoulder")]
    shoulder: f64,
}

impl MeasurementRecord {
    pub fn new(
        arm_l: f64,
        arm_r: f64,
        leg_l: f64,
        leg_r: f64,
        up_body: f64,
        shoulder: f64,
    ) -> Self {
        Self {
            arm_l,
            arm_r,
            leg_l,
            leg_r,
            up_body,
            shoulder,
        }
    }

    /// Build from a value per field, called in [`MeasurementField::all`] order
    pub fn from_fn(mut value: impl FnMut(MeasurementField) -> f64) -> Self {
        Self {
            arm_l: value(MeasurementField::ArmL),
            arm_r: value(MeasurementField::ArmR),
            leg_l: value(MeasurementField::LegL),
            leg_r: value(MeasurementField::LegR),
            up_body: value(MeasurementField::UpBody),
            shoulder: value(MeasurementField::Shoulder),
        }
    }

    pub fn get(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::ArmL => self.arm_l,
            MeasurementField::ArmR => self.arm_r,
            MeasurementField::LegL => self.leg_l,
            MeasurementField::LegR => self.leg_r,
            MeasurementField::UpBody => self.up_body,
            MeasurementField::Shoulder => self.shoulder,
        }
    }

    /// Copy of this record with one field replaced
    pub fn with(&self, field: MeasurementField, value: f64) -> Self {
        let mut next = *self;
        match field {
            MeasurementField::ArmL => next.arm_l = value,
            MeasurementField::ArmR => next.arm_r = value,
            MeasurementField::LegL => next.leg_l = value,
            MeasurementField::LegR => next.leg_r = value,
            MeasurementField::UpBody => next.up_body = value,
            MeasurementField::Shoulder => next.shoulder = value,
        }
        next
    }

    /// Iterate `(field, value)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (MeasurementField, f64)> + '_ {
        MeasurementField::all().iter().map(move |&f| (f, self.get(f)))
    }

    /// First field holding NaN or infinity, if any
    pub fn first_non_finite(&self) -> Option<MeasurementField> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(f, _)| f)
    }

    pub fn arm_l(&self) -> f64 {
        self.arm_l
    }

    pub fn arm_r(&self) -> f64 {
        self.arm_r
    }

    pub fn leg_l(&self) -> f64 {
        self.leg_l
    }

    pub fn leg_r(&self) -> f64 {
        self.leg_r
    }

    pub fn up_body(&self) -> f64 {
        self.up_body
    }

    pub fn shoulder(&self) -> f64 {
        self.shoulder
    }
}

/// Two-decimal values in display order, e.g. `LegL 80.00 | LegR 80.00 | ...`
impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &field) in MeasurementField::display_order().iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{} {:.2}", field, self.get(field))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(MeasurementField::ArmR.category(), MeasurementCategory::Arm);
        assert_eq!(MeasurementField::LegL.category(), MeasurementCategory::Leg);
        assert_eq!(MeasurementField::UpBody.category(), MeasurementCategory::UpBody);
        assert_eq!(MeasurementField::Shoulder.category(), MeasurementCategory::Shoulder);
        assert_eq!(MeasurementField::all().len(), MeasurementField::count());
        assert_eq!(MeasurementField::display_order().len(), MeasurementField::count());
    }

    #[test]
    fn test_record_accessors() {
        let r = MeasurementRecord::new(55.0, 54.0, 80.0, 81.0, 70.0, 35.0);
        assert_eq!(r.get(MeasurementField::ArmL), 55.0);
        assert_eq!(r.arm_r(), 54.0);
        assert_eq!(r.get(MeasurementField::Shoulder), 35.0);

        let r2 = r.with(MeasurementField::ArmR, 20.0);
        assert_eq!(r2.arm_r(), 20.0);
        assert_eq!(r.arm_r(), 54.0);

        let doubled = MeasurementRecord::from_fn(|f| r.get(f) * 2.0);
        assert_eq!(doubled.leg_r(), 162.0);
    }

    #[test]
    fn test_non_finite() {
        let r = MeasurementRecord::new(55.0, 54.0, 80.0, 81.0, 70.0, 35.0);
        assert_eq!(r.first_non_finite(), None);
        let bad = r.with(MeasurementField::UpBody, f64::NAN);
        assert_eq!(bad.first_non_finite(), Some(MeasurementField::UpBody));
    }

    #[test]
    fn test_display() {
        let r = MeasurementRecord::new(55.0, 55.5, 80.0, 80.25, 70.0, 35.126);
        assert_eq!(
            r.to_string(),
            "LegL 80.00 | LegR 80.25 | ArmL 55.00 | ArmR 55.50 | Shoulder 35.13 | UpBody 70.00"
        );
    }

    #[test]
    fn test_serde_names() {
        let r = MeasurementRecord::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"ArmL\":1.0"));
        assert!(json.contains("\"Shoulder\":6.0"));
    }
}
