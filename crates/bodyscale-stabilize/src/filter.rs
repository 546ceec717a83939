//! Window filter - plausible-range and left/right symmetry checks
//!
//! Filtering is pure: the buffer is never mutated, implausible records are
//! simply left out of the returned window.

use bodyscale_core::{
    FilterConfig, MeasurementCategory, MeasurementField, MeasurementRecord, RatioRange,
};
use tracing::trace;

/// Upper-body range used by the filter, independent of the configured bounds
pub const FIXED_UP_BODY_RANGE: RatioRange = RatioRange::new(0.2, 0.8);

/// Shoulder range used by the filter, independent of the configured bounds
pub const FIXED_SHOULDER_RANGE: RatioRange = RatioRange::new(0.1, 0.8);

/// Why a record was left out of the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    OutOfRange {
        field: MeasurementField,
        value: f64,
        min: f64,
        max: f64,
    },
    Asymmetric {
        category: MeasurementCategory,
        left: f64,
        right: f64,
        /// |left - right| / max(left, right)
        variation: f64,
    },
}

/// Ratio range the filter applies to a category.
///
/// Arm and leg follow the configuration. UpBody and Shoulder use fixed ranges;
/// their configured bounds are carried but inert.
pub fn effective_range(category: MeasurementCategory, config: &FilterConfig) -> RatioRange {
    match category {
        MeasurementCategory::Arm => config.arm,
        MeasurementCategory::Leg => config.leg,
        MeasurementCategory::UpBody => FIXED_UP_BODY_RANGE,
        MeasurementCategory::Shoulder => FIXED_SHOULDER_RANGE,
    }
}

/// Acceptable `[min, max]` for a field in physical units
pub fn acceptable_range(
    field: MeasurementField,
    config: &FilterConfig,
    reference_height: f64,
) -> (f64, f64) {
    effective_range(field.category(), config).bounds(reference_height)
}

/// Relative left/right difference; 0 when both sides are 0
pub fn limb_variation(left: f64, right: f64) -> f64 {
    let larger = left.max(right);
    if larger == 0.0 {
        return 0.0;
    }
    (left - right).abs() / larger
}

/// Every reason a record fails the filter; empty means accepted
pub fn rejections(
    record: &MeasurementRecord,
    config: &FilterConfig,
    reference_height: f64,
) -> Vec<Rejection> {
    let mut out = Vec::new();

    for (field, value) in record.iter() {
        let (min, max) = acceptable_range(field, config, reference_height);
        // NaN fails the range check
        if !(min..=max).contains(&value) {
            out.push(Rejection::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    let pairs = [
        (MeasurementCategory::Arm, record.arm_l(), record.arm_r()),
        (MeasurementCategory::Leg, record.leg_l(), record.leg_r()),
    ];
    for (category, left, right) in pairs {
        let variation = limb_variation(left, right);
        if variation > config.symmetry_threshold {
            out.push(Rejection::Asymmetric {
                category,
                left,
                right,
                variation,
            });
        }
    }

    out
}

pub fn is_acceptable(
    record: &MeasurementRecord,
    config: &FilterConfig,
    reference_height: f64,
) -> bool {
    rejections(record, config, reference_height).is_empty()
}

/// Accepted subset of `records`, preserving relative order
pub fn filter_records<'a, I>(
    records: I,
    config: &FilterConfig,
    reference_height: f64,
) -> Vec<MeasurementRecord>
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
{
    records
        .into_iter()
        .enumerate()
        .filter(|(index, record)| {
            let reasons = rejections(record, config, reference_height);
            for reason in &reasons {
                trace!(index, ?reason, "Record rejected");
            }
            reasons.is_empty()
        })
        .map(|(_, record)| *record)
        .collect()
}
