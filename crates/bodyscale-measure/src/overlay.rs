//! Overlay segments for an external renderer
//!
//! Pure derivation from the landmark frame and its extraction; no session state.

use bodyscale_core::{
    resolve, BodyscaleResult, LandmarkIndex, LandmarkSet, MeasurementField, MeasurementMode,
};

use crate::{Extraction, Limb};

/// Line segment between two normalized image positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// What an overlay polyline depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLabel {
    /// Estimated head-top to feet midpoint
    ReferenceHeight,
    Measurement(MeasurementField),
}

/// One labelled polyline
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub label: OverlayLabel,
    pub segments: Vec<Segment>,
}

/// Everything the renderer draws for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub lines: Vec<OverlayLine>,
}

impl Overlay {
    /// Reference-height line plus one polyline per limb and the shoulder line.
    ///
    /// Limbs follow their joint path in anatomical mode and a single chord in
    /// direct mode. The shoulder line is always a single chord.
    pub fn build(
        landmarks: &LandmarkSet,
        extraction: &Extraction,
        mode: MeasurementMode,
    ) -> BodyscaleResult<Overlay> {
        let mut lines = Vec::with_capacity(Limb::all().len() + 2);

        lines.push(OverlayLine {
            label: OverlayLabel::ReferenceHeight,
            segments: vec![Segment {
                from: extraction.head_top.xy(),
                to: extraction.feet_midpoint.xy(),
            }],
        });

        for &limb in Limb::all() {
            lines.push(OverlayLine {
                label: OverlayLabel::Measurement(limb.field()),
                segments: polyline(landmarks, &limb.path(), mode)?,
            });
        }

        let shoulders = [
            LandmarkIndex::LeftShoulder.index(),
            LandmarkIndex::RightShoulder.index(),
        ];
        lines.push(OverlayLine {
            label: OverlayLabel::Measurement(MeasurementField::Shoulder),
            segments: polyline(landmarks, &shoulders, MeasurementMode::Direct)?,
        });

        Ok(Overlay { lines })
    }

    pub fn line(&self, label: OverlayLabel) -> Option<&OverlayLine> {
        self.lines.iter().find(|l| l.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn polyline(
    landmarks: &LandmarkSet,
    path: &[usize],
    mode: MeasurementMode,
) -> BodyscaleResult<Vec<Segment>> {
    let points = resolve(landmarks, path)?;
    let segments = match mode {
        MeasurementMode::Direct => match (points.first(), points.last()) {
            (Some(a), Some(b)) if points.len() > 1 => vec![Segment {
                from: a.xy(),
                to: b.xy(),
            }],
            _ => Vec::new(),
        },
        MeasurementMode::AnatomicalPath => points
            .windows(2)
            .map(|w| Segment {
                from: w[0].xy(),
                to: w[1].xy(),
            })
            .collect(),
    };
    Ok(segments)
}
