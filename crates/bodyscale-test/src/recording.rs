//! Sinks that record everything they receive

use bodyscale_core::MeasurementRecord;
use bodyscale_measure::Overlay;
use bodyscale_runtime::{DisplaySink, OverlaySink};

/// One display update, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    Current(MeasurementRecord),
    Confidence(f64),
    InsufficientData { accepted: usize, required: usize },
    Best { record: MeasurementRecord, confidence: f64 },
    HighConfidence(bool),
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub events: Vec<DisplayEvent>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent best estimate since the last clear
    pub fn best(&self) -> Option<(MeasurementRecord, f64)> {
        self.since_clear().iter().rev().find_map(|e| match e {
            DisplayEvent::Best { record, confidence } => Some((*record, *confidence)),
            _ => None,
        })
    }

    /// Whether the high-confidence cue is currently shown
    pub fn high_confidence(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                DisplayEvent::HighConfidence(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn last_confidence(&self) -> Option<f64> {
        self.since_clear().iter().rev().find_map(|e| match e {
            DisplayEvent::Confidence(c) => Some(*c),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&DisplayEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    fn since_clear(&self) -> &[DisplayEvent] {
        let start = self
            .events
            .iter()
            .rposition(|e| *e == DisplayEvent::Cleared)
            .map_or(0, |i| i + 1);
        &self.events[start..]
    }
}

impl DisplaySink for RecordingDisplay {
    fn current_measurements(&mut self, record: &MeasurementRecord) {
        self.events.push(DisplayEvent::Current(*record));
    }

    fn window_confidence(&mut self, confidence: f64) {
        self.events.push(DisplayEvent::Confidence(confidence));
    }

    fn insufficient_data(&mut self, accepted: usize, required: usize) {
        self.events.push(DisplayEvent::InsufficientData { accepted, required });
    }

    fn best_estimate(&mut self, record: &MeasurementRecord, confidence: f64) {
        self.events.push(DisplayEvent::Best {
            record: *record,
            confidence,
        });
    }

    fn high_confidence(&mut self, reached: bool) {
        self.events.push(DisplayEvent::HighConfidence(reached));
    }

    fn cleared(&mut self) {
        self.events.push(DisplayEvent::Cleared);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingOverlay {
    pub frames: Vec<Overlay>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Overlay> {
        self.frames.last()
    }
}

impl OverlaySink for RecordingOverlay {
    fn overlay(&mut self, overlay: &Overlay) {
        self.frames.push(overlay.clone());
    }
}
