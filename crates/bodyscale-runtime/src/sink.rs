//! Presentation boundaries - display and overlay sinks

use bodyscale_core::MeasurementRecord;
use bodyscale_measure::{Overlay, OverlayLabel};
use tracing::info;

/// Receives display-ready measurement output
pub trait DisplaySink {
    /// Record measured from the current frame
    fn current_measurements(&mut self, record: &MeasurementRecord);

    /// Confidence of the current filtered window (0 - 100)
    fn window_confidence(&mut self, confidence: f64);

    /// Window too small to score yet
    fn insufficient_data(&mut self, accepted: usize, required: usize);

    /// New best estimate and its confidence (0 - 100)
    fn best_estimate(&mut self, record: &MeasurementRecord, confidence: f64);

    /// High-confidence cue on (`true`) or cleared (`false`)
    fn high_confidence(&mut self, reached: bool);

    /// Session was reset; clear every displayed value
    fn cleared(&mut self) {}
}

/// Receives line segments for an external renderer
pub trait OverlaySink {
    fn overlay(&mut self, overlay: &Overlay);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn current_measurements(&mut self, _record: &MeasurementRecord) {}
    fn window_confidence(&mut self, _confidence: f64) {}
    fn insufficient_data(&mut self, _accepted: usize, _required: usize) {}
    fn best_estimate(&mut self, _record: &MeasurementRecord, _confidence: f64) {}
    fn high_confidence(&mut self, _reached: bool) {}
}

impl OverlaySink for NullSink {
    fn overlay(&mut self, _overlay: &Overlay) {}
}

/// Display sink that writes every update to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn current_measurements(&mut self, record: &MeasurementRecord) {
        info!("Current  {}", record);
    }

    fn window_confidence(&mut self, confidence: f64) {
        info!("Confidence {:.2}%", confidence);
    }

    fn insufficient_data(&mut self, accepted: usize, required: usize) {
        info!("Calculating... ({}/{} samples)", accepted, required);
    }

    fn best_estimate(&mut self, record: &MeasurementRecord, confidence: f64) {
        info!("Best     {} ({:.2}%)", record, confidence);
    }

    fn high_confidence(&mut self, reached: bool) {
        if reached {
            info!("High confidence reached");
        } else {
            info!("High confidence cleared");
        }
    }

    fn cleared(&mut self) {
        info!("Display cleared");
    }
}

impl OverlaySink for LogDisplay {
    fn overlay(&mut self, overlay: &Overlay) {
        if let Some(line) = overlay.line(OverlayLabel::ReferenceHeight) {
            if let Some(seg) = line.segments.first() {
                tracing::debug!(from = ?seg.from, to = ?seg.to, "Reference height line");
            }
        }
    }
}
