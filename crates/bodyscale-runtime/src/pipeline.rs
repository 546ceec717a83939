//! Measurement pipeline - drives one frame at a time through extraction,
//! stabilization and presentation

use std::time::{Duration, Instant};

use bodyscale_core::{
    BodyscaleError, BodyscaleResult, FilterConfig, LandmarkSet, MeasurementConfig,
    MeasurementRecord,
};
use bodyscale_measure::{ExtractorConfig, MeasurementExtractor, Overlay};
use bodyscale_stabilize::{
    BestUpdate, MeasurementBuffer, MeasurementSession, ScoreConfig, SessionUpdate,
    WindowAssessment, MEASUREMENT_BUFFER_SIZE,
};
use tracing::{debug, info, warn};

use crate::{DisplaySink, FrameInput, FrameSource, OverlaySink, SessionHandle};

/// Pipeline configuration
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub extractor: ExtractorConfig,
    pub score: ScoreConfig,
    pub buffer_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            extractor: ExtractorConfig::default(),
            score: ScoreConfig::default(),
            buffer_capacity: MEASUREMENT_BUFFER_SIZE,
        }
    }
}

/// Skipped-frame counters by reason
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub missing_landmark: u64,
    pub low_visibility: u64,
    pub degenerate_scale: u64,
    pub non_finite: u64,
}

impl SkipCounts {
    pub fn total(&self) -> u64 {
        self.missing_landmark + self.low_visibility + self.degenerate_scale + self.non_finite
    }

    fn count(&mut self, err: &BodyscaleError) {
        match err {
            BodyscaleError::MissingLandmark { .. } => self.missing_landmark += 1,
            BodyscaleError::LowVisibility { .. } => self.low_visibility += 1,
            BodyscaleError::DegenerateScale { .. } => self.degenerate_scale += 1,
            BodyscaleError::NonFiniteMeasurement { .. } => self.non_finite += 1,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PipelineStats {
    /// Frames processed while running, detections or not
    pub frames: u64,
    pub no_detection: u64,
    pub skipped: SkipCounts,
    /// Records pushed into the session buffer
    pub measured: u64,
    pub best_updates: u64,
    pub resets: u64,
    pub last_frame_duration: Duration,
}

/// What happened to one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    NoDetection,
    /// Frame could not be measured; nothing was buffered
    Skipped(BodyscaleError),
    Measured(SessionUpdate),
}

/// Active configuration snapshot
#[derive(Debug, Clone)]
struct ActiveConfig {
    measurement: MeasurementConfig,
    filter: FilterConfig,
}

impl ActiveConfig {
    fn validated(measurement: MeasurementConfig) -> BodyscaleResult<Self> {
        measurement.validate()?;
        let filter = measurement.filter_config();
        Ok(ActiveConfig {
            measurement,
            filter,
        })
    }
}

/// Frame-driven measurement pipeline
///
/// Created stopped. Frames are only processed between `start` and `stop`.
pub struct MeasurementPipeline {
    extractor: MeasurementExtractor,
    session: SessionHandle,
    active: Option<ActiveConfig>,
    /// Session generation the display last reflected
    seen_generation: u64,
    stats: PipelineStats,
}

impl MeasurementPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let buffer = MeasurementBuffer::with_capacity(config.buffer_capacity);
        let session = MeasurementSession::with_buffer(buffer, config.score);
        Self::with_session(
            MeasurementExtractor::with_config(config.extractor),
            SessionHandle::new(session),
        )
    }

    /// Build around an existing shared session
    pub fn with_session(extractor: MeasurementExtractor, session: SessionHandle) -> Self {
        let seen_generation = session.snapshot().generation;
        MeasurementPipeline {
            extractor,
            session,
            active: None,
            seen_generation,
            stats: PipelineStats::default(),
        }
    }

    /// Validate `config` and begin processing frames
    pub fn start(&mut self, config: MeasurementConfig) -> BodyscaleResult<()> {
        match ActiveConfig::validated(config) {
            Ok(active) => {
                info!(
                    known_height_cm = active.measurement.known_height_cm,
                    mode = ?active.measurement.measurement_mode,
                    "Pipeline started"
                );
                self.active = Some(active);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Configuration rejected; pipeline not started");
                Err(err)
            }
        }
    }

    /// Install a new snapshot between frames.
    ///
    /// An invalid snapshot stops processing until a valid one is installed.
    /// The session is kept either way.
    pub fn update_config(&mut self, config: MeasurementConfig) -> BodyscaleResult<()> {
        match ActiveConfig::validated(config) {
            Ok(active) => {
                debug!("Configuration updated");
                self.active = Some(active);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Configuration rejected; processing halted");
                self.active = None;
                Err(err)
            }
        }
    }

    /// Halt processing, reset the session and clear the display
    pub fn stop(&mut self, display: &mut dyn DisplaySink) {
        self.active = None;
        self.reset(display);
        info!("Pipeline stopped");
    }

    /// Reset the session and clear the display; running state is unchanged
    pub fn reset(&mut self, display: &mut dyn DisplaySink) {
        let generation = {
            let mut session = self.session.lock();
            session.reset();
            session.generation()
        };
        self.seen_generation = generation;
        self.stats.resets += 1;
        display.high_confidence(false);
        display.cleared();
        info!(generation, "Session reset");
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn config(&self) -> Option<&MeasurementConfig> {
        self.active.as_ref().map(|a| &a.measurement)
    }

    /// Shared handle for resetting or inspecting the session from elsewhere
    pub fn session_handle(&self) -> SessionHandle {
        self.session.clone()
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Process one frame to completion.
    ///
    /// Frame-level failures are reported as `FrameOutcome::Skipped`, not as
    /// errors. The only error is `NotRunning`.
    ///
    /// The session lock covers only the reset check and the push. Sinks are
    /// called with the lock released and may use the [`SessionHandle`].
    pub fn process_frame(
        &mut self,
        frame: FrameInput,
        display: &mut dyn DisplaySink,
        overlay: &mut dyn OverlaySink,
    ) -> BodyscaleResult<FrameOutcome> {
        let active = self.active.as_ref().ok_or(BodyscaleError::NotRunning)?;
        let start = Instant::now();
        self.stats.frames += 1;

        let measured = match frame {
            FrameInput::NoDetection => {
                self.stats.no_detection += 1;
                None
            }
            FrameInput::Detected(landmarks) => match measure(&self.extractor, &landmarks, active) {
                Ok(measured) => Some(measured),
                Err(err) if err.is_frame_skip() => {
                    debug!(reason = %err, "Frame skipped");
                    self.stats.skipped.count(&err);
                    self.surface_reset(display);
                    self.stats.last_frame_duration = start.elapsed();
                    return Ok(FrameOutcome::Skipped(err));
                }
                Err(err) => return Err(err),
            },
        };

        let (reset_observed, update) = {
            let mut session = self.session.lock();
            let generation = session.generation();
            let reset_observed = generation != self.seen_generation;
            self.seen_generation = generation;
            let update = measured.as_ref().map(|(record, _)| {
                session.push(*record, &active.filter, active.measurement.known_height_cm)
            });
            (reset_observed, update)
        };
        if reset_observed {
            self.reset_observed(display);
        }

        let outcome = match (measured, update) {
            (Some((_, frame_overlay)), Some(update)) => {
                overlay.overlay(&frame_overlay);
                self.stats.measured += 1;
                if update.best.is_improved() {
                    self.stats.best_updates += 1;
                }
                present(&update, display);
                FrameOutcome::Measured(update)
            }
            _ => FrameOutcome::NoDetection,
        };

        self.stats.last_frame_duration = start.elapsed();
        Ok(outcome)
    }

    /// Clear the display if the session was reset since the last frame
    fn surface_reset(&mut self, display: &mut dyn DisplaySink) {
        let generation = self.session.lock().generation();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.reset_observed(display);
        }
    }

    fn reset_observed(&mut self, display: &mut dyn DisplaySink) {
        self.stats.resets += 1;
        debug!(generation = self.seen_generation, "External reset observed");
        display.high_confidence(false);
        display.cleared();
    }

    /// Drain `source`, skipping nothing. Stops early if the pipeline is stopped.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        display: &mut dyn DisplaySink,
        overlay: &mut dyn OverlaySink,
    ) -> BodyscaleResult<&PipelineStats> {
        while let Some(frame) = source.next_frame() {
            self.process_frame(frame, display, overlay)?;
        }
        Ok(&self.stats)
    }
}

fn measure(
    extractor: &MeasurementExtractor,
    landmarks: &LandmarkSet,
    active: &ActiveConfig,
) -> BodyscaleResult<(MeasurementRecord, Overlay)> {
    let mode = active.measurement.measurement_mode;
    let extraction = extractor.extract(landmarks, active.measurement.known_height_cm, mode)?;
    let overlay = Overlay::build(landmarks, &extraction, mode)?;
    Ok((extraction.record, overlay))
}

fn present(update: &SessionUpdate, display: &mut dyn DisplaySink) {
    display.current_measurements(&update.record);
    match &update.assessment {
        WindowAssessment::Scored(score) => display.window_confidence(score.confidence),
        WindowAssessment::InsufficientData { accepted, required } => {
            display.insufficient_data(*accepted, *required)
        }
    }
    if let BestUpdate::Improved {
        record,
        confidence,
        reached_high_confidence,
    } = &update.best
    {
        display.best_estimate(record, *confidence);
        if *reached_high_confidence {
            display.high_confidence(true);
        }
    }
}
