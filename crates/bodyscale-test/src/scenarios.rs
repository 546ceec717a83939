//! End-to-end pipeline scenarios
//!
//! Drives full frames through extraction, stabilization and the sinks, the way
//! a capture loop would.

use bodyscale_core::{BodyscaleResult, MeasurementConfig};
use bodyscale_runtime::{FrameSource, MeasurementPipeline, PipelineConfig, PipelineStats};
use bodyscale_stabilize::SessionSnapshot;

use crate::{RecordingDisplay, RecordingOverlay};

/// Everything one scenario run left behind
#[derive(Debug)]
pub struct ScenarioRun {
    pub display: RecordingDisplay,
    pub overlay: RecordingOverlay,
    pub stats: PipelineStats,
    pub session: SessionSnapshot,
}

/// Start a fresh pipeline with `config` and drain `source` through it
pub fn run_scenario(
    config: MeasurementConfig,
    source: &mut dyn FrameSource,
) -> BodyscaleResult<ScenarioRun> {
    let mut pipeline = MeasurementPipeline::new(PipelineConfig::default());
    pipeline.start(config)?;

    let mut display = RecordingDisplay::new();
    let mut overlay = RecordingOverlay::new();
    let stats = pipeline.run(source, &mut display, &mut overlay)?.clone();

    Ok(ScenarioRun {
        display,
        overlay,
        stats,
        session: pipeline.session_handle().snapshot(),
    })
}
