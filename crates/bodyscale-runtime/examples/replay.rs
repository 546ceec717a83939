//! Replay a recorded landmark stream through the pipeline
//!
//! Usage: replay <config.json> <frames.jsonl> [--json]
//!
//! Each line of the frames file is a landmark array (`[{"x":..,"y":..,"z":..,
//! "visibility":..}, ...]`) or `null` for a frame with no detection.

use std::error::Error;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};

use bodyscale_core::{LandmarkSet, MeasurementConfig};
use bodyscale_runtime::{
    init_logging, FrameInput, LogDisplay, LogFormat, MeasurementPipeline, PipelineConfig,
};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let format = if args.iter().any(|a| a == "--json") {
        LogFormat::Json
    } else {
        LogFormat::Plain
    };
    init_logging(format)?;

    let paths: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    let (config_path, frames_path) = match paths.as_slice() {
        [config, frames] => (*config, *frames),
        _ => return Err("usage: replay <config.json> <frames.jsonl> [--json]".into()),
    };

    let config = MeasurementConfig::from_json(&fs::read_to_string(config_path)?)?;
    let mut pipeline = MeasurementPipeline::new(PipelineConfig::default());
    pipeline.start(config)?;

    let mut display = LogDisplay;
    let mut overlay = LogDisplay;
    let reader = BufReader::new(File::open(frames_path)?);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: Option<LandmarkSet> = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(line = line_no + 1, error = %err, "Unparsable frame");
                continue;
            }
        };
        pipeline.process_frame(FrameInput::from(frame), &mut display, &mut overlay)?;
    }

    let stats = pipeline.stats().clone();
    let best = pipeline.session_handle().snapshot();
    info!(
        frames = stats.frames,
        no_detection = stats.no_detection,
        skipped = stats.skipped.total(),
        measured = stats.measured,
        best_updates = stats.best_updates,
        best_confidence = best.best_confidence,
        "Replay finished"
    );
    if let Some(record) = best.best_record {
        info!("Best estimate {}", record);
    }

    pipeline.stop(&mut display);
    Ok(())
}
