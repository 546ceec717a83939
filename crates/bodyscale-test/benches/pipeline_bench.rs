//! Benchmarks for extraction, window filtering and the full frame cycle

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use bodyscale_core::{MeasurementConfig, MeasurementMode, MeasurementRecord};
use bodyscale_measure::{MeasurementExtractor, Overlay};
use bodyscale_runtime::{FrameInput, MeasurementPipeline, NullSink, PipelineConfig};
use bodyscale_stabilize::{
    assess, filter_records, MeasurementBuffer, ScoreConfig, MEASUREMENT_BUFFER_SIZE,
};
use bodyscale_test::SyntheticPose;

fn bench_extract(c: &mut Criterion) {
    let extractor = MeasurementExtractor::new();
    let landmarks = SyntheticPose::standing().landmarks();

    let mut group = c.benchmark_group("extract");
    for mode in [MeasurementMode::Direct, MeasurementMode::AnatomicalPath] {
        group.bench_function(format!("{:?}", mode), |b| {
            b.iter(|| {
                extractor
                    .extract(black_box(&landmarks), black_box(170.0), mode)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_overlay_build(c: &mut Criterion) {
    let landmarks = SyntheticPose::standing().landmarks();
    let extraction = MeasurementExtractor::new()
        .extract(&landmarks, 170.0, MeasurementMode::AnatomicalPath)
        .unwrap();

    c.bench_function("overlay_build", |b| {
        b.iter(|| {
            Overlay::build(
                black_box(&landmarks),
                &extraction,
                MeasurementMode::AnatomicalPath,
            )
            .unwrap()
        })
    });
}

fn full_buffer() -> MeasurementBuffer {
    let mut buffer = MeasurementBuffer::new();
    for i in 0..MEASUREMENT_BUFFER_SIZE {
        let n = (i % 7) as f64 * 0.3;
        buffer.push(MeasurementRecord::new(
            55.0 + n,
            55.0 - n,
            80.0 + n,
            80.0 - n,
            70.0,
            35.0 + n,
        ));
    }
    buffer
}

fn bench_filter_and_score(c: &mut Criterion) {
    let buffer = full_buffer();
    let filter = MeasurementConfig::with_height(170.0).filter_config();
    let score = ScoreConfig::default();

    let mut group = c.benchmark_group("window");
    group.throughput(Throughput::Elements(MEASUREMENT_BUFFER_SIZE as u64));

    group.bench_function("filter", |b| {
        b.iter(|| filter_records(black_box(buffer.iter()), &filter, 170.0))
    });

    let filtered = filter_records(buffer.iter(), &filter, 170.0);
    group.bench_function("score", |b| b.iter(|| assess(black_box(&filtered), &score)));

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut pipeline = MeasurementPipeline::new(PipelineConfig::default());
    pipeline
        .start(MeasurementConfig::with_height(170.0))
        .unwrap();
    let landmarks = SyntheticPose::standing().landmarks();

    // Steady state: buffer already full
    for _ in 0..MEASUREMENT_BUFFER_SIZE {
        pipeline
            .process_frame(FrameInput::Detected(landmarks.clone()), &mut NullSink, &mut NullSink)
            .unwrap();
    }

    c.bench_function("frame_cycle", |b| {
        b.iter(|| {
            pipeline
                .process_frame(
                    FrameInput::Detected(black_box(landmarks.clone())),
                    &mut NullSink,
                    &mut NullSink,
                )
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_extract,
    bench_overlay_build,
    bench_filter_and_score,
    bench_full_cycle,
);
criterion_main!(benches);
