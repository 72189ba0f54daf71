use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use snapsheet::{GestureInput, GestureSample, Phase, SheetConfig, SheetEngine};

const FRAME_MILLIS: f32 = 16.0;
const SNAP_POINT_SAMPLES: &[usize] = &[2, 4, 16];

fn config(points: usize) -> SheetConfig {
    let offsets: Vec<f32> = (0..points).map(|i| i as f32 * 100.0).collect();
    SheetConfig::default()
        .with_offsets(&offsets)
        .with_initial_snap(points / 2)
}

fn bench_idle_frame(c: &mut Criterion) {
    let mut engine = SheetEngine::new(config(3)).expect("engine");
    c.bench_function("idle_frame", |b| {
        b.iter(|| black_box(engine.advance(black_box(FRAME_MILLIS), &[])));
    });
}

fn bench_drag_and_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_and_settle");
    for &points in SNAP_POINT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("snap_points", points), &points, |b, &points| {
            let mut engine = SheetEngine::new(config(points)).expect("engine");
            b.iter(|| {
                engine.advance(FRAME_MILLIS, &[GestureInput::Master(GestureSample::began())]);
                for step in 1..=10 {
                    let translation = step as f32 * 17.0;
                    engine.advance(
                        FRAME_MILLIS,
                        &[GestureInput::Master(GestureSample::active(translation, 1_000.0))],
                    );
                }
                engine.advance(
                    FRAME_MILLIS,
                    &[GestureInput::Master(GestureSample::end(170.0, 1_000.0))],
                );
                let mut frames = 0;
                while engine.advance(FRAME_MILLIS, &[]).phase != Phase::Idle {
                    frames += 1;
                }
                black_box(frames)
            });
        });
    }
    group.finish();
}

fn bench_content_fling(c: &mut Criterion) {
    let mut engine = SheetEngine::new(config(3).with_initial_snap(2)).expect("engine");
    engine.layout_handle().set_content_height(20_000.0);
    c.bench_function("content_fling", |b| {
        b.iter(|| {
            engine.advance(FRAME_MILLIS, &[GestureInput::Inner(GestureSample::began())]);
            engine.advance(
                FRAME_MILLIS,
                &[GestureInput::Inner(GestureSample::end(-40.0, -3_000.0))],
            );
            while engine.advance(FRAME_MILLIS, &[]).phase != Phase::Idle {}
            black_box(engine.content_offset())
        });
    });
}

criterion_group!(
    benches,
    bench_idle_frame,
    bench_drag_and_settle,
    bench_content_fling
);
criterion_main!(benches);
