use blinc_tween::{Easing, Loops, TweenScheduler, UpdatePhase, Vec3};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn looping_scheduler(count: usize) -> TweenScheduler {
    let mut scheduler = TweenScheduler::new();
    for i in 0..count {
        let id = scheduler.create(
            Vec3::ZERO,
            Vec3::new(i as f32, 1.0, -1.0),
            1.0 + (i % 7) as f32 * 0.1,
            |value| {
                black_box(value);
            },
            UpdatePhase::Update,
        );
        // Setters cannot fail on a handle that was just issued
        let _ = scheduler.set_ease(id, Easing::EaseInOutCubic);
        let _ = scheduler.set_loop(id, Loops::Infinite, i % 2 == 0);
    }
    scheduler
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for count in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut scheduler = looping_scheduler(count);
            b.iter(|| scheduler.tick(UpdatePhase::Update, black_box(1.0 / 60.0)));
        });
    }
    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    c.bench_function("sequence_of_64", |b| {
        let mut scheduler = TweenScheduler::new();
        let sequence = scheduler.create_sequence(UpdatePhase::Update);
        for _ in 0..64 {
            let id = scheduler.create(0.0_f32, 1.0, 0.25, |_| {}, UpdatePhase::Update);
            let _ = scheduler.append_to_sequence(sequence, id);
        }
        let _ = scheduler.set_loop(sequence, Loops::Infinite, true);
        b.iter(|| scheduler.tick(UpdatePhase::Update, black_box(1.0 / 60.0)));
    });
}

criterion_group!(benches, bench_tick, bench_sequence);
criterion_main!(benches);
