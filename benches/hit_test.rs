use criterion::{black_box, criterion_group, criterion_main, Criterion};
use launch_pad::hit_test::hit_test;
use launch_pad::layout::{GridLayout, GridSpec};

fn bench_layout(c: &mut Criterion) {
    let grid = GridSpec { cell_size: 64, spacing: 16 };
    c.bench_function("layout_4k", |b| {
        b.iter(|| GridLayout::compute(black_box(3840), black_box(2160), grid))
    });

    let layout = GridLayout::compute(3840, 2160, grid);
    let count = layout.capacity();
    c.bench_function("placements_4k", |b| b.iter(|| layout.placements(black_box(count))));
}

fn bench_hit_test(c: &mut Criterion) {
    let layout = GridLayout::compute(3840, 2160, GridSpec { cell_size: 64, spacing: 16 });
    let count = layout.capacity();
    c.bench_function("hit_test_sweep_4k", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for y in (0..2160).step_by(17) {
                for x in (0..3840).step_by(17) {
                    if hit_test(x, y, &layout, count).is_some() {
                        hits += 1;
                    }
                }
            }
            hits
        })
    });
}

criterion_group!(benches, bench_layout, bench_hit_test);
criterion_main!(benches);
