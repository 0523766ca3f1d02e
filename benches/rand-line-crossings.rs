use criterion::*;
use geo::{line_intersection::line_intersection, Rect};
use rand::{rngs::StdRng, thread_rng, SeedableRng};

const BBOX: [f64; 2] = [1024., 1024.];

#[path = "utils/random.rs"]
mod random;
use random::*;

#[path = "utils/crossings.rs"]
mod crossings;
use crossings::*;

fn length_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 1024;

    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);
    let line_len = BBOX[0] / 5.;

    let lines: Vec<_> = (0..NUM_LINES)
        .map(|_| uniform_line_with_length(&mut thread_rng(), bbox, line_len))
        .collect();
    let segments = to_segments::<f64>(&lines);
    c.bench_function("Bentley-Ottman - short random lines", |b| {
        b.iter(|| count_bo(&segments))
    });
    c.bench_function("Brute-Force - short random lines", |b| {
        b.iter(|| {
            for l1 in lines.iter() {
                for l2 in lines.iter() {
                    black_box(line_intersection(*l1, *l2));
                }
            }
        })
    });
    c.bench_function("R-Tree - short random lines", |b| {
        b.iter(|| count_rtree(&lines))
    });
}

fn uniform_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 256;
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);

    let lines: Vec<_> = (0..NUM_LINES)
        .map(|_| uniform_line(&mut thread_rng(), bbox))
        .collect();
    let segments = to_segments::<f64>(&lines);
    c.bench_function("Bentley-Ottman - uniform random lines", |b| {
        b.iter(|| count_bo(&segments))
    });
    c.bench_function("Brute-Force - uniform random lines", |b| {
        b.iter(|| count_brute(&lines))
    });
}

fn exact_grid_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 256;

    let mut rng = StdRng::seed_from_u64(42);
    let segments = grid_to_segments(&grid_segments(&mut rng, NUM_LINES, 64));
    c.bench_function("Bentley-Ottman - exact grid lines", |b| {
        b.iter(|| count_bo(&segments))
    });
    c.bench_function("Brute-Force - exact grid lines", |b| {
        b.iter(|| count_pairs(&segments))
    });
}

criterion_group!(random, uniform_lc, length_lc, exact_grid_lc);
criterion_main!(random);
