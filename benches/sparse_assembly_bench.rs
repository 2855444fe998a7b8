use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use nd_containers::matrices::{Csr, Ellpack, SegmentLayout, SlicedEllpack, SparseMatrix};

struct Pattern {
    n: usize,
    caps: Vec<usize>,
    entries: Vec<(usize, usize, f64)>,
}

impl Pattern {
    /// Banded pattern with a random number of off-diagonals per row.
    fn banded(n: usize, max_band: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut caps = Vec::with_capacity(n);
        let mut entries = Vec::new();
        for r in 0..n {
            let band = rng.gen_range(0..=max_band);
            let lo = r.saturating_sub(band);
            let hi = (r + band + 1).min(n);
            caps.push(hi - lo);
            for c in lo..hi {
                entries.push((r, c, rng.gen_range(-1.0..1.0)));
            }
        }
        Pattern { n, caps, entries }
    }

    fn assemble<L: SegmentLayout>(&self, layout: L) -> SparseMatrix<f64, L> {
        let mut m = SparseMatrix::with_layout(layout);
        m.set_dimensions(self.n, self.n);
        m.set_row_capacities(&self.caps).unwrap();
        for &(r, c, v) in self.entries.iter().rev() {
            m.add_element(r, c, v, 1.0).unwrap();
        }
        m
    }
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_assembly");
    for &n in &[1_000, 10_000] {
        let p = Pattern::banded(n, 4, 42);
        group.bench_with_input(BenchmarkId::new("csr", n), &p, |b, p| {
            b.iter(|| black_box(p.assemble(Csr)));
        });
        group.bench_with_input(BenchmarkId::new("ellpack", n), &p, |b, p| {
            b.iter(|| black_box(p.assemble(Ellpack)));
        });
        group.bench_with_input(BenchmarkId::new("sliced_ellpack", n), &p, |b, p| {
            b.iter(|| black_box(p.assemble(SlicedEllpack::default())));
        });
    }
    group.finish();
}

fn bench_matvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_matvec");
    let p = Pattern::banded(10_000, 4, 7);
    let x: Vec<f64> = (0..p.n).map(|i| (i % 17) as f64).collect();
    let csr = p.assemble(Csr);
    let sliced = p.assemble(SlicedEllpack::default());
    group.bench_function("csr", |b| {
        let mut y = vec![0.0; p.n];
        b.iter(|| {
            csr.vector_product(&x, &mut y).unwrap();
            black_box(&y);
        });
    });
    group.bench_function("sliced_ellpack", |b| {
        let mut y = vec![0.0; p.n];
        b.iter(|| {
            sliced.vector_product(&x, &mut y).unwrap();
            black_box(&y);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_assembly, bench_matvec);
criterion_main!(benches);
