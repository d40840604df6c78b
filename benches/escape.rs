#[macro_use]
extern crate criterion;
extern crate mathart;

use criterion::Criterion;
use mathart::{carpet, ComplexRegion, GridSampler, Mandelbrot, Newton, Primality, UlamSpiral};

fn mandelbrot_grid(c: &mut Criterion) {
    let sampler =
        GridSampler::new(200, 200, ComplexRegion::mandelbrot(), Mandelbrot, 100).unwrap();
    c.bench_function("mandelbrot 200x200", move |b| b.iter(|| sampler.sample_single()));
}

fn newton_grid(c: &mut Criterion) {
    let sampler =
        GridSampler::new(200, 200, ComplexRegion::centered(), Newton::default(), 20).unwrap();
    c.bench_function("newton 200x200", move |b| b.iter(|| sampler.sample_single()));
}

fn carpet_243(c: &mut Criterion) {
    c.bench_function("carpet 243", |b| {
        b.iter(|| carpet::sierpinski_carpet(243, 243, None).unwrap())
    });
}

fn ulam_101(c: &mut Criterion) {
    let spiral = UlamSpiral::new(101, Primality::Exact).unwrap();
    c.bench_function("ulam 101", move |b| b.iter(|| spiral.generate().unwrap()));
}

criterion_group!(benches, mandelbrot_grid, newton_grid, carpet_243, ulam_101);
criterion_main!(benches);
