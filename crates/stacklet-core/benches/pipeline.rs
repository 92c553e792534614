//! Whole-pipeline benchmarks.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stacklet_core::vm::NullTracer;
use stacklet_core::{compile, run};

const PROGRAM: &str = "\
var a = 1 + 2 * 3;
var b = (a + 4) * (a - 4);
var c = b / 2 - a;
a = a + b + c;
b = a * c;
";

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile", |b| {
        b.iter(|| compile(black_box(PROGRAM)).unwrap());
    });
}

fn bench_execute(c: &mut Criterion) {
    let code = compile(PROGRAM).unwrap();
    c.bench_function("execute", |b| {
        b.iter(|| run(black_box(&code), &mut NullTracer).unwrap());
    });
}

criterion_group!(benches, bench_compile, bench_execute);
criterion_main!(benches);
