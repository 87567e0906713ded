use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fdstep::matrix::Tridiagonal;
use fdstep::solver::{LinearSolver, LuSolver, OddEvenReduction};

fn bench_odd_even_vs_lu(c: &mut Criterion) {
    let n = 200;
    let lower: Vec<f64> = (0..n).map(|i| if i == 0 { 0.0 } else { -1.0 + 0.1 * (i as f64).sin() }).collect();
    let upper: Vec<f64> = (0..n).map(|i| if i + 1 == n { 0.0 } else { -1.0 + 0.1 * (i as f64).cos() }).collect();
    let diag: Vec<f64> = (0..n).map(|i| 2.5 + 0.5 * (i as f64).sin()).collect();
    let a = Tridiagonal::new(lower, diag, upper).unwrap();
    let dense = a.to_dense();
    let b: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();
    let mut x = vec![0.0; n];

    c.bench_function("odd-even reduction", |ben| {
        let mut solver = OddEvenReduction::new();
        ben.iter(|| {
            let _stats = solver.solve(black_box(&a), black_box(&b), black_box(&mut x)).unwrap();
        })
    });

    c.bench_function("dense LU", |ben| {
        let mut solver = LuSolver::<f64>::new();
        ben.iter(|| {
            let _stats = solver.solve(black_box(&dense), black_box(&b), black_box(&mut x)).unwrap();
        })
    });
}

criterion_group!(benches, bench_odd_even_vs_lu);
criterion_main!(benches);
