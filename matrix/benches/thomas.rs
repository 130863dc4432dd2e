use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix::TriDiagonal;

pub fn thomas_solve(c: &mut Criterion) {
    let n = 25;
    let mut template = TriDiagonal::new(n);
    for row in 0..n {
        template.set_row(row, -1.0, 4.0, -1.0).unwrap();
    }
    let template = black_box(template);
    let rhs = black_box(vec![1.23123; n]);
    let mut x = black_box(vec![0.0; n]);

    c.bench_function("thomas_solve", |b| {
        b.iter(|| {
            let mut a = template.clone();
            let mut d = rhs.clone();
            a.mut_solve_into(&mut d, &mut x).unwrap()
        })
    });
}

pub fn tri_diag_prod(c: &mut Criterion) {
    let n = 25;
    let mut a = TriDiagonal::new(n);
    for row in 0..n {
        a.set_row(row, -1.0, 4.0, -1.0).unwrap();
    }
    let a = black_box(a);
    let x = black_box(vec![1.23123; n]);
    let mut into = black_box(vec![0.0; n]);

    c.bench_function("tri_diag_prod", |b| b.iter(|| a.prod_into(&x, &mut into).unwrap()));
}

criterion_group!(benches, thomas_solve, tri_diag_prod);
criterion_main!(benches);
