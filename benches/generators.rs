use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use mazegen::{
    generators::{Algorithm, get_rng},
    maze::RectGrid,
};

// 4096 cells, the largest square the recursive DFS accepts
const SIDE: u16 = 64;

pub fn generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_64x64");
    for algorithm in Algorithm::ALL {
        group.bench_function(algorithm.key(), |b| {
            let mut rng = get_rng(Some(0));
            b.iter_batched(
                || RectGrid::new(SIDE, SIDE),
                |mut grid| {
                    algorithm
                        .generate(&mut grid, black_box((SIDE / 2, SIDE / 2)), &mut rng)
                        .unwrap();
                    grid
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = generators
}
criterion_main!(benches);
