use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use texthash::{digest, matrix, HashFamily};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rnd = rand::thread_rng();
    let text: String = (0..600).map(|_| rnd.gen_range('a'..='z')).collect();

    for family in HashFamily::ALL {
        for variant in matrix::supported_variants(family) {
            c.bench_function(&format!("hash 600 chars {}{}", family, variant.suffix()), |b| {
                b.iter(|| digest(black_box(&text), family, variant))
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
