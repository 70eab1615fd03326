use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phages_ml::{GenomeAvgTransformer, KeyedVectors, KmerTransformer, Transformer, WorkPool};
use phages_core::SequenceTable;
use phages_seq::KmerExtractor;

fn random_dna(len: usize, seed: u64) -> String {
    let bases = ['A', 'C', 'G', 'T', 'N'];
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            // roughly 1 in 100 positions is an ambiguity code
            let r = (state >> 33) % 400;
            if r < 4 {
                bases[4]
            } else {
                bases[(r % 4) as usize]
            }
        })
        .collect()
}

/// Every 6-mer over ACGT with a deterministic pseudo-random vector.
fn full_vocabulary(dim: usize) -> KeyedVectors {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut kv = KeyedVectors::with_capacity(dim, 4096);
    let mut state: u64 = 42;
    let mut vector = vec![0f32; dim];
    for code in 0..4096usize {
        let token: String = (0..6)
            .map(|i| bases[(code >> (2 * (5 - i))) & 3] as char)
            .collect();
        for v in vector.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *v = ((state >> 11) as f64 / (1u64 << 53) as f64) as f32;
        }
        kv.insert(token, &vector).unwrap();
    }
    kv
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmer_extract");
    let kmt = KmerExtractor::default();

    for &len in &[10_000usize, 100_000] {
        let seq = random_dna(len, 7);
        group.bench_with_input(BenchmarkId::from_parameter(len), &seq, |b, seq| {
            b.iter(|| kmt.extract(black_box(seq)))
        });
    }

    group.finish();
}

fn bench_embed(c: &mut Criterion) {
    let mut group = c.benchmark_group("genome_avg");
    group.sample_size(20);

    let kv = full_vocabulary(100);
    let table = SequenceTable::from_sequences((0..32).map(|i| random_dna(40_000, i)));
    let sequential = WorkPool::sequential();
    let kmer_rows = KmerTransformer::default().transform(&table, &sequential).unwrap();
    let avg = GenomeAvgTransformer::new(&kv);

    for threads in [1usize, 4] {
        let pool = WorkPool::with_threads(threads).unwrap();
        group.bench_with_input(BenchmarkId::new("32x40kb", threads), &pool, |b, pool| {
            b.iter(|| avg.transform(black_box(&kmer_rows), pool).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_embed);
criterion_main!(benches);
