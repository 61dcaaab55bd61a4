use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lincodes::ecc::bits::Bits;
use lincodes::ecc::channel::flip_bits;
use lincodes::ecc::{HammingCode, ReedMullerCode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_bits(rng: &mut ChaCha20Rng, len: usize) -> Bits {
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn bench_hamming(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming");
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for r in [3usize, 5, 8] {
        let hamming = HammingCode::new(r).unwrap();
        let message = random_bits(&mut rng, hamming.message_len());
        let codeword = hamming.encode(&message).unwrap();
        let received = flip_bits(&codeword, &[codeword.len() / 2]).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", r), &message, |b, message| {
            b.iter(|| hamming.encode(black_box(message)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decode", r), &received, |b, received| {
            b.iter(|| hamming.decode(black_box(received)).unwrap())
        });
    }

    group.finish();
}

fn bench_reed_muller(c: &mut Criterion) {
    let mut group = c.benchmark_group("reed_muller");
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for m in [4usize, 7, 10] {
        let rm = ReedMullerCode::new(m).unwrap();
        let message = random_bits(&mut rng, m);
        let codeword = rm.encode(&message).unwrap();
        let received = flip_bits(&codeword, &[0]).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", m), &message, |b, message| {
            b.iter(|| rm.encode(black_box(message)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decode", m), &received, |b, received| {
            b.iter(|| rm.decode(black_box(received)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hamming, bench_reed_muller);
criterion_main!(benches);
