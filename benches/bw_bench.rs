#[macro_use]
extern crate criterion;
extern crate bw13_curves;

use bw13_curves::bwfp13::BWFp13;
use bw13_curves::bwpairing::BWPairing;
use bw13_curves::bwparam::{BW13P310Param, BWParam};
use bw13_curves::bwpoint::BWPoint;
use bw13_curves::bwpoint13::BWPoint13;
use bw13_curves::bwzn::BWZn;
use bw13_curves::traits::BWField;
use criterion::Criterion;
use crypto_bigint::Random;

#[allow(clippy::many_single_char_names)]
#[allow(non_snake_case)]
fn general_benchmark<BW: BWParam, const LIMBS: usize>(c: &mut Criterion) {
    let mut rng = rand::rng();
    let P: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);
    let Q: BWPoint13<BW, LIMBS> = BWPoint13::random(&mut rng);
    let s: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
    let x: BWFp13<BW, LIMBS> = BWFp13::random(&mut rng);
    let y: BWFp13<BW, LIMBS> = BWFp13::random(&mut rng);

    // BWFp13 arithmetic
    {
        c.bench_function("BW13-P310 F_p^13 multiplication", move |b| {
            b.iter(|| std::hint::black_box(x) * std::hint::black_box(y))
        });
        c.bench_function("BW13-P310 F_p^13 squaring", move |b| {
            b.iter(|| std::hint::black_box(x).sq())
        });
        c.bench_function("BW13-P310 F_p^13 inversion", move |b| {
            b.iter(|| std::hint::black_box(x).try_inv())
        });
    }

    // BWPoint arithmetic
    {
        c.bench_function("BW13-P310 G_1 doubling", move |b| {
            b.iter(|| std::hint::black_box(P).double(1))
        });
        c.bench_function("BW13-P310 G_1 addition", move |b| {
            b.iter(|| std::hint::black_box(P) + std::hint::black_box(P))
        });
        c.bench_function("BW13-P310 G_1 scalar multiplication", move |b| {
            b.iter(|| std::hint::black_box(s) * std::hint::black_box(P))
        });
    }

    // BWPoint13 arithmetic
    {
        c.bench_function("BW13-P310 G_2 doubling", move |b| {
            b.iter(|| std::hint::black_box(Q).double(1))
        });
        c.bench_function("BW13-P310 G_2 addition", move |b| {
            b.iter(|| std::hint::black_box(Q) + std::hint::black_box(Q))
        });
        c.bench_function("BW13-P310 G_2 GLV scalar multiplication", move |b| {
            b.iter(|| std::hint::black_box(Q).mul_glv(&std::hint::black_box(s)))
        });
        c.bench_function("BW13-P310 hash to G_2", move |b| {
            b.iter(|| BWPoint13::<BW, LIMBS>::hash_to_g2(std::hint::black_box(b"benchmark")))
        });
    }

    // pairing
    {
        c.bench_function("BW13-P310 optimal pairing", move |b| {
            b.iter(|| BWPairing::pair(std::hint::black_box(&P), std::hint::black_box(&Q)))
        });
    }
}

#[allow(non_snake_case)]
fn criterion_benchmark_BW13P310(c: &mut Criterion) {
    type BW = BW13P310Param;
    const LIMBS: usize = BW::LIMBS;
    general_benchmark::<BW, LIMBS>(c);
}

criterion_group!(benches,
    criterion_benchmark_BW13P310,
);
criterion_main!(benches);
