use criterion::{criterion_group, criterion_main, Criterion};
use poker_cards::{evaluate, Hand};

fn bench_seven_card_evaluation(c: &mut Criterion) {
    let hand = Hand::try_from("Ah Kh Qh Jh Th 2c 3d").unwrap();
    c.bench_function("evaluate 7-card hand", |b| {
        b.iter(|| evaluate(hand));
    });
}

criterion_group!(benches, bench_seven_card_evaluation);
criterion_main!(benches);
