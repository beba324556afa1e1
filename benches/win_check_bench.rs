use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xqmj_engine::tile::{check_win, Tile};

fn tiles(codes: &[&str]) -> Vec<Tile> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

fn bench_win_check_standard(c: &mut Criterion) {
    // 对子 + 顺子
    let hand = tiles(&["R7", "R6", "R5", "R7", "R7"]);

    c.bench_function("win_check_standard", |b| {
        b.iter(|| black_box(check_win(black_box(&hand))));
    });
}

fn bench_win_check_five_low(c: &mut Criterion) {
    let hand = tiles(&["B1", "B1", "B1", "B1", "B1"]);

    c.bench_function("win_check_five_low", |b| {
        b.iter(|| black_box(check_win(black_box(&hand))));
    });
}

fn bench_win_check_not_winning(c: &mut Criterion) {
    let hand = tiles(&["R7", "B6", "R4", "B2", "R1"]);

    c.bench_function("win_check_not_winning", |b| {
        b.iter(|| black_box(check_win(black_box(&hand))));
    });
}

criterion_group!(
    benches,
    bench_win_check_standard,
    bench_win_check_five_low,
    bench_win_check_not_winning
);
criterion_main!(benches);
