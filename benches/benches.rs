use criterion::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use valuegen::*;

fn bench_config() -> Config {
    Config {
        card_count: 6,
        suit_count: 2,
        board_card_count: 1,
        player_count: 2,
        ante: 100,
        stack: 1200,
        resolve_iters: 1000,
        train_count: 100,
        valid_count: 10,
        batch_size: 10,
        data_path: "data/bench-".to_string(),
        value_backend: "terminal_equity".to_string(),
        seed: 0,
    }
}

fn bench_buckets(c: &mut Criterion) {
    let config = bench_config();
    let bucketer = Bucketer::new(&config);
    let board: Board = [3].iter().copied().collect();
    c.bench_function("compute_buckets", |b| {
        b.iter(|| bucketer.compute_buckets(black_box(&board)))
    });
}

fn bench_call_values(c: &mut Criterion) {
    let config = bench_config();
    let board: Board = [3].iter().copied().collect();
    let equity = TerminalEquity::new(&config, &board);
    let mut rng = StdRng::seed_from_u64(0);
    let ranges = sample_ranges(&config, &board, &mut rng, config.batch_size);
    c.bench_function("call_values", |b| {
        b.iter(|| equity.call_values(black_box(ranges.view())))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let config = bench_config();
    let board: Board = [3].iter().copied().collect();
    let equity = TerminalEquity::new(&config, &board);
    let resolver = Resolver::new(&config, &equity);
    let mut rng = StdRng::seed_from_u64(0);
    let r1 = sample_ranges(&config, &board, &mut rng, 1).row(0).to_owned();
    let r2 = sample_ranges(&config, &board, &mut rng, 1).row(0).to_owned();
    c.bench_function("resolve", |b| {
        b.iter(|| resolver.resolve([black_box(r1.view()), black_box(r2.view())], 300.0))
    });
}

criterion_group!(
    name=benches;
    config=Criterion::default().configure_from_args();
    targets=bench_buckets, bench_call_values, bench_resolve
);
criterion_main!(benches);
