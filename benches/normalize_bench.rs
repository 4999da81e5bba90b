// benches/normalize_bench.rs
// Criterion benchmark for the script normalizer and the rule converter:
//  - Per-case throughput (based on actual input size)
//  - Per-case zero-copy hit rate
//  - Deterministic mixed corpus (canonical, legacy-order and ASCII text)
//  - ICU-free NFC baseline on the same inputs
//
// Run with `cargo bench --bench nb`

#![deny(unsafe_code)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lipyantar::{Converter, MappingRule, Normalizer, default_rules};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::borrow::Cow;
use std::hint::black_box;
use unicode_normalization::UnicodeNormalization;

// ── Corpus generator (deterministic) ──
fn corpus(seed: u64, size_kb: usize, pool: &[&str]) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::with_capacity(size_kb * 1024 + 64);
    while out.len() < size_kb * 1024 {
        out.push_str(pool[rng.random_range(0..pool.len())]);
        out.push(if rng.random_bool(0.1) { '\n' } else { ' ' });
    }
    out
}

const CANONICAL: &[&str] = &["અધિકારી", "કિતાબ", "ગુજરાતી", "નમસ્તે", "આપણે", "ક્ષમા"];
const LEGACY: &[&str] = &["અિધકારી", "િકતાબ", "અાપણે", "ષ્ા", "અેક", "િદવસ"];
const ASCII: &[&str] = &["hello", "world", "sak", "as", "lorem ipsum", "123"];

#[derive(Default)]
struct ZeroCopyTracker {
    hits: usize,
    total: usize,
}

impl ZeroCopyTracker {
    fn record(&mut self, input: &str, output: &Cow<'_, str>) {
        self.total += 1;
        if matches!(output, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()) {
            self.hits += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn hit_rate_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.hits as f64 / self.total as f64) * 100.0
        }
    }
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let canonical = corpus(0xC0FFEE, 256, CANONICAL);
    let legacy = corpus(0xBADC0DE, 256, LEGACY);
    let ascii = corpus(0x5EED, 256, ASCII);
    let normalizer = Normalizer::default();

    for (name, text) in [
        ("canonical", &canonical),
        ("legacy", &legacy),
        ("ascii", &ascii),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        let mut tracker = ZeroCopyTracker::default();

        group.bench_function(format!("lipyantar/{name}"), |b| {
            b.iter(|| {
                let out = normalizer.normalize(black_box(text.as_str()));
                tracker.record(text, &out);
                out
            });
        });
        group.bench_function(format!("nfc baseline/{name}"), |b| {
            b.iter(|| black_box(text.as_str()).nfc().collect::<String>());
        });

        let rate = tracker.hit_rate_pct();
        println!("{name}: ZERO-COPY HIT RATE {rate:.2}% ({}/{})", tracker.hits, tracker.total);
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let text = corpus(0xFEED, 256, ASCII);
    group.throughput(Throughput::Bytes(text.len() as u64));

    let small = Converter::builder().rules(default_rules()).build();
    group.bench_function("3 rules", |b| b.iter(|| small.convert(black_box(text.as_str()))));

    // every rule misses except the last: worst case for the linear scan
    let many: Vec<MappingRule> = ('\u{0100}'..'\u{0200}')
        .map(|c| MappingRule::new(c.to_string(), "ક").unwrap())
        .chain(default_rules())
        .collect();
    let large = Converter::builder().rules(many).build();
    group.bench_function("259 rules", |b| b.iter(|| large.convert(black_box(text.as_str()))));

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_convert);
criterion_main!(benches);
