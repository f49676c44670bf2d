use beats2bars::{Config, NullSink, beats_to_bars};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Beat lines at ~128 BPM with a small deterministic wobble, Audacity style.
fn beat_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let wobble = ((i * 7919) % 13) as f64 * 0.001;
            let time = i as f64 * 0.46875 + wobble;
            format!("{time}\t{time}\tbeat")
        })
        .collect()
}

fn bench_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_throughput");
    let config = Config::default();

    for count in [1_000usize, 100_000] {
        let lines = beat_lines(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &lines, |b, lines| {
            b.iter(|| {
                let transform = beats_to_bars(lines.iter(), &config, NullSink)
                    .expect("default config is valid");
                black_box(transform.collect_all().expect("generated input parses"))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_labels);
criterion_main!(benches);
