// ABOUTME: Criterion benchmarks for Bencode decoding throughput.
// ABOUTME: Measures a torrent-like dictionary, a flat integer list, and deep nesting.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use bendec::{decode_value, from_slice};

/// Builds a torrent-like document: a dictionary with tracker strings, a
/// nested info dictionary, and a large binary pieces blob.
fn torrent_like(piece_count: usize) -> Vec<u8> {
    let pieces = vec![0xabu8; piece_count * 20];
    let mut data = Vec::new();
    data.extend_from_slice(b"d8:announce30:http://tracker.example.org:80/4:infod6:lengthi481239e4:name8:file.iso12:piece lengthi262144e6:pieces");
    data.extend_from_slice(pieces.len().to_string().as_bytes());
    data.push(b':');
    data.extend_from_slice(&pieces);
    data.extend_from_slice(b"ee");
    data
}

fn integer_list(count: usize) -> Vec<u8> {
    let mut data = Vec::new();
    data.push(b'l');
    for n in 0..count {
        data.extend_from_slice(format!("i{n}e").as_bytes());
    }
    data.push(b'e');
    data
}

fn bench_decode_value(c: &mut Criterion) {
    let torrent = torrent_like(1000);
    let mut group = c.benchmark_group("decode_value");
    group.throughput(Throughput::Bytes(torrent.len() as u64));
    group.bench_function("torrent_like", |b| {
        b.iter(|| decode_value(black_box(&torrent)).unwrap());
    });

    let list = integer_list(10_000);
    group.throughput(Throughput::Bytes(list.len() as u64));
    group.bench_function("integer_list", |b| {
        b.iter(|| decode_value(black_box(&list)).unwrap());
    });
    group.finish();
}

fn bench_serde(c: &mut Criterion) {
    let list = integer_list(10_000);
    let mut group = c.benchmark_group("from_slice");
    group.throughput(Throughput::Bytes(list.len() as u64));
    group.bench_function("vec_i64", |b| {
        b.iter(|| from_slice::<Vec<i64>>(black_box(&list)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_decode_value, bench_serde);
criterion_main!(benches);
