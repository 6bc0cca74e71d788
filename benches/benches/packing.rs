// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quilt_atlas::{AtlasConfig, pack_sprites};
use quilt_benches::sprite_set;
use quilt_packer::RectPacker;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Raw packer throughput on unsorted requests until the canvas fills up.
fn bench_insert_until_full(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let requests: Vec<(u32, u32)> = (0..4096)
        .map(|_| (rng.gen_range(1..=32), rng.gen_range(1..=32)))
        .collect();

    c.bench_function("packer_insert_4096_unsorted", |b| {
        b.iter(|| {
            let mut packer = RectPacker::new(2048, 2048);
            let placed = requests
                .iter()
                .filter(|&&(w, h)| packer.insert(black_box(w), black_box(h)).is_some())
                .count();
            black_box((placed, packer.release()))
        })
    });
}

// Full driver: sort, pad, pack, null quad.
fn bench_pack_sprites(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_sprites");
    for count in [32, 256, 2048] {
        let sprites = sprite_set(count, 24, 42);
        let config = AtlasConfig::new(2048, 2048);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sprites, |b, sprites| {
            b.iter(|| black_box(pack_sprites(&config, sprites).ok()))
        });
    }
    group.finish();
}

// A single thin strip produces the deepest possible tree.
fn bench_degenerate_strip(c: &mut Criterion) {
    c.bench_function("packer_strip_1024", |b| {
        b.iter(|| {
            let mut packer = RectPacker::new(1024, 1);
            for _ in 0..1024 {
                black_box(packer.insert(1, 1));
            }
            black_box(packer.release())
        })
    });
}

criterion_group!(
    benches,
    bench_insert_until_full,
    bench_pack_sprites,
    bench_degenerate_strip
);
criterion_main!(benches);
