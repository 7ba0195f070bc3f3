use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nametag::{TagTable, Tagger};

fn get_test_names() -> Vec<String> {
    vec![
        "maria della rosa",
        "anna van der berg",
        "peter mac donald",
        "j de la cruz",
        "sean o neil",
        "ludwig von beethoven",
        "vd merwe , pieter",
        "st john - smith",
        "abu bakr",
        "karl zu 2",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect::<Vec<_>>()
}

fn name_prefix_table() -> TagTable {
    TagTable::load(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/name_prefix.tbl"))
        .expect("name prefix table should load")
}

fn bench_lookup(c: &mut Criterion) {
    let table = name_prefix_table();
    let tokens = ["della", "dlla", "Mac", "delx", "van  der"];

    c.bench_function("lookup", |b| {
        b.iter(|| {
            for token in tokens {
                black_box(table.lookup(black_box(token)));
            }
        })
    });
}

fn bench_tagger(c: &mut Criterion) {
    let table = name_prefix_table();
    let names = black_box(get_test_names());

    c.bench_function("tag-names", |b| {
        let mut tagger = Tagger::new(&table);
        b.iter(|| {
            names.iter().for_each(|name| {
                black_box(tagger.tag_str(name));
            })
        })
    });
}

criterion_group!(benches, bench_lookup, bench_tagger);
criterion_main!(benches);
