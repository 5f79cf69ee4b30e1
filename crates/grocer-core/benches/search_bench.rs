//! # Storefront Benchmarks
//!
//! Performance benchmarks for catalog search and cart updates.
//!
//! Run with: `cargo bench -p grocer-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use grocer_core::{
    CartAction, CartLineItem, CartState, Catalog, Product, ProductId, ZeroQuantityPolicy, fixtures, reduce,
    search,
};
use std::hint::black_box;

/// Repeat the fixture catalog `copies` times with unique ids.
fn scaled_catalog(copies: usize) -> Catalog {
    let products: Vec<Product> = (0..copies)
        .flat_map(|n| {
            fixtures::products().into_iter().map(move |mut p| {
                p.id = ProductId::new(format!("{}-{n}", p.id));
                p
            })
        })
        .collect();
    Catalog::new(fixtures::categories(), products).expect("valid catalog")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for copies in [1, 10, 100].iter() {
        let catalog = scaled_catalog(*copies);

        group.bench_with_input(BenchmarkId::new("name", copies), copies, |b, _| {
            b.iter(|| black_box(search(&catalog, black_box("Bread"))));
        });
        group.bench_with_input(BenchmarkId::new("empty", copies), copies, |b, _| {
            b.iter(|| black_box(search(&catalog, black_box(""))));
        });
    }

    group.finish();
}

fn bench_cart_reduce(c: &mut Criterion) {
    let items: Vec<CartLineItem> = fixtures::products().iter().map(CartLineItem::from).collect();

    c.bench_function("cart_add_200", |b| {
        b.iter(|| {
            let state = (0..200).fold(CartState::new(), |state, i| {
                reduce(
                    state,
                    &CartAction::Add(items[i % items.len()].clone()),
                    ZeroQuantityPolicy::Retain,
                )
            });
            black_box(state.item_count())
        });
    });
}

criterion_group!(benches, bench_search, bench_cart_reduce);
criterion_main!(benches);
