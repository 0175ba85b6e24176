//! Ordering of products into priority batches ahead of placement.

use crate::config::TieringPolicy;
use crate::structs::Product;
use std::cmp::Ordering;

/// Number of distance batches in [`TieringPolicy::DistanceBatches`].
pub const DISTANCE_BATCHES: usize = 5;

/// A contiguous run of the placement sequence sharing one priority tier.
#[derive(Debug, Clone)]
pub struct Batch {
    pub tier: usize,
    pub products: Vec<Product>,
}

/// Sizes of `n` items split into `batches` contiguous groups, the first
/// `n % batches` groups one larger than the rest.
pub fn batch_sizes(n: usize, batches: usize) -> Vec<usize> {
    let base = n / batches;
    let remainder = n % batches;
    (0..batches)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

fn by_volume_desc(a: &Product, b: &Product) -> Ordering {
    b.padded_volume().total_cmp(&a.padded_volume())
}

/// Band of a fragility index: 0 for [0, 5), 1 for [5, 8), 2 for [8, 10].
pub fn fragility_band(fragility: f64) -> usize {
    if fragility < 5.0 {
        0
    } else if fragility < 8.0 {
        1
    } else {
        2
    }
}

/// Splits `products` into batches under `policy`. All sorts are stable, so
/// ties keep input order.
pub fn schedule(mut products: Vec<Product>, policy: TieringPolicy) -> Vec<Batch> {
    match policy {
        TieringPolicy::DistanceBatches => {
            products.sort_by(|a, b| b.distance.total_cmp(&a.distance));
            let mut rest = products.into_iter();
            batch_sizes(rest.len(), DISTANCE_BATCHES)
                .into_iter()
                .enumerate()
                .map(|(tier, size)| {
                    let mut batch: Vec<Product> = rest.by_ref().take(size).collect();
                    batch.sort_by(by_volume_desc);
                    Batch {
                        tier,
                        products: batch,
                    }
                })
                .collect()
        }
        TieringPolicy::FragilityTiers => {
            let mut bands: [Vec<Product>; 3] = Default::default();
            for p in products {
                bands[fragility_band(p.fragility_index)].push(p);
            }
            bands
                .into_iter()
                .enumerate()
                .map(|(tier, mut band)| {
                    band.sort_by(by_volume_desc);
                    Batch {
                        tier,
                        products: band,
                    }
                })
                .collect()
        }
        TieringPolicy::InputOrder => vec![Batch { tier: 0, products }],
    }
}
