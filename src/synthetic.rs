//! Synthetic product catalogs for stress tests and demos.

use crate::structs::{ProductId, ProductRecord};
use rand::prelude::*;

const NAMES: [&str; 8] = [
    "Carton", "Crate", "Glassware", "Monitor", "Textiles", "Tiles", "Speaker", "Cookware",
];

/// Generator for random, reproducible product catalogs.
#[derive(Debug, Clone)]
pub struct SyntheticCatalog {
    rng: StdRng,
    min_side: f64,
    max_side: f64,
}

impl SyntheticCatalog {
    /// Creates a generator with a random seed.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            min_side: 1.0,
            max_side: 30.0,
        }
    }

    /// Sets the range raw sides are drawn from.
    pub fn with_side_range(mut self, min_side: f64, max_side: f64) -> Self {
        self.min_side = min_side;
        self.max_side = max_side.max(min_side);
        self
    }

    fn side(&mut self) -> f64 {
        let side = if self.max_side > self.min_side {
            (self.rng.gen_range(self.min_side..self.max_side) * 10.0).round() / 10.0
        } else {
            self.min_side
        };
        side.max(0.1)
    }

    /// Generates `count` records with ids `1..=count`.
    pub fn products(&mut self, count: usize) -> Vec<ProductRecord> {
        (1..=count)
            .map(|id| {
                let name = NAMES[self.rng.gen_range(0..NAMES.len())];
                ProductRecord {
                    product_id: ProductId::Number(id as i64),
                    product_name: format!("{name} {id}"),
                    fragility_index: f64::from(self.rng.gen_range(0u8..=10)),
                    weight: (self.rng.gen_range(0.0..50.0_f64) * 10.0).round() / 10.0,
                    length: self.side(),
                    breadth: self.side(),
                    height: self.side(),
                    distance: (self.rng.gen_range(1.0..500.0_f64) * 10.0).round() / 10.0,
                }
            })
            .collect()
    }
}

impl Default for SyntheticCatalog {
    fn default() -> Self {
        Self::new()
    }
}
