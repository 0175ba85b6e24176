//! Sequential first-fit placement driver.

use crate::batch::{schedule, Batch};
use crate::catalog::FreeSpaceCatalog;
use crate::config::PackingConfig;
use crate::error::{CapacityError, Result};
use crate::preprocess::preprocess_products;
use crate::sink::PackedItemSink;
use crate::structs::{
    PackedItem, PackingMetrics, PackingResult, Product, ProductRecord, Provenance, UnplacedItem,
    Vehicle,
};
use std::time::Instant;

/// Terminal state of one product.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementState {
    Placed { provenance: Provenance },
    Unplaced(CapacityError),
}

/// Holds the mutable state of a single run. Not reusable across runs.
pub struct PlacementEngine {
    vehicle: Vehicle,
    catalog: FreeSpaceCatalog,
    sink: PackedItemSink,
    unplaced: Vec<UnplacedItem>,
}

impl PlacementEngine {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            catalog: FreeSpaceCatalog::new(&vehicle),
            vehicle,
            sink: PackedItemSink::new(),
            unplaced: Vec::new(),
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn catalog(&self) -> &FreeSpaceCatalog {
        &self.catalog
    }

    pub fn sink(&self) -> &PackedItemSink {
        &self.sink
    }

    pub fn unplaced(&self) -> &[UnplacedItem] {
        &self.unplaced
    }

    /// Searches the catalog for `product` and commits the first fit.
    pub fn place(&mut self, product: Product, batch: usize) -> PlacementState {
        let Some(hit) = self.catalog.find(&product) else {
            let padded = product.padded();
            let err = CapacityError::NoFit {
                product_id: product.id.to_string(),
                length: padded.length,
                breadth: padded.breadth,
                height: padded.height,
            };
            log::warn!("{err}");
            self.unplaced.push(UnplacedItem {
                product_id: product.id,
                product_name: product.name,
                reason: err.to_string(),
            });
            return PlacementState::Unplaced(err);
        };

        let source = self.catalog.commit(&hit);
        log::debug!(
            "placed {} at ({:.2}, {:.2}, {:.2}) from {} cuboid, axes {:?}",
            product.id,
            source.origin.x,
            source.origin.y,
            source.origin.z,
            hit.provenance,
            hit.orientation.axes
        );
        self.sink.push(PackedItem {
            product,
            orientation: hit.orientation,
            position: source.origin,
            source,
            batch,
        });
        PlacementState::Placed {
            provenance: hit.provenance,
        }
    }

    /// Places every batch in order.
    pub fn place_batches(&mut self, batches: Vec<Batch>) {
        for batch in batches {
            log::debug!("batch {}: {} products", batch.tier, batch.products.len());
            for product in batch.products {
                self.place(product, batch.tier);
            }
        }
    }

    pub fn into_parts(self) -> (PackedItemSink, Vec<UnplacedItem>) {
        (self.sink, self.unplaced)
    }
}

/// Runs the whole pipeline: validate, pad, schedule, place.
///
/// Any malformed record or vehicle aborts before the first placement.
/// Products that do not fit are reported in [`PackingResult::unplaced`].
pub fn pack_products(
    vehicle: &Vehicle,
    records: &[ProductRecord],
    config: &PackingConfig,
) -> Result<PackingResult> {
    let start = Instant::now();
    config.validate()?;
    vehicle.validate()?;
    let products = preprocess_products(records, &config.padding)?;
    let total = products.len();

    let mut engine = PlacementEngine::new(*vehicle);
    engine.place_batches(schedule(products, config.tiering));
    let (sink, unplaced) = engine.into_parts();

    let packed = sink.into_items();
    let metrics = PackingMetrics::compute(vehicle, &packed, total);
    log::info!(
        "packed {}/{} products, utilization {:.4}, {:?} in {:.3}s",
        metrics.placed_count,
        metrics.total_count,
        metrics.volume_utilization,
        config.tiering,
        start.elapsed().as_secs_f64()
    );

    Ok(PackingResult {
        vehicle: *vehicle,
        policy: config.tiering,
        packed,
        unplaced,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieringPolicy;
    use crate::error::Error;
    use crate::structs::{Dimensions, Position, ProductId};

    fn record(id: i64, side: f64, distance: f64) -> ProductRecord {
        ProductRecord {
            product_id: ProductId::Number(id),
            product_name: format!("cube-{id}"),
            fragility_index: 0.0,
            weight: 0.0,
            length: side,
            breadth: side,
            height: side,
            distance,
        }
    }

    fn vehicle() -> Vehicle {
        Vehicle::new(10.0, 10.0, 10.0).unwrap()
    }

    #[test]
    fn test_single_cube_at_origin() {
        let result = pack_products(&vehicle(), &[record(1, 4.0, 1.0)], &PackingConfig::default())
            .unwrap();
        assert_eq!(result.packed.len(), 1);
        let item = &result.packed[0];
        assert_eq!(item.position, Position::new(0.0, 0.0, 0.0));
        assert_eq!(item.orientation.dims, Dimensions::new(4.0, 4.0, 4.0));
        assert!(result.unplaced.is_empty());
        assert!((result.metrics.volume_utilization - 0.064).abs() < 1e-12);
    }

    #[test]
    fn test_second_large_cube_is_unplaced() {
        let result = pack_products(
            &vehicle(),
            &[record(1, 6.0, 1.0), record(2, 6.0, 1.0)],
            &PackingConfig::default(),
        )
        .unwrap();
        assert_eq!(result.packed.len(), 1);
        assert_eq!(result.packed[0].product.id, ProductId::Number(1));
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].product_id, ProductId::Number(2));
        assert_eq!(result.metrics.placement_ratio, 0.5);
    }

    #[test]
    fn test_place_reports_state() {
        let mut engine = PlacementEngine::new(vehicle());
        let products = preprocess_products(
            &[record(1, 6.0, 0.0), record(2, 6.0, 0.0), record(3, 3.0, 0.0)],
            &PackingConfig::default().padding,
        )
        .unwrap();
        let mut states = products.into_iter().map(|p| engine.place(p, 0));
        assert_eq!(
            states.next(),
            Some(PlacementState::Placed {
                provenance: Provenance::Right
            })
        );
        assert!(matches!(states.next(), Some(PlacementState::Unplaced(_))));
        // 3-cube goes into the Right child (4,10,10) at x = 6
        assert_eq!(
            states.next(),
            Some(PlacementState::Placed {
                provenance: Provenance::Right
            })
        );
        drop(states);
        assert_eq!(engine.sink().items()[1].position, Position::new(6.0, 0.0, 0.0));
        assert_eq!(engine.unplaced().len(), 1);
    }

    #[test]
    fn test_invalid_record_aborts_without_output() {
        let mut bad = record(2, 1.0, 0.0);
        bad.fragility_index = 11.0;
        let err = pack_products(&vehicle(), &[record(1, 1.0, 0.0), bad], &PackingConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_invalid_vehicle_aborts() {
        let v = Vehicle {
            length: -1.0,
            breadth: 1.0,
            height: 1.0,
        };
        assert!(pack_products(&v, &[record(1, 1.0, 0.0)], &PackingConfig::default()).is_err());
    }

    #[test]
    fn test_processing_order_follows_schedule() {
        // far product is placed first even though it comes last
        let records = [record(1, 2.0, 1.0), record(2, 2.0, 50.0)];
        let result = pack_products(&vehicle(), &records, &PackingConfig::default()).unwrap();
        assert_eq!(result.packed[0].product.id, ProductId::Number(2));
        assert_eq!(result.packed[0].position, Position::new(0.0, 0.0, 0.0));

        let config = PackingConfig::default().with_tiering(TieringPolicy::InputOrder);
        let result = pack_products(&vehicle(), &records, &config).unwrap();
        assert_eq!(result.packed[0].product.id, ProductId::Number(1));
    }

    #[test]
    fn test_empty_catalog() {
        let result = pack_products(&vehicle(), &[], &PackingConfig::default()).unwrap();
        assert!(result.packed.is_empty());
        assert_eq!(result.metrics.placement_ratio, 0.0);
    }
}
